mod matches;
mod util;

pub use matches::*;
pub use util::*;
