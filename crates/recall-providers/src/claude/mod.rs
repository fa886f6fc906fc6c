mod index;
mod schema;

pub use index::{build_index_lookup, default_projects_dir, discover_index_files, load_index};
pub use schema::{ClaudeRecord, MessageEnvelope, SessionIndex, SessionIndexEntry};
