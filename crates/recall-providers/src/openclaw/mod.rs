mod schema;
mod sessions;

pub use schema::{MessageRecord, OpenClawRecord, SessionHeader};
pub use sessions::{
    SessionMeta, default_sessions_dir, load_session_metadata, session_id_from_path,
};
