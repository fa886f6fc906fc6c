use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::schema::OpenClawRecord;

/// Default OpenClaw log root for an agent: `~/.openclaw/agents/<agent>/sessions`.
pub fn default_sessions_dir(agent: &str) -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home
        .join(".openclaw")
        .join("agents")
        .join(agent)
        .join("sessions"))
}

/// Session metadata pulled from a transcript's header line.
#[derive(Debug, Clone)]
pub struct SessionMeta {
    pub cwd: String,
    pub timestamp: String,
}

/// OpenClaw names transcript files after the session id.
pub fn session_id_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}

/// Preload cwd and start timestamp for every session under the log root by
/// reading only the first line of each transcript. Tombstoned files
/// (`*.deleted.*`) are skipped.
pub fn load_session_metadata(log_root: &Path) -> HashMap<String, SessionMeta> {
    let mut metadata = HashMap::new();

    let Ok(entries) = std::fs::read_dir(log_root) else {
        return metadata;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_none_or(|e| e != "jsonl") {
            continue;
        }
        if path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().contains(".deleted."))
        {
            continue;
        }

        let session_id = session_id_from_path(&path);
        if session_id.is_empty() {
            continue;
        }

        if let Some(meta) = read_header(&path) {
            metadata.insert(session_id, meta);
        }
    }

    metadata
}

fn read_header(path: &Path) -> Option<SessionMeta> {
    let file = std::fs::File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let mut first_line = String::new();
    reader.read_line(&mut first_line).ok()?;

    match serde_json::from_str::<OpenClawRecord>(first_line.trim()) {
        Ok(OpenClawRecord::Session(header)) => Some(SessionMeta {
            cwd: header.cwd.unwrap_or_default(),
            timestamp: header.timestamp.unwrap_or_default(),
        }),
        _ => None,
    }
}
