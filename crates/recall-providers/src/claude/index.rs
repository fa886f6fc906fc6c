use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::schema::{SessionIndex, SessionIndexEntry};

/// Default Claude Code log root: `~/.claude/projects`.
pub fn default_projects_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".claude").join("projects"))
}

/// Find every `sessions-index.json` one level below the log root, sorted by
/// path so output ordering is stable across runs.
pub fn discover_index_files(log_root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(log_root)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == "sessions-index.json")
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Load one index file, returning its original project path and entries.
///
/// Unreadable or malformed files yield an empty entry list; a broken index
/// must never abort the scan. When the index omits `originalPath`, the
/// parent directory name stands in.
pub fn load_index(path: &Path) -> (String, Vec<SessionIndexEntry>) {
    let fallback = || {
        path.parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    };

    let Ok(data) = std::fs::read_to_string(path) else {
        return (fallback(), Vec::new());
    };
    let Ok(index) = serde_json::from_str::<SessionIndex>(&data) else {
        return (fallback(), Vec::new());
    };

    let original_path = if index.original_path.is_empty() {
        fallback()
    } else {
        index.original_path
    };
    (original_path, index.entries)
}

/// Build a sessionId -> index entry map across every index file, for joining
/// content matches back to their metadata.
pub fn build_index_lookup(log_root: &Path) -> HashMap<String, SessionIndexEntry> {
    let mut lookup = HashMap::new();
    for index_path in discover_index_files(log_root) {
        let (_, entries) = load_index(&index_path);
        for entry in entries {
            if !entry.session_id.is_empty() {
                lookup.insert(entry.session_id.clone(), entry);
            }
        }
    }
    lookup
}
