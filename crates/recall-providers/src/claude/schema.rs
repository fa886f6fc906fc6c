use serde::Deserialize;
use serde_json::Value;

/// A `sessions-index.json` sidecar file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIndex {
    #[serde(default)]
    pub original_path: String,
    #[serde(default)]
    pub entries: Vec<SessionIndexEntry>,
}

/// One session's metadata within an index file. Every field is optional in
/// the wild; absent fields deserialize to empty/zero.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionIndexEntry {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub first_prompt: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub git_branch: String,
    #[serde(default)]
    pub project_path: String,
}

/// One line of a Claude Code transcript. Only user and assistant records are
/// interesting for search; everything else (summaries, file snapshots, tool
/// progress) collapses into `Unknown`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
pub enum ClaudeRecord {
    User(MessageEnvelope),
    Assistant(MessageEnvelope),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEnvelope {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub message: Option<MessageBody>,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub content: Value,
}

impl ClaudeRecord {
    /// Searchable text of the record, empty for non-message records.
    pub fn text(&self) -> String {
        match self {
            ClaudeRecord::User(env) | ClaudeRecord::Assistant(env) => env
                .message
                .as_ref()
                .map(|m| crate::flatten_content(&m.content))
                .unwrap_or_default(),
            ClaudeRecord::Unknown => String::new(),
        }
    }

    pub fn role(&self) -> Option<recall_types::MatchRole> {
        match self {
            ClaudeRecord::User(_) => Some(recall_types::MatchRole::User),
            ClaudeRecord::Assistant(_) => Some(recall_types::MatchRole::Assistant),
            ClaudeRecord::Unknown => None,
        }
    }

    pub fn envelope(&self) -> Option<&MessageEnvelope> {
        match self {
            ClaudeRecord::User(env) | ClaudeRecord::Assistant(env) => Some(env),
            ClaudeRecord::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_with_string_content() {
        let line = r#"{"type":"user","sessionId":"s1","timestamp":"2025-03-01T10:00:00Z","cwd":"/home/u/proj","message":{"role":"user","content":"hello world"}}"#;
        let record: ClaudeRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.role(), Some(recall_types::MatchRole::User));
        assert_eq!(record.text(), "hello world");
        assert_eq!(record.envelope().unwrap().session_id, "s1");
    }

    #[test]
    fn test_assistant_record_with_block_content() {
        let line = r#"{"type":"assistant","sessionId":"s1","timestamp":"2025-03-01T10:00:05Z","message":{"content":[{"type":"text","text":"use kubectl"}]}}"#;
        let record: ClaudeRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.role(), Some(recall_types::MatchRole::Assistant));
        assert_eq!(record.text(), "use kubectl");
    }

    #[test]
    fn test_unknown_record_types_tolerated() {
        let line = r#"{"type":"summary","summary":"A session","leafUuid":"x"}"#;
        let record: ClaudeRecord = serde_json::from_str(line).unwrap();
        assert!(record.role().is_none());
        assert_eq!(record.text(), "");
    }

    #[test]
    fn test_index_entry_defaults() {
        let entry: SessionIndexEntry = serde_json::from_str(r#"{"sessionId":"s9"}"#).unwrap();
        assert_eq!(entry.session_id, "s9");
        assert_eq!(entry.message_count, 0);
        assert!(entry.summary.is_empty());
    }
}
