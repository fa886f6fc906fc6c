use serde::Serialize;

/// A hit from the metadata index pipeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMatch {
    pub session_id: String,
    pub project_path: String,
    pub first_prompt: String,
    pub summary: String,
    pub git_branch: String,
    pub created: String,
    pub modified: String,
    pub message_count: u64,
    /// Highest-weighted index field that matched a query term.
    pub matched_field: String,
    pub score: f64,
}

/// A hit from the full-text content pipeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMatch {
    pub session_id: String,
    pub project_path: String,
    pub role: MatchRole,
    pub snippet: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_prompt: Option<String>,
}

/// Who authored the matched message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchRole {
    User,
    Assistant,
}

impl MatchRole {
    /// Short display tag used in result listings.
    pub fn tag(&self) -> &'static str {
        match self {
            MatchRole::User => "USER",
            MatchRole::Assistant => "ASST",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "user" => Some(MatchRole::User),
            "assistant" => Some(MatchRole::Assistant),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_name() {
        assert_eq!(MatchRole::from_name("user"), Some(MatchRole::User));
        assert_eq!(MatchRole::from_name("assistant"), Some(MatchRole::Assistant));
        assert_eq!(MatchRole::from_name("system"), None);
        assert_eq!(MatchRole::from_name(""), None);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&MatchRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_content_match_skips_empty_metadata() {
        let m = ContentMatch {
            session_id: "abc".to_string(),
            project_path: "/tmp/p".to_string(),
            role: MatchRole::User,
            snippet: "hello".to_string(),
            timestamp: String::new(),
            summary: None,
            first_prompt: None,
        };
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("summary"));
        assert!(!json.contains("firstPrompt"));
    }
}
