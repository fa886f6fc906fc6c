use serde::Deserialize;
use serde_json::Value;

/// One line of an OpenClaw transcript. The first line is usually a `session`
/// header; conversation turns are `message` records.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
pub enum OpenClawRecord {
    Session(SessionHeader),
    Message(MessageRecord),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub struct SessionHeader {
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageRecord {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub message: Option<MessageBody>,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Value,
}

impl MessageRecord {
    /// Role and flattened text, empty when the record carries no message.
    pub fn role_and_text(&self) -> (&str, String) {
        match &self.message {
            Some(body) => (body.role.as_str(), crate::flatten_content(&body.content)),
            None => ("", String::new()),
        }
    }
}
