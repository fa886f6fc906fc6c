use serde_json::Value;

/// Flatten a message `content` value to searchable text.
///
/// Content is either a plain string or an array of blocks. Text blocks
/// contribute their text; tool results contribute their JSON-stringified
/// content. Other block kinds (images, tool calls) are skipped.
pub fn flatten_content(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => {
            let mut texts = Vec::new();
            for block in blocks {
                match block.get("type").and_then(|t| t.as_str()) {
                    Some("text") => {
                        if let Some(text) = block.get("text").and_then(|t| t.as_str()) {
                            texts.push(text.to_string());
                        }
                    }
                    Some("tool_result") => {
                        if let Some(inner) = block.get("content") {
                            texts.push(inner.to_string());
                        }
                    }
                    _ => {}
                }
            }
            texts.join(" ")
        }
        _ => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string_content() {
        assert_eq!(flatten_content(&json!("fix the build")), "fix the build");
    }

    #[test]
    fn test_block_array_joins_text() {
        let content = json!([
            {"type": "text", "text": "first"},
            {"type": "thinking", "thinking": "hidden"},
            {"type": "text", "text": "second"},
        ]);
        assert_eq!(flatten_content(&content), "first second");
    }

    #[test]
    fn test_tool_result_is_stringified() {
        let content = json!([
            {"type": "tool_result", "content": "exit code 0"},
        ]);
        assert_eq!(flatten_content(&content), "\"exit code 0\"");
    }

    #[test]
    fn test_unknown_blocks_skipped() {
        let content = json!([
            {"type": "image", "source": {"data": "..."}},
        ]);
        assert_eq!(flatten_content(&content), "");
    }
}
