use crate::MAX_SNIPPET_LEN;
use crate::query::Query;
use recall_types::{ceil_char_boundary, floor_char_boundary, truncate_chars};

/// Excerpt of `text` around the first query occurrence.
///
/// Prefers the whole query phrase; falls back to the first individual term
/// that occurs, then to the head of the text. Context is clamped to UTF-8
/// char boundaries and clipped ends are marked with `...`.
pub fn extract(text: &str, query: &Query, context_chars: usize) -> String {
    let text_lower = text.to_lowercase();
    let query_lower = query.raw().to_lowercase();

    let mut idx = text_lower.find(&query_lower);
    if idx.is_none() {
        for term in query.terms_lower() {
            idx = text_lower.find(term);
            if idx.is_some() {
                break;
            }
        }
    }

    let Some(idx) = idx else {
        return truncate_chars(text, MAX_SNIPPET_LEN);
    };

    // Byte offsets in the lowered text can drift from the original when
    // lowercasing changes character widths; clamp to boundaries of the
    // original before slicing.
    let start = floor_char_boundary(text, idx.saturating_sub(context_chars));
    let end = ceil_char_boundary(text, (idx + query.raw().len() + context_chars).min(text.len()));
    let start = start.min(end);

    let mut result = String::new();
    if start > 0 {
        result.push_str("...");
    }
    result.push_str(&text[start..end]);
    if end < text.len() {
        result.push_str("...");
    }
    result
}
