/// A multi-term AND query. Terms are lowercased once at construction; every
/// candidate is checked against the pre-lowered terms.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    terms: Vec<String>,
    terms_lower: Vec<String>,
}

impl Query {
    /// Build a query from CLI words. Words are joined with spaces and
    /// re-split on whitespace; `None` when no terms remain.
    pub fn new(words: &[String]) -> Option<Self> {
        let raw = words.join(" ");
        let terms: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
        if terms.is_empty() {
            return None;
        }
        let terms_lower = terms.iter().map(|t| t.to_lowercase()).collect();
        Some(Query {
            raw,
            terms,
            terms_lower,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn terms_lower(&self) -> &[String] {
        &self.terms_lower
    }

    /// AND semantics: every term must occur in the (already lowercased) text.
    pub fn matches_all(&self, text_lower: &str) -> bool {
        self.terms_lower.iter().all(|t| text_lower.contains(t))
    }
}
