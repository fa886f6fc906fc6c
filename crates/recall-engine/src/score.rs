use crate::query::Query;
use recall_providers::claude::SessionIndexEntry;

/// Weighted score of an index entry against a query, with the name of the
/// highest-weighted field that matched.
///
/// Every term must appear in at least one field; a term found in several
/// fields adds each field's weight. Summaries weigh most, then the first
/// prompt, then branch and project path.
pub fn score_entry(entry: &SessionIndexEntry, query: &Query) -> Option<(f64, &'static str)> {
    let fields: [(&'static str, &str, f64); 4] = [
        ("summary", &entry.summary, 3.0),
        ("firstPrompt", &entry.first_prompt, 2.0),
        ("gitBranch", &entry.git_branch, 1.0),
        ("projectPath", &entry.project_path, 1.0),
    ];

    let mut total_score = 0.0;
    let mut best_field = "";
    let mut best_field_weight = 0.0;

    for term in query.terms_lower() {
        let mut term_found = false;

        for (field_name, field_value, weight) in fields {
            if field_value.to_lowercase().contains(term) {
                term_found = true;
                total_score += weight;
                if weight > best_field_weight {
                    best_field_weight = weight;
                    best_field = field_name;
                }
            }
        }

        if !term_found {
            return None;
        }
    }

    Some((total_score, best_field))
}
