use crate::MAX_SNIPPET_LEN;
use crate::query::Query;
use crate::score::score_entry;
use recall_providers::claude::{discover_index_files, load_index};
use recall_types::{IndexMatch, truncate_chars};
use std::path::Path;

/// The metadata pipeline: walk every index file under the log root, score
/// entries against the query, and rank the survivors.
///
/// Ranking is score descending, ties broken by the raw `modified` timestamp
/// descending (RFC 3339 strings order correctly under lexical compare).
pub fn search(log_root: &Path, query: &Query, project_filter: Option<&str>) -> Vec<IndexMatch> {
    let mut matches = Vec::new();

    for index_path in discover_index_files(log_root) {
        let (original_path, entries) = load_index(&index_path);

        if let Some(filter) = project_filter
            && !original_path.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        for entry in &entries {
            let Some((score, matched_field)) = score_entry(entry, query) else {
                continue;
            };

            matches.push(IndexMatch {
                session_id: entry.session_id.clone(),
                project_path: if entry.project_path.is_empty() {
                    original_path.clone()
                } else {
                    entry.project_path.clone()
                },
                first_prompt: truncate_chars(&entry.first_prompt, MAX_SNIPPET_LEN),
                summary: entry.summary.clone(),
                git_branch: entry.git_branch.clone(),
                created: entry.created.clone(),
                modified: entry.modified.clone(),
                message_count: entry.message_count,
                matched_field: matched_field.to_string(),
                score,
            });
        }
    }

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.modified.cmp(&a.modified))
    });

    matches
}
