use crate::query::Query;
use crate::{MAX_MATCHES_PER_SESSION, ripgrep, snippet};
use anyhow::Result;
use recall_providers::claude::{ClaudeRecord, SessionIndexEntry, build_index_lookup};
use recall_providers::openclaw::{SessionMeta, session_id_from_path};
use recall_types::{ContentMatch, MatchRole, truncate_chars};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const SNIPPET_CONTEXT_CHARS: usize = 80;

/// Narrow a Claude Code deep search to the first project directory whose
/// name contains the filter, or keep the whole root when nothing matches.
fn resolve_search_root(log_root: &Path, project_filter: Option<&str>) -> PathBuf {
    if let Some(filter) = project_filter {
        let filter_lower = filter.to_lowercase();
        if let Ok(entries) = std::fs::read_dir(log_root) {
            for entry in entries.flatten() {
                if entry.path().is_dir()
                    && entry
                        .file_name()
                        .to_string_lossy()
                        .to_lowercase()
                        .contains(&filter_lower)
                {
                    return entry.path();
                }
            }
        }
    }
    log_root.to_path_buf()
}

/// Deep search over Claude Code transcripts.
pub fn search_claude(
    log_root: &Path,
    query: &Query,
    limit: usize,
    project_filter: Option<&str>,
) -> Result<Vec<ContentMatch>> {
    let search_root = resolve_search_root(log_root, project_filter);
    let lookup = build_index_lookup(log_root);

    let stdout = ripgrep::run(
        &search_root,
        query.raw(),
        &["*.jsonl", "!**/subagents/**", "!**/sessions-index.json"],
    )?;

    Ok(collect_claude(stdout.lines(), query, limit, &lookup))
}

/// Deep search over OpenClaw transcripts.
pub fn search_openclaw(log_root: &Path, query: &Query, limit: usize) -> Result<Vec<ContentMatch>> {
    let metadata = recall_providers::openclaw::load_session_metadata(log_root);

    let stdout = ripgrep::run(log_root, query.raw(), &["*.jsonl", "!*.deleted.*"])?;

    Ok(collect_openclaw(stdout.lines(), query, limit, &metadata))
}

/// Turn ripgrep output lines over Claude Code transcripts into ranked-order
/// content matches. Pure over its input so the dedup/cap/verify logic tests
/// without an external binary.
pub fn collect_claude<'a>(
    lines: impl Iterator<Item = &'a str>,
    query: &Query,
    limit: usize,
    index_lookup: &HashMap<String, SessionIndexEntry>,
) -> Vec<ContentMatch> {
    let mut matches = Vec::new();
    let mut seen_sessions: HashMap<String, usize> = HashMap::new();

    for line in lines {
        if matches.len() >= limit {
            break;
        }

        let Some(grep_line) = ripgrep::parse_line(line) else {
            continue;
        };
        let Ok(record) = serde_json::from_value::<ClaudeRecord>(grep_line.record) else {
            continue;
        };
        let (envelope, role) = match &record {
            ClaudeRecord::User(env) => (env, MatchRole::User),
            ClaudeRecord::Assistant(env) => (env, MatchRole::Assistant),
            ClaudeRecord::Unknown => continue,
        };

        let session_id = envelope.session_id.clone();
        let count = seen_sessions.entry(session_id.clone()).or_insert(0);
        if *count >= MAX_MATCHES_PER_SESSION {
            continue;
        }

        let text = record.text();
        if text.is_empty() {
            continue;
        }

        // ripgrep matched the raw JSON line, which includes keys and
        // metadata; only keep records whose human-readable text really
        // contains every term.
        if !query.matches_all(&text.to_lowercase()) {
            continue;
        }

        let index_entry = index_lookup.get(&session_id);
        let project_path = envelope
            .cwd
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| index_entry.map(|e| e.project_path.clone()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        matches.push(ContentMatch {
            session_id,
            project_path,
            role,
            snippet: snippet::extract(&text, query, SNIPPET_CONTEXT_CHARS),
            timestamp: envelope.timestamp.clone(),
            summary: index_entry.map(|e| e.summary.clone()),
            first_prompt: index_entry.map(|e| truncate_chars(&e.first_prompt, 120)),
        });

        *count += 1;
    }

    matches
}

/// OpenClaw counterpart of [`collect_claude`]. Session identity comes from
/// the file name and metadata from the preloaded session headers.
pub fn collect_openclaw<'a>(
    lines: impl Iterator<Item = &'a str>,
    query: &Query,
    limit: usize,
    session_metadata: &HashMap<String, SessionMeta>,
) -> Vec<ContentMatch> {
    use recall_providers::openclaw::OpenClawRecord;

    let mut matches = Vec::new();
    let mut seen_sessions: HashMap<String, usize> = HashMap::new();

    for line in lines {
        if matches.len() >= limit {
            break;
        }

        let Some(grep_line) = ripgrep::parse_line(line) else {
            continue;
        };
        let Ok(OpenClawRecord::Message(record)) =
            serde_json::from_value::<OpenClawRecord>(grep_line.record)
        else {
            continue;
        };

        let session_id = session_id_from_path(&grep_line.path);
        let count = seen_sessions.entry(session_id.clone()).or_insert(0);
        if *count >= MAX_MATCHES_PER_SESSION {
            continue;
        }

        let (role_name, text) = record.role_and_text();
        let Some(role) = MatchRole::from_name(role_name) else {
            continue;
        };
        if text.is_empty() {
            continue;
        }

        if !query.matches_all(&text.to_lowercase()) {
            continue;
        }

        let meta = session_metadata.get(&session_id);
        let timestamp = record
            .timestamp
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| meta.map(|m| m.timestamp.clone()))
            .unwrap_or_default();
        let project_path = meta
            .map(|m| m.cwd.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        matches.push(ContentMatch {
            session_id,
            project_path,
            role,
            snippet: snippet::extract(&text, query, SNIPPET_CONTEXT_CHARS),
            timestamp,
            summary: None,
            first_prompt: None,
        });

        *count += 1;
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(s: &str) -> Query {
        let words: Vec<String> = s.split(' ').map(str::to_string).collect();
        Query::new(&words).unwrap()
    }

    fn claude_line(session: &str, text: &str) -> String {
        format!(
            "/logs/proj/{session}.jsonl:1:{{\"type\":\"user\",\"sessionId\":\"{session}\",\"timestamp\":\"2025-03-01T10:00:00Z\",\"cwd\":\"/home/u/proj\",\"message\":{{\"content\":\"{text}\"}}}}"
        )
    }

    #[test]
    fn test_claude_match_basic() {
        let lines = [claude_line("s1", "how do I rotate the api key")];
        let matches = collect_claude(
            lines.iter().map(String::as_str),
            &query("rotate key"),
            20,
            &HashMap::new(),
        );

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].session_id, "s1");
        assert_eq!(matches[0].role, MatchRole::User);
        assert_eq!(matches[0].project_path, "/home/u/proj");
        assert!(matches[0].snippet.contains("rotate"));
    }

    #[test]
    fn test_per_session_cap() {
        let lines = [
            claude_line("s1", "needle one"),
            claude_line("s1", "needle two"),
            claude_line("s1", "needle three"),
            claude_line("s2", "needle four"),
        ];
        let matches = collect_claude(
            lines.iter().map(String::as_str),
            &query("needle"),
            20,
            &HashMap::new(),
        );

        let s1_count = matches.iter().filter(|m| m.session_id == "s1").count();
        assert_eq!(s1_count, MAX_MATCHES_PER_SESSION);
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_failed_verification_does_not_burn_cap() {
        // ripgrep can match on JSON keys/metadata; such lines must neither
        // appear in results nor count against the session cap.
        let metadata_only =
            "/logs/proj/s1.jsonl:1:{\"type\":\"user\",\"sessionId\":\"s1\",\"needle\":true,\"message\":{\"content\":\"unrelated\"}}"
                .to_string();
        let lines = [
            metadata_only,
            claude_line("s1", "real needle a"),
            claude_line("s1", "real needle b"),
        ];
        let matches = collect_claude(
            lines.iter().map(String::as_str),
            &query("needle"),
            20,
            &HashMap::new(),
        );

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.snippet.contains("real needle")));
    }

    #[test]
    fn test_limit_stops_collection() {
        let lines: Vec<String> = (0..10)
            .map(|i| claude_line(&format!("s{i}"), "needle here"))
            .collect();
        let matches = collect_claude(
            lines.iter().map(String::as_str),
            &query("needle"),
            3,
            &HashMap::new(),
        );
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_non_message_records_skipped() {
        let lines = [
            "/logs/proj/s1.jsonl:1:{\"type\":\"summary\",\"summary\":\"needle in summary\"}"
                .to_string(),
            "not ripgrep output".to_string(),
            claude_line("s2", "needle in message"),
        ];
        let matches = collect_claude(
            lines.iter().map(String::as_str),
            &query("needle"),
            20,
            &HashMap::new(),
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].session_id, "s2");
    }

    #[test]
    fn test_index_lookup_supplies_metadata_and_path_fallback() {
        let mut lookup = HashMap::new();
        lookup.insert(
            "s1".to_string(),
            SessionIndexEntry {
                session_id: "s1".to_string(),
                summary: "Key rotation session".to_string(),
                first_prompt: "rotate the key".to_string(),
                project_path: "/home/u/vault".to_string(),
                ..Default::default()
            },
        );
        // Record without cwd
        let line = "/logs/proj/s1.jsonl:1:{\"type\":\"assistant\",\"sessionId\":\"s1\",\"timestamp\":\"t\",\"message\":{\"content\":\"needle answer\"}}";
        let matches = collect_claude([line].into_iter(), &query("needle"), 20, &lookup);

        assert_eq!(matches[0].project_path, "/home/u/vault");
        assert_eq!(matches[0].summary.as_deref(), Some("Key rotation session"));
        assert_eq!(matches[0].first_prompt.as_deref(), Some("rotate the key"));
        assert_eq!(matches[0].role, MatchRole::Assistant);
    }

    fn openclaw_line(session: &str, role: &str, text: &str) -> String {
        format!(
            "/oc/sessions/{session}.jsonl:2:{{\"type\":\"message\",\"timestamp\":\"2025-04-01T09:00:00Z\",\"message\":{{\"role\":\"{role}\",\"content\":[{{\"type\":\"text\",\"text\":\"{text}\"}}]}}}}"
        )
    }

    #[test]
    fn test_openclaw_match_uses_filename_session_id() {
        let mut meta = HashMap::new();
        meta.insert(
            "oc-1".to_string(),
            SessionMeta {
                cwd: "/home/u/app".to_string(),
                timestamp: "2025-04-01T08:00:00Z".to_string(),
            },
        );
        let lines = [openclaw_line("oc-1", "user", "schedule the audit")];
        let matches =
            collect_openclaw(lines.iter().map(String::as_str), &query("audit"), 20, &meta);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].session_id, "oc-1");
        assert_eq!(matches[0].project_path, "/home/u/app");
        // Record-level timestamp wins over the header's.
        assert_eq!(matches[0].timestamp, "2025-04-01T09:00:00Z");
    }

    #[test]
    fn test_openclaw_unknown_role_skipped() {
        let lines = [openclaw_line("oc-1", "system", "audit reminder")];
        let matches = collect_openclaw(
            lines.iter().map(String::as_str),
            &query("audit"),
            20,
            &HashMap::new(),
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn test_openclaw_missing_metadata_falls_back() {
        let lines = [openclaw_line("oc-9", "assistant", "the audit passed")];
        let matches = collect_openclaw(
            lines.iter().map(String::as_str),
            &query("audit"),
            20,
            &HashMap::new(),
        );
        assert_eq!(matches[0].project_path, "unknown");
        assert_eq!(matches[0].timestamp, "2025-04-01T09:00:00Z");
    }
}
