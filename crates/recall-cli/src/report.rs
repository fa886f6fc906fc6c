use owo_colors::OwoColorize;
use recall_types::{ContentMatch, IndexMatch, MatchRole, collapse_whitespace, truncate_chars};
use std::fmt::Write;

const BANNER_WIDTH: usize = 60;
const PROMPT_PREVIEW_CHARS: usize = 100;

/// Which store a deep scan ran against, for the report header.
#[derive(Debug, Clone, Copy)]
pub enum DeepSource {
    ClaudeCode,
    OpenClaw,
}

impl DeepSource {
    fn label(&self) -> &'static str {
        match self {
            DeepSource::ClaudeCode => "CLAUDE CODE",
            DeepSource::OpenClaw => "OPENCLAW",
        }
    }
}

/// Render the metadata scan report. Color is applied only when requested so
/// piped output stays byte-stable.
pub fn index_report(matches: &[IndexMatch], query: &str, limit: usize, color: bool) -> String {
    let mut out = String::new();
    let sep = "=".repeat(BANNER_WIDTH);
    let shown = &matches[..matches.len().min(limit)];

    let _ = writeln!(out, "{sep}");
    let _ = writeln!(out, "  INDEX SEARCH: \"{query}\"");
    let _ = writeln!(out, "  {}", match_count_line(matches.len(), limit));
    let _ = writeln!(out, "{sep}");
    out.push('\n');

    if shown.is_empty() {
        let _ = writeln!(out, "  No matches found in session metadata.");
        let _ = writeln!(out, "  Tip: Try --deep to search full message content.");
        out.push('\n');
        return out;
    }

    for (i, m) in shown.iter().enumerate() {
        let label = if m.summary.is_empty() {
            "(no summary)"
        } else {
            &m.summary
        };
        let _ = writeln!(out, "  [{}] {}", i + 1, paint_bold(label, color));
        let _ = writeln!(out, "      Project:  {}", collapse_home(&m.project_path));
        if !m.git_branch.is_empty() {
            let _ = writeln!(out, "      Branch:   {}", m.git_branch);
        }
        let _ = writeln!(out, "      Date:     {}", format_date(&m.created));
        let _ = writeln!(out, "      Messages: {}", m.message_count);
        let _ = writeln!(out, "      Matched:  {}", m.matched_field);
        if !m.first_prompt.is_empty() && m.matched_field != "firstPrompt" {
            let preview = truncate_chars(&m.first_prompt, PROMPT_PREVIEW_CHARS);
            let suffix = if m.first_prompt.chars().count() > PROMPT_PREVIEW_CHARS {
                "..."
            } else {
                ""
            };
            let _ = writeln!(out, "      Prompt:   {preview}{suffix}");
        }
        let _ = writeln!(out, "      Session:  {}", paint_yellow(&m.session_id, color));
        out.push('\n');
    }

    let _ = writeln!(out, "{sep}");
    let _ = writeln!(out, "  Tip: Use --deep to search inside message content.");
    let _ = writeln!(out, "{sep}");
    out.push('\n');
    out
}

/// Render the content scan report.
pub fn deep_report(
    matches: &[ContentMatch],
    query: &str,
    limit: usize,
    source: DeepSource,
    color: bool,
) -> String {
    let mut out = String::new();
    let sep = "=".repeat(BANNER_WIDTH);
    let shown = &matches[..matches.len().min(limit)];

    let _ = writeln!(out, "{sep}");
    let _ = writeln!(out, "  DEEP SEARCH ({}): \"{query}\"", source.label());
    let _ = writeln!(out, "  {}", match_count_line(matches.len(), limit));
    let _ = writeln!(out, "{sep}");
    out.push('\n');

    if shown.is_empty() {
        let _ = writeln!(out, "  No matches found in session message content.");
        match source {
            DeepSource::ClaudeCode => {
                let _ = writeln!(out, "  Tip: Try without --deep to search metadata only.");
            }
            DeepSource::OpenClaw => {
                let _ = writeln!(out, "  Tip: Try refining your query.");
            }
        }
        out.push('\n');
        return out;
    }

    for (i, m) in shown.iter().enumerate() {
        let label = m
            .summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(m.first_prompt.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("(no summary)");

        let _ = writeln!(
            out,
            "  [{}] [{}] {}",
            i + 1,
            paint_role(m.role, color),
            paint_bold(label, color)
        );
        let _ = writeln!(out, "      Project:  {}", collapse_home(&m.project_path));
        let _ = writeln!(out, "      Date:     {}", format_date(&m.timestamp));
        let _ = writeln!(out, "      Snippet:  {}", collapse_whitespace(&m.snippet));
        let _ = writeln!(out, "      Session:  {}", paint_yellow(&m.session_id, color));
        out.push('\n');
    }

    let _ = writeln!(out, "{sep}");
    out.push('\n');
    out
}

fn match_count_line(total: usize, limit: usize) -> String {
    if total > limit {
        format!("{total} matches found (showing top {limit})")
    } else {
        format!("{total} matches found")
    }
}

/// `2025-03-01T10:00:00Z` -> `2025-03-01 10:00`. Unparseable values fall back
/// to their first 16 chars, empty to `unknown`.
pub fn format_date(iso_str: &str) -> String {
    if iso_str.is_empty() {
        return "unknown".to_string();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(iso_str) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    // Some writers emit a bare Z suffix on offsets chrono rejects.
    let normalized = iso_str.replace('Z', "+00:00");
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&normalized) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    iso_str.chars().take(16).collect()
}

fn collapse_home(path: &str) -> String {
    if let Some(home) = dirs::home_dir() {
        let home_str = home.to_string_lossy();
        if let Some(rest) = path.strip_prefix(home_str.as_ref()) {
            return format!("~{rest}");
        }
    }
    path.to_string()
}

fn paint_bold(s: &str, color: bool) -> String {
    if color {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

fn paint_yellow(s: &str, color: bool) -> String {
    if color {
        s.yellow().to_string()
    } else {
        s.to_string()
    }
}

fn paint_role(role: MatchRole, color: bool) -> String {
    if !color {
        return role.tag().to_string();
    }
    match role {
        MatchRole::User => role.tag().blue().to_string(),
        MatchRole::Assistant => role.tag().green().to_string(),
    }
}
