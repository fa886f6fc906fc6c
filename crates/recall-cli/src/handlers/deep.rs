use crate::args::OutputFormat;
use crate::report::{self, DeepSource};
use anyhow::Result;
use is_terminal::IsTerminal;
use recall_engine::{Query, content};
use recall_types::ContentMatch;
use std::path::Path;

pub fn handle_claude(
    log_root: &Path,
    query: &Query,
    limit: usize,
    project_filter: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let matches = content::search_claude(log_root, query, limit, project_filter)?;
    print_matches(&matches, query, limit, DeepSource::ClaudeCode, format)
}

pub fn handle_openclaw(
    log_root: &Path,
    query: &Query,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let matches = content::search_openclaw(log_root, query, limit)?;
    print_matches(&matches, query, limit, DeepSource::OpenClaw, format)
}

fn print_matches(
    matches: &[ContentMatch],
    query: &Query,
    limit: usize,
    source: DeepSource,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let shown = &matches[..matches.len().min(limit)];
            println!("{}", serde_json::to_string_pretty(shown)?);
        }
        OutputFormat::Plain => {
            let color = std::io::stdout().is_terminal();
            print!(
                "\n{}",
                report::deep_report(matches, query.raw(), limit, source, color)
            );
        }
    }

    Ok(())
}
