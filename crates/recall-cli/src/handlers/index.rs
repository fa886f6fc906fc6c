use crate::args::OutputFormat;
use crate::report;
use anyhow::Result;
use is_terminal::IsTerminal;
use recall_engine::{Query, metadata};
use std::path::Path;

pub fn handle(
    log_root: &Path,
    query: &Query,
    limit: usize,
    project_filter: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let matches = metadata::search(log_root, query, project_filter);

    match format {
        OutputFormat::Json => {
            let shown = &matches[..matches.len().min(limit)];
            println!("{}", serde_json::to_string_pretty(shown)?);
        }
        OutputFormat::Plain => {
            let color = std::io::stdout().is_terminal();
            print!(
                "\n{}",
                report::index_report(&matches, query.raw(), limit, color)
            );
        }
    }

    Ok(())
}
