use crate::args::Cli;
use crate::config::Config;
use crate::handlers;
use anyhow::{Result, bail};
use recall_engine::Query;
use std::path::{Path, PathBuf};

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    let Some(query) = Query::new(&cli.query) else {
        bail!("no search query provided");
    };

    if cli.openclaw {
        // OpenClaw has no index files, so the content pipeline is the only one.
        if !cli.deep {
            eprintln!("NOTE: OpenClaw mode uses deep search by default (no index files).");
        }

        let root = resolve_root(
            cli.openclaw_root.as_deref(),
            config.openclaw_root.as_deref(),
            || recall_providers::openclaw::default_sessions_dir(&cli.agent),
        )?;
        ensure_store_root(&root, "OpenClaw sessions")?;

        handlers::deep::handle_openclaw(&root, &query, cli.limit, cli.format)
    } else {
        let root = resolve_root(
            cli.claude_root.as_deref(),
            config.claude_root.as_deref(),
            recall_providers::claude::default_projects_dir,
        )?;
        ensure_store_root(&root, "Claude projects")?;

        if cli.deep {
            handlers::deep::handle_claude(
                &root,
                &query,
                cli.limit,
                cli.project.as_deref(),
                cli.format,
            )
        } else {
            handlers::index::handle(&root, &query, cli.limit, cli.project.as_deref(), cli.format)
        }
    }
}

/// CLI flag beats config file beats the store's built-in default.
fn resolve_root(
    flag: Option<&str>,
    configured: Option<&str>,
    default: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    match flag.or(configured) {
        Some(path) => Ok(expand_tilde(path)),
        None => default(),
    }
}

fn ensure_store_root(root: &Path, what: &str) -> Result<()> {
    if !root.is_dir() {
        bail!("{what} directory not found: {}", root.display());
    }
    Ok(())
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}
