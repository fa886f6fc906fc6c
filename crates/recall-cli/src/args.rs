use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "recall")]
#[command(about = "Search your local AI agent session history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Search query (words are ANDed together)
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Search full message content (slower)
    #[arg(long)]
    pub deep: bool,

    /// Search OpenClaw sessions instead of Claude Code
    #[arg(long)]
    pub openclaw: bool,

    /// OpenClaw agent to search
    #[arg(long, default_value = "main")]
    pub agent: String,

    /// Maximum results to show
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Filter to sessions from projects matching this substring
    #[arg(long)]
    pub project: Option<String>,

    #[arg(long, default_value = "plain")]
    pub format: OutputFormat,

    /// Override the Claude Code log root (default: ~/.claude/projects)
    #[arg(long)]
    pub claude_root: Option<String>,

    /// Override the OpenClaw log root (default: ~/.openclaw/agents/<agent>/sessions)
    #[arg(long)]
    pub openclaw_root: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}
