use anyhow::{Result, bail};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One parsed line of ripgrep output: `path:line_number:json`.
#[derive(Debug)]
pub struct GrepLine {
    pub path: PathBuf,
    pub line_number: u64,
    pub record: Value,
}

/// Split a ripgrep `--no-heading --line-number` output line on its first two
/// colons and parse the remainder as JSON. Lines that don't fit the shape
/// (stray output, malformed records) are skipped by returning `None`.
pub fn parse_line(line: &str) -> Option<GrepLine> {
    let first_colon = line.find(':')?;
    let path = PathBuf::from(&line[..first_colon]);
    let rest = &line[first_colon + 1..];
    let second_colon = rest.find(':')?;
    let line_number: u64 = rest[..second_colon].parse().ok()?;
    let record = serde_json::from_str(&rest[second_colon + 1..]).ok()?;
    Some(GrepLine {
        path,
        line_number,
        record,
    })
}

/// Whether `rg` can be spawned at all.
pub fn is_available() -> bool {
    Command::new("rg")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Run ripgrep over `search_root` and return its stdout.
///
/// Exit code 1 means "no matches" and is success. Other nonzero codes get a
/// stderr warning but stdout is still returned; partial output beats none
/// when a single unreadable file trips ripgrep late in a scan.
pub fn run(search_root: &Path, pattern: &str, globs: &[&str]) -> Result<String> {
    let mut cmd = Command::new("rg");
    cmd.args(["--no-heading", "--line-number", "--ignore-case"]);
    for glob in globs {
        cmd.args(["--glob", glob]);
    }
    cmd.arg(pattern).arg(search_root);

    let output = match cmd.output() {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            bail!("ripgrep (rg) not found on PATH. Install it to use deep search.")
        }
        Err(e) => bail!("failed to run ripgrep: {e}"),
    };

    if !output.status.success() && output.status.code() != Some(1) {
        eprintln!(
            "WARNING: ripgrep returned unexpected exit code: {:?}",
            output.status.code()
        );
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            eprintln!("{}", recall_types::truncate_chars(stderr.trim_end(), 500));
        }
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_line() {
        let parsed =
            parse_line("/logs/proj/s1.jsonl:42:{\"type\":\"user\",\"sessionId\":\"s1\"}").unwrap();
        assert_eq!(parsed.path, PathBuf::from("/logs/proj/s1.jsonl"));
        assert_eq!(parsed.line_number, 42);
        assert_eq!(parsed.record["type"], "user");
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse_line("just some text").is_none());
        assert!(parse_line("/path/only.jsonl").is_none());
        assert!(parse_line("/path.jsonl:notanumber:{}").is_none());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_line("/path.jsonl:3:{truncated").is_none());
    }

    #[test]
    fn test_json_payload_may_contain_colons() {
        let parsed = parse_line("/p.jsonl:1:{\"timestamp\":\"2025-03-01T10:00:00Z\"}").unwrap();
        assert_eq!(parsed.record["timestamp"], "2025-03-01T10:00:00Z");
    }
}
