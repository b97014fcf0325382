//! File inspection: line, word and byte counts.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use super::CommandContext;

/// Counts reported by the analyze command.
#[derive(Debug, PartialEq, Eq)]
pub struct FileReport {
    pub lines: usize,
    pub words: usize,
    pub bytes: usize,
}

/// Inspect `input` and print a one-line summary.
pub fn run(ctx: &CommandContext, input: &Path) -> Result<()> {
    ctx.logger.info(
        "analyze:start",
        json!({ "input": input.display().to_string() }),
    )?;

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let report = inspect(&content);

    println!(
        "{}: {} lines, {} words, {} bytes",
        input.display(),
        report.lines,
        report.words,
        report.bytes
    );

    ctx.logger.info(
        "analyze:done",
        json!({
            "lines": report.lines,
            "words": report.words,
            "bytes": report.bytes,
        }),
    )?;
    Ok(())
}

fn inspect(content: &str) -> FileReport {
    FileReport {
        lines: content.lines().count(),
        words: content.split_whitespace().count(),
        bytes: content.len(),
    }
}
