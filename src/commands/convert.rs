//! Document conversion between JSON and TOML.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::ConvertFormat;

use super::CommandContext;

/// Convert `input` to `format`, writing to `output` or stdout.
pub fn run(
    ctx: &CommandContext,
    input: &Path,
    output: Option<&Path>,
    format: ConvertFormat,
) -> Result<()> {
    ctx.logger.info(
        "convert:start",
        json!({
            "input": input.display().to_string(),
            "output": output.map(|p| p.display().to_string()),
            "format": format.as_str(),
        }),
    )?;

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let document = parse_document(input, &content)?;
    let rendered = render_document(&document, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Converted {} -> {}", input.display(), path.display());
        }
        None => print!("{rendered}"),
    }

    ctx.logger
        .info("convert:done", json!({ "bytes": rendered.len() }))?;
    Ok(())
}

/// Parse the input as TOML when it carries a `.toml` extension, JSON
/// otherwise.
fn parse_document(path: &Path, content: &str) -> Result<serde_json::Value> {
    let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");
    if is_toml {
        let value: toml::Value = toml::from_str(content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;
        serde_json::to_value(value).context("Failed to re-encode TOML document")
    } else {
        serde_json::from_str(content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))
    }
}

fn render_document(document: &serde_json::Value, format: ConvertFormat) -> Result<String> {
    match format {
        ConvertFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(document)?;
            rendered.push('\n');
            Ok(rendered)
        }
        ConvertFormat::Toml => {
            let value = toml::Value::try_from(document)
                .context("Document cannot be represented as TOML")?;
            toml::to_string_pretty(&value).context("Failed to render TOML")
        }
    }
}
