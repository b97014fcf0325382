//! Configuration inspection.

use anyhow::{bail, Result};
use serde_json::json;

use crate::cli::ConfigAction;

use super::CommandContext;

/// Print a single configuration value or the whole document.
pub fn run(ctx: &CommandContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let Some(value) = ctx.config.get(&key) else {
                bail!("Unknown config key '{key}'");
            };
            ctx.logger
                .info("config:get", json!({ "key": key, "value": value }))?;
            println!("{key} = {value}");
            Ok(())
        }
        ConfigAction::Show => {
            let rendered = toml::to_string_pretty(&ctx.config)?;
            ctx.logger.info("config:show", serde_json::Value::Null)?;
            print!("{rendered}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use tempfile::TempDir;

    #[test]
    fn test_get_known_key_logs_value() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = test_support::context(temp_dir.path(), "S");

        run(
            &ctx,
            ConfigAction::Get {
                key: "serve_port".to_string(),
            },
        )
        .unwrap();

        let records = test_support::read_records(&ctx, temp_dir.path(), "S");
        let get = records.iter().find(|r| r["event"] == "config:get").unwrap();
        assert_eq!(get["key"], "serve_port");
        assert_eq!(get["value"], 8686);
    }

    #[test]
    fn test_get_unknown_key_fails() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = test_support::context(temp_dir.path(), "S");

        let result = run(
            &ctx,
            ConfigAction::Get {
                key: "nonsense".to_string(),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_show_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = test_support::context(temp_dir.path(), "S");

        run(&ctx, ConfigAction::Show).unwrap();

        let records = test_support::read_records(&ctx, temp_dir.path(), "S");
        assert!(records.iter().any(|r| r["event"] == "config:show"));
    }
}
