use anyhow::Result;
use clap::Parser;
use serde_json::json;

use logbook::cli::Cli;
use logbook::commands::{self, CommandContext};
use logbook::config::Config;
use logbook::logging::{cleanup_old_logs, InitOptions, Level, SessionLogger};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // CLI flags win over the config file, which wins over built-in defaults.
    let mut level = cli.level.unwrap_or(config.level);
    if cli.verbose && level > Level::Debug {
        level = Level::Debug;
    }
    let log_dir = cli.log_dir.clone().unwrap_or_else(|| config.log_dir.clone());
    let name_prefix = cli
        .name_prefix
        .clone()
        .unwrap_or_else(|| config.name_prefix.clone());

    // Initialize logging BEFORE running any command body; a failure here
    // aborts the command, since every command path logs at least once.
    let mut logger = SessionLogger::new();
    logger.initialize(InitOptions {
        session: cli.session.clone(),
        level,
        log_dir: log_dir.clone(),
        name_prefix: name_prefix.clone(),
    })?;

    if let Ok(count) = cleanup_old_logs(&log_dir, &name_prefix, config.retention_days) {
        if count > 0 {
            logger.debug("logs-pruned", json!({ "removed": count }))?;
        }
    }

    logger.info(
        "cli-start",
        json!({ "args": std::env::args().skip(1).collect::<Vec<_>>() }),
    )?;
    if cli.verbose {
        if let Some(path) = logger.log_path() {
            println!(
                "[debug] session {} logging to {}",
                logger.session_id(),
                path.display()
            );
        }
    }

    let ctx = CommandContext { logger, config };
    let result = commands::dispatch(&ctx, cli.command).await;

    if let Err(error) = &result {
        // Best effort; the command error itself is the one worth returning.
        let _ = ctx
            .logger
            .error("command-failed", json!({ "error": format!("{error:#}") }));
    }
    ctx.logger.flush()?;
    result
}
