//! Timed wait, exercising the logger around an await point.

use std::time::Duration;

use anyhow::Result;
use serde_json::json;

use super::CommandContext;

/// Sleep for `ms` milliseconds, logging start and completion.
pub async fn run(ctx: &CommandContext, ms: u64) -> Result<()> {
    ctx.logger.info("sleep:start", json!({ "ms": ms }))?;
    tokio::time::sleep(Duration::from_millis(ms)).await;
    ctx.logger.info("sleep:done", json!({ "ms": ms }))?;
    println!("Done sleeping.");
    Ok(())
}
