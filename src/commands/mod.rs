//! Command bodies.
//!
//! Thin glue around the session logger: each command logs a start and a
//! completion event through the shared [`CommandContext`] and does its small
//! piece of work.

pub mod analyze;
pub mod config;
pub mod convert;
pub mod serve;
pub mod sleep;

use anyhow::Result;

use crate::cli::Commands;
use crate::config::Config;
use crate::logging::SessionLogger;

/// Shared state handed to every command body.
///
/// Owned by `main` and passed by reference, so the one-logger-per-process
/// rule is explicit instead of living in module-level state.
pub struct CommandContext {
    /// The process-wide session logger
    pub logger: SessionLogger,
    /// Loaded tool configuration
    pub config: Config,
}

/// Run the selected command.
pub async fn dispatch(ctx: &CommandContext, command: Commands) -> Result<()> {
    match command {
        Commands::Convert {
            input,
            output,
            format,
        } => convert::run(ctx, &input, output.as_deref(), format),
        Commands::Analyze { input } => analyze::run(ctx, &input),
        Commands::Serve { host, port } => serve::run(ctx, host, port).await,
        Commands::Config { action } => config::run(ctx, action),
        Commands::Sleep { ms } => sleep::run(ctx, ms).await,
    }
}
