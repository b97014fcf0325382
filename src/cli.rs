//! Command-line surface for Logbook

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::logging::Level;

/// Top-level CLI interface
#[derive(Debug, Parser)]
#[command(
    name = "logbook",
    version,
    about = "Command-line toolbox with session-correlated structured logging"
)]
pub struct Cli {
    /// Session id correlating all log records of this run
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Minimum severity delivered to the console and the session log file
    #[arg(long, global = true)]
    pub level: Option<Level>,

    /// Directory for per-session log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Prefix prepended to the session id in the log file name
    #[arg(long, global = true)]
    pub name_prefix: Option<String>,

    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Floor the effective log level at debug
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a document between JSON and TOML
    Convert {
        /// Input file
        input: PathBuf,

        /// Output file (stdout when omitted)
        output: Option<PathBuf>,

        /// Target format
        #[arg(short, long, value_enum, default_value_t = ConvertFormat::Json)]
        format: ConvertFormat,
    },

    /// Report line, word and byte counts for a file
    Analyze {
        /// File to inspect
        input: PathBuf,
    },

    /// Serve the HTTP status API
    Serve {
        /// Host/IP to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
    },

    /// Inspect the tool's configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Sleep for N milliseconds, logging start and completion
    Sleep {
        /// Delay in milliseconds
        ms: u64,
    },
}

/// Target format for the convert command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConvertFormat {
    Json,
    Toml,
}

impl ConvertFormat {
    /// Get the format name as it appears in log records
    pub fn as_str(&self) -> &'static str {
        match self {
            ConvertFormat::Json => "json",
            ConvertFormat::Toml => "toml",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Fetch a single configuration value
    Get {
        /// Configuration key, e.g. "log_dir"
        key: String,
    },

    /// Print the whole configuration document
    Show,
}
