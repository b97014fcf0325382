//! Configuration management for Logbook

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::{Level, DEFAULT_RETENTION_DAYS};

/// Application configuration
///
/// Every field has a default, so a missing or partial configuration file is
/// fine. CLI flags override these values (see `main`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for per-session log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Minimum severity delivered to the console and the session log file
    #[serde(default = "default_level")]
    pub level: Level,

    /// Prefix prepended to the session id in log file names
    #[serde(default)]
    pub name_prefix: String,

    /// Session log retention in days (default: 7)
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,

    /// Host the serve command binds (default: 127.0.0.1)
    #[serde(default = "default_serve_host")]
    pub serve_host: String,

    /// Port the serve command binds (default: 8686)
    #[serde(default = "default_serve_port")]
    pub serve_port: u16,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs/session")
}

fn default_level() -> Level {
    Level::Info
}

fn default_retention_days() -> u64 {
    DEFAULT_RETENTION_DAYS
}

fn default_serve_host() -> String {
    "127.0.0.1".to_string()
}

fn default_serve_port() -> u16 {
    8686
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            level: default_level(),
            name_prefix: String::new(),
            retention_days: default_retention_days(),
            serve_host: default_serve_host(),
            serve_port: default_serve_port(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location when
    /// `path` is `None`. A missing file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Look up a single value by key, for `config get`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let value = serde_json::to_value(self).ok()?;
        value.get(key).cloned()
    }
}

/// Get the base configuration directory (~/.logbook)
/// Falls back to ./.logbook if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".logbook"))
        .unwrap_or_else(|| PathBuf::from(".logbook"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
