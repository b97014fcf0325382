//! Severity levels shared by the CLI, configuration, and sinks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum-severity level for log records and sinks.
///
/// Ordering is total: `Trace < Debug < Info < Warn < Error < Fatal`. A record
/// is delivered to a sink only if its level is at or above the sink's minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// Get the lowercase name for this level, as it appears in log records
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// Check if records at this level belong on stderr rather than stdout
    pub fn is_alert(&self) -> bool {
        matches!(self, Level::Warn | Level::Error | Level::Fatal)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            other => Err(format!(
                "unknown level '{other}' (expected trace, debug, info, warn, error, or fatal)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("fatal".parse::<Level>().unwrap(), Level::Fatal);
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_is_alert() {
        assert!(!Level::Trace.is_alert());
        assert!(!Level::Debug.is_alert());
        assert!(!Level::Info.is_alert());
        assert!(Level::Warn.is_alert());
        assert!(Level::Error.is_alert());
        assert!(Level::Fatal.is_alert());
    }

    #[test]
    fn test_level_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Level::Error).unwrap(), "\"error\"");
        let parsed: Level = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(parsed, Level::Debug);
    }
}
