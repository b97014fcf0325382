//! The session-scoped logger: one session identity, one sink set, one rebind.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use thiserror::Error;

use super::level::Level;
use super::path::resolve_log_path;
use super::record::LogRecord;
use super::session::SessionBinding;
use super::sink::{build_sinks, Sink};

/// Errors raised by the logging subsystem.
///
/// Both variants are fatal to the invoking command: the subsystem never
/// retries and never degrades to console-only output.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("session logger not initialized; call initialize() first")]
    NotInitialized,
    #[error("log destination unavailable at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Options consumed by [`SessionLogger::initialize`].
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Caller-supplied correlation id; a fresh UUID is used when absent
    pub session: Option<String>,
    /// Minimum severity delivered to both sinks
    pub level: Level,
    /// Directory holding per-session log files
    pub log_dir: PathBuf,
    /// Prefix prepended to the session id in the file name
    pub name_prefix: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            session: None,
            level: Level::Info,
            log_dir: PathBuf::from("logs/session"),
            name_prefix: String::new(),
        }
    }
}

/// Sink set plus the options captured at first initialization.
///
/// The captured options are what a rebind reuses: only the session id (and
/// therefore the file path) can change, once.
struct Active {
    sinks: Vec<Box<dyn Sink>>,
    level: Level,
    log_dir: PathBuf,
    name_prefix: String,
    path: PathBuf,
}

/// Process-wide session logger.
///
/// Constructed once in `main` and passed by reference into command handlers;
/// tests construct independent instances instead of resetting shared state.
/// Two states: uninitialized (only [`session_id`](Self::session_id) is
/// answerable) and initialized (records fan out to the console and the
/// per-session file). The session id may be rebound at most once, by the
/// first post-initialization [`initialize`](Self::initialize) call that
/// supplies a differing id; the binding locks afterwards.
pub struct SessionLogger {
    binding: SessionBinding,
    active: Option<Active>,
}

impl SessionLogger {
    /// Create an uninitialized logger holding a fallback session id.
    pub fn new() -> Self {
        Self {
            binding: SessionBinding::new(),
            active: None,
        }
    }

    /// Whether `initialize` has completed at least once.
    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    /// The session id currently in force (the fallback id before
    /// initialization, the resolved or rebound id after).
    pub fn session_id(&self) -> &str {
        self.binding.current()
    }

    /// The session log file path, once initialized.
    pub fn log_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|active| active.path.as_path())
    }

    /// Initialize the logger, or apply the one-time session rebind.
    ///
    /// The first call adopts the session id, prepares the log file, builds
    /// the sink set and emits the `logger-initialized` bookkeeping event.
    ///
    /// A later call that supplies a differing session id rebinds the session
    /// once: the sinks are rebuilt at the new session's path (level,
    /// directory and prefix stay as first configured) and
    /// `logger-session-updated` is emitted through the new sinks. Every
    /// later call locks the binding; once locked, calls are no-ops.
    pub fn initialize(&mut self, options: InitOptions) -> Result<(), LoggingError> {
        if self.active.is_none() {
            self.binding.adopt(options.session.as_deref());
            let path =
                resolve_log_path(&options.log_dir, &options.name_prefix, self.binding.current())?;
            let sinks = build_sinks(options.level, &path)?;
            let level = options.level;
            self.active = Some(Active {
                sinks,
                level,
                log_dir: options.log_dir,
                name_prefix: options.name_prefix,
                path,
            });
            return self.info("logger-initialized", json!({ "level": level.as_str() }));
        }

        // Already initialized: at most one rebind is ever accepted, and the
        // binding locks on every subsequent call.
        if !self.binding.seal(options.session.as_deref()) {
            return Ok(());
        }

        self.flush()?;
        if let Some(active) = self.active.as_mut() {
            let path =
                resolve_log_path(&active.log_dir, &active.name_prefix, self.binding.current())?;
            active.sinks = build_sinks(active.level, &path)?;
            active.path = path;
        }

        let new_id = self.binding.current().to_string();
        self.info("logger-session-updated", json!({ "newSessionId": new_id }))
    }

    /// Append a record to every sink whose minimum level admits it, in
    /// registration order.
    ///
    /// Fails with [`LoggingError::NotInitialized`] before the first
    /// [`initialize`](Self::initialize). Sink write failures do not abort the
    /// emitting command: the file sink reports the first failure to stderr
    /// and the error is re-raised by [`flush`](Self::flush).
    pub fn emit(&self, level: Level, event: &str, fields: Value) -> Result<(), LoggingError> {
        let active = self.active.as_ref().ok_or(LoggingError::NotInitialized)?;
        let record = LogRecord::new(level, event, self.binding.current(), fields);
        for sink in &active.sinks {
            if level >= sink.min_level() {
                // Failure is reported by the sink and surfaced again on flush.
                let _ = sink.submit(&record);
            }
        }
        Ok(())
    }

    /// Emit at trace level.
    pub fn trace(&self, event: &str, fields: Value) -> Result<(), LoggingError> {
        self.emit(Level::Trace, event, fields)
    }

    /// Emit at debug level.
    pub fn debug(&self, event: &str, fields: Value) -> Result<(), LoggingError> {
        self.emit(Level::Debug, event, fields)
    }

    /// Emit at info level.
    pub fn info(&self, event: &str, fields: Value) -> Result<(), LoggingError> {
        self.emit(Level::Info, event, fields)
    }

    /// Emit at warn level.
    pub fn warn(&self, event: &str, fields: Value) -> Result<(), LoggingError> {
        self.emit(Level::Warn, event, fields)
    }

    /// Emit at error level.
    pub fn error(&self, event: &str, fields: Value) -> Result<(), LoggingError> {
        self.emit(Level::Error, event, fields)
    }

    /// Emit at fatal level.
    pub fn fatal(&self, event: &str, fields: Value) -> Result<(), LoggingError> {
        self.emit(Level::Fatal, event, fields)
    }

    /// Drain buffered records to every sink.
    ///
    /// The explicit shutdown hook: `main` calls this once before process
    /// exit so no buffered record is lost on a normal termination. Errors
    /// held back by the file sink surface here.
    pub fn flush(&self) -> Result<(), LoggingError> {
        let Some(active) = self.active.as_ref() else {
            return Ok(());
        };
        for sink in &active.sinks {
            sink.flush().map_err(|source| LoggingError::Io {
                path: active.path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl Default for SessionLogger {
    fn default() -> Self {
        Self::new()
    }
}
