//! Session-scoped structured logging.
//!
//! Establishes one logical session identity per process invocation, binds a
//! console + file sink pair to it, and emits newline-delimited structured
//! records correlated by session id. The session id may be rebound at most
//! once after initialization; the binding then locks for the process
//! lifetime.

mod level;
mod logger;
mod path;
mod record;
mod retention;
mod session;
mod sink;

pub use level::Level;
pub use logger::{InitOptions, LoggingError, SessionLogger};
pub use path::resolve_log_path;
pub use record::LogRecord;
pub use retention::{cleanup_old_logs, DEFAULT_RETENTION_DAYS};
pub use session::{resolve_session_id, SessionBinding};
pub use sink::{build_sinks, ConsoleSink, FileSink, Sink};
