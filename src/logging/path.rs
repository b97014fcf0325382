//! Log file destination resolution.

use std::fs;
use std::path::{Path, PathBuf};

use super::logger::LoggingError;

/// Map (directory, prefix, session id) to the session's log file path.
///
/// Creates `log_dir` recursively if it does not exist; the call is idempotent
/// when the directory is already present. Fails with [`LoggingError::Io`]
/// when the directory cannot be created.
pub fn resolve_log_path(
    log_dir: &Path,
    prefix: &str,
    session_id: &str,
) -> Result<PathBuf, LoggingError> {
    fs::create_dir_all(log_dir).map_err(|source| LoggingError::Io {
        path: log_dir.to_path_buf(),
        source,
    })?;
    Ok(log_dir.join(format!("{prefix}{session_id}.log")))
}
