//! Log file retention management.
//!
//! Handles cleanup of old per-session log files based on age.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Result;

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Clean up session log files older than the specified number of days.
///
/// Only files named `{prefix}*.log` inside `log_dir` are considered; an
/// empty prefix matches every `.log` file, which is the normal case for a
/// dedicated session-log directory. Returns the number of files deleted; a
/// missing directory counts as nothing to do.
pub fn cleanup_old_logs(log_dir: &Path, prefix: &str, retention_days: u64) -> Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let retention = Duration::from_secs(retention_days * 24 * 60 * 60);
    let cutoff = SystemTime::now()
        .checked_sub(retention)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut deleted_count = 0;

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if name.starts_with(prefix) && name.ends_with(".log") => {}
            _ => continue,
        }

        // Check file modification time
        if let Ok(metadata) = entry.metadata() {
            if let Ok(modified) = metadata.modified() {
                if modified < cutoff && fs::remove_file(&path).is_ok() {
                    deleted_count += 1;
                }
            }
        }
    }

    Ok(deleted_count)
}
