//! Output sinks: colorized console and append-only session file.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use console::style;

use super::level::Level;
use super::logger::LoggingError;
use super::record::LogRecord;

/// A destination that accepts structured records at or above a minimum level.
pub trait Sink: Send + Sync {
    /// Minimum severity this sink accepts
    fn min_level(&self) -> Level;

    /// Accept one record; file sinks may buffer (see [`Sink::flush`])
    fn submit(&self, record: &LogRecord) -> io::Result<()>;

    /// Drain buffered records to the underlying destination
    fn flush(&self) -> io::Result<()>;
}

/// Build the fixed sink set for a session: console first, then file.
///
/// Opening the file handle is the only fallible step; an unwritable path
/// surfaces as [`LoggingError::Io`].
pub fn build_sinks(level: Level, path: &Path) -> Result<Vec<Box<dyn Sink>>, LoggingError> {
    let console = ConsoleSink::new(level);
    let file = FileSink::open(level, path)?;
    Ok(vec![Box::new(console), Box::new(file)])
}

/// Human-readable colorized sink writing to stdout/stderr.
///
/// Writes are synchronous; `warn` and above go to stderr, lower levels to
/// stdout. Color is applied by the `console` crate and disabled automatically
/// off-tty.
pub struct ConsoleSink {
    min_level: Level,
}

impl ConsoleSink {
    /// Create a console sink accepting `min_level` and above.
    pub fn new(min_level: Level) -> Self {
        Self { min_level }
    }

    /// Render a record as a single console line.
    pub fn render(record: &LogRecord) -> String {
        let level = match record.level {
            Level::Trace => style("TRACE").dim().to_string(),
            Level::Debug => style("DEBUG").dim().to_string(),
            Level::Info => style(" INFO").green().to_string(),
            Level::Warn => style(" WARN").yellow().to_string(),
            Level::Error => style("ERROR").red().to_string(),
            Level::Fatal => style("FATAL").red().bold().to_string(),
        };

        let mut line = format!(
            "[{}] {} {} ({})",
            style(record.timestamp.format("%H:%M:%S%.3f")).dim(),
            level,
            style(&record.event).bold(),
            style(&record.session_id).cyan(),
        );

        if !record.fields.is_empty() {
            let fields: Vec<String> = record
                .fields
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            line.push(' ');
            line.push_str(&style(fields.join(" ")).dim().to_string());
        }

        line
    }
}

impl Sink for ConsoleSink {
    fn min_level(&self) -> Level {
        self.min_level
    }

    fn submit(&self, record: &LogRecord) -> io::Result<()> {
        let line = Self::render(record);
        if record.level.is_alert() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Append-only newline-delimited JSON sink for the session log file.
///
/// Writes are buffered for throughput; the buffer is drained by
/// [`Sink::flush`], which the logger calls once before process exit. A write
/// failure mid-run is reported to stderr once and re-surfaced by `flush`.
pub struct FileSink {
    min_level: Level,
    path: PathBuf,
    writer: Mutex<BufWriter<std::fs::File>>,
    write_failed: AtomicBool,
}

impl FileSink {
    /// Open `path` for append, creating the file if missing.
    pub fn open(min_level: Level, path: &Path) -> Result<Self, LoggingError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggingError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            min_level,
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
            write_failed: AtomicBool::new(false),
        })
    }

    /// Destination path of this sink.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn min_level(&self) -> Level {
        self.min_level
    }

    fn submit(&self, record: &LogRecord) -> io::Result<()> {
        let line = record
            .to_json_line()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let result = writer.write_all(line.as_bytes());
        if result.is_err() && !self.write_failed.swap(true, Ordering::Relaxed) {
            eprintln!(
                "warning: failed to write session log {}; further records may be lost",
                self.path.display()
            );
        }
        result
    }

    fn flush(&self) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn record(level: Level, event: &str) -> LogRecord {
        LogRecord::new(level, event, "test-session", json!({ "n": 1 }))
    }

    #[test]
    fn test_build_sinks_order_is_console_then_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("s.log");

        let sinks = build_sinks(Level::Info, &path).unwrap();
        assert_eq!(sinks.len(), 2);
        // Only the second sink writes to the file.
        sinks[1].submit(&record(Level::Info, "x")).unwrap();
        sinks[1].flush().unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"x\""));
    }

    #[test]
    fn test_build_sinks_fails_on_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        // The directory itself is not an openable file path.
        let result = build_sinks(Level::Info, temp_dir.path());
        assert!(matches!(result, Err(LoggingError::Io { .. })));
    }

    #[test]
    fn test_file_sink_writes_parseable_json_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("s.log");

        let sink = FileSink::open(Level::Info, &path).unwrap();
        sink.submit(&record(Level::Info, "first")).unwrap();
        sink.submit(&record(Level::Warn, "second")).unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "first");
        assert_eq!(first["sessionId"], "test-session");
        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["event"], "second");
        assert_eq!(second["level"], "warn");
    }

    #[test]
    fn test_file_sink_appends_across_handles() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("s.log");

        let sink = FileSink::open(Level::Info, &path).unwrap();
        sink.submit(&record(Level::Info, "first")).unwrap();
        sink.flush().unwrap();
        drop(sink);

        let sink = FileSink::open(Level::Info, &path).unwrap();
        sink.submit(&record(Level::Info, "second")).unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_console_render_contains_event_and_session() {
        let rendered = ConsoleSink::render(&record(Level::Info, "convert:start"));
        assert!(rendered.contains("convert:start"));
        assert!(rendered.contains("test-session"));
        assert!(rendered.contains("n=1"));
    }
}
