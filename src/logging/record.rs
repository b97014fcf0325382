//! Structured log records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::level::Level;

/// Keys owned by the record itself; colliding caller fields are dropped
/// during normalization so each serialized record carries exactly one value
/// per reserved key.
const RESERVED_KEYS: &[&str] = &["event", "level", "timestamp", "sessionId"];

/// A single structured log record.
///
/// Serializes to one JSON object with the caller's fields flattened alongside
/// the reserved keys, e.g.
/// `{"event":"sleep:start","level":"info","timestamp":"...","sessionId":"XYZ","ms":50}`.
/// Immutable once constructed; produced per emit call and handed to the sinks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Stable event name, e.g. `sleep:start`
    pub event: String,
    /// Severity of this record
    pub level: Level,
    /// Time of emission (RFC 3339)
    pub timestamp: DateTime<Utc>,
    /// Session the record belongs to
    pub session_id: String,
    /// Caller-supplied fields, open set
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LogRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        level: Level,
        event: impl Into<String>,
        session_id: impl Into<String>,
        fields: Value,
    ) -> Self {
        Self {
            event: event.into(),
            level,
            timestamp: Utc::now(),
            session_id: session_id.into(),
            fields: normalize_fields(fields),
        }
    }

    /// Encode as a single newline-terminated JSON line.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// Coerce caller-supplied fields into a flat map.
///
/// Objects pass through minus reserved keys, `null` means no fields, a bare
/// string becomes `{"message": ...}`, and any other value `{"value": ...}`.
fn normalize_fields(fields: Value) -> Map<String, Value> {
    match fields {
        Value::Object(mut map) => {
            map.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));
            map
        }
        Value::Null => Map::new(),
        Value::String(message) => {
            let mut map = Map::new();
            map.insert("message".to_string(), Value::String(message));
            map
        }
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serializes_flat() {
        let record = LogRecord::new(Level::Info, "sleep:start", "XYZ", json!({ "ms": 50 }));
        let value: Value = serde_json::from_str(&record.to_json_line().unwrap()).unwrap();

        assert_eq!(value["event"], "sleep:start");
        assert_eq!(value["level"], "info");
        assert_eq!(value["sessionId"], "XYZ");
        assert_eq!(value["ms"], 50);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_record_line_is_newline_terminated() {
        let record = LogRecord::new(Level::Info, "x", "s", Value::Null);
        let line = record.to_json_line().unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_reserved_keys_are_dropped() {
        let record = LogRecord::new(
            Level::Info,
            "real-event",
            "real-session",
            json!({ "event": "spoofed", "sessionId": "spoofed", "extra": 1 }),
        );
        let value: Value = serde_json::from_str(&record.to_json_line().unwrap()).unwrap();

        assert_eq!(value["event"], "real-event");
        assert_eq!(value["sessionId"], "real-session");
        assert_eq!(value["extra"], 1);
    }

    #[test]
    fn test_null_fields_mean_no_fields() {
        let record = LogRecord::new(Level::Info, "x", "s", Value::Null);
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_string_fields_become_message() {
        let record = LogRecord::new(Level::Info, "x", "s", json!("Woke up"));
        assert_eq!(record.fields["message"], "Woke up");
    }

    #[test]
    fn test_scalar_fields_become_value() {
        let record = LogRecord::new(Level::Info, "x", "s", json!(42));
        assert_eq!(record.fields["value"], 42);
    }
}
