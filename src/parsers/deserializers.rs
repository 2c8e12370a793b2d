use chrono::DateTime;
use serde_json::Value;

use crate::models::{Role, TranscriptEntry};

/// Build a [`TranscriptEntry`] from one decoded transcript line
///
/// Returns `None` for lines whose `type` is not `user` or `assistant`
/// (tool-only records, summaries, file snapshots, ...).
pub fn entry_from_value(value: &Value) -> Option<TranscriptEntry> {
    let role = value.get("type").and_then(Value::as_str).and_then(Role::from_entry_type)?;
    Some(TranscriptEntry::new(role, extract_content(value), extract_timestamp(value)))
}

/// Top-level `content`, else the nested `message.content` Claude Code writes, else `""`
fn extract_content(value: &Value) -> Value {
    value
        .get("content")
        .or_else(|| value.get("message").and_then(|m| m.get("content")))
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Timestamp as an ISO-8601 string
///
/// Strings are passed through verbatim; integers are read as epoch milliseconds.
fn extract_timestamp(value: &Value) -> Option<String> {
    match value.get("timestamp")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            let ms = n.as_i64()?;
            DateTime::from_timestamp_millis(ms).map(|ts| ts.to_rfc3339())
        }
        _ => None,
    }
}
