use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tracing::{debug, warn};

use super::deserializers::entry_from_value;
use crate::error::TranscriptError;
use crate::models::MessageWindow;

/// Parse a session transcript, keeping the last `limit` user/assistant entries
///
/// Entries come back oldest first. A missing or empty file yields an empty window.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if it has complete
/// lines but no line at all (the unterminated tail included) is valid JSON.
pub fn parse_transcript(path: &Path, limit: usize) -> Result<MessageWindow, TranscriptError> {
    let never = AtomicBool::new(false);
    parse_transcript_with_cancel(path, limit, &never)
}

/// Same as [`parse_transcript`], but stops with [`TranscriptError::Cancelled`]
/// once `cancel` is raised
pub fn parse_transcript_with_cancel(
    path: &Path,
    limit: usize,
    cancel: &AtomicBool,
) -> Result<MessageWindow, TranscriptError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Transcript vanished before it could be opened");
            return Ok(MessageWindow::new(limit));
        }
        Err(source) => {
            return Err(TranscriptError::Unreadable { path: path.to_path_buf(), source });
        }
    };

    let mut reader = BufReader::new(file);
    let mut window = MessageWindow::new(limit);
    let mut line = Vec::new();
    let mut line_num = 0usize;
    let mut complete_lines = 0usize;
    let mut decoded_lines = 0usize;
    let mut skipped_count = 0usize;

    loop {
        if cancel.load(Ordering::Relaxed) {
            return Err(TranscriptError::Cancelled { path: path.to_path_buf() });
        }

        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| TranscriptError::Unreadable { path: path.to_path_buf(), source })?;
        if read == 0 {
            break;
        }
        line_num += 1;

        // No trailing newline means the writer may still be appending to this line
        let complete = line.ends_with(b"\n");
        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }
        if complete {
            complete_lines += 1;
        }

        let value = match serde_json::from_slice::<Value>(trimmed) {
            Ok(value) => value,
            Err(e) if complete => {
                debug!(path = %path.display(), line = line_num, error = %e, "Skipping malformed transcript line");
                skipped_count += 1;
                continue;
            }
            Err(_) => {
                debug!(path = %path.display(), line = line_num, "Skipping partially written final line");
                continue;
            }
        };
        decoded_lines += 1;

        // Non-conversation records (summaries, snapshots, system events) are dropped
        if let Some(entry) = entry_from_value(&value) {
            window.push(entry);
        }
    }

    if complete_lines > 0 && decoded_lines == 0 {
        return Err(TranscriptError::Corrupt { path: path.to_path_buf(), lines: complete_lines });
    }

    if skipped_count > 0 {
        warn!(
            path = %path.display(),
            kept = window.len(),
            skipped = skipped_count,
            "Parsed transcript with malformed lines"
        );
    }

    Ok(window)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::models::Role;

    /// Helper to create a temporary test file with given content
    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn numbered_lines(count: usize) -> String {
        (1..=count)
            .map(|n| format!(r#"{{"type":"user","content":"msg {}"}}"#, n) + "\n")
            .collect()
    }

    #[test]
    fn test_parse_user_and_assistant_entries() {
        let content = r#"{"type":"user","content":"hi","timestamp":"2024-01-01T00:00:00Z"}
{"type":"assistant","content":[{"type":"text","text":"hello"}]}
"#;
        let file = create_test_file(content.as_bytes());
        let window = parse_transcript(file.path(), 100).unwrap();

        let entries = window.into_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[0].timestamp.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(entries[1].role, Role::Assistant);
        assert_eq!(entries[1].content, json!([{"type": "text", "text": "hello"}]));
        assert_eq!(entries[1].timestamp, None);
    }

    #[test]
    fn test_parse_keeps_last_entries() {
        let file = create_test_file(numbered_lines(10).as_bytes());
        let entries = parse_transcript(file.path(), 3).unwrap().into_entries();

        let contents: Vec<_> = entries.into_iter().map(|e| e.content).collect();
        assert_eq!(contents, vec![json!("msg 8"), json!("msg 9"), json!("msg 10")]);
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let content = "{\"type\":\"user\",\"content\":\"a\"}\nnot json at all\n{\"type\":\"assistant\",\"content\":\"b\"}\n{broken\n";
        let file = create_test_file(content.as_bytes());
        let entries = parse_transcript(file.path(), 100).unwrap().into_entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, json!("a"));
        assert_eq!(entries[1].content, json!("b"));
    }

    #[test]
    fn test_parse_discards_other_entry_types() {
        let content = r#"{"type":"user","content":"question"}
{"type":"file-history-snapshot","messageId":"61b36c7f","snapshot":{}}
{"type":"summary","summary":"Fix a bug"}
{"type":"system","content":"hook ran"}
{"type":"assistant","content":"answer"}
"#;
        let file = create_test_file(content.as_bytes());
        let entries = parse_transcript(file.path(), 100).unwrap().into_entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[1].role, Role::Assistant);
    }

    #[test]
    fn test_parse_partial_final_line_is_ignored() {
        let content = "{\"type\":\"user\",\"content\":\"done\"}\n{\"type\":\"assistant\",\"con";
        let file = create_test_file(content.as_bytes());
        let entries = parse_transcript(file.path(), 100).unwrap().into_entries();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, json!("done"));
    }

    #[test]
    fn test_parse_final_line_without_newline_is_accepted() {
        let content = "{\"type\":\"user\",\"content\":\"a\"}\n{\"type\":\"assistant\",\"content\":\"b\"}";
        let file = create_test_file(content.as_bytes());
        let entries = parse_transcript(file.path(), 100).unwrap().into_entries();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_parse_only_partial_line_is_empty_not_corrupt() {
        let file = create_test_file(b"{\"type\":\"user\",\"cont");
        let window = parse_transcript(file.path(), 100).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn test_parse_valid_unterminated_line_after_garbage() {
        let content = "not json at all\n{\"type\":\"user\",\"content\":\"live\"}";
        let file = create_test_file(content.as_bytes());
        let entries = parse_transcript(file.path(), 100).unwrap().into_entries();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, json!("live"));
    }

    #[test]
    fn test_parse_empty_file() {
        let file = create_test_file(b"");
        let window = parse_transcript(file.path(), 100).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn test_parse_missing_file_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let window = parse_transcript(&dir.path().join("missing.jsonl"), 100).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn test_parse_binary_file_is_corrupt() {
        let file = create_test_file(&[0xff, 0xfe, 0x00, 0x12, b'\n', 0x89, b'P', b'N', b'G', b'\n']);
        let result = parse_transcript(file.path(), 100);
        assert!(matches!(result, Err(TranscriptError::Corrupt { lines: 2, .. })));
    }

    #[test]
    fn test_parse_valid_json_without_conversation_is_not_corrupt() {
        let file = create_test_file(b"{\"type\":\"summary\"}\n[1,2,3]\n");
        let window = parse_transcript(file.path(), 100).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let content = "{\"type\":\"user\",\"content\":\"a\"}\r\n{\"type\":\"assistant\",\"content\":\"b\"}\r\n";
        let file = create_test_file(content.as_bytes());
        let entries = parse_transcript(file.path(), 100).unwrap().into_entries();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_parse_zero_limit() {
        let file = create_test_file(numbered_lines(5).as_bytes());
        let window = parse_transcript(file.path(), 0).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn test_parse_cancelled() {
        let file = create_test_file(numbered_lines(5).as_bytes());
        let cancel = AtomicBool::new(true);
        let result = parse_transcript_with_cancel(file.path(), 100, &cancel);
        assert!(matches!(result, Err(TranscriptError::Cancelled { .. })));
    }

    #[test]
    #[cfg(unix)]
    fn test_parse_unreadable_file() {
        use std::os::unix::fs::PermissionsExt;

        let file = create_test_file(numbered_lines(1).as_bytes());
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores file permissions
        if std::fs::File::open(file.path()).is_ok() {
            return;
        }

        let result = parse_transcript(file.path(), 100);
        assert!(matches!(result, Err(TranscriptError::Unreadable { .. })));
    }
}
