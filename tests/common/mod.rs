//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder for creating test `~/.claude/projects` directory structures
pub struct ProjectsDirBuilder {
    temp_dir: TempDir,
}

impl ProjectsDirBuilder {
    /// Create a new builder with an empty projects root
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the projects root
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a transcript file under the given project directory name
    pub fn with_transcript(self, project_dir: &str, session_id: &str, content: &str) -> Self {
        self.with_raw_transcript(project_dir, session_id, content.as_bytes())
    }

    /// Add a transcript file with arbitrary bytes
    pub fn with_raw_transcript(self, project_dir: &str, session_id: &str, content: &[u8]) -> Self {
        let dir = self.temp_dir.path().join(project_dir);
        fs::create_dir_all(&dir).expect("Failed to create project dir");
        fs::write(dir.join(format!("{}.jsonl", session_id)), content)
            .expect("Failed to write transcript");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ProjectsDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for JSONL transcript content
pub struct TranscriptBuilder {
    lines: Vec<String>,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a user line with string content and a timestamp
    pub fn user(mut self, text: &str) -> Self {
        self.lines.push(format!(
            r#"{{"type":"user","content":"{}","timestamp":"2024-01-01T00:00:00Z"}}"#,
            text
        ));
        self
    }

    /// Append an assistant line with string content and no timestamp
    pub fn assistant(mut self, text: &str) -> Self {
        self.lines.push(format!(r#"{{"type":"assistant","content":"{}"}}"#, text));
        self
    }

    /// Append a raw line verbatim
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// `count` lines alternating user "hi" / assistant "hello", starting with user
    pub fn alternating(mut self, count: usize) -> Self {
        for n in 0..count {
            self = if n % 2 == 0 { self.user("hi") } else { self.assistant("hello") };
        }
        self
    }

    /// Replace the 1-based line `line_num`
    pub fn replace_line(mut self, line_num: usize, line: &str) -> Self {
        self.lines[line_num - 1] = line.to_string();
        self
    }

    /// Render with a trailing newline after every line
    pub fn build(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l)).collect()
    }
}

impl Default for TranscriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a session catalog JSON file into `dir`
pub fn write_catalog(dir: &Path, catalog: &serde_json::Value) -> PathBuf {
    let path = dir.join("catalog.json");
    fs::write(&path, serde_json::to_string_pretty(catalog).unwrap()).expect("Failed to write catalog");
    path
}
