use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of messages returned when the caller does not ask for a specific limit
pub const DEFAULT_MESSAGE_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Map a transcript line's `type` discriminator to a role
    pub fn from_entry_type(entry_type: &str) -> Option<Self> {
        match entry_type {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

/// A single conversational turn.
///
/// `content` is passed through untouched: it may be a string, an array of
/// content blocks or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    #[serde(default = "empty_content")]
    pub content: Value,
    #[serde(default)]
    pub timestamp: Option<String>,
}

fn empty_content() -> Value {
    Value::String(String::new())
}

impl TranscriptEntry {
    pub fn new(role: Role, content: Value, timestamp: Option<String>) -> Self {
        Self { role, content, timestamp }
    }
}

/// Sliding window keeping only the most recent `limit` entries
#[derive(Debug, Clone, PartialEq)]
pub struct MessageWindow {
    entries: VecDeque<TranscriptEntry>,
    limit: usize,
}

impl MessageWindow {
    pub fn new(limit: usize) -> Self {
        // Capacity is bounded by the limit, never by the file size
        Self { entries: VecDeque::with_capacity(limit.min(DEFAULT_MESSAGE_LIMIT * 10)), limit }
    }

    /// Append an entry, evicting the oldest one once the window is full
    pub fn push(&mut self, entry: TranscriptEntry) {
        if self.limit == 0 {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter()
    }

    /// Consume the window, oldest entry first
    pub fn into_entries(self) -> Vec<TranscriptEntry> {
        self.entries.into()
    }
}
