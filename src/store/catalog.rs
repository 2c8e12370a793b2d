use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::models::{SessionIdentity, TranscriptEntry};

/// Serialized form of the session database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Working directory the Claude Code CLI was run in
    #[serde(default)]
    pub path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectRecord {
    /// Key the transcript directory is derived from: the project path, else its id
    pub fn transcript_key(&self) -> &str {
        self.path.as_deref().filter(|p| !p.is_empty()).unwrap_or(self.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub project_id: String,
    /// Session UUID assigned by the Claude Code CLI, when known
    #[serde(default)]
    pub claude_session_id: Option<String>,
    /// Legacy message list stored alongside the session
    #[serde(default)]
    pub messages: Option<Vec<TranscriptEntry>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionRecord {
    /// Identity used to locate this session's transcript under `project_key`
    pub fn identity(&self, project_key: &str) -> Result<SessionIdentity, ResolveError> {
        SessionIdentity::new(project_key, self.id.as_str(), self.claude_session_id.clone())
    }
}

/// Database ids may be integers or strings; both become strings
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::custom("id must be a string or a number")),
    }
}
