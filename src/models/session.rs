use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// Identifiers used to locate a session transcript on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub project_id: String,
    pub primary_id: String,
    pub secondary_id: Option<String>,
}

impl SessionIdentity {
    /// Build an identity, rejecting an empty primary id.
    ///
    /// An empty secondary id is normalized to `None`.
    pub fn new(
        project_id: impl Into<String>,
        primary_id: impl Into<String>,
        secondary_id: Option<String>,
    ) -> Result<Self, ResolveError> {
        let identity = Self {
            project_id: project_id.into(),
            primary_id: primary_id.into(),
            secondary_id: secondary_id.filter(|id| !id.is_empty()),
        };
        identity.validate()?;
        Ok(identity)
    }

    /// Check the identity invariants (fields are public, so callers may bypass `new`)
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.primary_id.trim().is_empty() {
            return Err(ResolveError::InvalidIdentity("primary session id is empty".to_string()));
        }
        Ok(())
    }
}

/// Which identifier produced a transcript match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedBy {
    Primary,
    Secondary,
    None,
}

impl fmt::Display for MatchedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchedBy::Primary => "primary",
            MatchedBy::Secondary => "secondary",
            MatchedBy::None => "none",
        };
        f.write_str(label)
    }
}

/// A resolved transcript path, or the absence of one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLocation {
    pub path: Option<PathBuf>,
    pub matched_by: MatchedBy,
}

impl TranscriptLocation {
    pub fn found(path: PathBuf, matched_by: MatchedBy) -> Self {
        Self { path: Some(path), matched_by }
    }

    pub fn not_found() -> Self {
        Self { path: None, matched_by: MatchedBy::None }
    }

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}
