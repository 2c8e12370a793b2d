//! Typed errors for the transcript resolution and parsing seams.
//!
//! Application plumbing (configuration, catalog loading, the CLI) uses
//! `anyhow`; the types here exist where callers must tell conditions apart.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while mapping a session identity to a transcript path.
///
/// Every variant is a client-side problem: the identity is malformed or points
/// outside the projects root. Absent files are not errors.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid session identity: {0}")]
    InvalidIdentity(String),

    #[error("path traversal rejected: {} is outside {}", .candidate.display(), .root.display())]
    PathTraversal { candidate: PathBuf, root: PathBuf },

    #[error("failed to canonicalize {}: {source}", .path.display())]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    pub fn is_security_violation(&self) -> bool {
        matches!(self, ResolveError::PathTraversal { .. })
    }
}

/// Failures while reading a resolved transcript
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("transcript unreadable: {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("transcript corrupted: {}: none of {lines} lines is valid JSON", .path.display())]
    Corrupt { path: PathBuf, lines: usize },

    #[error("transcript read cancelled: {}", .path.display())]
    Cancelled { path: PathBuf },
}
