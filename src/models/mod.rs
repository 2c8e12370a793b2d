//! Data models for session transcript retrieval.
//!
//! - [`SessionIdentity`] - The identifiers used to locate a transcript file
//! - [`TranscriptLocation`] - Result of resolving an identity against the projects root
//! - [`TranscriptEntry`] - A single user/assistant message from a transcript
//! - [`MessageWindow`] - Bounded buffer of the most recent entries
//!
//! `content` on [`TranscriptEntry`] is kept as an opaque [`serde_json::Value`];
//! interpreting its shape is left to the consumer.

pub mod session;
pub mod transcript;

pub use session::{MatchedBy, SessionIdentity, TranscriptLocation};
pub use transcript::{DEFAULT_MESSAGE_LIMIT, MessageWindow, Role, TranscriptEntry};
