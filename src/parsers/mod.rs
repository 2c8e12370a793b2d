//! JSONL parser for Claude Code session transcripts
//!
//! # Error Handling Strategy
//!
//! Transcripts are append-only files that the Claude Code CLI may be writing
//! while we read them, so the parser degrades instead of failing:
//!
//! - **Individual line failures**: Lines that are not valid JSON are logged at debug
//!   level and skipped. A failing final line without a trailing newline is treated as
//!   a write in progress and never counts against the file.
//!
//! - **Missing or empty files**: Produce an empty window, not an error.
//!
//! - **Catastrophic failures**: If the file cannot be opened or read (permissions, I/O),
//!   or if no complete line decodes as JSON at all, a typed
//!   [`TranscriptError`](crate::error::TranscriptError) is returned so the caller can
//!   fall back to other data.
//!
//! - **Bounded memory**: Only the last `limit` accepted entries are retained, regardless
//!   of file size.

pub mod deserializers;
pub mod transcript;

pub use transcript::{parse_transcript, parse_transcript_with_cancel};
