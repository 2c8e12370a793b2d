//! Session Transcripts - Serve Claude Code conversation transcripts
//!
//! The Claude Code CLI writes one append-only JSONL transcript per session under
//! `~/.claude/projects/<encoded-project>/<session-id>.jsonl`. This library:
//!
//! - Resolves a session's transcript from an ordered list of candidate ids,
//!   refusing any path that escapes the projects root
//! - Parses the transcript into the most recent N user/assistant messages using
//!   a bounded window
//! - Falls back to stored (legacy) messages when a transcript is missing or broken
//! - Exposes the result over HTTP (`GET /api/projects/{project_id}/sessions`)
//!
//! # Example
//!
//! ```no_run
//! use session_transcripts::{PathResolver, SessionIdentity, parse_transcript};
//!
//! let resolver = PathResolver::new("/Users/alice/.claude/projects");
//! let identity = SessionIdentity::new("/Users/alice/app", "15", Some("550e8400".into()))?;
//! if let Some(path) = resolver.resolve(&identity)?.path {
//!     let window = parse_transcript(&path, 100)?;
//!     println!("{} messages", window.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod resolver;
pub mod service;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use error::{ResolveError, TranscriptError};
pub use models::{MatchedBy, MessageWindow, Role, SessionIdentity, TranscriptEntry, TranscriptLocation};
pub use parsers::parse_transcript;
pub use resolver::{LookupStrategy, PathResolver, resolve};
pub use service::SessionMessagesService;
pub use utils::paths::encode_project_dir;
