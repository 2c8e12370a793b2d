//! Transcript path resolution
//!
//! Maps a [`SessionIdentity`](crate::models::SessionIdentity) to the JSONL file
//! Claude Code wrote for it. Candidate identifiers are tried in the order given
//! by a list of [`LookupStrategy`] values, and every candidate must stay inside
//! the projects root:
//!
//! - **Lexical check**: each candidate path is normalized and checked against the
//!   root before the filesystem is touched, so `../../etc/passwd` is rejected
//!   even when no such file exists.
//! - **Canonical check**: the matched file is canonicalized (symlinks resolved)
//!   and must still be a descendant of the canonical root.
//!
//! Missing files and unreadable metadata are "not found"; only traversal and
//! canonicalization failures are errors.
//!
//! Containment is enforced against the projects root, not the project
//! directory. A session id such as `../other/s` that climbs into a sibling
//! project still resolves, since it stays below the root. Callers that must
//! keep sessions within one project should reject ids containing path
//! separators before calling [`PathResolver::resolve`].

pub mod path_resolver;
pub mod strategy;

pub use path_resolver::{PathResolver, TRANSCRIPT_EXTENSION, resolve};
pub use strategy::LookupStrategy;
