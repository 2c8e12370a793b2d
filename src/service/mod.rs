//! Session message retrieval with graceful degradation
//!
//! # Error Handling Strategy
//!
//! Messages are a secondary part of a session view, so almost every failure
//! degrades to the legacy (database stored) message list, or to an empty list:
//!
//! - **Missing transcript**: logged at WARN, legacy messages returned.
//! - **Unreadable or corrupted transcript**: logged at ERROR, legacy messages returned.
//! - **Timeout or cancellation**: logged at WARN, legacy messages returned; the
//!   blocking reader is told to stop.
//! - **Path traversal / invalid identity**: the only conditions that propagate, as
//!   [`ResolveError`](crate::error::ResolveError), so the caller can reject the request.

pub mod messages;

pub use messages::SessionMessagesService;
