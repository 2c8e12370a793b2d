//! Read-only access to the session database
//!
//! The HTTP API needs project and session rows, including the legacy `messages`
//! column used when no transcript exists. [`SessionStore`] is that boundary;
//! [`JsonSessionStore`] serves a catalog exported to a JSON file.

pub mod catalog;
pub mod json_store;

use anyhow::Result;

pub use catalog::{Catalog, ProjectRecord, SessionRecord};
pub use json_store::JsonSessionStore;

/// Source of project and session records
pub trait SessionStore: Send + Sync {
    /// Look up a project by id
    fn project(&self, project_id: &str) -> Result<Option<ProjectRecord>>;

    /// All sessions belonging to a project, in store order
    fn sessions(&self, project_id: &str) -> Result<Vec<SessionRecord>>;
}
