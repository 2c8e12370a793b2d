use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::SessionStore;
use super::catalog::{Catalog, ProjectRecord, SessionRecord};

/// In-memory store loaded once from a JSON catalog file
#[derive(Debug, Clone, Default)]
pub struct JsonSessionStore {
    catalog: Catalog,
}

impl JsonSessionStore {
    /// Load a catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session catalog: {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session catalog: {}", path.display()))?;

        info!(
            path = %path.display(),
            projects = catalog.projects.len(),
            sessions = catalog.sessions.len(),
            "Loaded session catalog"
        );
        Ok(Self::from_catalog(catalog))
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl SessionStore for JsonSessionStore {
    fn project(&self, project_id: &str) -> Result<Option<ProjectRecord>> {
        Ok(self.catalog.projects.iter().find(|p| p.id == project_id).cloned())
    }

    fn sessions(&self, project_id: &str) -> Result<Vec<SessionRecord>> {
        Ok(self.catalog.sessions.iter().filter(|s| s.project_id == project_id).cloned().collect())
    }
}
