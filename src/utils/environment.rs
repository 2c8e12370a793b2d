use std::path::PathBuf;

use anyhow::{Context, Result};

/// Get the Claude Code transcript root (~/.claude/projects)
pub fn get_projects_root() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".claude").join("projects"))
}
