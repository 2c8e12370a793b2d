//! Service configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::models::DEFAULT_MESSAGE_LIMIT;
use crate::resolver::LookupStrategy;
use crate::utils::get_projects_root;

pub const ENV_PROJECTS_DIR: &str = "CLAUDE_PROJECTS_DIR";
pub const ENV_DEFAULT_LIMIT: &str = "TRANSCRIPT_DEFAULT_LIMIT";
pub const ENV_MAX_LIMIT: &str = "TRANSCRIPT_MAX_LIMIT";
pub const ENV_READ_TIMEOUT_MS: &str = "TRANSCRIPT_READ_TIMEOUT_MS";
pub const ENV_LOOKUP_ORDER: &str = "TRANSCRIPT_LOOKUP_ORDER";
pub const ENV_BIND: &str = "SESSION_API_BIND";
pub const ENV_CATALOG: &str = "SESSION_CATALOG";

const DEFAULT_MAX_LIMIT: usize = 1000;
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_BIND: &str = "127.0.0.1:8765";

/// Settings shared by the message service, the HTTP API and the CLI
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Root holding one directory per project (`~/.claude/projects`)
    pub projects_root: PathBuf,
    pub default_limit: usize,
    /// Largest `limit` a caller may request
    pub max_limit: usize,
    pub read_timeout: Duration,
    pub lookup_order: Vec<LookupStrategy>,
    pub bind: SocketAddr,
    /// Session catalog served by the API, if any
    pub catalog: Option<PathBuf>,
}

impl ServiceConfig {
    /// Defaults rooted at `projects_root`
    pub fn new(projects_root: impl Into<PathBuf>) -> Self {
        Self {
            projects_root: projects_root.into(),
            default_limit: DEFAULT_MESSAGE_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            lookup_order: LookupStrategy::DEFAULT_ORDER.to_vec(),
            bind: SocketAddr::from(([127, 0, 0, 1], 8765)),
            catalog: None,
        }
    }

    /// Build from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let projects_root = match var(ENV_PROJECTS_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => get_projects_root()?,
        };
        let mut config = Self::new(projects_root);

        if let Some(value) = var(ENV_DEFAULT_LIMIT) {
            config.default_limit = parse_positive(ENV_DEFAULT_LIMIT, &value)?;
        }
        if let Some(value) = var(ENV_MAX_LIMIT) {
            config.max_limit = parse_positive(ENV_MAX_LIMIT, &value)?;
        }
        if let Some(value) = var(ENV_READ_TIMEOUT_MS) {
            let ms = parse_positive(ENV_READ_TIMEOUT_MS, &value)?;
            config.read_timeout = Duration::from_millis(ms as u64);
        }
        if let Some(value) = var(ENV_LOOKUP_ORDER) {
            config.lookup_order = LookupStrategy::parse_order(&value)
                .with_context(|| format!("Invalid {}", ENV_LOOKUP_ORDER))?;
        }
        let bind = var(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        config.bind =
            bind.parse().with_context(|| format!("Invalid {} address: {}", ENV_BIND, bind))?;
        config.catalog = var(ENV_CATALOG).map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 || self.max_limit == 0 {
            bail!("Message limits must be positive");
        }
        if self.default_limit > self.max_limit {
            bail!(
                "Default message limit ({}) exceeds maximum ({})",
                self.default_limit,
                self.max_limit
            );
        }
        if self.lookup_order.is_empty() {
            bail!("Lookup order must name at least one strategy");
        }
        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    let parsed: usize = value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a positive integer, got '{}'", key, value))?;
    if parsed == 0 {
        bail!("{} must be greater than zero", key);
    }
    Ok(parsed)
}
