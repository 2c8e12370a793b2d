use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

use crate::models::{MatchedBy, SessionIdentity};

/// One way of picking a transcript file name out of a session identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// The session's own id (database primary key)
    PrimaryId,
    /// The alternate id, usually the Claude Code session UUID
    SecondaryId,
}

impl LookupStrategy {
    pub const DEFAULT_ORDER: [LookupStrategy; 2] =
        [LookupStrategy::PrimaryId, LookupStrategy::SecondaryId];

    /// Identifier this strategy would look up, if the identity has one
    pub fn candidate<'a>(&self, identity: &'a SessionIdentity) -> Option<&'a str> {
        let id = match self {
            LookupStrategy::PrimaryId => Some(identity.primary_id.as_str()),
            LookupStrategy::SecondaryId => identity.secondary_id.as_deref(),
        };
        id.filter(|id| !id.is_empty())
    }

    pub fn matched_by(&self) -> MatchedBy {
        match self {
            LookupStrategy::PrimaryId => MatchedBy::Primary,
            LookupStrategy::SecondaryId => MatchedBy::Secondary,
        }
    }

    /// Parse a comma separated order such as `"secondary,primary"`
    pub fn parse_order(value: &str) -> Result<Vec<LookupStrategy>> {
        let mut order = Vec::new();
        for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let strategy: LookupStrategy = part.parse()?;
            if order.contains(&strategy) {
                bail!("Lookup strategy listed twice: {}", part);
            }
            order.push(strategy);
        }
        if order.is_empty() {
            bail!("Lookup order must name at least one strategy");
        }
        Ok(order)
    }
}

impl FromStr for LookupStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "primary" => Ok(LookupStrategy::PrimaryId),
            "secondary" => Ok(LookupStrategy::SecondaryId),
            other => bail!("Unknown lookup strategy '{}' (expected 'primary' or 'secondary')", other),
        }
    }
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matched_by(), f)
    }
}
