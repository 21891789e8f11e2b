//! Sync conflict model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Quote;
use crate::error::Error;

/// A local quote and a remote quote sharing identity but not category.
///
/// Lives only between detection and resolution within one sync cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictRecord {
    pub local: Quote,
    pub remote: Quote,
}

/// How to settle a batch of conflicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStrategy {
    /// Overwrite the local quote with the remote version
    Remote,
    /// Keep the local quote untouched
    Local,
    /// Keep the local quote and append the remote version next to it
    Merge,
}

impl ResolutionStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" | "server" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            "merge" | "both" => Ok(Self::Merge),
            other => Err(Error::Validation(format!(
                "unknown resolution strategy '{other}' (expected remote, local or merge)"
            ))),
        }
    }
}

/// Outcome of resolving a batch of conflicts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Strategy that was applied, echoed back to the caller
    pub strategy: ResolutionStrategy,
    /// Number of conflicts handled
    pub conflicts: usize,
    /// Resolution timestamp (unix ms)
    pub resolved_at: i64,
}
