//! Reconciliation cycle state.

use serde::Serialize;
use std::fmt;

/// Where a reconciliation cycle currently stands.
///
/// Every transition except `AwaitingResolution` completes within a single
/// call; the intermediate states are only visible to logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    #[default]
    Idle,
    Fetching,
    FetchFailed,
    Detecting,
    Merging,
    AwaitingResolution,
    Resolving,
}

impl SyncState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::FetchFailed => "fetch_failed",
            Self::Detecting => "detecting",
            Self::Merging => "merging",
            Self::AwaitingResolution => "awaiting_resolution",
            Self::Resolving => "resolving",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
