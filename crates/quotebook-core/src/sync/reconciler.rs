//! One fetch → detect → merge-or-resolve pass.

use std::sync::Arc;

use serde::Serialize;

use super::detect::detect;
use super::identity::{CaseInsensitiveText, QuoteIdentity};
use super::merge::merge_new;
use super::remote::RemoteSource;
use super::resolve::resolve;
use crate::error::{Error, Result};
use crate::models::{ConflictRecord, Resolution, ResolutionStrategy};
use crate::state::SyncState;
use crate::store::Store;

/// Result of [`Reconciler::run_cycle`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// Remote could not be reached or decoded; nothing changed
    FetchFailed(String),
    /// Remote held nothing new
    UpToDate,
    /// This many remote quotes were appended
    Merged(usize),
    /// This many conflicts are now awaiting a strategy
    ConflictsFound(usize),
    /// Conflicts from an earlier cycle are still unresolved
    AwaitingResolution,
}

/// Drives the reconciliation state machine against a [`Store`].
pub struct Reconciler {
    source: Arc<dyn RemoteSource>,
    identity: Box<dyn QuoteIdentity>,
    state: SyncState,
    pending: Vec<ConflictRecord>,
}

impl Reconciler {
    pub fn new(source: Arc<dyn RemoteSource>) -> Self {
        Self {
            source,
            identity: Box::new(CaseInsensitiveText),
            state: SyncState::Idle,
            pending: Vec::new(),
        }
    }

    /// Swap the identity policy used for detection and merging
    #[must_use]
    pub fn with_identity(mut self, identity: impl QuoteIdentity + 'static) -> Self {
        self.identity = Box::new(identity);
        self
    }

    pub const fn state(&self) -> SyncState {
        self.state
    }

    /// Conflicts detected by the last cycle and not yet resolved
    pub fn pending(&self) -> &[ConflictRecord] {
        &self.pending
    }

    pub fn source(&self) -> &Arc<dyn RemoteSource> {
        &self.source
    }

    fn transition(&mut self, next: SyncState) {
        tracing::debug!("Sync state {} -> {}", self.state, next);
        self.state = next;
    }

    /// Run one cycle.
    ///
    /// Fetch failures are reported as [`CycleOutcome::FetchFailed`]; only
    /// persistence failures surface as `Err`. While conflicts are pending the
    /// cycle does nothing.
    pub async fn run_cycle(&mut self, store: &mut Store) -> Result<CycleOutcome> {
        if self.state == SyncState::AwaitingResolution {
            return Ok(CycleOutcome::AwaitingResolution);
        }

        self.transition(SyncState::Fetching);
        let remote = match self.source.fetch_remote().await {
            Ok(remote) => remote,
            Err(error) => {
                self.transition(SyncState::FetchFailed);
                tracing::warn!("Sync aborted: {error}");
                self.transition(SyncState::Idle);
                return Ok(CycleOutcome::FetchFailed(error.to_string()));
            }
        };

        self.transition(SyncState::Detecting);
        let conflicts = detect(store.quotes(), &remote, self.identity.as_ref());

        if conflicts.is_empty() {
            self.transition(SyncState::Merging);
            let merged = merge_new(store, &remote, self.identity.as_ref());
            self.transition(SyncState::Idle);
            return Ok(match merged? {
                0 => CycleOutcome::UpToDate,
                added => CycleOutcome::Merged(added),
            });
        }

        let count = conflicts.len();
        tracing::info!("Found {count} sync conflicts");
        self.pending = conflicts;
        self.transition(SyncState::AwaitingResolution);
        Ok(CycleOutcome::ConflictsFound(count))
    }

    /// Settle pending conflicts with `strategy` and return to idle.
    ///
    /// When the write fails the store is rolled back and the conflicts stay
    /// pending, so the caller can retry.
    pub fn resolve_pending(
        &mut self,
        store: &mut Store,
        strategy: ResolutionStrategy,
    ) -> Result<Resolution> {
        if self.state != SyncState::AwaitingResolution {
            return Err(Error::Validation(
                "no sync conflicts are awaiting resolution".to_string(),
            ));
        }

        let snapshot = store.quotes().to_vec();
        self.transition(SyncState::Resolving);
        match resolve(store, &self.pending, strategy) {
            Ok(resolution) => {
                self.pending.clear();
                self.transition(SyncState::Idle);
                Ok(resolution)
            }
            Err(error) => {
                tracing::warn!("Resolution not saved, keeping conflicts pending: {error}");
                store.reset(snapshot);
                self.transition(SyncState::AwaitingResolution);
                Err(error)
            }
        }
    }
}
