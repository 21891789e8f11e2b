//! Remote synchronization: fetch, detect conflicts, merge or resolve.

mod detect;
mod identity;
mod merge;
mod reconciler;
mod remote;
mod resolve;
mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use detect::detect;
pub use identity::{CaseInsensitiveText, QuoteIdentity};
pub use merge::merge_new;
pub use reconciler::{CycleOutcome, Reconciler};
pub use remote::{parse_remote_payload, HttpRemoteSource, RemoteSource, EVEN_CATEGORY, ODD_CATEGORY};
pub use resolve::resolve;
pub use scheduler::{tick, Scheduler, TickReport, DEFAULT_SYNC_INTERVAL};
