//! Conflict detection between local and remote quotes

use super::identity::QuoteIdentity;
use crate::models::{ConflictRecord, Quote};

/// Pair every remote quote with the first local quote of the same identity
/// whose category differs.
///
/// Unmatched remote quotes and same-category matches produce nothing.
/// Linear scan per remote quote; the collections are small.
pub fn detect(
    local: &[Quote],
    remote: &[Quote],
    identity: &dyn QuoteIdentity,
) -> Vec<ConflictRecord> {
    remote
        .iter()
        .filter_map(|remote_quote| {
            let local_quote = local
                .iter()
                .find(|local_quote| identity.same_quote(local_quote, remote_quote))?;
            (local_quote.category != remote_quote.category).then(|| ConflictRecord {
                local: local_quote.clone(),
                remote: remote_quote.clone(),
            })
        })
        .collect()
}
