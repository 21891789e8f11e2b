//! Conflict-free merge of remote quotes into the store

use super::identity::QuoteIdentity;
use crate::error::Result;
use crate::models::Quote;
use crate::store::Store;

/// Append every remote quote the store does not already hold.
///
/// Only valid when detection found no conflicts. Persists once when at
/// least one quote was added; otherwise the store is untouched.
pub fn merge_new(
    store: &mut Store,
    remote: &[Quote],
    identity: &dyn QuoteIdentity,
) -> Result<usize> {
    let mut added = 0usize;

    for remote_quote in remote {
        let known = store
            .quotes()
            .iter()
            .any(|local_quote| identity.same_quote(local_quote, remote_quote));
        if !known {
            store.append(remote_quote.clone());
            added += 1;
        }
    }

    if added > 0 {
        store.persist()?;
        tracing::info!("Merged {added} new quotes from remote");
    }

    Ok(added)
}
