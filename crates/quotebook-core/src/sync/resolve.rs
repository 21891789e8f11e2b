//! Conflict resolution strategies

use crate::error::Result;
use crate::models::{ConflictRecord, Resolution, ResolutionStrategy};
use crate::store::Store;

/// Apply `strategy` to every conflict, then persist once.
///
/// - `remote` takes the remote category for the local quote whose text
///   equals the recorded local text exactly; store length is unchanged.
/// - `local` changes nothing.
/// - `merge` appends the remote quote next to the local one.
pub fn resolve(
    store: &mut Store,
    conflicts: &[ConflictRecord],
    strategy: ResolutionStrategy,
) -> Result<Resolution> {
    for conflict in conflicts {
        match strategy {
            ResolutionStrategy::Remote => {
                let mut updated = conflict.local.clone();
                updated.category.clone_from(&conflict.remote.category);
                if !store.replace_at(|quote| quote.text == conflict.local.text, updated) {
                    tracing::warn!(
                        "Local quote {} vanished before resolution",
                        conflict.local
                    );
                }
            }
            ResolutionStrategy::Local => {}
            ResolutionStrategy::Merge => store.append(conflict.remote.clone()),
        }
    }

    store.persist()?;
    tracing::info!(
        "Resolved {} conflicts with strategy '{strategy}'",
        conflicts.len()
    );

    Ok(Resolution {
        strategy,
        conflicts: conflicts.len(),
        resolved_at: chrono::Utc::now().timestamp_millis(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::MemoryProvider;
    use crate::models::Quote;
    use pretty_assertions::assert_eq;

    fn conflicted_store() -> (Arc<MemoryProvider>, Store, Vec<ConflictRecord>) {
        let provider = Arc::new(MemoryProvider::new());
        let local = vec![
            Quote::new("Be yourself", "wisdom"),
            Quote::new("Keep going", "life"),
            Quote::new("Untouched", "misc"),
        ];
        let conflicts = vec![
            ConflictRecord {
                local: local[0].clone(),
                remote: Quote::new("Be Yourself", "motivation"),
            },
            ConflictRecord {
                local: local[1].clone(),
                remote: Quote::new("keep going", "server").with_id(2),
            },
        ];
        let store = Store::with_quotes(provider.clone(), local);
        (provider, store, conflicts)
    }

    #[test]
    fn remote_overwrites_categories_without_growing() {
        let (provider, mut store, conflicts) = conflicted_store();

        let resolution = resolve(&mut store, &conflicts, ResolutionStrategy::Remote).unwrap();

        assert_eq!(resolution.strategy, ResolutionStrategy::Remote);
        assert_eq!(resolution.conflicts, 2);
        assert_eq!(store.len(), 3);
        assert_eq!(
            store.quotes(),
            &[
                Quote::new("Be yourself", "motivation"),
                Quote::new("Keep going", "server"),
                Quote::new("Untouched", "misc"),
            ]
        );
        assert_eq!(provider.writes(), 1);
    }

    #[test]
    fn merge_appends_each_remote_version() {
        let (provider, mut store, conflicts) = conflicted_store();

        resolve(&mut store, &conflicts, ResolutionStrategy::Merge).unwrap();

        assert_eq!(store.len(), 5);
        assert_eq!(store.quotes()[0], Quote::new("Be yourself", "wisdom"));
        assert_eq!(store.quotes()[3], Quote::new("Be Yourself", "motivation"));
        assert_eq!(provider.writes(), 1);
    }

    #[test]
    fn local_leaves_store_unchanged() {
        let (_, mut store, conflicts) = conflicted_store();
        let before = store.quotes().to_vec();

        let resolution = resolve(&mut store, &conflicts, ResolutionStrategy::Local).unwrap();

        assert_eq!(resolution.strategy, ResolutionStrategy::Local);
        assert_eq!(store.quotes(), before.as_slice());
    }
}
