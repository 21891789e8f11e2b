//! Session-level service shared by every client.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::Mutex;

use crate::db::{MemoryProvider, PersistenceProvider, LAST_CATEGORY_KEY, LAST_VIEWED_KEY};
use crate::error::{Error, Result};
use crate::export::{parse_json_import, render_json_export};
use crate::models::{
    default_quotes, CategoryFilter, ConflictRecord, Quote, Resolution, ResolutionStrategy,
};
use crate::state::SyncState;
use crate::store::Store;
use crate::sync::{CycleOutcome, Reconciler, RemoteSource};

/// Quote book shared between a client and the sync scheduler
pub type SharedQuoteBook = Arc<Mutex<QuoteBook>>;

/// One session: the store, its reconciler, and session-scoped state.
pub struct QuoteBook {
    store: Store,
    session: MemoryProvider,
    reconciler: Reconciler,
}

impl QuoteBook {
    /// Open a session over `provider`, starting from the default quotes when
    /// nothing usable is persisted.
    pub fn open(provider: Arc<dyn PersistenceProvider>, source: Arc<dyn RemoteSource>) -> Self {
        Self::with_reconciler(provider, Reconciler::new(source))
    }

    pub fn with_reconciler(provider: Arc<dyn PersistenceProvider>, reconciler: Reconciler) -> Self {
        let mut store = Store::with_quotes(provider, default_quotes());
        if !store.load() {
            tracing::debug!("Starting from {} default quotes", store.len());
        }
        Self {
            store,
            session: MemoryProvider::new(),
            reconciler,
        }
    }

    /// Wrap for sharing with a [`crate::sync::Scheduler`]
    pub fn into_shared(self) -> SharedQuoteBook {
        Arc::new(Mutex::new(self))
    }

    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Validate and append a user-entered quote
    pub fn add_quote(
        &mut self,
        text: &str,
        category: &str,
        author: Option<&str>,
    ) -> Result<&Quote> {
        let quote = Quote::from_input(text, category, author)?;
        self.store.append(quote);
        self.store.persist()?;
        let index = self.store.len() - 1;
        Ok(&self.store.quotes()[index])
    }

    /// Remove the quote at `index`
    pub fn delete_quote(&mut self, index: usize) -> Result<Quote> {
        let removed = self
            .store
            .remove_at(index)
            .ok_or_else(|| Error::NotFound(format!("no quote at position {index}")))?;
        self.store.persist()?;
        Ok(removed)
    }

    /// Replace every quote with the defaults
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset(default_quotes());
        self.store.persist()
    }

    pub fn categories(&self) -> Vec<String> {
        self.store.categories()
    }

    /// Last selected filter, `All` when none is stored
    pub fn current_filter(&self) -> CategoryFilter {
        match self.store.provider().get(LAST_CATEGORY_KEY) {
            Ok(Some(value)) => CategoryFilter::parse(&value),
            Ok(None) => CategoryFilter::All,
            Err(error) => {
                tracing::warn!("Falling back to all categories: {error}");
                CategoryFilter::All
            }
        }
    }

    /// Remember `filter` as the selected category
    pub fn select_filter(&self, filter: &CategoryFilter) -> Result<()> {
        self.store.provider().set(LAST_CATEGORY_KEY, filter.as_str())
    }

    /// Pick a random quote using the stored filter
    pub fn random_quote(&self) -> Result<Option<Quote>> {
        self.random_quote_in(&self.current_filter())
    }

    /// Pick a random quote from `filter`; `None` when nothing matches.
    ///
    /// The pick is remembered for the rest of the session.
    pub fn random_quote_in(&self, filter: &CategoryFilter) -> Result<Option<Quote>> {
        let candidates = self.store.filtered(filter);
        let Some(quote) = candidates.choose(&mut rand::thread_rng()).map(|q| (*q).clone()) else {
            return Ok(None);
        };

        self.session
            .set(LAST_VIEWED_KEY, &serde_json::to_string(&quote)?)?;
        Ok(Some(quote))
    }

    /// Quote shown most recently in this session
    pub fn last_viewed(&self) -> Option<Quote> {
        let raw = self.session.get(LAST_VIEWED_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }

    /// Append every quote in `raw`; returns how many were added
    pub fn import_json(&mut self, raw: &str) -> Result<usize> {
        let imported = parse_json_import(raw)?;
        let count = imported.len();
        for quote in imported {
            self.store.append(quote);
        }
        self.store.persist()?;
        tracing::info!("Imported {count} quotes");
        Ok(count)
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(render_json_export(self.store.quotes())?)
    }

    /// Run one reconciliation cycle against the remote source
    pub async fn sync_once(&mut self) -> Result<CycleOutcome> {
        self.reconciler.run_cycle(&mut self.store).await
    }

    pub fn pending_conflicts(&self) -> &[ConflictRecord] {
        self.reconciler.pending()
    }

    /// Settle pending conflicts with `strategy`
    pub fn resolve_conflicts(&mut self, strategy: ResolutionStrategy) -> Result<Resolution> {
        self.reconciler.resolve_pending(&mut self.store, strategy)
    }

    pub const fn sync_state(&self) -> SyncState {
        self.reconciler.state()
    }

    /// Send the quote at `index` to the remote source
    pub async fn publish(&self, index: usize) -> Result<String> {
        let quote = self
            .store
            .quotes()
            .get(index)
            .ok_or_else(|| Error::NotFound(format!("no quote at position {index}")))?;
        self.reconciler.source().publish(quote).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, QUOTES_KEY};
    use crate::sync::testing::FixedRemoteSource;
    use pretty_assertions::assert_eq;

    fn open_book(remote: Vec<Quote>) -> (Arc<MemoryProvider>, QuoteBook) {
        let provider = Arc::new(MemoryProvider::new());
        let book = QuoteBook::open(provider.clone(), Arc::new(FixedRemoteSource::new(remote)));
        (provider, book)
    }

    #[test]
    fn open_without_data_uses_defaults_without_writing() {
        let (provider, book) = open_book(Vec::new());
        assert_eq!(book.store().len(), 6);
        assert_eq!(provider.writes(), 0);
    }

    #[test]
    fn open_prefers_persisted_quotes() {
        let provider = Arc::new(MemoryProvider::new());
        provider
            .set(QUOTES_KEY, r#"[{"text":"Saved","category":"mine"}]"#)
            .unwrap();

        let book = QuoteBook::open(provider, Arc::new(FixedRemoteSource::new(Vec::new())));
        assert_eq!(book.store().quotes(), &[Quote::new("Saved", "mine")]);
    }

    #[test]
    fn add_quote_validates_before_touching_store() {
        let (provider, mut book) = open_book(Vec::new());

        assert!(matches!(
            book.add_quote(" ", "life", None),
            Err(Error::Validation(_))
        ));
        assert_eq!(book.store().len(), 6);
        assert_eq!(provider.writes(), 0);

        let added = book.add_quote("Stay hungry", "drive", Some("Jobs")).unwrap();
        assert_eq!(added.author_or_unknown(), "Jobs");
        assert_eq!(book.store().len(), 7);
        assert_eq!(provider.writes(), 1);
        assert!(book.categories().contains(&"drive".to_string()));
    }

    #[test]
    fn import_never_deduplicates() {
        let provider = Arc::new(MemoryProvider::new());
        provider
            .set(QUOTES_KEY, r#"[{"text":"X","category":"Y"}]"#)
            .unwrap();
        let mut book = QuoteBook::open(provider, Arc::new(FixedRemoteSource::new(Vec::new())));

        let added = book.import_json(r#"[{"text":"X","category":"Y"}]"#).unwrap();
        assert_eq!(added, 1);
        assert_eq!(book.store().len(), 2);
    }

    #[test]
    fn malformed_import_changes_nothing() {
        let (provider, mut book) = open_book(Vec::new());

        assert!(matches!(
            book.import_json("not json"),
            Err(Error::ImportParse(_))
        ));
        assert_eq!(book.store().len(), 6);
        assert_eq!(provider.writes(), 0);
    }

    #[test]
    fn filter_is_persisted_and_applied() {
        let (provider, book) = open_book(Vec::new());
        assert_eq!(book.current_filter(), CategoryFilter::All);

        book.select_filter(&CategoryFilter::parse("wisdom")).unwrap();
        assert_eq!(
            provider.get(LAST_CATEGORY_KEY).unwrap().as_deref(),
            Some("wisdom")
        );

        let quote = book.random_quote().unwrap().unwrap();
        assert_eq!(quote.category, "wisdom");
        assert_eq!(book.last_viewed(), Some(quote));
    }

    #[test]
    fn random_quote_for_empty_category_is_none() {
        let (_, book) = open_book(Vec::new());

        let picked = book
            .random_quote_in(&CategoryFilter::parse("nonexistent"))
            .unwrap();
        assert_eq!(picked, None);
        assert_eq!(book.last_viewed(), None);
    }

    #[test]
    fn last_viewed_is_not_persisted() {
        let provider = Arc::new(MemoryProvider::new());
        let book = QuoteBook::open(provider.clone(), Arc::new(FixedRemoteSource::new(Vec::new())));
        book.random_quote().unwrap();
        assert!(book.last_viewed().is_some());

        let reopened =
            QuoteBook::open(provider.clone(), Arc::new(FixedRemoteSource::new(Vec::new())));
        assert_eq!(reopened.last_viewed(), None);
        assert_eq!(provider.get(LAST_VIEWED_KEY).unwrap(), None);
    }

    #[test]
    fn delete_and_reset() {
        let (_, mut book) = open_book(Vec::new());

        let removed = book.delete_quote(0).unwrap();
        assert_eq!(book.store().len(), 5);
        assert!(!book.store().quotes().contains(&removed));
        assert!(matches!(book.delete_quote(99), Err(Error::NotFound(_))));

        book.reset().unwrap();
        assert_eq!(book.store().quotes(), default_quotes().as_slice());
    }

    #[tokio::test]
    async fn sync_resolution_survives_reopen_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("quotebook.db");
        let remote = vec![Quote::new(
            "BE YOURSELF; EVERYONE ELSE IS ALREADY TAKEN.",
            "motivation",
        )];

        {
            let db = Arc::new(Database::open(&db_path).unwrap());
            let mut book = QuoteBook::open(db, Arc::new(FixedRemoteSource::new(remote.clone())));
            assert_eq!(
                book.sync_once().await.unwrap(),
                CycleOutcome::ConflictsFound(1)
            );
            let resolution = book.resolve_conflicts(ResolutionStrategy::Merge).unwrap();
            assert_eq!(resolution.strategy, ResolutionStrategy::Merge);
        }

        let db = Arc::new(Database::open(&db_path).unwrap());
        let book = QuoteBook::open(db, Arc::new(FixedRemoteSource::new(remote)));
        assert_eq!(book.store().len(), 7);
        assert_eq!(book.sync_state(), SyncState::Idle);
    }

    #[tokio::test]
    async fn publish_sends_selected_quote() {
        let provider = Arc::new(MemoryProvider::new());
        let source = Arc::new(FixedRemoteSource::new(Vec::new()));
        let book = QuoteBook::open(provider, source.clone());

        book.publish(4).await.unwrap();
        assert_eq!(
            source.published(),
            vec![Quote::new("Be yourself; everyone else is already taken.", "wisdom")]
        );
        assert!(matches!(book.publish(42).await, Err(Error::NotFound(_))));
    }
}
