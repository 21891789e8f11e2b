//! In-memory quote store mirrored to a persistence provider

use std::sync::Arc;

use crate::db::{PersistenceProvider, QUOTES_KEY};
use crate::error::{Error, Result};
use crate::models::{CategoryFilter, Quote};

/// Authoritative ordered sequence of quotes for one session.
///
/// Every mutation is followed by a wholesale [`Store::persist`] from the
/// caller; the mirror is never patched incrementally.
pub struct Store {
    quotes: Vec<Quote>,
    provider: Arc<dyn PersistenceProvider>,
}

impl Store {
    /// Create an empty store backed by `provider`
    pub fn new(provider: Arc<dyn PersistenceProvider>) -> Self {
        Self::with_quotes(provider, Vec::new())
    }

    /// Create a store seeded with `quotes` (nothing is written yet)
    pub fn with_quotes(provider: Arc<dyn PersistenceProvider>, quotes: Vec<Quote>) -> Self {
        Self { quotes, provider }
    }

    /// Replace the in-memory sequence with the persisted mirror.
    ///
    /// Absent or unreadable data leaves the current sequence untouched.
    /// Returns whether the sequence was replaced.
    pub fn load(&mut self) -> bool {
        match self.read_mirror() {
            Ok(Some(quotes)) => {
                tracing::debug!("Loaded {} quotes from storage", quotes.len());
                self.quotes = quotes;
                true
            }
            Ok(None) => false,
            Err(error) => {
                tracing::warn!("Keeping current quotes: {error}");
                false
            }
        }
    }

    fn read_mirror(&self) -> Result<Option<Vec<Quote>>> {
        let Some(raw) = self.provider.get(QUOTES_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|error| Error::PersistenceRead(error.to_string()))
    }

    /// Overwrite the persisted mirror with the full sequence
    pub fn persist(&self) -> Result<()> {
        let serialized = serde_json::to_string(&self.quotes)?;
        self.provider.set(QUOTES_KEY, &serialized)?;
        tracing::debug!("Persisted {} quotes", self.quotes.len());
        Ok(())
    }

    /// Append a quote; duplicates are allowed
    pub fn append(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Overwrite the first quote matching `predicate`.
    ///
    /// Returns `false` (and changes nothing) when no quote matches.
    pub fn replace_at(&mut self, predicate: impl FnMut(&Quote) -> bool, quote: Quote) -> bool {
        match self.quotes.iter().position(predicate) {
            Some(index) => {
                self.quotes[index] = quote;
                true
            }
            None => false,
        }
    }

    /// Remove the quote at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<Quote> {
        (index < self.quotes.len()).then(|| self.quotes.remove(index))
    }

    /// Replace the whole sequence
    pub fn reset(&mut self, quotes: Vec<Quote>) {
        self.quotes = quotes;
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Unique categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for quote in &self.quotes {
            if !categories.contains(&quote.category) {
                categories.push(quote.category.clone());
            }
        }
        categories
    }

    /// Quotes passing `filter`, in store order
    pub fn filtered(&self, filter: &CategoryFilter) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|quote| filter.matches(quote))
            .collect()
    }

    /// Provider the store mirrors into
    pub fn provider(&self) -> &Arc<dyn PersistenceProvider> {
        &self.provider
    }
}
