//! Key-value persistence providers

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Key holding the JSON-serialized quote collection
pub const QUOTES_KEY: &str = "quotes";
/// Key holding the last selected category filter (plain string)
pub const LAST_CATEGORY_KEY: &str = "lastSelectedCategory";
/// Session-scoped key holding the last displayed quote (JSON)
pub const LAST_VIEWED_KEY: &str = "lastViewedQuote";

/// Synchronous, string-valued key-value store
pub trait PersistenceProvider: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; absent keys are ignored
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-process provider.
///
/// Backs session-scoped state (gone when the session ends) and tests.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    values: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls served so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn values(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| Error::Storage("memory provider lock poisoned".to_string()))
    }
}

impl PersistenceProvider for MemoryProvider {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values()?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values()?.remove(key);
        Ok(())
    }
}
