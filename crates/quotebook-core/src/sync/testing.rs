//! In-process remote source for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::remote::RemoteSource;
use crate::error::{Error, Result};
use crate::models::Quote;

pub struct FixedRemoteSource {
    quotes: Option<Vec<Quote>>,
    fetches: AtomicUsize,
    published: Mutex<Vec<Quote>>,
}

impl FixedRemoteSource {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes: Some(quotes),
            fetches: AtomicUsize::new(0),
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            quotes: None,
            ..Self::new(Vec::new())
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn published(&self) -> Vec<Quote> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for FixedRemoteSource {
    async fn fetch_remote(&self) -> Result<Vec<Quote>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.quotes
            .clone()
            .ok_or_else(|| Error::RemoteFetch("connection refused".to_string()))
    }

    async fn publish(&self, quote: &Quote) -> Result<String> {
        self.published.lock().unwrap().push(quote.clone());
        Ok("{\"id\": 101}".to_string())
    }
}
