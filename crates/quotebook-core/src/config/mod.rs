//! Sync configuration.
//!
//! Values come from `QUOTEBOOK_*` environment variables; every field has a
//! default so an empty environment yields a working configuration.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::sync::DEFAULT_SYNC_INTERVAL;
use crate::util::{is_http_url, normalize_text_option};

/// Placeholder content endpoint standing in for a quote server
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";
/// Remote records taken per fetch
pub const DEFAULT_FETCH_LIMIT: usize = 5;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Runtime settings for the remote source and the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub remote_url: String,
    pub fetch_limit: usize,
    pub sync_interval: Duration,
    pub http_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            sync_interval: DEFAULT_SYNC_INTERVAL,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl SyncConfig {
    pub fn from_env() -> Result<Self> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let remote_url = optional_trimmed(&lookup, "QUOTEBOOK_REMOTE_URL")
            .unwrap_or(defaults.remote_url);
        if !is_http_url(&remote_url) {
            return Err(Error::Config(
                "QUOTEBOOK_REMOTE_URL must start with http:// or https://".to_string(),
            ));
        }

        let fetch_limit = positive_or(&lookup, "QUOTEBOOK_REMOTE_LIMIT", defaults.fetch_limit)?;
        let interval_secs = positive_or(
            &lookup,
            "QUOTEBOOK_SYNC_INTERVAL_SECS",
            defaults.sync_interval.as_secs(),
        )?;
        let timeout_secs = positive_or(
            &lookup,
            "QUOTEBOOK_HTTP_TIMEOUT_SECS",
            defaults.http_timeout.as_secs(),
        )?;

        Ok(Self {
            remote_url,
            fetch_limit,
            sync_interval: Duration::from_secs(interval_secs),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    normalize_text_option(lookup(name))
}

fn parse_or<T: std::str::FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T> {
    optional_trimmed(lookup, name).map_or(Ok(default), |raw| {
        raw.parse::<T>()
            .map_err(|_| Error::Config(format!("{name} must be a non-negative integer")))
    })
}

fn positive_or<T>(lookup: impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let value = parse_or(lookup, name, default)?;
    if value == T::default() {
        return Err(Error::Config(format!("{name} must be at least 1")));
    }
    Ok(value)
}
