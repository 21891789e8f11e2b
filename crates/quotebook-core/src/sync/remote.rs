//! Remote quote source adapter.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::models::Quote;
use crate::util::compact_text;

/// Category given to remote records at even positions
pub const EVEN_CATEGORY: &str = "server";
/// Category given to remote records at odd positions
pub const ODD_CATEGORY: &str = "remote";

/// Author stamped on published posts
const PUBLISH_USER_ID: u64 = 1;

/// Source of remote quotes for reconciliation
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the remote collection in quote shape. Single attempt.
    async fn fetch_remote(&self) -> Result<Vec<Quote>>;

    /// Send a local quote to the remote side, returning the raw response body
    async fn publish(&self, quote: &Quote) -> Result<String>;
}

/// Remote record as served by the placeholder content endpoint
#[derive(Debug, Deserialize)]
struct RemotePost {
    #[serde(default)]
    id: Option<u64>,
    title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishRequest<'a> {
    title: &'a str,
    body: &'a str,
    user_id: u64,
}

/// HTTP-backed [`RemoteSource`]
#[derive(Clone)]
pub struct HttpRemoteSource {
    endpoint: String,
    limit: usize,
    client: reqwest::Client,
}

impl HttpRemoteSource {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        Self::with_timeout(&config.remote_url, config.fetch_limit, config.http_timeout)
    }

    pub fn with_timeout(endpoint: &str, limit: usize, timeout: Duration) -> Result<Self> {
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            limit,
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_remote(&self) -> Result<Vec<Quote>> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| Error::RemoteFetch(format!("request failed: {error}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| Error::RemoteFetch(format!("failed to read body: {error}")))?;

        if !status.is_success() {
            return Err(Error::RemoteFetch(format!(
                "HTTP {}: {}",
                status.as_u16(),
                compact_text(&body)
            )));
        }

        let quotes = parse_remote_payload(&body, self.limit)?;
        tracing::debug!("Fetched {} quotes from {}", quotes.len(), self.endpoint);
        Ok(quotes)
    }

    async fn publish(&self, quote: &Quote) -> Result<String> {
        let request = PublishRequest {
            title: &quote.text,
            body: &quote.category,
            user_id: PUBLISH_USER_ID,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::info!(
            "Publish returned HTTP {}: {}",
            status.as_u16(),
            compact_text(&body)
        );
        Ok(body)
    }
}

/// Decode a remote payload into at most `limit` quotes.
///
/// The remote side carries no categories, so they alternate by position.
pub fn parse_remote_payload(body: &str, limit: usize) -> Result<Vec<Quote>> {
    let posts: Vec<RemotePost> = serde_json::from_str(body)
        .map_err(|error| Error::RemoteFetch(format!("invalid payload: {error}")))?;

    Ok(posts
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, post)| {
            let category = if index % 2 == 0 {
                EVEN_CATEGORY
            } else {
                ODD_CATEGORY
            };
            Quote {
                text: post.title,
                category: category.to_string(),
                author: None,
                id: post.id,
            }
        })
        .collect())
}
