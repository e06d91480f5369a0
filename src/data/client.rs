//! PokeAPI client with response memoization
//!
//! Every GET goes through the shared [`Cache`]: a cached body is decoded
//! directly, otherwise the request hits the network and the raw body is
//! stored under the exact URL that was requested.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{LocationArea, LocationAreaPage, Pokemon};
use crate::cache::Cache;

/// Base URL for the PokeAPI v2 endpoints
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching from the API
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, or timeout failure
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with anything other than 200 OK
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: StatusCode, url: String },

    /// The response body could not be read in full
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The payload, fresh or cached, did not match the expected shape
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The caller cancelled the request before it completed
    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Whether the failure was a non-200 response
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, FetchError::UnexpectedStatus { .. })
    }
}

/// Settings for building a [`PokeClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the API; resource paths are appended to it
    pub base_url: String,
    /// Upper bound on a single network request
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: POKEAPI_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for fetching PokeAPI resources through an in-memory cache
#[derive(Debug, Clone)]
pub struct PokeClient {
    http_client: Client,
    cache: Arc<Cache>,
    base_url: String,
}

impl PokeClient {
    /// Creates a client that stores responses in `cache`
    pub fn new(cache: Arc<Cache>, config: &ClientConfig) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self::with_client(http_client, cache, &config.base_url))
    }

    /// Creates a client around an existing HTTP client
    pub fn with_client(http_client: Client, cache: Arc<Cache>, base_url: &str) -> Self {
        Self {
            http_client,
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The cache this client reads from and writes to
    pub fn cache(&self) -> &Arc<Cache> {
        &self.cache
    }

    /// URL of the first location-area page
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    /// Fetches a page of location areas
    ///
    /// # Arguments
    /// * `page_url` - A `next`/`previous` URL from an earlier page, or `None`
    ///   for the first page
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage, FetchError> {
        match page_url.filter(|url| !url.is_empty()) {
            Some(url) => self.get(url).await,
            None => self.get(&self.location_areas_url()).await,
        }
    }

    /// Fetches a single location area by name or id
    pub async fn location_area(&self, name: &str) -> Result<LocationArea, FetchError> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.get(&url).await
    }

    /// Fetches a single Pokemon by name or id
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon, FetchError> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.get(&url).await
    }

    /// Fetches `url` and decodes it as `T`, consulting the cache first
    ///
    /// # Returns
    /// * `Ok(T)` - decoded from the cached body, or from a fresh 200 response
    /// * `Err(FetchError)` - transport, status, body, or decode failure; nothing
    ///   is cached unless the fresh body decoded successfully
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        if let Some(bytes) = self.cache.lookup(url) {
            debug!(url, "cache hit");
            return Ok(serde_json::from_slice(&bytes)?);
        }

        debug!(url, "cache miss, requesting");
        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Body)?;
        let value = serde_json::from_slice(&body)?;
        self.cache.store(url, body.to_vec());
        Ok(value)
    }

    /// Like [`PokeClient::get`], but gives up as soon as `cancel` fires
    ///
    /// A cancelled request returns [`FetchError::Cancelled`] and leaves the
    /// cache untouched.
    pub async fn get_with_cancel<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<T, FetchError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(url, "request cancelled");
                Err(FetchError::Cancelled)
            }
            result = self.get(url) => result,
        }
    }
}
