//! Card Oracle API client for backend communication.
//!
//! This module provides the HTTP client for the Card Oracle backend:
//! the streaming search endpoint (Server-Sent Events), the card lookup
//! endpoint, and the non-streaming search variant.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, CardResolver, LookupError};
use crate::config::OracleConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Raw response body stream from the streaming search endpoint.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Error type for Oracle client operations
#[derive(Debug)]
pub enum OracleError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// Server returned a success status but no body to stream
    EmptyBody,
    /// JSON deserialization failed
    Json(serde_json::Error),
}

impl std::fmt::Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleError::Http(e) => write!(f, "HTTP error: {}", e),
            OracleError::ServerError { status, message } => {
                if message.is_empty() {
                    write!(f, "Request failed with {}", status)
                } else {
                    write!(f, "Request failed with {}: {}", status, message)
                }
            }
            OracleError::EmptyBody => write!(f, "Response body is empty"),
            OracleError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for OracleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OracleError::Http(e) => Some(e),
            OracleError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(e: reqwest::Error) -> Self {
        OracleError::Http(e)
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(e: serde_json::Error) -> Self {
        OracleError::Json(e)
    }
}

/// One retrieval hit from the non-streaming search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub source_id: String,
    pub summary: String,
    pub score: f64,
}

/// Response of `GET /search/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
}

/// Client for the Card Oracle backend API.
pub struct OracleClient {
    /// Base URL for the Oracle API
    pub base_url: String,
    /// Reusable HTTP client
    client: Client,
}

impl Default for OracleClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OracleClient {
    /// Create a new OracleClient with the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a new OracleClient with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &OracleConfig) -> Self {
        Self::with_base_url(config.base_url.clone())
    }

    /// Open the streaming search endpoint for a query.
    ///
    /// Sends `GET /search/stream?query=<text>` and returns the raw byte
    /// stream of the SSE body, to be driven by [`crate::chat::run_turn`].
    /// A non-success status or an empty body is a transport failure.
    pub async fn stream_search(&self, query: &str) -> Result<ByteStream, OracleError> {
        let url = format!(
            "{}/search/stream?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(%url, "opening search stream");

        let response = self
            .client
            .get(&url)
            .header("Accept", "text/event-stream")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OracleError::ServerError { status, message });
        }
        if response.content_length() == Some(0) {
            return Err(OracleError::EmptyBody);
        }

        Ok(Box::pin(response.bytes_stream()))
    }

    /// Fetch a full card record by its normalized identifier.
    pub async fn fetch_card(&self, id: &str) -> Result<Card, LookupError> {
        let url = format!("{}/cards/{}", self.base_url, urlencoding::encode(id));
        debug!(%url, "fetching card");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json::<Card>().await?)
    }

    /// Run the non-streaming search variant, `GET /search/`.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, OracleError> {
        let url = format!(
            "{}/search/?query={}",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OracleError::ServerError { status, message });
        }

        Ok(response.json::<SearchResponse>().await?)
    }

    /// Check whether the backend is reachable.
    ///
    /// # Returns
    /// `true` if the root health endpoint returns a success status
    pub async fn health_check(&self) -> Result<bool, OracleError> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl CardResolver for OracleClient {
    async fn resolve(&self, id: &str) -> Result<Card, LookupError> {
        self.fetch_card(id).await
    }
}
