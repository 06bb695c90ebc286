//! Scryfall REST search client.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cards::Card;

pub const SCRYFALL_API_BASE: &str = "https://api.scryfall.com";

/// Error type for Scryfall API operations
#[derive(Debug, Error)]
pub enum ScryfallError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// API returned an error status
    #[error("Scryfall API error: {status}")]
    Api { status: u16 },
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPage {
    #[serde(default)]
    pub data: Vec<Card>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub total_cards: Option<u64>,
}

/// Client for the Scryfall card search API.
pub struct ScryfallClient {
    pub base_url: String,
    client: Client,
}

impl Default for ScryfallClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ScryfallClient {
    pub fn new() -> Self {
        Self::with_base_url(SCRYFALL_API_BASE.to_string())
    }

    /// Custom base URL, used to point tests at a mock server.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Search cards for a query, ordered by mana value.
    pub async fn search(&self, query: &str) -> Result<CardPage, ScryfallError> {
        let url = format!(
            "{}/cards/search?order=cmc&q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        self.fetch_page(&url).await
    }

    /// Follow a `next_page` URL exactly as the API provided it.
    pub async fn next_page(&self, next_page_url: &str) -> Result<CardPage, ScryfallError> {
        self.fetch_page(next_page_url).await
    }

    async fn fetch_page(&self, url: &str) -> Result<CardPage, ScryfallError> {
        let response = self.client.get(url).send().await?;
        debug!(%url, status = response.status().as_u16(), "scryfall card search");

        if !response.status().is_success() {
            return Err(ScryfallError::Api {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json::<CardPage>().await?)
    }
}
