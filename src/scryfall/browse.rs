//! Browsing state over paginated Scryfall search results.

use tracing::{debug, warn};

use crate::cards::Card;

use super::client::ScryfallClient;
use super::filters::CardFilters;

/// Paginated search results plus the active client-side filters.
///
/// This is the state the voice agent's two tools operate on: a search
/// replaces the loaded list and resets filters, a filter call narrows the
/// visible subset without refetching.
pub struct CardBrowser {
    client: ScryfallClient,
    all_cards: Vec<Card>,
    has_more: bool,
    next_page_url: Option<String>,
    is_loading_more: bool,
    pub filters: CardFilters,
}

impl CardBrowser {
    pub fn new(client: ScryfallClient) -> Self {
        Self {
            client,
            all_cards: Vec::new(),
            has_more: false,
            next_page_url: None,
            is_loading_more: false,
            filters: CardFilters::default(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.all_cards
    }

    /// Cards passing the active filters.
    pub fn filtered(&self) -> Vec<&Card> {
        self.all_cards
            .iter()
            .filter(|card| self.filters.matches(card))
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Run a fresh search, replacing the loaded list and resetting
    /// filters. Returns the reply the voice agent speaks back.
    ///
    /// A failed request is reported the same way as an empty result set.
    pub async fn search(&mut self, query: &str) -> String {
        debug!(query, "card search");
        let page = match self.client.search(query).await {
            Ok(page) => page,
            Err(err) => {
                warn!(query, error = %err, "card search failed");
                self.all_cards.clear();
                self.has_more = false;
                self.next_page_url = None;
                self.clear_filters();
                return format!("You searched for {} but found no results", query);
            }
        };

        let result_count = page.data.len();
        if result_count == 0 {
            warn!(query, "card search returned no results");
            self.all_cards.clear();
            self.has_more = false;
            self.next_page_url = None;
            self.clear_filters();
            return format!("You searched for {} but found no results", query);
        }

        self.all_cards = page.data;
        self.has_more = page.has_more;
        self.next_page_url = page.next_page;
        self.clear_filters();
        format!(
            "I found {} results. Please click on them to learn more! Talk soon.",
            result_count
        )
    }

    /// Fetch and append the next page, if the API advertised one.
    ///
    /// A failed page fetch keeps the current list and pagination state so
    /// the caller can retry.
    pub async fn load_more(&mut self) {
        if self.is_loading_more {
            return;
        }
        let Some(url) = self.next_page_url.clone() else {
            return;
        };
        self.is_loading_more = true;

        match self.client.next_page(&url).await {
            Ok(page) => {
                self.all_cards.extend(page.data);
                self.has_more = page.has_more;
                self.next_page_url = page.next_page;
            }
            Err(err) => {
                warn!(%url, error = %err, "failed to load next page");
            }
        }
        self.is_loading_more = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Network paths are covered by the wiremock integration tests; here we
    // only exercise the pure state transitions.

    fn browser() -> CardBrowser {
        CardBrowser::new(ScryfallClient::with_base_url("http://unused".to_string()))
    }

    fn card(id: &str, cmc: f64) -> Card {
        serde_json::from_str(&format!(r#"{{"id":"{}","name":"{}","cmc":{}}}"#, id, id, cmc))
            .unwrap()
    }

    #[test]
    fn test_filtered_respects_active_filters() {
        let mut browser = browser();
        browser.all_cards = vec![card("a", 1.0), card("b", 2.0)];
        browser.filters.cmc = Some(2.0);
        let filtered = browser.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "b");

        browser.clear_filters();
        assert_eq!(browser.filtered().len(), 2);
    }

    #[tokio::test]
    async fn test_load_more_without_next_page_is_noop() {
        let mut browser = browser();
        browser.all_cards = vec![card("a", 1.0)];
        browser.load_more().await;
        assert_eq!(browser.cards().len(), 1);
    }
}
