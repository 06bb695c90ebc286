//! Scryfall card search: REST client, client-side filters, and the
//! browsing state the voice agent's tools operate on.
//!
//! Docs: https://scryfall.com/docs/api/cards/search

mod browse;
mod client;
mod filters;

pub use browse::CardBrowser;
pub use client::{CardPage, ScryfallClient, ScryfallError, SCRYFALL_API_BASE};
pub use filters::{cmc_options, color_options, set_name_options, CardFilters, ColorFilter};
