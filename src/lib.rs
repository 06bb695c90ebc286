//! Card Oracle client library.
//!
//! A streaming chat and card-search client for the Card Oracle backend:
//! SSE frame splitting and event decoding, an incremental conversation
//! reducer, a card lookup resolver, a Scryfall search/browse layer, and a
//! channel-driven voice-agent bridge.
//!
//! This library exposes modules for use in integration tests.

pub mod agent;
pub mod cards;
pub mod chat;
pub mod config;
pub mod oracle;
pub mod scryfall;
pub mod sse;
