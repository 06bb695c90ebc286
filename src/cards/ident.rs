//! Card identifier normalization.
//!
//! The stream emits card ids as whatever the language model produced:
//! sometimes a clean Scryfall UUID, sometimes percent-encoded, quoted, or
//! wrapped in prose. Normalization salvages a usable identifier from that.

use once_cell::sync::Lazy;
use regex::Regex;

static CARD_UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
    )
    .unwrap()
});

/// Normalize a raw card identifier from the stream.
///
/// Percent-decodes (falling back to the original on a bad encoding), trims,
/// then extracts the first canonical 8-4-4-4-12 hex identifier found
/// anywhere in the string, lowercased. Without one, quotes and all
/// whitespace are stripped and the rest is used as-is.
///
/// An empty result means there is no usable identifier and the caller
/// should not attempt a lookup.
pub fn normalize_card_id(raw_id: &str) -> String {
    let decoded = match urlencoding::decode(raw_id) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw_id.to_string(),
    };

    let trimmed = decoded.trim();
    if let Some(uuid) = CARD_UUID.find(trimmed) {
        return uuid.as_str().to_ascii_lowercase();
    }

    trimmed
        .chars()
        .filter(|c| !matches!(c, '"' | '\'') && !c.is_whitespace())
        .collect()
}
