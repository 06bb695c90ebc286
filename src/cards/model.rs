//! Card record types, shaped after the Scryfall card object.
//!
//! The lookup endpoint returns whatever subset of fields it has stored, so
//! everything beyond `id` and `name` is permissive. Only `id` participates
//! in de-duplication.

use serde::{Deserialize, Serialize};

/// One of the five Magic colors, serialized as its single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    W,
    U,
    B,
    R,
    G,
}

/// Image URLs at the various sizes Scryfall provides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImageUris {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub normal: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub art_crop: Option<String>,
    #[serde(default)]
    pub border_crop: Option<String>,
}

/// Print prices, as decimal strings per the Scryfall API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Prices {
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
    #[serde(default)]
    pub usd_etched: Option<String>,
    #[serde(default)]
    pub eur: Option<String>,
    #[serde(default)]
    pub eur_foil: Option<String>,
    #[serde(default)]
    pub tix: Option<String>,
}

/// One face of a multi-faced card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

/// A full card record from the lookup or search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub oracle_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    /// Converted mana cost ("mana value"); fractional for a few oddball cards.
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub color_identity: Vec<Color>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub collector_number: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub prices: Option<Prices>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_card_deserializes() {
        let card: Card = serde_json::from_str(
            r#"{"id":"ae1f2b3c-4d5e-6f70-8192-a3b4c5d6e7f8","name":"Lightning Bolt"}"#,
        )
        .unwrap();
        assert_eq!(card.name, "Lightning Bolt");
        assert_eq!(card.cmc, 0.0);
        assert!(card.color_identity.is_empty());
        assert!(card.image_uris.is_none());
    }

    #[test]
    fn test_colors_round_trip_as_letters() {
        let card: Card = serde_json::from_str(
            r#"{"id":"x","name":"Test","colors":["R"],"color_identity":["U","R"]}"#,
        )
        .unwrap();
        assert_eq!(card.colors, vec![Color::R]);
        assert_eq!(card.color_identity, vec![Color::U, Color::R]);
        let json = serde_json::to_string(&card.color_identity).unwrap();
        assert_eq!(json, r#"["U","R"]"#);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let card: Card = serde_json::from_str(
            r#"{"id":"x","name":"Test","object":"card","multiverse_ids":[1,2],"cmc":2.5}"#,
        )
        .unwrap();
        assert_eq!(card.cmc, 2.5);
    }
}
