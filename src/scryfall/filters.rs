//! Client-side filtering of a loaded card list.

use crate::cards::{Card, Color};

/// One selectable color-identity filter value.
///
/// Colorless is a real selection, distinct from "no colors selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorFilter {
    Color(Color),
    Colorless,
}

/// Active filters over the loaded card list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardFilters {
    /// Exact mana value; `Some(0.0)` is a real filter
    pub cmc: Option<f64>,
    /// Selected color identities; empty means no color filtering
    pub colors: Vec<ColorFilter>,
    /// Exact set name
    pub set_name: Option<String>,
}

impl CardFilters {
    pub fn is_empty(&self) -> bool {
        self.cmc.is_none() && self.colors.is_empty() && self.set_name.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a card passes every active filter.
    ///
    /// Colorless selected on its own matches only cards with an empty
    /// color identity; combined with any color it matches nothing. A
    /// multi-color selection requires the card to carry all of them.
    pub fn matches(&self, card: &Card) -> bool {
        if let Some(cmc) = self.cmc {
            if card.cmc != cmc {
                return false;
            }
        }

        if !self.colors.is_empty() {
            if self.colors.contains(&ColorFilter::Colorless) {
                return self.colors.len() == 1 && card.color_identity.is_empty();
            }
            let matches_all = self.colors.iter().all(|filter| match filter {
                ColorFilter::Color(color) => card.color_identity.contains(color),
                ColorFilter::Colorless => unreachable!("handled above"),
            });
            if !matches_all {
                return false;
            }
        }

        if let Some(set_name) = &self.set_name {
            if card.set_name.as_deref() != Some(set_name.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Unique mana values present in the list, ascending.
pub fn cmc_options(cards: &[Card]) -> Vec<f64> {
    let mut options: Vec<f64> = cards.iter().map(|card| card.cmc).collect();
    options.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    options.dedup();
    options
}

/// Unique color identities present in the list, colorless included.
pub fn color_options(cards: &[Card]) -> Vec<ColorFilter> {
    let mut options: Vec<ColorFilter> = Vec::new();
    for card in cards {
        if card.color_identity.is_empty() {
            options.push(ColorFilter::Colorless);
        }
        for color in &card.color_identity {
            options.push(ColorFilter::Color(*color));
        }
    }
    options.sort();
    options.dedup();
    options
}

/// Unique set names present in the list, sorted.
pub fn set_name_options(cards: &[Card]) -> Vec<String> {
    let mut options: Vec<String> = cards
        .iter()
        .filter_map(|card| card.set_name.clone())
        .collect();
    options.sort();
    options.dedup();
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, cmc: f64, identity: &str, set_name: &str) -> Card {
        let colors: Vec<String> = identity.chars().map(|c| format!("\"{}\"", c)).collect();
        serde_json::from_str(&format!(
            r#"{{"id":"{}","name":"{}","cmc":{},"color_identity":[{}],"set_name":"{}"}}"#,
            id,
            id,
            cmc,
            colors.join(","),
            set_name
        ))
        .unwrap()
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = CardFilters::default();
        assert!(filters.is_empty());
        assert!(filters.matches(&card("a", 3.0, "UR", "Alpha")));
    }

    #[test]
    fn test_cmc_filter_including_zero() {
        let filters = CardFilters {
            cmc: Some(0.0),
            ..Default::default()
        };
        assert!(filters.matches(&card("lotus", 0.0, "", "Alpha")));
        assert!(!filters.matches(&card("bolt", 1.0, "R", "Alpha")));
    }

    #[test]
    fn test_multi_color_selection_requires_all() {
        let filters = CardFilters {
            colors: vec![ColorFilter::Color(Color::U), ColorFilter::Color(Color::R)],
            ..Default::default()
        };
        assert!(filters.matches(&card("izzet", 2.0, "UR", "Alpha")));
        assert!(!filters.matches(&card("mono", 2.0, "U", "Alpha")));
    }

    #[test]
    fn test_colorless_alone_matches_only_colorless() {
        let filters = CardFilters {
            colors: vec![ColorFilter::Colorless],
            ..Default::default()
        };
        assert!(filters.matches(&card("sol-ring", 1.0, "", "Alpha")));
        assert!(!filters.matches(&card("bolt", 1.0, "R", "Alpha")));
    }

    #[test]
    fn test_colorless_combined_with_color_matches_nothing() {
        let filters = CardFilters {
            colors: vec![ColorFilter::Colorless, ColorFilter::Color(Color::R)],
            ..Default::default()
        };
        assert!(!filters.matches(&card("sol-ring", 1.0, "", "Alpha")));
        assert!(!filters.matches(&card("bolt", 1.0, "R", "Alpha")));
    }

    #[test]
    fn test_set_name_filter() {
        let filters = CardFilters {
            set_name: Some("Beta".to_string()),
            ..Default::default()
        };
        assert!(filters.matches(&card("a", 1.0, "R", "Beta")));
        assert!(!filters.matches(&card("b", 1.0, "R", "Alpha")));
    }

    #[test]
    fn test_option_derivation() {
        let cards = vec![
            card("a", 2.0, "UR", "Beta"),
            card("b", 0.0, "", "Alpha"),
            card("c", 2.0, "U", "Alpha"),
        ];
        assert_eq!(cmc_options(&cards), vec![0.0, 2.0]);
        assert_eq!(
            color_options(&cards),
            vec![
                ColorFilter::Color(Color::U),
                ColorFilter::Color(Color::R),
                ColorFilter::Colorless,
            ]
        );
        assert_eq!(set_name_options(&cards), vec!["Alpha", "Beta"]);
    }
}
