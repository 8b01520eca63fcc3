use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

const BUILTIN_CARDS: &str = include_str!("../data/cards.json");

/// A feature card shown in the deck. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    pub image: String,
    pub definition: String,
    pub flavor: String,
    #[serde(default)]
    pub merits: Vec<String>,
    #[serde(default)]
    pub why_us: Vec<String>,
}

impl Card {
    /// Host part of the image URL, used as the image placeholder caption
    pub fn image_host(&self) -> &str {
        let rest = self
            .image
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.image);
        rest.split('/').next().unwrap_or(rest)
    }
}

/// Ordered, read-only collection of cards with unique ids.
#[derive(Debug, Clone, Default)]
pub struct CardSet {
    cards: Vec<Card>,
}

impl CardSet {
    /// The dataset compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CARDS)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let cards: Vec<Card> = serde_json::from_str(raw)?;
        Self::new(cards)
    }

    pub fn new(cards: Vec<Card>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(card.id.as_str()) {
                return Err(Error::DuplicateCardId {
                    id: card.id.clone(),
                });
            }
        }
        tracing::debug!(count = cards.len(), "card dataset loaded");
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_dataset_loads() {
        let set = CardSet::builtin().unwrap();
        assert_eq!(set.len(), 6);
        assert_eq!(set.get(0).unwrap().id, "discovery");
        assert_eq!(set.position("payouts"), Some(4));
    }

    #[test]
    fn test_why_us_uses_camel_case_key() {
        let set = CardSet::from_json(
            r#"[{"id":"a","title":"A","image":"x","definition":"d","flavor":"f",
                "merits":["m"],"whyUs":["w1","w2"]}]"#,
        )
        .unwrap();
        assert_eq!(set.get(0).unwrap().why_us, vec!["w1", "w2"]);
    }

    #[test]
    fn test_missing_lists_become_empty() {
        let set = CardSet::from_json(
            r#"[{"id":"a","title":"A","image":"x","definition":"d","flavor":"f"}]"#,
        )
        .unwrap();
        let card = set.get(0).unwrap();
        assert!(card.merits.is_empty());
        assert!(card.why_us.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = CardSet::from_json(
            r#"[{"id":"a","title":"A","image":"x","definition":"d","flavor":"f"},
                {"id":"a","title":"B","image":"y","definition":"d","flavor":"f"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateCardId { id } if id == "a"));
    }

    #[test]
    fn test_invalid_json_is_dataset_error() {
        assert!(matches!(
            CardSet::from_json("{not json"),
            Err(Error::Dataset(_))
        ));
    }

    #[test]
    fn test_image_host() {
        let set = CardSet::builtin().unwrap();
        assert_eq!(set.get(0).unwrap().image_host(), "images.siremedia.co");
    }
}
