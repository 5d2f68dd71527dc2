//! Card records as supplied by the external catalog.
//!
//! The core treats the catalog as an opaque, read-only list. Display
//! fields the core does not understand ride along untouched.

use crate::types::{CardId, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(alias = "cardno")]
    pub id: CardId,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub display: serde_json::Map<String, serde_json::Value>,
}

impl Card {
    pub fn new(id: impl Into<CardId>, rarity: impl Into<Rarity>) -> Self {
        Self {
            id: id.into(),
            rarity: rarity.into(),
            name: None,
            display: serde_json::Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Bare(Vec<Card>),
    Wrapped { cards: Vec<Card> },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<Card>,
}

impl CardCatalog {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Accepts either a bare JSON array of cards or `{"cards": [...]}`.
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        let cards = match file {
            CatalogFile::Bare(cards) => cards,
            CatalogFile::Wrapped { cards } => cards,
        };
        Ok(Self { cards })
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let catalog = Self::from_json_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        log::debug!("catalog: loaded {} cards from {path}", catalog.len());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards of one rarity, in catalog order.
    pub fn of_rarity(&self, rarity: &str) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.rarity == rarity).collect()
    }

    /// Distinct rarity keys present in the catalog.
    pub fn rarities(&self) -> BTreeSet<&str> {
        self.cards.iter().map(|c| c.rarity.as_str()).collect()
    }
}
