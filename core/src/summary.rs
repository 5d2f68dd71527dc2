//! Per-rarity and per-card tallies over a set of opened packs.

use crate::pack::Pack;
use crate::types::{CardId, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityCount {
    pub rarity: Rarity,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCount {
    pub id: CardId,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSummary {
    pub pack_count: u64,
    pub total_cards: u64,
    /// Packs whose first card came from the rare pool.
    pub guaranteed_slots: u64,
    /// Packs with fewer than `cards_per_pack` cards.
    pub short_packs: u64,
    /// Sorted by rarity key.
    pub by_rarity: Vec<RarityCount>,
    /// Most pulled first, then by id.
    pub by_card: Vec<CardCount>,
}

impl PackSummary {
    pub fn rarity_count(&self, rarity: &str) -> u64 {
        self.by_rarity
            .iter()
            .find(|r| r.rarity == rarity)
            .map(|r| r.count)
            .unwrap_or(0)
    }
}

pub fn summarize(packs: &[Pack<'_>], cards_per_pack: u32) -> PackSummary {
    let mut by_rarity: BTreeMap<&str, u64> = BTreeMap::new();
    let mut by_card: HashMap<(&str, &str), CardCount> = HashMap::new();
    let mut summary = PackSummary {
        pack_count: packs.len() as u64,
        ..PackSummary::default()
    };

    for pack in packs {
        if pack.guaranteed {
            summary.guaranteed_slots += 1;
        }
        if pack.len() < cards_per_pack as usize {
            summary.short_packs += 1;
        }
        for card in &pack.cards {
            summary.total_cards += 1;
            *by_rarity.entry(card.rarity.as_str()).or_default() += 1;
            by_card
                .entry((card.id.as_str(), card.rarity.as_str()))
                .or_insert_with(|| CardCount {
                    id: card.id.clone(),
                    rarity: card.rarity.clone(),
                    name: card.name.clone(),
                    count: 0,
                })
                .count += 1;
        }
    }

    summary.by_rarity = by_rarity
        .into_iter()
        .map(|(rarity, count)| RarityCount { rarity: rarity.to_string(), count })
        .collect();

    let mut cards: Vec<CardCount> = by_card.into_values().collect();
    cards.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.id.cmp(&b.id))
            .then_with(|| a.rarity.cmp(&b.rarity))
    });
    summary.by_card = cards;
    summary
}
