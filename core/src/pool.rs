//! Pool building: turns sparse guarantee tiers into a weighted rare pool.
//!
//! The rare pool stands for `card_pool_size` packs (one case, times the
//! largest per-case denominator). Each tier gets one entry per pack
//! interval it guarantees, drawn uniformly with replacement from that
//! rarity's cards, so drawing one entry per pack reproduces the rates.

use crate::catalog::{Card, CardCatalog};
use crate::config::{GuaranteeRule, SimulationConfig};
use crate::event::SimWarning;
use crate::rng::RandomSource;
use crate::tiers::ResolvedTiers;
use crate::types::Rarity;
use serde::{Deserialize, Serialize};

/// How much of the rare pool one tier ended up with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierContribution {
    pub rarity: Rarity,
    /// Equivalent pack interval for the guarantee.
    pub denominator: u64,
    pub requested: u64,
    pub drawn: u64,
}

#[derive(Debug, Clone)]
pub struct PoolSet<'a> {
    pub card_pool_size: u64,
    pub max_denominator: u32,
    pub rare: Vec<&'a Card>,
    pub filler: Vec<&'a Card>,
    pub contributions: Vec<TierContribution>,
    pub warnings: Vec<SimWarning>,
}

impl PoolSet<'_> {
    /// Distinct rarities in the filler pool, first seen first. Includes
    /// catalog rarities no rule mentions.
    pub fn filler_rarities(&self) -> Vec<Rarity> {
        let mut seen: Vec<Rarity> = Vec::new();
        for card in &self.filler {
            if !seen.contains(&card.rarity) {
                seen.push(card.rarity.clone());
            }
        }
        seen
    }
}

/// Pack interval a rule guarantees one hit over.
/// Case beats box beats pack when several are set.
pub fn effective_denominator(rule: &GuaranteeRule, config: &SimulationConfig) -> u64 {
    if let Some(per_case) = rule.per_case {
        config.packs_per_case().saturating_mul(u64::from(per_case))
    } else if let Some(per_box) = rule.per_box {
        u64::from(config.packs_per_box).saturating_mul(u64::from(per_box))
    } else {
        rule.per_pack.map(u64::from).unwrap_or(0)
    }
}

pub fn card_pool_size(tiers: &ResolvedTiers, config: &SimulationConfig) -> u64 {
    config
        .packs_per_case()
        .saturating_mul(u64::from(tiers.max_denominator()))
}

pub fn build_pools<'a, R: RandomSource + ?Sized>(
    catalog: &'a CardCatalog,
    tiers: &ResolvedTiers,
    config: &SimulationConfig,
    rng: &mut R,
) -> PoolSet<'a> {
    let max_denominator = tiers.max_denominator();
    let pool_size = card_pool_size(tiers, config);

    let mut rare: Vec<&'a Card> = Vec::new();
    let mut contributions = Vec::with_capacity(tiers.governed.len());
    let mut warnings = Vec::new();

    for rule in &tiers.governed {
        let denominator = effective_denominator(rule, config);
        let requested = if denominator == 0 { 0 } else { pool_size / denominator };

        let candidates: Vec<&'a Card> = catalog.of_rarity(&rule.rarity);
        if candidates.is_empty() {
            log::debug!("pool: governed rarity '{}' has no cards, skipping", rule.rarity);
            warnings.push(SimWarning::RarityHasNoCards { rarity: rule.rarity.clone() });
            contributions.push(TierContribution {
                rarity: rule.rarity.clone(),
                denominator,
                requested,
                drawn: 0,
            });
            continue;
        }

        let room = pool_size.saturating_sub(rare.len() as u64);
        let drawn = requested.min(room);
        for _ in 0..drawn {
            rare.push(candidates[rng.next_index(candidates.len())]);
        }
        contributions.push(TierContribution {
            rarity: rule.rarity.clone(),
            denominator,
            requested,
            drawn,
        });
        log::debug!(
            "pool: {} per {denominator} packs -> {drawn}/{requested} entries",
            rule.rarity
        );

        if drawn < requested {
            log::debug!(
                "pool: rare pool full at {pool_size}, '{}' truncated to {drawn}",
                rule.rarity
            );
            warnings.push(SimWarning::RarePoolTruncated {
                rarity: rule.rarity.clone(),
                requested,
                accepted: drawn,
            });
        }
        if rare.len() as u64 >= pool_size {
            break;
        }
    }

    let filler: Vec<&'a Card> = catalog
        .cards
        .iter()
        .filter(|c| !tiers.is_governed(&c.rarity))
        .collect();

    if rare.is_empty() {
        warnings.push(SimWarning::RarePoolEmpty);
    }
    if filler.is_empty() {
        warnings.push(SimWarning::FillerPoolEmpty);
    }

    log::debug!(
        "pool: card_pool_size={pool_size} max_denominator={max_denominator} rare={} filler={}",
        rare.len(),
        filler.len()
    );

    PoolSet {
        card_pool_size: pool_size,
        max_denominator,
        rare,
        filler,
        contributions,
        warnings,
    }
}
