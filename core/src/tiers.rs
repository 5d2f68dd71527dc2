//! Guarantee tier resolution.
//!
//! Splits the rule list into governed tiers (rarest first) and filler
//! rarities. The pool builder walks the governed list in order, so the
//! rarest tier claims its share of the pool first.

use crate::config::{check_unique_rarities, GuaranteeRule};
use crate::error::SimResult;
use crate::types::Rarity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTiers {
    pub governed: Vec<GuaranteeRule>,
    pub filler: Vec<Rarity>,
}

impl ResolvedTiers {
    pub fn is_governed(&self, rarity: &str) -> bool {
        self.governed.iter().any(|r| r.rarity == rarity)
    }

    pub fn governed_rarities(&self) -> Vec<Rarity> {
        self.governed.iter().map(|r| r.rarity.clone()).collect()
    }

    /// Largest per-case denominator among governed tiers, 1 if none.
    pub fn max_denominator(&self) -> u32 {
        self.governed
            .iter()
            .filter_map(|r| r.per_case)
            .max()
            .unwrap_or(1)
    }
}

/// Present beats absent; among present, the larger value is rarer.
/// `None` only when neither side sets the field.
fn rarer_first(a: Option<u32>, b: Option<u32>) -> Option<Ordering> {
    match (a, b) {
        (Some(x), Some(y)) => Some(y.cmp(&x)),
        (Some(_), None) => Some(Ordering::Less),
        (None, Some(_)) => Some(Ordering::Greater),
        (None, None) => None,
    }
}

/// Case is compared first; box only when neither side has a case
/// rule, pack only when neither has a box rule. Ties compare equal
/// and keep their input order.
pub fn compare_rules(a: &GuaranteeRule, b: &GuaranteeRule) -> Ordering {
    rarer_first(a.per_case, b.per_case)
        .or_else(|| rarer_first(a.per_box, b.per_box))
        .or_else(|| rarer_first(a.per_pack, b.per_pack))
        .unwrap_or(Ordering::Equal)
}

/// Fails when a rarity has more than one rule.
pub fn resolve_tiers(rules: &[GuaranteeRule]) -> SimResult<ResolvedTiers> {
    check_unique_rarities(rules)?;

    let (mut governed, filler): (Vec<GuaranteeRule>, Vec<GuaranteeRule>) = rules
        .iter()
        .cloned()
        .map(GuaranteeRule::normalized)
        .partition(GuaranteeRule::is_governed);

    // Stable: ties stay in caller order.
    governed.sort_by(compare_rules);

    log::debug!(
        "tiers: governed={:?} filler={:?}",
        governed.iter().map(|r| r.rarity.as_str()).collect::<Vec<_>>(),
        filler.iter().map(|r| r.rarity.as_str()).collect::<Vec<_>>()
    );

    Ok(ResolvedTiers {
        governed,
        filler: filler.into_iter().map(|r| r.rarity).collect(),
    })
}
