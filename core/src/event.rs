//! Degraded-result warnings.
//!
//! RULE: an empty pool never fails a run. The affected slot is left
//! out, and the reason is recorded here so callers (and tests) can
//! see why a pack came up short.

use crate::types::Rarity;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimWarning {
    /// A governed rarity has no cards in the catalog.
    RarityHasNoCards { rarity: Rarity },
    /// The rare pool hit its cap before this tier got its full share.
    RarePoolTruncated {
        rarity: Rarity,
        requested: u64,
        accepted: u64,
    },
    /// No guaranteed slot will be filled.
    RarePoolEmpty,
    /// Packs will carry only their guaranteed card, if any.
    FillerPoolEmpty,
}

impl fmt::Display for SimWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RarityHasNoCards { rarity } => {
                write!(f, "governed rarity '{rarity}' has no cards in the catalog")
            }
            Self::RarePoolTruncated { rarity, requested, accepted } => write!(
                f,
                "rare pool full: '{rarity}' got {accepted} of {requested} entries"
            ),
            Self::RarePoolEmpty => write!(f, "rare pool is empty; guaranteed slots omitted"),
            Self::FillerPoolEmpty => write!(f, "filler pool is empty; filler slots omitted"),
        }
    }
}
