use crate::error::{SimError, SimResult};
use crate::types::Rarity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Box geometry plus how many packs to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub cards_per_pack: u32,
    pub packs_per_box: u32,
    pub boxes_per_case: u32,
    pub pack_count: u32,
}

impl SimulationConfig {
    pub fn new(
        cards_per_pack: u32,
        packs_per_box: u32,
        boxes_per_case: u32,
        pack_count: u32,
    ) -> SimResult<Self> {
        let config = Self {
            cards_per_pack,
            packs_per_box,
            boxes_per_case,
            pack_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Every field must be a positive integer.
    pub fn validate(&self) -> SimResult<()> {
        let fields = [
            ("cards_per_pack", self.cards_per_pack),
            ("packs_per_box", self.packs_per_box),
            ("boxes_per_case", self.boxes_per_case),
            ("pack_count", self.pack_count),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(SimError::validation(field, "must be a positive integer"));
            }
        }
        Ok(())
    }

    pub fn packs_per_case(&self) -> u64 {
        u64::from(self.packs_per_box) * u64::from(self.boxes_per_case)
    }

    pub fn with_pack_count(mut self, pack_count: u32) -> SimResult<Self> {
        self.pack_count = pack_count;
        self.validate()?;
        Ok(self)
    }

    /// Switch to opening whole boxes or cases instead of loose packs.
    pub fn opening(self, scope: OpenScope) -> SimResult<Self> {
        let packs = match scope {
            OpenScope::Packs(n) => u64::from(n),
            OpenScope::Boxes(n) => u64::from(n) * u64::from(self.packs_per_box),
            OpenScope::Cases(n) => u64::from(n) * self.packs_per_case(),
        };
        let packs = u32::try_from(packs)
            .map_err(|_| SimError::validation("pack_count", format!("{packs} packs is too many")))?;
        self.with_pack_count(packs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "count", rename_all = "snake_case")]
pub enum OpenScope {
    Packs(u32),
    Boxes(u32),
    Cases(u32),
}

/// "At least one `rarity` per N packs / boxes / cases".
/// Zero means unset; a rule with nothing set is filler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuaranteeRule {
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_pack: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_box: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_case: Option<u32>,
}

impl GuaranteeRule {
    pub fn filler(rarity: impl Into<Rarity>) -> Self {
        Self {
            rarity: rarity.into(),
            per_pack: None,
            per_box: None,
            per_case: None,
        }
    }

    pub fn per_pack(rarity: impl Into<Rarity>, n: u32) -> Self {
        Self { per_pack: Some(n), ..Self::filler(rarity) }.normalized()
    }

    pub fn per_box(rarity: impl Into<Rarity>, n: u32) -> Self {
        Self { per_box: Some(n), ..Self::filler(rarity) }.normalized()
    }

    pub fn per_case(rarity: impl Into<Rarity>, n: u32) -> Self {
        Self { per_case: Some(n), ..Self::filler(rarity) }.normalized()
    }

    /// Drop non-positive denominators.
    pub fn normalized(self) -> Self {
        let keep = |v: Option<u32>| v.filter(|n| *n > 0);
        Self {
            per_pack: keep(self.per_pack),
            per_box: keep(self.per_box),
            per_case: keep(self.per_case),
            rarity: self.rarity,
        }
    }

    pub fn is_governed(&self) -> bool {
        self.per_pack.is_some() || self.per_box.is_some() || self.per_case.is_some()
    }
}

/// A product's box layout and rarity rules, as stored in data/profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxProfile {
    #[serde(default)]
    pub name: String,
    pub simulation: SimulationConfig,
    /// Order matters: it breaks ties between equally rare tiers.
    #[serde(default)]
    pub rarities: Vec<GuaranteeRule>,
}

impl BoxProfile {
    pub fn new(
        name: impl Into<String>,
        simulation: SimulationConfig,
        rarities: Vec<GuaranteeRule>,
    ) -> SimResult<Self> {
        simulation.validate()?;
        check_unique_rarities(&rarities)?;
        Ok(Self {
            name: name.into(),
            simulation,
            rarities: rarities.into_iter().map(GuaranteeRule::normalized).collect(),
        })
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let mut profile: BoxProfile = serde_json::from_str(content)?;
        profile.simulation.validate()?;
        check_unique_rarities(&profile.rarities)?;
        profile.rarities = profile
            .rarities
            .into_iter()
            .map(GuaranteeRule::normalized)
            .collect();
        Ok(profile)
    }

    /// Load a profile JSON file.
    /// In tests, use BoxProfile::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let profile = Self::from_json_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid profile {path}: {e}"))?;
        log::debug!(
            "profile '{}': {} rarity rules loaded from {path}",
            profile.name,
            profile.rarities.len()
        );
        Ok(profile)
    }

    /// A 24-pack box, 12-box case product with one SP per box,
    /// one SEC per case and an SR every other pack.
    pub fn default_test() -> Self {
        Self {
            name: "test-booster".into(),
            simulation: SimulationConfig {
                cards_per_pack: 6,
                packs_per_box: 24,
                boxes_per_case: 12,
                pack_count: 24,
            },
            rarities: vec![
                GuaranteeRule::per_pack("SR", 2),
                GuaranteeRule::per_case("SEC", 1),
                GuaranteeRule::per_box("SP", 1),
                GuaranteeRule::filler("R"),
                GuaranteeRule::filler("U"),
                GuaranteeRule::filler("C"),
            ],
        }
    }
}

/// One rule per rarity. A repeated rarity would claim its pool share
/// twice, or be governed and filler at once.
pub fn check_unique_rarities(rules: &[GuaranteeRule]) -> SimResult<()> {
    let mut seen = HashSet::with_capacity(rules.len());
    for rule in rules {
        if !seen.insert(rule.rarity.as_str()) {
            return Err(SimError::validation(
                "rarities",
                format!("duplicate rarity '{}'", rule.rarity),
            ));
        }
    }
    Ok(())
}

/// Parse a raw user-entered count ("12", " 200 ", "-3").
/// Non-numeric input is a validation error; range checks are the caller's.
pub fn parse_count(field: &'static str, raw: &str) -> SimResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| SimError::validation(field, format!("'{raw}' is not a number")))
}
