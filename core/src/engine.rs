//! The simulation engine: wires seeds, streams and stages together.
//!
//! STAGE ORDER (fixed, documented, never reordered):
//!   1. Tier resolution  (no randomness)
//!   2. Pool building    (StreamSlot::Pool)
//!   3. Pack generation  (StreamSlot::Packs)
//!   4. Aggregation      (no randomness)
//!
//! RULES:
//!   - Every run builds its own streams from its own seed.
//!   - Stages read only their arguments; nothing outlives a run.
//!   - Degraded results are reported, never raised.

use crate::{
    catalog::CardCatalog,
    config::{BoxProfile, SimulationConfig},
    error::SimResult,
    event::SimWarning,
    pack::{generate_packs, Pack},
    pool::{build_pools, TierContribution},
    rng::{RngBank, StreamSlot},
    seed::{resolve_or_now, SeedInput},
    selector::{select_packs, Selection},
    summary::{summarize, PackSummary},
    tiers::resolve_tiers,
    types::{Rarity, Seed},
};
use serde::Serialize;

/// Everything one simulation run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport<'a> {
    pub seed: Seed,
    pub profile: String,
    pub config: SimulationConfig,
    /// Governed rarities, rarest first.
    pub tiers: Vec<Rarity>,
    pub filler_rarities: Vec<Rarity>,
    pub max_denominator: u32,
    pub card_pool_size: u64,
    pub rare_pool_size: usize,
    pub filler_pool_size: usize,
    pub contributions: Vec<TierContribution>,
    pub packs: Vec<Pack<'a>>,
    pub summary: PackSummary,
    pub warnings: Vec<SimWarning>,
}

/// Pick `open_packs` of `total_packs` packs. With no caller seed the
/// seed is derived from the clock; either way it is returned.
pub fn run_selection(
    total_packs: i64,
    open_packs: i64,
    seed: Option<&SeedInput>,
) -> SimResult<Selection> {
    let seed_used = resolve_or_now(seed);
    let mut rng = RngBank::new(seed_used).stream(StreamSlot::Selector);
    let selected = select_packs(total_packs, open_packs, &mut rng)?;
    log::info!(
        "selection: seed={seed_used} opened {} of {total_packs} packs",
        selected.len()
    );
    Ok(Selection { seed_used, selected })
}

pub struct BoosterSim {
    pub rng_bank: RngBank,
}

impl BoosterSim {
    pub fn new(seed: Seed) -> Self {
        Self { rng_bank: RngBank::new(seed) }
    }

    pub fn from_input(seed: Option<&SeedInput>) -> Self {
        Self::new(resolve_or_now(seed))
    }

    pub fn seed(&self) -> Seed {
        self.rng_bank.master_seed()
    }

    /// Run one full simulation of `profile` over `catalog`.
    pub fn run<'a>(
        &self,
        catalog: &'a CardCatalog,
        profile: &BoxProfile,
    ) -> SimResult<SimulationReport<'a>> {
        let config = profile.simulation;
        config.validate()?;

        let tiers = resolve_tiers(&profile.rarities)?;

        let mut pool_rng = self.rng_bank.stream(StreamSlot::Pool);
        let pools = build_pools(catalog, &tiers, &config, &mut pool_rng);

        let mut pack_rng = self.rng_bank.stream(StreamSlot::Packs);
        let packs = generate_packs(&pools, &config, &mut pack_rng);

        let summary = summarize(&packs, config.cards_per_pack);

        for warning in &pools.warnings {
            log::warn!("run seed={}: {warning}", self.seed());
        }
        log::info!(
            "simulation '{}': seed={} packs={} cards={} guaranteed={} short={}",
            profile.name,
            self.seed(),
            summary.pack_count,
            summary.total_cards,
            summary.guaranteed_slots,
            summary.short_packs
        );

        Ok(SimulationReport {
            seed: self.seed(),
            profile: profile.name.clone(),
            config,
            tiers: tiers.governed_rarities(),
            filler_rarities: pools.filler_rarities(),
            max_denominator: pools.max_denominator,
            card_pool_size: pools.card_pool_size,
            rare_pool_size: pools.rare.len(),
            filler_pool_size: pools.filler.len(),
            contributions: pools.contributions,
            packs,
            summary,
            warnings: pools.warnings,
        })
    }
}
