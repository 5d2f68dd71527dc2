//! Pack generation: one guaranteed draw from the rare pool, then filler.

use crate::catalog::Card;
use crate::config::SimulationConfig;
use crate::pool::PoolSet;
use crate::rng::RandomSource;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pack<'a> {
    /// 0-based position in the opening order.
    pub index: u32,
    /// Whether `cards[0]` came from the rare pool.
    pub guaranteed: bool,
    pub cards: Vec<&'a Card>,
}

impl Pack<'_> {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn guaranteed_card(&self) -> Option<&Card> {
        if self.guaranteed {
            self.cards.first().copied()
        } else {
            None
        }
    }
}

/// Draw `config.pack_count` packs. Empty pools shorten packs instead
/// of failing.
pub fn generate_packs<'a, R: RandomSource + ?Sized>(
    pools: &PoolSet<'a>,
    config: &SimulationConfig,
    rng: &mut R,
) -> Vec<Pack<'a>> {
    let slots = config.cards_per_pack as usize;
    let mut packs = Vec::with_capacity(config.pack_count as usize);

    for index in 0..config.pack_count {
        let mut cards = Vec::with_capacity(slots);

        let guaranteed = !pools.rare.is_empty() && slots > 0;
        if guaranteed {
            cards.push(pools.rare[rng.next_index(pools.rare.len())]);
        }

        if !pools.filler.is_empty() {
            while cards.len() < slots {
                cards.push(pools.filler[rng.next_index(pools.filler.len())]);
            }
        }

        packs.push(Pack { index, guaranteed, cards });
    }

    log::debug!(
        "packs: drew {} packs of up to {slots} cards",
        packs.len()
    );
    packs
}
