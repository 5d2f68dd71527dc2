//! Deterministic random number generation.
//!
//! RULE: Nothing in the core may call any platform RNG.
//! Every stage receives a `RandomSource` from its caller, and the
//! engine derives those from a single seed through an RngBank.
//!
//! Each pipeline stage gets its own stream, seeded deterministically
//! from (master_seed XOR slot_index). This means:
//!   - Drawing more packs never changes how the pool was built.
//!   - Each stage's stream is fully reproducible in isolation.

use crate::types::Seed;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// The single injection seam for randomness.
pub trait RandomSource {
    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// Roll an index in [0, len) as `floor(next_f64() * len)`.
    /// `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "len must be > 0");
        let roll = (self.next_f64() * len as f64).floor() as usize;
        roll.min(len.saturating_sub(1))
    }
}

/// A named, seeded PCG stream.
pub struct StreamRng {
    pub name: &'static str,
    seed: Seed,
    inner: Pcg64Mcg,
}

impl StreamRng {
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            name: "unnamed",
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

impl RandomSource for StreamRng {
    fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Replays a fixed list of rolls, cycling when exhausted.
/// Used to pin down exact draw sequences.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    rolls: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    /// Rolls outside [0, 1) are clamped into range.
    ///
    /// # Panics
    ///
    /// Panics if `rolls` is empty; there is nothing to cycle through.
    pub fn new(rolls: Vec<f64>) -> Self {
        assert!(!rolls.is_empty(), "SequenceRng needs at least one roll");
        let rolls = rolls
            .into_iter()
            .map(|r| r.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { rolls, cursor: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}

/// All stage streams for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: Seed,
}

impl RngBank {
    pub fn new(master_seed: Seed) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> Seed {
        self.master_seed
    }

    pub fn stream(&self, slot: StreamSlot) -> StreamRng {
        let derived = self.master_seed ^ (slot as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        StreamRng::from_seed(derived).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every stage's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Selector = 0,
    Pool = 1,
    Packs = 2,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Selector => "selector",
            Self::Pool => "pool",
            Self::Packs => "packs",
        }
    }
}
