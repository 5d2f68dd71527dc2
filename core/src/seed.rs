//! Seeding policies.
//!
//! Two ways to get a seed, both resolving to a plain `u64`:
//!   - time-derived: milliseconds elapsed since REFERENCE_EPOCH,
//!     computed once per action and handed back to the caller;
//!   - caller-supplied: an integer, or any string.

use crate::types::Seed;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Fixed origin for time-derived seeds.
pub fn reference_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Milliseconds between REFERENCE_EPOCH and `now`. Clamped at zero.
pub fn time_seed_at(now: DateTime<Utc>) -> Seed {
    let millis = now
        .signed_duration_since(reference_epoch())
        .num_milliseconds();
    u64::try_from(millis).unwrap_or(0)
}

pub fn time_seed() -> Seed {
    time_seed_at(Utc::now())
}

/// A seed as the caller gave it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedInput {
    Number(u64),
    Text(String),
}

impl SeedInput {
    /// Integers map to themselves. Strings that are integers map to
    /// that integer, so "12345" and 12345 agree; any other string is
    /// hashed with FNV-1a.
    pub fn resolve(&self) -> Seed {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => match s.trim().parse::<u64>() {
                Ok(n) => n,
                Err(_) => fnv1a(s.as_bytes()),
            },
        }
    }
}

impl From<u64> for SeedInput {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for SeedInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SeedInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Display for SeedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Resolve an optional caller seed, falling back to the clock.
pub fn resolve_or_now(input: Option<&SeedInput>) -> Seed {
    match input {
        Some(seed) => seed.resolve(),
        None => time_seed(),
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}
