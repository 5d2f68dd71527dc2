//! packlab-core: seeded pack selection and booster simulation.
//!
//! Two independent pipelines:
//!   - selection: seed -> stream -> which packs to open out of a lot;
//!   - simulation: catalog + box profile -> tiers -> pools -> packs -> summary.
//!
//! Everything is synchronous and owns its inputs for the length of a
//! call. No I/O happens inside the stages; loaders live in `catalog`
//! and `config`.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod pack;
pub mod pool;
pub mod rng;
pub mod seed;
pub mod selector;
pub mod summary;
pub mod tiers;
pub mod types;
