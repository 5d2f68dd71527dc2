//! Shared primitive types used across the whole crate.

/// A card number as printed on the card ("cardno").
pub type CardId = String;

/// An opaque rarity key ("C", "R", "SR", "SP", ...).
/// Never an enum: products invent new rarities all the time.
pub type Rarity = String;

/// A resolved 64-bit seed.
pub type Seed = u64;
