//! Seeded subset selection: which physical packs to open out of a lot.
//!
//! The draw removes by position from the remaining packs, in their
//! original order. The exact value sequence for a given stream is part
//! of the contract (same seed, same packs), so this must not be swapped
//! for a statistically equivalent shuffle.

use crate::error::{SimError, SimResult};
use crate::rng::RandomSource;
use crate::types::Seed;
use serde::{Deserialize, Serialize};

/// The packs chosen by one selector invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub seed_used: Seed,
    /// 1-based pack numbers, ascending.
    pub selected: Vec<u32>,
}

/// Where a selected pack physically sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackLocation {
    pub pack: u32,
    /// 1-based box number.
    pub box_number: u32,
    /// 1-based position within the box.
    pub slot: u32,
}

impl Selection {
    /// Map pack numbers onto boxes of `packs_per_box`.
    pub fn locate(&self, packs_per_box: u32) -> SimResult<Vec<PackLocation>> {
        if packs_per_box == 0 {
            return Err(SimError::validation("packs_per_box", "must be a positive integer"));
        }
        Ok(self
            .selected
            .iter()
            .map(|&pack| PackLocation {
                pack,
                box_number: (pack - 1) / packs_per_box + 1,
                slot: (pack - 1) % packs_per_box + 1,
            })
            .collect())
    }
}

/// Check `total_packs` / `open_packs` and narrow them to u32.
pub fn validate_request(total_packs: i64, open_packs: i64) -> SimResult<(u32, u32)> {
    if total_packs <= 0 {
        return Err(SimError::validation(
            "total_packs",
            format!("must be positive, got {total_packs}"),
        ));
    }
    if open_packs <= 0 {
        return Err(SimError::validation(
            "open_packs",
            format!("must be positive, got {open_packs}"),
        ));
    }
    if open_packs > total_packs {
        return Err(SimError::validation(
            "open_packs",
            format!("cannot open {open_packs} of {total_packs} packs"),
        ));
    }
    let total = u32::try_from(total_packs)
        .map_err(|_| SimError::validation("total_packs", format!("{total_packs} is too large")))?;
    Ok((total, open_packs as u32))
}

/// Draw `open_packs` distinct pack numbers from `1..=total_packs`.
pub fn select_packs<R: RandomSource + ?Sized>(
    total_packs: i64,
    open_packs: i64,
    rng: &mut R,
) -> SimResult<Vec<u32>> {
    let (total, open) = validate_request(total_packs, open_packs)?;

    let mut remaining: Vec<u32> = (1..=total).collect();
    let mut selected = Vec::with_capacity(open as usize);
    for _ in 0..open {
        let index = rng.next_index(remaining.len());
        selected.push(remaining.remove(index));
    }
    selected.sort_unstable();

    log::debug!("selector: opened {open} of {total} packs -> {selected:?}");
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;

    #[test]
    fn removal_is_positional_over_remaining_packs() {
        // remaining [1,2,3,4,5]: 0.5 -> idx 2 -> 3
        // remaining [1,2,4,5]:   0.0 -> idx 0 -> 1
        // remaining [2,4,5]:     0.9 -> idx 2 -> 5
        let mut rng = SequenceRng::new(vec![0.5, 0.0, 0.9]);
        let picked = select_packs(5, 3, &mut rng).unwrap();
        assert_eq!(picked, vec![1, 3, 5]);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn locate_maps_onto_boxes() {
        let selection = Selection { seed_used: 1, selected: vec![1, 24, 25, 37] };
        let spots = selection.locate(24).unwrap();
        let pairs: Vec<(u32, u32)> = spots.iter().map(|l| (l.box_number, l.slot)).collect();
        assert_eq!(pairs, vec![(1, 1), (1, 24), (2, 1), (2, 13)]);
    }
}
