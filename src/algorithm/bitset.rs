use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over catalog slots
///
/// Slots are the dense 0-based positions assigned by the tile catalog, not
/// the tile indices themselves. Used to express which tiles a placement
/// policy permits at a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no slots present
    pub fn new(slot_count: usize) -> Self {
        Self {
            bits: bitvec![0; slot_count],
        }
    }

    /// Create a bitset containing every slot
    pub fn all(slot_count: usize) -> Self {
        Self {
            bits: bitvec![1; slot_count],
        }
    }

    /// Insert a slot, ignoring out-of-range values
    pub fn insert(&mut self, slot: usize) {
        if slot < self.bits.len() {
            self.bits.set(slot, true);
        }
    }

    /// Remove a slot, ignoring out-of-range values
    pub fn remove(&mut self, slot: usize) {
        if slot < self.bits.len() {
            self.bits.set(slot, false);
        }
    }

    /// Test slot membership
    pub fn contains(&self, slot: usize) -> bool {
        self.bits.get(slot).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Test if no slots are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count slots in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate present slots in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all present slots as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} slots: {:?})", self.count(), self.to_vec())
    }
}
