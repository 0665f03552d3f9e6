//! State of a single grid position during the collapse

use crate::io::error::{Result, contract_violation};
use crate::math::probability::shannon_entropy;
use crate::spatial::tiles::Adjacency;
use std::collections::BTreeMap;

/// One grid position: either resolved to a tile or holding weighted candidates
///
/// Candidates are keyed by tile index and iterate in ascending index order,
/// which fixes the order of the cumulative weighted draw. A resolved cell has
/// no candidates left; an unresolved cell with no candidates is contradicted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    x: usize,
    y: usize,
    selected_tile: Option<usize>,
    options: BTreeMap<usize, u64>,
    max_entropy: usize,
}

impl Cell {
    /// Create an unresolved cell whose candidates all start at weight 0
    pub fn new(x: usize, y: usize, candidates: impl IntoIterator<Item = usize>) -> Self {
        let options: BTreeMap<usize, u64> = candidates.into_iter().map(|tile| (tile, 0)).collect();
        let max_entropy = options.len();
        Self {
            x,
            y,
            selected_tile: None,
            options,
            max_entropy,
        }
    }

    /// Grid position as (x, y)
    pub const fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Whether the cell has been resolved to a tile
    pub const fn is_collapsed(&self) -> bool {
        self.selected_tile.is_some()
    }

    /// Resolved tile index, if any
    pub const fn selected_tile(&self) -> Option<usize> {
        self.selected_tile
    }

    /// Unresolved with no candidates remaining
    pub fn is_contradicted(&self) -> bool {
        self.selected_tile.is_none() && self.options.is_empty()
    }

    /// Remaining candidates and their accumulated weights
    pub const fn options(&self) -> &BTreeMap<usize, u64> {
        &self.options
    }

    /// Check whether a tile is still a candidate
    pub fn has_option(&self, tile: usize) -> bool {
        self.options.contains_key(&tile)
    }

    /// Size of the candidate set at construction
    pub const fn max_entropy(&self) -> usize {
        self.max_entropy
    }

    /// Number of remaining candidates; 0 once collapsed
    pub fn entropy(&self) -> usize {
        if self.is_collapsed() {
            0
        } else {
            self.options.len()
        }
    }

    /// Shannon entropy of the accumulated candidate weights; 0 once collapsed
    pub fn weighted_entropy(&self) -> f64 {
        if self.is_collapsed() {
            return 0.0;
        }
        let weights: Vec<u64> = self.options.values().copied().collect();
        shannon_entropy(&weights)
    }

    /// Resolve the cell to one of its candidates
    ///
    /// # Errors
    ///
    /// Returns a contract violation if the cell is already collapsed or the
    /// tile is not among its remaining candidates
    pub fn collapse_to(&mut self, tile: usize) -> Result<()> {
        if let Some(existing) = self.selected_tile {
            return Err(contract_violation(
                "collapse",
                self.position(),
                &format!("cell already collapsed to tile {existing}"),
            ));
        }
        if !self.options.contains_key(&tile) {
            return Err(contract_violation(
                "collapse",
                self.position(),
                &format!("tile {tile} is not a remaining candidate"),
            ));
        }

        self.selected_tile = Some(tile);
        self.options.clear();
        Ok(())
    }

    /// Drop a candidate; returns whether it was present
    pub fn exclude(&mut self, tile: usize) -> bool {
        self.options.remove(&tile).is_some()
    }

    /// Intersect candidates with a neighbor's directional mapping
    ///
    /// Candidates missing from the mapping, or mapped with frequency 0, are
    /// removed. Survivors accumulate the mapped frequency. Returns the number
    /// of candidates removed.
    pub fn constrain(&mut self, adjacency: &Adjacency) -> usize {
        if self.is_collapsed() {
            return 0;
        }

        let before = self.options.len();
        self.options.retain(|tile, weight| match adjacency.get(tile) {
            Some(&frequency) if frequency > 0 => {
                *weight = weight.saturating_add(u64::from(frequency));
                true
            }
            _ => false,
        });
        before - self.options.len()
    }
}
