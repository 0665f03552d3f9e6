//! Per-position candidate exclusion applied when the grid is (re)initialized
//!
//! A policy decides which catalog tiles may start as candidates at each
//! position. Edge restrictions confine tiles carrying a behavior tag to one
//! border row or column; pins confine a single position to a single tile.

use crate::algorithm::bitset::TileBitset;
use crate::io::configuration::FLOOR_BEHAVIOR;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::tiles::TileCatalog;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Border of the grid a restricted tile is confined to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Row 0
    Top,
    /// Last row
    Bottom,
    /// Column 0
    Left,
    /// Last column
    Right,
}

impl Edge {
    /// Check whether a position lies on this edge of a `width × height` grid
    pub const fn contains(self, x: usize, y: usize, width: usize, height: usize) -> bool {
        match self {
            Self::Top => y == 0,
            Self::Bottom => y + 1 == height,
            Self::Left => x == 0,
            Self::Right => x + 1 == width,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Tiles tagged with `behavior` may only start as candidates on `edge`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeRestriction {
    /// Behavior tag selecting the restricted tiles
    pub behavior: String,
    /// Edge those tiles are confined to
    pub edge: Edge,
}

/// A position restricted to exactly one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pin {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
    /// Tile index the position must resolve to
    pub tile: usize,
}

/// Candidate exclusion rules evaluated per position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementPolicy {
    /// Behavior-to-edge confinements
    #[serde(default)]
    pub restrictions: Vec<EdgeRestriction>,
    /// Single-tile positions
    #[serde(default)]
    pub pins: Vec<Pin>,
}

impl Default for PlacementPolicy {
    /// Floor tiles may only appear in the bottom row
    fn default() -> Self {
        Self {
            restrictions: vec![EdgeRestriction {
                behavior: FLOOR_BEHAVIOR.to_string(),
                edge: Edge::Bottom,
            }],
            pins: Vec::new(),
        }
    }
}

impl PlacementPolicy {
    /// Policy that permits every tile everywhere
    pub const fn unrestricted() -> Self {
        Self {
            restrictions: Vec::new(),
            pins: Vec::new(),
        }
    }

    /// Add an edge restriction
    #[must_use]
    pub fn restrict(mut self, behavior: impl Into<String>, edge: Edge) -> Self {
        self.restrictions.push(EdgeRestriction {
            behavior: behavior.into(),
            edge,
        });
        self
    }

    /// Add a pin
    #[must_use]
    pub fn pin(mut self, x: usize, y: usize, tile: usize) -> Self {
        self.pins.push(Pin { x, y, tile });
        self
    }

    /// Check pins against the grid bounds and the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if a pin lies outside the grid or names an unknown tile
    pub fn validate(&self, catalog: &TileCatalog, width: usize, height: usize) -> Result<()> {
        for pin in &self.pins {
            if pin.x >= width || pin.y >= height {
                return Err(invalid_parameter(
                    "pin",
                    &format!("({}, {})", pin.x, pin.y),
                    &format!("position lies outside the {width}x{height} grid"),
                ));
            }
            if !catalog.contains(pin.tile) {
                return Err(AlgorithmError::InvalidTileIndex {
                    index: pin.tile,
                    context: format!("the pin at ({}, {})", pin.x, pin.y),
                });
            }
        }
        Ok(())
    }

    /// Error for a position the policy leaves without any starting candidate
    pub(crate) fn unsatisfiable_at(&self, x: usize, y: usize) -> AlgorithmError {
        match self.pins.iter().find(|pin| pin.x == x && pin.y == y) {
            Some(pin) => invalid_parameter(
                "pin",
                &format!("({x}, {y})"),
                &format!("tile {} is excluded here by an edge restriction or another pin", pin.tile),
            ),
            None => invalid_parameter(
                "placement",
                &format!("({x}, {y})"),
                &"edge restrictions exclude every tile at this position",
            ),
        }
    }

    /// Catalog slots permitted as initial candidates at a position
    pub fn allowed_slots(
        &self,
        catalog: &TileCatalog,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> TileBitset {
        let mut allowed = TileBitset::all(catalog.len());

        for restriction in &self.restrictions {
            if restriction.edge.contains(x, y, width, height) {
                continue;
            }
            for (slot, rule) in catalog.rules().iter().enumerate() {
                if rule.has_behavior(&restriction.behavior) {
                    allowed.remove(slot);
                }
            }
        }

        for pin in self.pins.iter().filter(|pin| pin.x == x && pin.y == y) {
            let mut pinned = TileBitset::new(catalog.len());
            if let Some(slot) = catalog.slot(pin.tile) {
                pinned.insert(slot);
            }
            allowed.intersect_with(&pinned);
        }

        allowed
    }
}
