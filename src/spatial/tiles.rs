//! Tile rules and the validated catalog the solver reads from
//!
//! Each rule lists, per direction, which tiles may sit next to it and how
//! strongly they are favored. The catalog owns the rules in their source order
//! and maps tile indices to dense slots for bitset-based masks.

use crate::io::error::{AlgorithmError, Result, invalid_catalog};
use crate::spatial::grid::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Directional adjacency mapping from neighbor tile index to frequency weight
pub type Adjacency = BTreeMap<usize, u32>;

/// One tile variant and its adjacency rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileRule {
    /// Unique identity of the tile
    pub index: usize,
    /// Display alias used when projecting the tilemap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form tag consulted by placement policies (e.g. "floor")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<String>,
    /// RGBA color used when rendering the tilemap as an image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 4]>,
    /// Tiles allowed directly above this one
    #[serde(default)]
    pub up: Adjacency,
    /// Tiles allowed directly to the right
    #[serde(default)]
    pub right: Adjacency,
    /// Tiles allowed directly below
    #[serde(default)]
    pub down: Adjacency,
    /// Tiles allowed directly to the left
    #[serde(default)]
    pub left: Adjacency,
}

impl TileRule {
    /// Create a rule with no name, behavior or neighbors
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            name: None,
            behavior: None,
            color: None,
            up: BTreeMap::new(),
            right: BTreeMap::new(),
            down: BTreeMap::new(),
            left: BTreeMap::new(),
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the behavior tag
    #[must_use]
    pub fn with_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.behavior = Some(behavior.into());
        self
    }

    /// Set the render color
    #[must_use]
    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = Some(color);
        self
    }

    /// Allow `neighbor` in `direction` with the given frequency
    #[must_use]
    pub fn allow(mut self, direction: Direction, neighbor: usize, frequency: u32) -> Self {
        self.adjacency_mut(direction).insert(neighbor, frequency);
        self
    }

    /// Allow `neighbor` with the same frequency in all four directions
    #[must_use]
    pub fn allow_all(mut self, neighbor: usize, frequency: u32) -> Self {
        for direction in Direction::ALL {
            self.adjacency_mut(direction).insert(neighbor, frequency);
        }
        self
    }

    /// Adjacency mapping for a direction
    pub const fn adjacency(&self, direction: Direction) -> &Adjacency {
        match direction {
            Direction::Up => &self.up,
            Direction::Right => &self.right,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
        }
    }

    fn adjacency_mut(&mut self, direction: Direction) -> &mut Adjacency {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
        }
    }

    /// Display value: the name when set, otherwise the numeric index
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.index.to_string())
    }

    /// Check whether the rule carries the given behavior tag
    pub fn has_behavior(&self, behavior: &str) -> bool {
        self.behavior.as_deref() == Some(behavior)
    }
}

/// Ordered, validated collection of tile rules
///
/// Construction rejects empty catalogs, duplicate indices and adjacency
/// entries naming tiles that do not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCatalog {
    rules: Vec<TileRule>,
    slots: HashMap<usize, usize>,
}

impl TileCatalog {
    /// Build a catalog from rules in source order
    ///
    /// # Errors
    ///
    /// Returns an error if the rule list is empty, two rules share an index,
    /// or any adjacency mapping references an unknown tile index
    pub fn new(rules: Vec<TileRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(invalid_catalog(&"catalog contains no tiles"));
        }

        let mut slots = HashMap::with_capacity(rules.len());
        for (slot, rule) in rules.iter().enumerate() {
            if slots.insert(rule.index, slot).is_some() {
                return Err(invalid_catalog(&format!(
                    "tile index {} is defined more than once",
                    rule.index
                )));
            }
        }

        for rule in &rules {
            for direction in Direction::ALL {
                if let Some(&unknown) = rule
                    .adjacency(direction)
                    .keys()
                    .find(|neighbor| !slots.contains_key(neighbor))
                {
                    return Err(AlgorithmError::InvalidTileIndex {
                        index: unknown,
                        context: format!("the {direction} rules of tile {}", rule.index),
                    });
                }
            }
        }

        Ok(Self { rules, slots })
    }

    /// Number of tiles in the catalog
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a constructed catalog
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in source order
    pub fn rules(&self) -> &[TileRule] {
        &self.rules
    }

    /// Look up a rule by tile index
    pub fn get(&self, index: usize) -> Option<&TileRule> {
        self.slot(index).and_then(|slot| self.rules.get(slot))
    }

    /// Dense position of a tile index within the catalog
    pub fn slot(&self, index: usize) -> Option<usize> {
        self.slots.get(&index).copied()
    }

    /// Check whether a tile index exists
    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    /// Tile indices in source order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rules.iter().map(|rule| rule.index)
    }

    /// Display value for a tile index, falling back to the index itself
    pub fn display_name(&self, index: usize) -> String {
        self.get(index)
            .map_or_else(|| index.to_string(), TileRule::display_name)
    }
}
