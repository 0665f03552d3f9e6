//! Spatial data structures for the collapse
//!
//! This module contains spatial-related functionality including:
//! - Tile rules and the validated catalog
//! - Per-position cell state
//! - The grid, its snapshots and placement policies

/// Per-position candidate state
pub mod cell;
/// Grid storage, neighbors and snapshots
pub mod grid;
/// Candidate exclusion applied at initialization
pub mod policy;
/// Tile rules and catalog
pub mod tiles;

pub use grid::{Direction, Grid};
pub use policy::PlacementPolicy;
pub use tiles::{TileCatalog, TileRule};
