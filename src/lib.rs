//! Wave function collapse tilemap generation with single-hop propagation and backtracking
//!
//! A tile catalog describes which tiles may neighbor each other in each direction.
//! The solver repeatedly resolves the most constrained cell by weighted random
//! choice, narrows its immediate neighbors, and undoes its own recent decisions
//! (or restarts) when a cell runs out of candidates.

#![forbid(unsafe_code)]

/// Solver implementation: selection, collapse, propagation, history and backtracking
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Weighted draws and entropy calculations
pub mod math;
/// Cells, grids, placement policies and the tile catalog
pub mod spatial;

pub use algorithm::executor::{SolverConfig, WaveSolver, generate, generate_with};
pub use io::error::{AlgorithmError, Result};
pub use io::tilemap::Tilemap;
