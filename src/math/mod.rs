//! Mathematical utilities for the solver

/// Weighted random draws and entropy of candidate distributions
pub mod probability;
