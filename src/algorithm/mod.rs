/// Contradiction recovery schedule and unwinding
pub mod backtracking;
/// Bitset over catalog slots for placement masks
pub mod bitset;
/// Weighted resolution of a single cell
pub mod collapse;
/// Solver orchestration and the generation entry points
pub mod executor;
/// Decision and snapshot history
pub mod history;
/// Single-hop constraint propagation
pub mod propagation;
/// Minimum-entropy cell selection
pub mod selection;
