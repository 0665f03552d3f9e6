use crate::spatial::{Grid, cell::Cell};
use rand::Rng;

// Weighted entropies closer than this are treated as tied
const ENTROPY_TOLERANCE: f64 = 1e-9;

/// How constrainedness of an unresolved cell is measured
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EntropyMode {
    /// Number of remaining candidates
    #[default]
    #[value(name = "count")]
    CandidateCount,
    /// Shannon entropy of the accumulated candidate weights
    Shannon,
}

impl EntropyMode {
    /// Entropy of a cell under this mode
    pub fn measure(self, cell: &Cell) -> f64 {
        match self {
            Self::CandidateCount => cell.entropy() as f64,
            Self::Shannon => cell.weighted_entropy(),
        }
    }
}

/// Positions of unresolved cells sharing the minimum entropy
///
/// Contradicted cells rank below every other cell in both modes, so they are
/// returned alone whenever any exist. Under Shannon entropy a single
/// candidate also measures 0, which would otherwise tie with them.
pub fn min_entropy_positions(grid: &Grid, mode: EntropyMode) -> Vec<(usize, usize)> {
    let contradicted: Vec<(usize, usize)> = grid
        .uncollapsed()
        .filter(|cell| cell.is_contradicted())
        .map(Cell::position)
        .collect();
    if !contradicted.is_empty() {
        return contradicted;
    }

    let measured: Vec<((usize, usize), f64)> = grid
        .uncollapsed()
        .map(|cell| (cell.position(), mode.measure(cell)))
        .collect();

    let Some(minimum) = measured
        .iter()
        .map(|&(_, entropy)| entropy)
        .min_by(f64::total_cmp)
    else {
        return Vec::new();
    };

    measured
        .into_iter()
        .filter(|&(_, entropy)| entropy - minimum <= ENTROPY_TOLERANCE)
        .map(|(position, _)| position)
        .collect()
}

/// Choose the next cell to resolve
///
/// Picks uniformly among the minimum-entropy unresolved cells. Returns `None`
/// once every cell is resolved.
pub fn select_cell<R: Rng + ?Sized>(
    grid: &Grid,
    mode: EntropyMode,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let candidates = min_entropy_positions(grid, mode);
    if candidates.is_empty() {
        return None;
    }
    candidates
        .get(rng.random_range(0..candidates.len()))
        .copied()
}
