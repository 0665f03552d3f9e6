use crate::io::error::{Result, contract_violation};
use crate::math::probability::weighted_index;
use crate::spatial::Grid;
use rand::Rng;

/// Record of one cell being resolved to one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decision {
    /// Column of the resolved cell
    pub x: usize,
    /// Row of the resolved cell
    pub y: usize,
    /// Tile index the cell was resolved to
    pub tile: usize,
}

impl Decision {
    /// Position of the resolved cell
    pub const fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

/// Resolve the cell at (x, y) by a weighted draw over its candidates
///
/// Candidates are drawn in ascending tile-index order using their accumulated
/// weights; a cell whose weights are all zero draws uniformly.
///
/// # Errors
///
/// Returns a contract violation if the position is outside the grid, the cell
/// is already collapsed, or it has no candidates (contradictions must be
/// routed to backtracking instead)
pub fn collapse_cell<R: Rng + ?Sized>(
    grid: &mut Grid,
    x: usize,
    y: usize,
    rng: &mut R,
) -> Result<Decision> {
    let cell = grid.require_cell_mut("collapse", x, y)?;

    if let Some(tile) = cell.selected_tile() {
        return Err(contract_violation(
            "collapse",
            (x, y),
            &format!("cell already collapsed to tile {tile}"),
        ));
    }

    let (tiles, weights): (Vec<usize>, Vec<u64>) =
        cell.options().iter().map(|(&tile, &weight)| (tile, weight)).unzip();

    let tile = weighted_index(&weights, rng)
        .and_then(|choice| tiles.get(choice).copied())
        .ok_or_else(|| {
            contract_violation(
                "collapse",
                (x, y),
                &"cell has no candidates; contradictions must go through backtracking",
            )
        })?;

    cell.collapse_to(tile)?;
    Ok(Decision { x, y, tile })
}
