use crate::algorithm::collapse::Decision;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::{Direction, Grid, TileCatalog};

/// Effect of propagating one decision onto its neighbors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationResult {
    /// Unresolved neighbors whose candidates were intersected
    pub neighbors_updated: usize,
    /// Candidates removed across all neighbors
    pub options_removed: usize,
    /// Neighbors left with no candidates
    pub contradictions: Vec<(usize, usize)>,
}

/// Push a decision's adjacency rules onto its four immediate neighbors
///
/// Each unresolved neighbor keeps only the candidates the resolved tile
/// allows in that direction, and those candidates gain the mapped frequency.
/// This is a single hop: neighbors of neighbors are not revisited, so a cell
/// two steps away only learns of the decision once something next to it
/// collapses.
///
/// # Errors
///
/// Returns an error if the decided tile is not in the catalog
pub fn propagate(
    grid: &mut Grid,
    catalog: &TileCatalog,
    decision: &Decision,
) -> Result<PropagationResult> {
    let rule = catalog
        .get(decision.tile)
        .ok_or_else(|| AlgorithmError::InvalidTileIndex {
            index: decision.tile,
            context: format!("the decision at ({}, {})", decision.x, decision.y),
        })?;

    let mut result = PropagationResult::default();

    for direction in Direction::ALL {
        let Some((nx, ny)) = grid.neighbor(decision.x, decision.y, direction) else {
            continue;
        };
        let Some(neighbor) = grid.cell_mut(nx, ny) else {
            continue;
        };
        if neighbor.is_collapsed() {
            continue;
        }

        result.options_removed += neighbor.constrain(rule.adjacency(direction));
        result.neighbors_updated += 1;

        if neighbor.is_contradicted() {
            result.contradictions.push((nx, ny));
        }
    }

    Ok(result)
}
