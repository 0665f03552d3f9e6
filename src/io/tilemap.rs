//! Projection of a finished grid into display values and text formats

use crate::io::error::{Result, contract_violation};
use crate::spatial::{Grid, TileCatalog};
use ndarray::Array2;

/// Resolved tile indices of a completed grid, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tilemap {
    tiles: Array2<usize>,
}

impl Tilemap {
    /// Capture the resolved tiles of a complete grid
    ///
    /// # Errors
    ///
    /// Returns a contract violation naming the first unresolved cell
    pub fn from_grid(grid: &Grid) -> Result<Self> {
        let mut tiles = Vec::with_capacity(grid.len());
        for cell in grid.cells() {
            let tile = cell.selected_tile().ok_or_else(|| {
                contract_violation("tilemap projection", cell.position(), &"cell is unresolved")
            })?;
            tiles.push(tile);
        }

        let tiles = Array2::from_shape_vec((grid.height(), grid.width()), tiles).map_err(
            |shape_error| contract_violation("tilemap projection", (0, 0), &shape_error),
        )?;
        Ok(Self { tiles })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.tiles.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.tiles.nrows()
    }

    /// Tile index at (x, y)
    pub fn tile(&self, x: usize, y: usize) -> Option<usize> {
        self.tiles.get([y, x]).copied()
    }

    /// Tile indices as nested rows
    pub fn rows(&self) -> Vec<Vec<usize>> {
        self.tiles
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    }

    /// Display value per cell: the tile's name, or its index when unnamed
    pub fn display_rows(&self, catalog: &TileCatalog) -> Vec<Vec<String>> {
        self.tiles
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&tile| catalog.display_name(tile)).collect())
            .collect()
    }

    /// One line per row, display values separated by spaces
    pub fn to_text(&self, catalog: &TileCatalog) -> String {
        let mut text = String::new();
        for row in self.display_rows(catalog) {
            text.push_str(&row.join(" "));
            text.push('\n');
        }
        text
    }

    /// Display rows as a JSON array of arrays
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self, catalog: &TileCatalog) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.display_rows(catalog))?)
    }
}
