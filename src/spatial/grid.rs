//! Grid of cells with policy-driven initialization and snapshots
//!
//! Cells are stored row-major in an `ndarray` indexed `[y, x]`, with `y = 0`
//! as the top row. Dimensions are fixed at initialization; a restart builds a
//! fresh grid rather than resizing this one.

use ndarray::Array2;
use std::fmt;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, contract_violation, invalid_parameter};
use crate::spatial::cell::Cell;
use crate::spatial::policy::PlacementPolicy;
use crate::spatial::tiles::TileCatalog;

/// One of the four grid-adjacent directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Towards the last column
    Right,
    /// Towards the last row
    Down,
    /// Towards column 0
    Left,
}

impl Direction {
    /// All directions in clockwise order starting from up
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// The direction pointing back
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Step (dx, dy) for this direction
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// Reject dimensions the solver cannot work with
///
/// # Errors
///
/// Returns an error if either dimension is zero or exceeds `MAX_GRID_DIMENSION`
pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    for (parameter, value) in [("width", width), ("height", height)] {
        if value == 0 {
            return Err(invalid_parameter(parameter, &value, &"must be positive"));
        }
        if value > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                parameter,
                &value,
                &format!("must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
    }
    Ok(())
}

/// Deep copy of every cell at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    cells: Array2<Cell>,
}

/// Working grid the solver mutates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Build a fresh grid where every cell holds the candidates the policy permits
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid, the policy's pins do
    /// not fit the grid or catalog, or the policy leaves any position without
    /// a starting candidate
    pub fn initialize(
        catalog: &TileCatalog,
        width: usize,
        height: usize,
        policy: &PlacementPolicy,
    ) -> Result<Self> {
        validate_dimensions(width, height)?;
        policy.validate(catalog, width, height)?;

        let indices: Vec<usize> = catalog.indices().collect();
        let cells = Array2::from_shape_fn((height, width), |(y, x)| {
            let allowed = policy.allowed_slots(catalog, x, y, width, height);
            Cell::new(
                x,
                y,
                allowed
                    .iter()
                    .filter_map(|slot| indices.get(slot).copied()),
            )
        });

        // An empty starting cell would be rebuilt empty on every restart
        if let Some(cell) = cells.iter().find(|cell| cell.is_contradicted()) {
            let (x, y) = cell.position();
            return Err(policy.unsatisfiable_at(x, y));
        }

        Ok(Self { cells })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for an initialized grid
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at (x, y)
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cells.get([y, x])
    }

    /// Mutable cell at (x, y)
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.cells.get_mut([y, x])
    }

    /// Cell at (x, y), or a contract violation naming the operation
    ///
    /// # Errors
    ///
    /// Returns an error if the position lies outside the grid
    pub fn require_cell_mut(
        &mut self,
        operation: &'static str,
        x: usize,
        y: usize,
    ) -> Result<&mut Cell> {
        let (width, height) = (self.width(), self.height());
        self.cells.get_mut([y, x]).ok_or_else(|| {
            contract_violation(
                operation,
                (x, y),
                &format!("position outside the {width}x{height} grid"),
            )
        })
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells that have not been resolved yet
    pub fn uncollapsed(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| !cell.is_collapsed())
    }

    /// Number of resolved cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Whether every cell is resolved
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Position of the neighbor in `direction`, if it lies inside the grid
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.delta();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.width() && ny < self.height()).then_some((nx, ny))
    }

    /// Deep copy of the current cell states
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.cells.clone(),
        }
    }

    /// Replace every cell with the snapshot's state
    pub fn restore(&mut self, snapshot: GridSnapshot) {
        self.cells = snapshot.cells;
    }

    /// Row-major resolved tiles; `None` for unresolved cells
    pub fn resolved_rows(&self) -> Vec<Vec<Option<usize>>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(Cell::selected_tile).collect())
            .collect()
    }
}
