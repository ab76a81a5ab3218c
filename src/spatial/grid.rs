//! Wave grid holding one candidate distribution per cell
//!
//! Cells are addressed by `(x, y)` with `x` the column and `y` the row. The
//! backing array is stored row-major (`[y, x]`). Scans that must follow the
//! reference ordering walk columns in the outer loop and rows in the inner loop.

use ndarray::Array2;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::distribution::CellDistribution;
use crate::spatial::tiles::TileId;

/// Location and size of the least certain unresolved cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellCandidate {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
    /// Number of remaining candidate tiles (always greater than one)
    pub size: usize,
}

/// Grid of per-cell distributions over tile ids
#[derive(Clone, Debug, PartialEq)]
pub struct WaveGrid {
    cells: Array2<CellDistribution>,
    tile_count: usize,
}

/// Validate grid dimensions shared by every grid representation
///
/// # Errors
///
/// Returns an error if a dimension is zero or exceeds the safety limit
pub fn validate_dimensions(rows: usize, cols: usize) -> Result<()> {
    for (parameter, value) in [("rows", rows), ("cols", cols)] {
        if value == 0 || value > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                parameter,
                &value,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
    }
    Ok(())
}

/// Fail with `OutOfBounds` unless `(x, y)` lies inside a `cols` x `rows` grid
///
/// # Errors
///
/// Returns an error if the coordinate is outside the grid
pub const fn check_bounds(x: usize, y: usize, cols: usize, rows: usize) -> Result<()> {
    if x < cols && y < rows {
        Ok(())
    } else {
        Err(AlgorithmError::OutOfBounds { x, y, cols, rows })
    }
}

impl WaveGrid {
    /// Create a grid with every cell uniform over `tile_count` tiles
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A dimension is zero or exceeds the safety limit
    /// - `tile_count` is zero
    pub fn new(rows: usize, cols: usize, tile_count: usize) -> Result<Self> {
        validate_dimensions(rows, cols)?;
        if tile_count == 0 {
            return Err(invalid_parameter(
                "tile_count",
                &tile_count,
                &"the grid needs at least one tile",
            ));
        }

        Ok(Self {
            cells: Array2::from_elem((rows, cols), CellDistribution::uniform(tile_count)),
            tile_count,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of tiles every distribution ranges over
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Fail with `OutOfBounds` unless `(x, y)` is inside the grid
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid
    pub fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        check_bounds(x, y, self.cols(), self.rows())
    }

    /// Distribution of one cell
    pub fn get(&self, x: usize, y: usize) -> Option<&CellDistribution> {
        self.cells.get([y, x])
    }

    /// Mutable distribution of one cell
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut CellDistribution> {
        self.cells.get_mut([y, x])
    }

    /// Overwrite one cell
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid
    pub fn set(&mut self, x: usize, y: usize, distribution: CellDistribution) -> Result<()> {
        self.check_bounds(x, y)?;
        if let Some(cell) = self.get_mut(x, y) {
            *cell = distribution;
        }
        Ok(())
    }

    /// Owned copy of one cell's distribution
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid
    pub fn distribution(&self, x: usize, y: usize) -> Result<CellDistribution> {
        self.check_bounds(x, y)?;
        Ok(self.get(x, y).cloned().unwrap_or_default())
    }

    /// In-bounds 4-neighbors of a cell in visiting order
    pub fn neighbors(
        &self,
        x: usize,
        y: usize,
    ) -> impl Iterator<Item = (Direction, usize, usize)> + use<> {
        let (cols, rows) = (self.cols(), self.rows());
        Direction::ALL.into_iter().filter_map(move |direction| {
            direction
                .step(x, y, cols, rows)
                .map(|(nx, ny)| (direction, nx, ny))
        })
    }

    /// Find the unresolved cell with the fewest candidates
    ///
    /// Collapsed and empty cells are skipped. Columns are scanned in the outer
    /// loop and rows in the inner loop; the first minimum wins. Returns `None`
    /// once no cell has more than one candidate.
    pub fn most_certain(&self) -> Option<CellCandidate> {
        let mut best: Option<CellCandidate> = None;
        for x in 0..self.cols() {
            for y in 0..self.rows() {
                let Some(cell) = self.get(x, y) else {
                    continue;
                };
                let size = cell.len();
                if size <= 1 {
                    continue;
                }
                if best.is_none_or(|current| size < current.size) {
                    best = Some(CellCandidate { x, y, size });
                }
            }
        }
        best
    }

    /// Whether no cell is left with more than one candidate
    pub fn is_complete(&self) -> bool {
        self.most_certain().is_none()
    }

    /// Tile of a collapsed cell
    pub fn resolved(&self, x: usize, y: usize) -> Option<TileId> {
        self.get(x, y).and_then(CellDistribution::collapsed_tile)
    }

    /// Cells whose distribution is empty, in scan order
    pub fn contradictions(&self) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        for x in 0..self.cols() {
            for y in 0..self.rows() {
                if self.get(x, y).is_some_and(CellDistribution::is_empty) {
                    found.push((x, y));
                }
            }
        }
        found
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }
}
