use bitvec::prelude::*;
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

use crate::{
    algorithm::adjacency::AdjacencyModel,
    algorithm::propagation::{propagate_from, recompute_cell},
    io::configuration::{BASE_REPAIR_RADIUS, MAX_REPAIR_RADIUS},
    io::error::{AlgorithmError, invalid_parameter},
    spatial::{CellDistribution, TileId, WaveGrid},
};

/// What to do when a cell runs out of candidates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContradictionPolicy {
    /// Leave empty cells in place; the scan skips them and the run may finish
    /// with unresolved cells
    Ignore,
    /// Stop the step with a contradiction error
    Fail,
    /// Clear the surrounding region and let it collapse again
    #[default]
    Repair,
}

impl fmt::Display for ContradictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => f.write_str("ignore"),
            Self::Fail => f.write_str("fail"),
            Self::Repair => f.write_str("repair"),
        }
    }
}

impl FromStr for ContradictionPolicy {
    type Err = AlgorithmError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "fail" => Ok(Self::Fail),
            "repair" => Ok(Self::Repair),
            _ => Err(invalid_parameter(
                "policy",
                &text,
                &"expected `ignore`, `fail` or `repair`",
            )),
        }
    }
}

/// Cells pinned by the caller, which repair must never clear
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinnedCells {
    bits: BitVec,
    cols: usize,
}

impl PinnedCells {
    /// No pinned cells in a `cols` x `rows` grid
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            bits: bitvec![0; cols * rows],
            cols,
        }
    }

    /// Mark a cell as pinned
    pub fn pin(&mut self, x: usize, y: usize) {
        if x < self.cols {
            let index = y * self.cols + x;
            if index < self.bits.len() {
                self.bits.set(index, true);
            }
        }
    }

    /// Whether a cell is pinned
    pub fn is_pinned(&self, x: usize, y: usize) -> bool {
        x < self.cols && self.bits.get(y * self.cols + x).is_some_and(|bit| *bit)
    }

    /// Number of pinned cells
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }
}

/// Per-cell repair counter driving an adaptive clearing radius
///
/// Each repair at the same cell widens the cleared square by one, up to
/// [`MAX_REPAIR_RADIUS`], so repeated contradictions in one spot eventually
/// free enough room to resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepairTracker {
    counts: Array2<u8>,
}

impl RepairTracker {
    /// Fresh counters for a `cols` x `rows` grid
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            counts: Array2::zeros((rows, cols)),
        }
    }

    /// Record a repair at `(x, y)` and return the radius to clear
    pub fn next_radius(&mut self, x: usize, y: usize) -> usize {
        let count = self.counts.get_mut([y, x]).map_or(0, |count| {
            *count = count.saturating_add(1);
            *count
        });
        (BASE_REPAIR_RADIUS + usize::from(count).saturating_sub(1)).min(MAX_REPAIR_RADIUS)
    }

    /// Repairs recorded at `(x, y)`
    pub fn count(&self, x: usize, y: usize) -> u8 {
        self.counts.get([y, x]).copied().unwrap_or(0)
    }
}

/// Cells within Chebyshev distance `radius` of `(x, y)`, clipped to the grid
pub fn region(
    x: usize,
    y: usize,
    radius: usize,
    cols: usize,
    rows: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let x_span = x.saturating_sub(radius)..(x + radius + 1).min(cols);
    let y_span = y.saturating_sub(radius)..(y + radius + 1).min(rows);
    x_span.flat_map(move |cx| y_span.clone().map(move |cy| (cx, cy)))
}

/// Summary of cells affected by a repair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairResult {
    /// Radius of the cleared square
    pub radius: usize,
    /// Cells that were reset, in scan order
    pub cleared: Vec<(usize, usize)>,
}

/// Reset the region around an empty cell of a wave grid and re-propagate
///
/// Unpinned cells in the square return to the uniform distribution, are
/// recomputed from their surroundings, and then act as propagation seeds so
/// the rest of the grid sees the loosened constraints.
pub fn repair_wave(
    grid: &mut WaveGrid,
    model: &AdjacencyModel,
    pinned: &PinnedCells,
    tracker: &mut RepairTracker,
    contradiction: (usize, usize),
    depth: u32,
) -> RepairResult {
    let (x, y) = contradiction;
    let radius = tracker.next_radius(x, y);
    let tile_count = grid.tile_count();

    let cleared: Vec<(usize, usize)> = region(x, y, radius, grid.cols(), grid.rows())
        .filter(|&(cx, cy)| !pinned.is_pinned(cx, cy))
        .collect();

    for &(cx, cy) in &cleared {
        if let Some(cell) = grid.get_mut(cx, cy) {
            *cell = CellDistribution::uniform(tile_count);
        }
    }
    for &(cx, cy) in &cleared {
        recompute_cell(grid, model, cx, cy);
    }
    for &(cx, cy) in &cleared {
        propagate_from(grid, model, cx, cy, depth);
    }

    RepairResult { radius, cleared }
}

/// Unresolve the region around a stuck frontier cell
///
/// Only resolved, unpinned cells are cleared; they rejoin the frontier on the
/// next pass.
pub fn repair_resolved(
    resolved: &mut Array2<Option<TileId>>,
    pinned: &PinnedCells,
    tracker: &mut RepairTracker,
    contradiction: (usize, usize),
) -> RepairResult {
    let (x, y) = contradiction;
    let radius = tracker.next_radius(x, y);
    let (rows, cols) = resolved.dim();

    let mut cleared = Vec::new();
    for (cx, cy) in region(x, y, radius, cols, rows) {
        if pinned.is_pinned(cx, cy) {
            continue;
        }
        if let Some(cell) = resolved.get_mut([cy, cx]) {
            if cell.take().is_some() {
                cleared.push((cx, cy));
            }
        }
    }

    RepairResult { radius, cleared }
}
