use rand::RngCore;

use crate::{
    algorithm::adjacency::AdjacencyModel,
    algorithm::deadlock::{ContradictionPolicy, PinnedCells, RepairTracker, repair_wave},
    algorithm::propagation::fix_cell,
    algorithm::strategy::{PropagationStrategy, StrategyKind},
    io::configuration::{TEMPERATURE_BASE, TEMPERATURE_SPREAD},
    io::error::{AlgorithmError, Result},
    math::probability::sample_with_temperature,
    math::random::unit_f64,
    spatial::{CellDistribution, TileId, WaveGrid},
};

/// Full-distribution strategy with bounded-depth propagation
///
/// Every cell carries its candidate distribution. Fixing or collapsing a cell
/// pushes its constraints outward through [`fix_cell`] so later picks see
/// narrowed neighbors.
#[derive(Debug, Clone)]
pub struct EagerStrategy {
    grid: WaveGrid,
    pinned: PinnedCells,
    repairs: RepairTracker,
    depth: u32,
    collapses_per_step: usize,
    policy: ContradictionPolicy,
}

impl EagerStrategy {
    /// Uniform grid over the model's tiles
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or the model has no tiles
    pub fn new(
        rows: usize,
        cols: usize,
        model: &AdjacencyModel,
        depth: u32,
        collapses_per_step: usize,
        policy: ContradictionPolicy,
    ) -> Result<Self> {
        let grid = WaveGrid::new(rows, cols, model.tile_count())?;
        Ok(Self {
            grid,
            pinned: PinnedCells::new(cols, rows),
            repairs: RepairTracker::new(cols, rows),
            depth,
            collapses_per_step,
            policy,
        })
    }

    /// Underlying wave grid
    pub const fn grid(&self) -> &WaveGrid {
        &self.grid
    }

    /// Collapse the most certain cell, if any remains
    fn collapse_one(&mut self, model: &AdjacencyModel, rng: &mut dyn RngCore) -> Result<bool> {
        let Some(candidate) = self.grid.most_certain() else {
            return Ok(false);
        };

        // The temperature draw precedes the sampling draw
        let temperature = TEMPERATURE_BASE + unit_f64(rng) * TEMPERATURE_SPREAD;
        let pairs = self
            .grid
            .get(candidate.x, candidate.y)
            .map(CellDistribution::to_pairs)
            .unwrap_or_default();
        let tile = sample_with_temperature(&pairs, temperature, rng)?;

        fix_cell(
            &mut self.grid,
            model,
            candidate.x,
            candidate.y,
            tile,
            self.depth,
        );
        Ok(true)
    }

    /// Apply the contradiction policy to every empty cell
    ///
    /// Returns whether any cell was repaired.
    fn handle_contradictions(&mut self, model: &AdjacencyModel) -> Result<bool> {
        let found = self.grid.contradictions();
        match self.policy {
            ContradictionPolicy::Ignore => Ok(false),
            ContradictionPolicy::Fail => match found.first() {
                Some(&(x, y)) => Err(AlgorithmError::Contradiction { x, y }),
                None => Ok(false),
            },
            ContradictionPolicy::Repair => {
                let mut repaired = false;
                for position in found {
                    // An earlier repair may already have cleared this cell
                    let still_empty = self
                        .grid
                        .get(position.0, position.1)
                        .is_some_and(CellDistribution::is_empty);
                    if !still_empty {
                        continue;
                    }
                    let result = repair_wave(
                        &mut self.grid,
                        model,
                        &self.pinned,
                        &mut self.repairs,
                        position,
                        self.depth,
                    );
                    repaired |= !result.cleared.is_empty();
                }
                Ok(repaired)
            }
        }
    }
}

impl PropagationStrategy for EagerStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Eager
    }

    fn cols(&self) -> usize {
        self.grid.cols()
    }

    fn rows(&self) -> usize {
        self.grid.rows()
    }

    fn fix(&mut self, model: &AdjacencyModel, x: usize, y: usize, tile: TileId) -> Result<()> {
        self.grid.check_bounds(x, y)?;
        model.check_tile(tile)?;

        self.pinned.pin(x, y);
        fix_cell(&mut self.grid, model, x, y, tile, self.depth);
        Ok(())
    }

    fn step(&mut self, model: &AdjacencyModel, rng: &mut dyn RngCore) -> Result<bool> {
        let mut changed = false;

        // Leftover empty cells with nothing else to collapse
        if self.grid.most_certain().is_none() {
            changed |= self.handle_contradictions(model)?;
        }

        for _ in 0..self.collapses_per_step {
            if !self.collapse_one(model, rng)? {
                break;
            }
            changed = true;
            self.handle_contradictions(model)?;
        }

        Ok(changed)
    }

    fn distribution(
        &self,
        _model: &AdjacencyModel,
        x: usize,
        y: usize,
    ) -> Result<CellDistribution> {
        self.grid.distribution(x, y)
    }

    fn resolved(&self, x: usize, y: usize) -> Result<Option<TileId>> {
        self.grid.check_bounds(x, y)?;
        Ok(self.grid.resolved(x, y))
    }

    fn is_complete(&self, _model: &AdjacencyModel) -> bool {
        if !self.grid.is_complete() {
            return false;
        }
        self.policy == ContradictionPolicy::Ignore || self.grid.contradictions().is_empty()
    }

    fn contradictions(&self, _model: &AdjacencyModel) -> Vec<(usize, usize)> {
        self.grid.contradictions()
    }

    fn resolved_count(&self) -> usize {
        self.grid.collapsed_count()
    }
}
