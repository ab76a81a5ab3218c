//! Lazy frontier strategy
//!
//! Only resolved tile ids are stored. Candidates for an unresolved cell are
//! derived on demand from its resolved neighbors, using the same voting rule
//! as the eager strategy but with each neighbor contributing a single tile.
//! A step visits the current frontier in scan order; a pick that would leave
//! an unresolved neighbor without candidates is retried a bounded number of
//! times before the last pick is kept.

use ndarray::Array2;
use rand::RngCore;

use crate::{
    algorithm::adjacency::AdjacencyModel,
    algorithm::deadlock::{ContradictionPolicy, PinnedCells, RepairTracker, repair_resolved},
    algorithm::strategy::{PropagationStrategy, StrategyKind},
    algorithm::votes::VoteTally,
    io::configuration::FRONTIER_TEMPERATURE,
    io::error::{AlgorithmError, Result},
    math::probability::sample_with_temperature,
    spatial::grid::{check_bounds, validate_dimensions},
    spatial::{CellDistribution, Direction, TileId},
};

/// Resolved-id grid expanded one frontier at a time
#[derive(Debug, Clone)]
pub struct FrontierStrategy {
    resolved: Array2<Option<TileId>>,
    pinned: PinnedCells,
    repairs: RepairTracker,
    tile_count: usize,
    retry_limit: usize,
    policy: ContradictionPolicy,
}

impl FrontierStrategy {
    /// Fully unresolved grid
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid
    pub fn new(
        rows: usize,
        cols: usize,
        model: &AdjacencyModel,
        retry_limit: usize,
        policy: ContradictionPolicy,
    ) -> Result<Self> {
        validate_dimensions(rows, cols)?;
        Ok(Self {
            resolved: Array2::from_elem((rows, cols), None),
            pinned: PinnedCells::new(cols, rows),
            repairs: RepairTracker::new(cols, rows),
            tile_count: model.tile_count(),
            retry_limit,
            policy,
        })
    }

    fn tile_at(&self, x: usize, y: usize) -> Option<TileId> {
        self.resolved.get([y, x]).copied().flatten()
    }

    fn assign(&mut self, x: usize, y: usize, tile: Option<TileId>) {
        if let Some(cell) = self.resolved.get_mut([y, x]) {
            *cell = tile;
        }
    }

    fn neighbors(
        &self,
        x: usize,
        y: usize,
    ) -> impl Iterator<Item = (Direction, usize, usize)> + use<> {
        let (rows, cols) = self.resolved.dim();
        Direction::ALL.into_iter().filter_map(move |direction| {
            direction
                .step(x, y, cols, rows)
                .map(|(nx, ny)| (direction, nx, ny))
        })
    }

    /// Candidates implied by the resolved neighbors of a cell
    ///
    /// `None` when no neighbor is resolved, in which case the cell is
    /// unconstrained.
    pub fn candidates(
        &self,
        model: &AdjacencyModel,
        x: usize,
        y: usize,
    ) -> Option<CellDistribution> {
        let mut tally = VoteTally::new(model.tile_count());
        for (direction, nx, ny) in self.neighbors(x, y) {
            if let Some(tile) = self.tile_at(nx, ny) {
                tally.cast(model, [tile], direction.opposite());
            }
        }
        (tally.directions() > 0).then(|| tally.resolve())
    }

    /// Unresolved cells with at least one resolved neighbor, in scan order
    pub fn frontier(&self) -> Vec<(usize, usize)> {
        let (rows, cols) = self.resolved.dim();
        let mut cells = Vec::new();
        for x in 0..cols {
            for y in 0..rows {
                if self.tile_at(x, y).is_some() {
                    continue;
                }
                let touches_resolved = self
                    .neighbors(x, y)
                    .any(|(_, nx, ny)| self.tile_at(nx, ny).is_some());
                if touches_resolved {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    /// First unresolved cell in scan order
    fn first_unresolved(&self) -> Option<(usize, usize)> {
        let (rows, cols) = self.resolved.dim();
        (0..cols)
            .flat_map(|x| (0..rows).map(move |y| (x, y)))
            .find(|&(x, y)| self.tile_at(x, y).is_none())
    }

    /// Whether every unresolved neighbor of a cell still has a candidate
    fn neighbors_viable(&self, model: &AdjacencyModel, x: usize, y: usize) -> bool {
        self.neighbors(x, y)
            .filter(|&(_, nx, ny)| self.tile_at(nx, ny).is_none())
            .all(|(_, nx, ny)| {
                self.candidates(model, nx, ny)
                    .is_none_or(|candidates| !candidates.is_empty())
            })
    }

    /// Resolve one frontier cell with bounded look-ahead retries
    fn resolve_cell(
        &mut self,
        model: &AdjacencyModel,
        rng: &mut dyn RngCore,
        x: usize,
        y: usize,
        pairs: &[(TileId, f64)],
    ) -> Result<()> {
        for _ in 0..self.retry_limit.max(1) {
            let tile = sample_with_temperature(pairs, FRONTIER_TEMPERATURE, rng)?;
            self.assign(x, y, Some(tile));
            if self.neighbors_viable(model, x, y) {
                break;
            }
        }
        Ok(())
    }

    /// Apply the contradiction policy to a stuck frontier cell
    ///
    /// Returns whether any cell was cleared.
    fn handle_contradiction(&mut self, x: usize, y: usize) -> Result<bool> {
        match self.policy {
            ContradictionPolicy::Ignore => Ok(false),
            ContradictionPolicy::Fail => Err(AlgorithmError::Contradiction { x, y }),
            ContradictionPolicy::Repair => {
                let result =
                    repair_resolved(&mut self.resolved, &self.pinned, &mut self.repairs, (x, y));
                Ok(!result.cleared.is_empty())
            }
        }
    }

    /// Seed an empty grid by sampling one cell from the priors
    fn bootstrap(&mut self, model: &AdjacencyModel, rng: &mut dyn RngCore) -> Result<bool> {
        let Some((x, y)) = self.first_unresolved() else {
            return Ok(false);
        };
        let priors: Vec<(TileId, f64)> = model.priors().iter().copied().enumerate().collect();
        let tile = sample_with_temperature(&priors, FRONTIER_TEMPERATURE, rng)?;
        self.assign(x, y, Some(tile));
        Ok(true)
    }
}

impl PropagationStrategy for FrontierStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Lazy
    }

    fn cols(&self) -> usize {
        self.resolved.ncols()
    }

    fn rows(&self) -> usize {
        self.resolved.nrows()
    }

    fn fix(&mut self, model: &AdjacencyModel, x: usize, y: usize, tile: TileId) -> Result<()> {
        check_bounds(x, y, self.cols(), self.rows())?;
        model.check_tile(tile)?;

        self.pinned.pin(x, y);
        self.assign(x, y, Some(tile));
        Ok(())
    }

    fn step(&mut self, model: &AdjacencyModel, rng: &mut dyn RngCore) -> Result<bool> {
        if self.first_unresolved().is_none() {
            return Ok(false);
        }

        let frontier = self.frontier();
        if frontier.is_empty() {
            return self.bootstrap(model, rng);
        }

        let mut changed = false;
        for (x, y) in frontier {
            // Cells resolved earlier in this pass constrain later ones, and a
            // repair may have detached this cell from the frontier
            let Some(candidates) = self.candidates(model, x, y) else {
                continue;
            };
            if candidates.is_empty() {
                changed |= self.handle_contradiction(x, y)?;
                continue;
            }
            self.resolve_cell(model, rng, x, y, &candidates.to_pairs())?;
            changed = true;
        }

        Ok(changed)
    }

    fn distribution(
        &self,
        model: &AdjacencyModel,
        x: usize,
        y: usize,
    ) -> Result<CellDistribution> {
        check_bounds(x, y, self.cols(), self.rows())?;
        if let Some(tile) = self.tile_at(x, y) {
            return Ok(CellDistribution::singleton(tile));
        }
        Ok(self
            .candidates(model, x, y)
            .unwrap_or_else(|| CellDistribution::uniform(self.tile_count)))
    }

    fn resolved(&self, x: usize, y: usize) -> Result<Option<TileId>> {
        check_bounds(x, y, self.cols(), self.rows())?;
        Ok(self.tile_at(x, y))
    }

    fn is_complete(&self, _model: &AdjacencyModel) -> bool {
        self.first_unresolved().is_none()
    }

    fn contradictions(&self, model: &AdjacencyModel) -> Vec<(usize, usize)> {
        self.frontier()
            .into_iter()
            .filter(|&(x, y)| {
                self.candidates(model, x, y)
                    .is_some_and(|candidates| candidates.is_empty())
            })
            .collect()
    }

    fn resolved_count(&self) -> usize {
        self.resolved.iter().filter(|cell| cell.is_some()).count()
    }
}
