use ndarray::Array2;

use crate::{
    algorithm::adjacency::AdjacencyModel,
    algorithm::deadlock::ContradictionPolicy,
    algorithm::eager::EagerStrategy,
    algorithm::frontier::FrontierStrategy,
    algorithm::strategy::{PropagationStrategy, StrategyKind},
    io::configuration::{COLLAPSES_PER_STEP, DEFAULT_PROPAGATION_DEPTH, FRONTIER_RETRY_LIMIT},
    io::error::{Result, invalid_parameter},
    io::prefill::FixedCell,
    math::random::Sfc32,
    spatial::grid::validate_dimensions,
    spatial::{CellDistribution, SeedTile, TileId, TileSet},
};

/// Runtime knobs controlling how a session collapses its grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Which propagation strategy drives the session
    pub strategy: StrategyKind,
    /// Depth budget given to each propagation seed (eager only)
    pub propagation_depth: u32,
    /// Maximum collapses per eager step
    pub collapses_per_step: usize,
    /// Sampling attempts per frontier cell (lazy only)
    pub frontier_retry_limit: usize,
    /// Reaction to cells left without candidates
    pub contradiction_policy: ContradictionPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            propagation_depth: DEFAULT_PROPAGATION_DEPTH,
            collapses_per_step: COLLAPSES_PER_STEP,
            frontier_retry_limit: FRONTIER_RETRY_LIMIT,
            contradiction_policy: ContradictionPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Check that every knob is usable
    ///
    /// # Errors
    ///
    /// Returns an error if collapses per step or the retry limit is zero
    pub fn validate(&self) -> Result<()> {
        if self.collapses_per_step == 0 {
            return Err(invalid_parameter(
                "collapses_per_step",
                &self.collapses_per_step,
                &"at least one collapse per step is required",
            ));
        }
        if self.frontier_retry_limit == 0 {
            return Err(invalid_parameter(
                "frontier_retry_limit",
                &self.frontier_retry_limit,
                &"at least one sampling attempt is required",
            ));
        }
        Ok(())
    }
}

/// Expand seed tiles into the full tile set and build its adjacency model
///
/// # Errors
///
/// Returns an error if:
/// - No seed tile is given
/// - Seed tiles differ in side length
/// - A weight is not finite and positive
pub fn initialize(seeds: &[SeedTile]) -> Result<(TileSet, AdjacencyModel)> {
    let tiles = TileSet::expand(seeds)?;
    let model = AdjacencyModel::build(&tiles);
    Ok((tiles, model))
}

fn build_strategy(
    rows: usize,
    cols: usize,
    model: &AdjacencyModel,
    config: &EngineConfig,
) -> Result<Box<dyn PropagationStrategy>> {
    Ok(match config.strategy {
        StrategyKind::Eager => Box::new(EagerStrategy::new(
            rows,
            cols,
            model,
            config.propagation_depth,
            config.collapses_per_step,
            config.contradiction_policy,
        )?),
        StrategyKind::Lazy => Box::new(FrontierStrategy::new(
            rows,
            cols,
            model,
            config.frontier_retry_limit,
            config.contradiction_policy,
        )?),
    })
}

/// Seeded grid collapse over one adjacency model
///
/// Owns the model, the generator and the active strategy. Cells pinned with
/// [`Session::fix`] are remembered and re-applied on [`Session::reset`], so a
/// reseeded run starts from the same constraints.
#[derive(Debug)]
pub struct Session {
    model: AdjacencyModel,
    config: EngineConfig,
    rows: usize,
    cols: usize,
    seed: String,
    rng: Sfc32,
    strategy: Box<dyn PropagationStrategy>,
    fixed: Vec<FixedCell>,
    steps: usize,
}

impl Session {
    /// Create a fully unresolved grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A dimension is zero or exceeds the safety limit
    /// - The model has no tiles
    /// - The configuration is unusable
    pub fn new(
        rows: usize,
        cols: usize,
        model: AdjacencyModel,
        seed: &str,
        config: EngineConfig,
    ) -> Result<Self> {
        validate_dimensions(rows, cols)?;
        config.validate()?;
        if model.tile_count() == 0 {
            return Err(invalid_parameter(
                "model",
                &0,
                &"the adjacency model has no tiles",
            ));
        }

        let strategy = build_strategy(rows, cols, &model, &config)?;
        Ok(Self {
            model,
            config,
            rows,
            cols,
            seed: seed.to_owned(),
            rng: Sfc32::from_seed_str(seed),
            strategy,
            fixed: Vec::new(),
            steps: 0,
        })
    }

    /// Pin a cell to a tile and propagate its constraints
    ///
    /// Pinning the same cell twice keeps only the latest tile.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid or the tile id is
    /// unknown; the grid is left unchanged in that case
    pub fn fix(&mut self, x: usize, y: usize, tile: TileId) -> Result<()> {
        self.strategy.fix(&self.model, x, y, tile)?;
        self.fixed.retain(|cell| (cell.x, cell.y) != (x, y));
        self.fixed.push(FixedCell { x, y, tile });
        Ok(())
    }

    /// Pin every listed cell in order
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Session::fix`]
    pub fn apply_fixed(&mut self, cells: &[FixedCell]) -> Result<()> {
        for cell in cells {
            self.fix(cell.x, cell.y, cell.tile)?;
        }
        Ok(())
    }

    /// Advance the collapse by one bounded unit of work
    ///
    /// Returns whether any cell changed.
    ///
    /// # Errors
    ///
    /// Returns an error if sampling fails or the contradiction policy is
    /// [`ContradictionPolicy::Fail`] and a cell ran out of candidates
    pub fn step(&mut self) -> Result<bool> {
        let changed = self.strategy.step(&self.model, &mut self.rng)?;
        self.steps += 1;
        Ok(changed)
    }

    /// Step until complete, stalled, or `max_steps` is reached
    ///
    /// Returns the number of steps taken.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Session::step`]
    pub fn run(&mut self, max_steps: usize) -> Result<usize> {
        let mut taken = 0;
        while taken < max_steps && !self.is_complete() {
            taken += 1;
            if !self.step()? {
                break;
            }
        }
        Ok(taken)
    }

    /// Snapshot of a cell's candidate distribution
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid
    pub fn distribution(&self, x: usize, y: usize) -> Result<CellDistribution> {
        self.strategy.distribution(&self.model, x, y)
    }

    /// Tile id of a resolved cell
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid
    pub fn resolved(&self, x: usize, y: usize) -> Result<Option<TileId>> {
        self.strategy.resolved(x, y)
    }

    /// Whether the collapse has nothing left to do
    pub fn is_complete(&self) -> bool {
        self.strategy.is_complete(&self.model)
    }

    /// Cells without any viable candidate, in scan order
    pub fn contradictions(&self) -> Vec<(usize, usize)> {
        self.strategy.contradictions(&self.model)
    }

    /// Discard all progress and restart from a new seed
    ///
    /// Previously pinned cells are pinned again in their original order.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be rebuilt
    pub fn reset(&mut self, seed: &str) -> Result<()> {
        self.strategy = build_strategy(self.rows, self.cols, &self.model, &self.config)?;
        self.seed = seed.to_owned();
        self.rng = Sfc32::from_seed_str(seed);
        self.steps = 0;

        let fixed = std::mem::take(&mut self.fixed);
        self.apply_fixed(&fixed)
    }

    /// Resolved ids of every cell, indexed `[y, x]`
    pub fn resolved_grid(&self) -> Array2<Option<TileId>> {
        Array2::from_shape_fn((self.rows, self.cols), |(y, x)| {
            self.strategy.resolved(x, y).ok().flatten()
        })
    }

    /// Grid height
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Grid width
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of resolved cells
    pub fn resolved_count(&self) -> usize {
        self.strategy.resolved_count()
    }

    /// Steps taken since creation or the last reset
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Seed the generator was created from
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Adjacency model driving the collapse
    pub const fn model(&self) -> &AdjacencyModel {
        &self.model
    }

    /// Active configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Cells pinned by the caller, in pin order
    pub fn fixed(&self) -> &[FixedCell] {
        &self.fixed
    }
}
