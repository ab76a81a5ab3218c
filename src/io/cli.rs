//! Command-line interface for collapsing a tile catalog into a grid

use crate::algorithm::deadlock::ContradictionPolicy;
use crate::algorithm::executor::{EngineConfig, Session, initialize};
use crate::algorithm::strategy::StrategyKind;
use crate::io::catalog::load_catalog;
use crate::io::configuration::{
    COLLAPSES_PER_STEP, DEFAULT_CENTER_TILE, DEFAULT_COLS, DEFAULT_MAX_STEPS,
    DEFAULT_PROPAGATION_DEPTH, DEFAULT_ROWS, DEFAULT_SEED, FRONTIER_RETRY_LIMIT,
};
use crate::io::error::Result;
use crate::io::export::{export_grid, output_path_for};
use crate::io::prefill::FixedCell;
use crate::io::progress::RunProgress;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Fill a grid with tiles whose borders match, wave function collapse style"
)]
/// Command-line arguments for the tile solver
pub struct Cli {
    /// Tile catalog file
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Grid height in cells
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Grid width in cells
    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Seed string for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED.to_owned())]
    pub seed: String,

    /// Pin a cell before solving, as x,y=tile (repeatable; defaults to the
    /// center cell pinned to tile 0)
    #[arg(short, long = "fix", value_name = "X,Y=TILE")]
    pub fix: Vec<FixedCell>,

    /// Propagation strategy: eager or lazy
    #[arg(long, default_value_t = StrategyKind::Eager)]
    pub strategy: StrategyKind,

    /// Propagation depth budget per changed cell
    #[arg(short, long, default_value_t = DEFAULT_PROPAGATION_DEPTH)]
    pub depth: u32,

    /// Reaction to cells without candidates: ignore, fail or repair
    #[arg(long, default_value_t = ContradictionPolicy::Repair)]
    pub policy: ContradictionPolicy,

    /// Maximum steps before stopping
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_STEPS)]
    pub steps: usize,

    /// Pause between steps in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    /// Output file (defaults to <catalog stem>_result.txt next to the catalog)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine configuration implied by the arguments
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            strategy: self.strategy,
            propagation_depth: self.depth,
            collapses_per_step: COLLAPSES_PER_STEP,
            frontier_retry_limit: FRONTIER_RETRY_LIMIT,
            contradiction_policy: self.policy,
        }
    }

    /// Cells to pin, falling back to the grid center
    pub fn fixed_cells(&self) -> Vec<FixedCell> {
        if self.fix.is_empty() {
            vec![FixedCell::center(self.cols, self.rows, DEFAULT_CENTER_TILE)]
        } else {
            self.fix.clone()
        }
    }

    /// Where the result grid is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| output_path_for(&self.catalog))
    }
}

/// Outcome of one solver run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Tiles after symmetry expansion
    pub tile_count: usize,
    /// Steps taken
    pub steps: usize,
    /// Resolved cells at the end of the run
    pub resolved: usize,
    /// Total cells in the grid
    pub cells: usize,
    /// Cells left without candidates
    pub contradictions: usize,
    /// File the grid was written to
    pub output: PathBuf,
}

/// Drives one catalog through loading, solving and export
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the catalog, collapse the grid and write the result
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog cannot be read or parsed
    /// - The grid or a pinned cell is invalid
    /// - A step fails under the `fail` contradiction policy
    /// - The result cannot be written
    pub fn run(&self) -> Result<RunSummary> {
        let seeds = load_catalog(&self.cli.catalog)?;
        let (tiles, model) = initialize(&seeds)?;

        let mut session = Session::new(
            self.cli.rows,
            self.cli.cols,
            model,
            &self.cli.seed,
            self.cli.engine_config(),
        )?;
        session.apply_fixed(&self.cli.fixed_cells())?;

        let progress = self
            .cli
            .should_show_progress()
            .then(|| RunProgress::new(&self.cli.catalog, session.cell_count()));
        let delay = Duration::from_millis(self.cli.delay_ms);

        let mut steps = 0;
        while steps < self.cli.steps && !session.is_complete() {
            let changed = session.step()?;
            steps += 1;
            if let Some(ref progress) = progress {
                progress.update(session.resolved_count(), steps);
            }
            if !changed {
                break;
            }
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }

        let contradictions = session.contradictions().len();
        if let Some(ref progress) = progress {
            progress.finish(session.resolved_count(), contradictions);
        }

        let output = self.cli.output_path();
        export_grid(&session, &output)?;

        let summary = RunSummary {
            tile_count: tiles.len(),
            steps,
            resolved: session.resolved_count(),
            cells: session.cell_count(),
            contradictions,
            output,
        };
        self.report(&summary);
        Ok(summary)
    }

    // Allow print for the end-of-run summary
    #[allow(clippy::print_stderr)]
    fn report(&self, summary: &RunSummary) {
        if self.cli.quiet {
            return;
        }
        eprintln!(
            "{} tiles, {}/{} cells resolved in {} steps, written to {}",
            summary.tile_count,
            summary.resolved,
            summary.cells,
            summary.steps,
            summary.output.display()
        );
        if summary.contradictions > 0 {
            eprintln!(
                "warning: {} cells ended without a viable tile",
                summary.contradictions
            );
        }
    }
}
