//! Solver constants and runtime configuration defaults

// Propagation
/// Remaining-depth budget given to each propagation seed point
pub const DEFAULT_PROPAGATION_DEPTH: u32 = 20;

// Collapse loop
/// Maximum number of cell collapses performed by one eager step
pub const COLLAPSES_PER_STEP: usize = 4;
/// Lower end of the per-pick sampling temperature
pub const TEMPERATURE_BASE: f64 = 0.8;
/// Width of the uniform range added to the base temperature
pub const TEMPERATURE_SPREAD: f64 = 0.4;
/// Sampling temperature used for frontier picks
pub const FRONTIER_TEMPERATURE: f64 = 1.0;
/// Sampling attempts for a frontier cell before the last pick is accepted
pub const FRONTIER_RETRY_LIMIT: usize = 20;

// Contradiction repair
/// Initial clearing radius around a contradiction
pub const BASE_REPAIR_RADIUS: usize = 1;

// Prevents repair from clearing the entire grid
/// Maximum clearing radius around a contradiction
pub const MAX_REPAIR_RADIUS: usize = 6;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Default grid height in cells
pub const DEFAULT_ROWS: usize = 25;
/// Default grid width in cells
pub const DEFAULT_COLS: usize = 50;
/// Seed string used when none is supplied
pub const DEFAULT_SEED: &str = "wavetile";
/// Default maximum steps before stopping
pub const DEFAULT_MAX_STEPS: usize = 10_000;
/// Tile pinned at the grid center when no fixed cells are given
pub const DEFAULT_CENTER_TILE: usize = 0;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Extension of the exported id grid
pub const OUTPUT_EXTENSION: &str = "txt";
