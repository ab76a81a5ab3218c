//! Pluggable propagation strategies behind one collapse contract
//!
//! Both strategies answer the same questions (fix a cell, advance one step,
//! report a cell's distribution) but trade memory for compute differently:
//!
//! - [`StrategyKind::Eager`] keeps a distribution for every cell and relaxes
//!   constraints through the grid with a bounded depth after every change.
//! - [`StrategyKind::Lazy`] stores only resolved tile ids and derives
//!   candidates on demand from resolved neighbors, looking a single hop ahead
//!   and retrying picks that would strand a neighbor.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;

use crate::algorithm::adjacency::AdjacencyModel;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::{CellDistribution, TileId};

/// Which propagation strategy a session runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrategyKind {
    /// Persistent per-cell distributions with bounded-depth propagation
    #[default]
    Eager,
    /// Resolved ids only, frontier-driven with local retries
    Lazy,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager => f.write_str("eager"),
            Self::Lazy => f.write_str("lazy"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = AlgorithmError;

    fn from_str(text: &str) -> Result<Self> {
        match text.to_ascii_lowercase().as_str() {
            "eager" => Ok(Self::Eager),
            "lazy" => Ok(Self::Lazy),
            _ => Err(invalid_parameter(
                "strategy",
                &text,
                &"expected `eager` or `lazy`",
            )),
        }
    }
}

/// Grid state plus the rules for narrowing and collapsing it
pub trait PropagationStrategy: fmt::Debug {
    /// Which strategy this is
    fn kind(&self) -> StrategyKind;

    /// Grid width
    fn cols(&self) -> usize;

    /// Grid height
    fn rows(&self) -> usize;

    /// Pin a cell to a tile and apply its constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid or the tile is
    /// not part of the model
    fn fix(&mut self, model: &AdjacencyModel, x: usize, y: usize, tile: TileId) -> Result<()>;

    /// Advance the collapse by one bounded unit of work
    ///
    /// Returns whether any cell changed.
    ///
    /// # Errors
    ///
    /// Returns an error if sampling fails or a contradiction is found under a
    /// failing contradiction policy
    fn step(&mut self, model: &AdjacencyModel, rng: &mut dyn RngCore) -> Result<bool>;

    /// Snapshot of a cell's candidate distribution
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid
    fn distribution(&self, model: &AdjacencyModel, x: usize, y: usize)
    -> Result<CellDistribution>;

    /// Tile of a resolved cell
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the grid
    fn resolved(&self, x: usize, y: usize) -> Result<Option<TileId>>;

    /// Whether no further step can make progress toward a resolved grid
    fn is_complete(&self, model: &AdjacencyModel) -> bool;

    /// Cells left without any viable candidate, in scan order
    fn contradictions(&self, model: &AdjacencyModel) -> Vec<(usize, usize)>;

    /// Number of resolved cells
    fn resolved_count(&self) -> usize;
}
