//! Tile-based procedural map generation in the style of wave function collapse
//!
//! A small catalog of square symbol tiles is expanded under rotation and
//! reflection, an adjacency model is derived by matching tile borders, and a
//! grid of cells is narrowed step by step until every cell holds one tile.
//! Runs are reproducible from a seed string.

#![forbid(unsafe_code)]

/// Adjacency model, propagation strategies and the collapse session
pub mod algorithm;
/// Catalog input, result export, CLI and error handling
pub mod io;
/// Seeded random generation and weighted sampling
pub mod math;
/// Tiles, directions, distributions and the wave grid
pub mod spatial;

pub use algorithm::executor::{EngineConfig, Session, initialize};
pub use io::error::{AlgorithmError, Result};
