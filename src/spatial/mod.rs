//! Spatial data structures
//!
//! This module contains the grid-facing building blocks:
//! - Cardinal directions and neighbor stepping
//! - Tile patterns and their symmetry expansion
//! - Per-cell candidate distributions and the wave grid holding them

/// Cardinal directions and neighbor offsets
pub mod direction;
/// Per-cell candidate distributions
pub mod distribution;
/// Wave grid state and least-certain cell lookup
pub mod grid;
/// Tile patterns, seed tiles and symmetry expansion
pub mod tiles;

pub use direction::Direction;
pub use distribution::CellDistribution;
pub use grid::WaveGrid;
pub use tiles::{SeedTile, Tile, TileId, TilePattern, TileSet};
