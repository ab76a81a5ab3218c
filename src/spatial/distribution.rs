//! Per-cell probability distribution over tile ids

use crate::spatial::tiles::TileId;
use std::collections::BTreeMap;

/// Candidate tiles for one cell with their relative weights
///
/// Entries are kept in ascending id order so iteration, sampling and
/// comparisons are deterministic. A single entry of weight 1 marks a collapsed
/// cell; no entries at all marks a contradiction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellDistribution {
    weights: BTreeMap<TileId, f64>,
}

impl CellDistribution {
    /// Distribution with no candidates
    pub const fn empty() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Equal mass `1 / tile_count` on every tile id
    pub fn uniform(tile_count: usize) -> Self {
        let mass = 1.0 / tile_count as f64;
        Self {
            weights: (0..tile_count).map(|id| (id, mass)).collect(),
        }
    }

    /// Collapsed distribution `{tile: 1}`
    pub fn singleton(tile: TileId) -> Self {
        Self {
            weights: BTreeMap::from([(tile, 1.0)]),
        }
    }

    /// Build from explicit weights, dropping non-positive entries
    pub fn from_weights(weights: impl IntoIterator<Item = (TileId, f64)>) -> Self {
        Self {
            weights: weights
                .into_iter()
                .filter(|&(_, weight)| weight > 0.0)
                .collect(),
        }
    }

    /// Number of candidate tiles
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no candidate remains
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Whether the cell is fixed: exactly one candidate with weight 1
    pub fn is_collapsed(&self) -> bool {
        self.collapsed_tile().is_some()
    }

    /// The fixed tile of a collapsed cell
    // Renormalizing a single survivor yields exactly 1.0, so exact comparison is intended
    #[allow(clippy::float_cmp)]
    pub fn collapsed_tile(&self) -> Option<TileId> {
        if self.weights.len() != 1 {
            return None;
        }
        self.weights
            .iter()
            .next()
            .and_then(|(&tile, &weight)| (weight == 1.0).then_some(tile))
    }

    /// Weight of one tile, zero when absent
    pub fn weight(&self, tile: TileId) -> f64 {
        self.weights.get(&tile).copied().unwrap_or(0.0)
    }

    /// Whether a tile is still a candidate
    pub fn contains(&self, tile: TileId) -> bool {
        self.weights.contains_key(&tile)
    }

    /// Candidate ids in ascending order
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.weights.keys().copied()
    }

    /// `(id, weight)` pairs in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (TileId, f64)> + '_ {
        self.weights.iter().map(|(&tile, &weight)| (tile, weight))
    }

    /// `(id, weight)` pairs collected for sampling
    pub fn to_pairs(&self) -> Vec<(TileId, f64)> {
        self.iter().collect()
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Scale weights to sum to one (no-op when the total is not positive)
    pub fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for weight in self.weights.values_mut() {
                *weight /= total;
            }
        }
    }

    /// The `count` heaviest candidates, heaviest first
    ///
    /// Ties keep ascending id order. Used by consumers previewing a blend of
    /// the most likely tiles for an unresolved cell.
    pub fn top(&self, count: usize) -> Vec<(TileId, f64)> {
        let mut pairs = self.to_pairs();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        pairs.truncate(count);
        pairs
    }
}
