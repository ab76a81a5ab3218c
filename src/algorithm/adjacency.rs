//! Pairwise tile compatibility derived from border matching
//!
//! For every ordered pair of tiles and every direction the model records
//! whether the second tile may sit next to the first on that side. Border
//! equality decides presence; a shared exclusion tag keeps the entry present
//! but forbids it with zero weight, which is different from having no entry.

use ndarray::Array3;

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Direction;
use crate::spatial::tiles::{Symbol, TileId, TileSet};

/// How a neighbor tile relates to a tile across one border
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Compatibility {
    /// Borders differ; the neighbor is not a candidate at all
    #[default]
    Incompatible,
    /// Borders match but an exclusion tag forbids the pairing
    Excluded,
    /// Borders match; the neighbor is proposed with this weight
    Compatible(f64),
}

impl Compatibility {
    /// Weight carried by a present entry, `None` when the borders differ
    ///
    /// Excluded entries are present with weight zero: they still count as a
    /// vote during aggregation, just one without any mass.
    pub const fn weight(self) -> Option<f64> {
        match self {
            Self::Incompatible => None,
            Self::Excluded => Some(0.0),
            Self::Compatible(weight) => Some(weight),
        }
    }

    /// Whether the borders matched
    pub const fn is_present(self) -> bool {
        !matches!(self, Self::Incompatible)
    }
}

/// Compatibility table indexed by `[tile, direction, neighbor]`
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyModel {
    table: Array3<Compatibility>,
    priors: Vec<f64>,
}

impl AdjacencyModel {
    /// Build the model from an expanded tile set
    ///
    /// The tile set's normalized probabilities become the priors and the
    /// neighbor's prior becomes the compatibility weight. Cost is
    /// `O(T² · 4 · k)` for `T` tiles of side `k`.
    pub fn build(tiles: &TileSet) -> Self {
        let tile_count = tiles.len();
        let priors = tiles.probabilities();

        let edges: Vec<[Vec<Symbol>; 4]> = tiles
            .iter()
            .map(|tile| Direction::ALL.map(|direction| tile.pattern.edge(direction)))
            .collect();

        let mut table = Array3::from_elem((tile_count, 4, tile_count), Compatibility::Incompatible);

        for tile in tiles.iter() {
            let Some(tile_edges) = edges.get(tile.id) else {
                continue;
            };
            for direction in Direction::ALL {
                let Some(edge) = tile_edges.get(direction.index()) else {
                    continue;
                };
                for other in tiles.iter() {
                    let facing = edges
                        .get(other.id)
                        .and_then(|other_edges| other_edges.get(direction.opposite().index()));
                    if facing != Some(edge) {
                        continue;
                    }

                    let compatibility = if tile.excludes(other) {
                        Compatibility::Excluded
                    } else {
                        Compatibility::Compatible(priors.get(other.id).copied().unwrap_or(0.0))
                    };
                    if let Some(entry) = table.get_mut([tile.id, direction.index(), other.id]) {
                        *entry = compatibility;
                    }
                }
            }
        }

        Self { table, priors }
    }

    /// Number of tiles the model covers
    pub fn tile_count(&self) -> usize {
        self.priors.len()
    }

    /// Whether a tile id belongs to the model
    pub fn contains(&self, tile: TileId) -> bool {
        tile < self.tile_count()
    }

    /// Fail with `UnknownTile` unless the id belongs to the model
    ///
    /// # Errors
    ///
    /// Returns an error if the tile id is not part of the model
    pub fn check_tile(&self, tile: TileId) -> Result<()> {
        if self.contains(tile) {
            Ok(())
        } else {
            Err(AlgorithmError::UnknownTile {
                tile,
                tile_count: self.tile_count(),
            })
        }
    }

    /// Normalized prior probability of a tile
    pub fn prior(&self, tile: TileId) -> f64 {
        self.priors.get(tile).copied().unwrap_or(0.0)
    }

    /// Normalized prior probability of every tile, indexed by id
    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    /// Relation of `neighbor` placed on the `direction` side of `tile`
    pub fn compatibility(
        &self,
        tile: TileId,
        direction: Direction,
        neighbor: TileId,
    ) -> Compatibility {
        self.table
            .get([tile, direction.index(), neighbor])
            .copied()
            .unwrap_or_default()
    }

    /// Present neighbors on one side of a tile with their weights, in id order
    ///
    /// Excluded neighbors are yielded with weight zero; incompatible ones are
    /// skipped.
    pub fn candidates(
        &self,
        tile: TileId,
        direction: Direction,
    ) -> impl Iterator<Item = (TileId, f64)> + '_ {
        let row = (tile < self.tile_count()).then(|| {
            self.table
                .index_axis(ndarray::Axis(0), tile)
                .index_axis_move(ndarray::Axis(0), direction.index())
        });
        row.into_iter().flat_map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .filter_map(|(neighbor, compatibility)| {
                    compatibility.weight().map(|weight| (neighbor, weight))
                })
        })
    }
}
