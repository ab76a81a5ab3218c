//! Neighbor voting used to derive a cell's candidates from its surroundings
//!
//! Every neighboring direction casts one normalized vote per candidate tile:
//! the neighbor's own candidates each propose the tiles they accept on the
//! facing side, and the proposals are averaged over the proposing tiles. A
//! candidate survives only if every direction voted for it with non-zero mass.

use crate::algorithm::adjacency::AdjacencyModel;
use crate::spatial::direction::Direction;
use crate::spatial::distribution::CellDistribution;
use crate::spatial::tiles::TileId;

/// Accumulated support for one candidate tile
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vote {
    /// How many proposals contributed
    pub number: usize,
    /// Sum of the proposed weights
    pub total_chance: f64,
}

/// Cross-direction vote accumulator for a single cell
#[derive(Clone, Debug)]
pub struct VoteTally {
    votes: Vec<Vote>,
    scratch: Vec<Vote>,
    directions: usize,
}

impl VoteTally {
    /// Empty tally over `tile_count` candidates
    pub fn new(tile_count: usize) -> Self {
        Self {
            votes: vec![Vote::default(); tile_count],
            scratch: vec![Vote::default(); tile_count],
            directions: 0,
        }
    }

    /// Number of directions that have voted
    pub const fn directions(&self) -> usize {
        self.directions
    }

    /// Accumulated vote for one candidate
    pub fn vote(&self, tile: TileId) -> Vote {
        self.votes.get(tile).copied().unwrap_or_default()
    }

    /// Record one neighboring direction
    ///
    /// `neighbor_tiles` are the candidates of the neighbor cell and `facing` is
    /// the side of the neighbor that touches the cell being recomputed. A
    /// neighbor with no candidates still counts as a direction, so it vetoes
    /// everything.
    pub fn cast(
        &mut self,
        model: &AdjacencyModel,
        neighbor_tiles: impl IntoIterator<Item = TileId>,
        facing: Direction,
    ) {
        self.directions += 1;
        self.scratch.fill(Vote::default());

        for neighbor in neighbor_tiles {
            for (candidate, weight) in model.candidates(neighbor, facing) {
                if let Some(sub) = self.scratch.get_mut(candidate) {
                    sub.number += 1;
                    sub.total_chance += weight;
                }
            }
        }

        for (vote, sub) in self.votes.iter_mut().zip(&self.scratch) {
            if sub.number > 0 {
                vote.number += 1;
                vote.total_chance += sub.total_chance / sub.number as f64;
            }
        }
    }

    /// Surviving candidates, renormalized to sum to one
    ///
    /// A candidate survives when every cast direction voted for it and its
    /// averaged chance is positive. No directions means no survivors.
    pub fn resolve(&self) -> CellDistribution {
        if self.directions == 0 {
            return CellDistribution::empty();
        }

        let mut distribution = CellDistribution::from_weights(
            self.votes
                .iter()
                .enumerate()
                .filter(|(_, vote)| vote.number >= self.directions)
                .map(|(tile, vote)| (tile, vote.total_chance / vote.number as f64)),
        );
        distribution.normalize();
        distribution
    }
}
