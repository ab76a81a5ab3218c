//! Tile patterns and symmetry expansion
//!
//! Seed patterns are expanded into their orbit under the dihedral group of the
//! square (rotations, then a horizontal reflection of each rotation). Variants
//! are deduplicated by content and assigned dense ids in seed order, so the id
//! of every tile is stable for a given catalog.

use crate::io::error::{Result, catalog_error, invalid_parameter};
use crate::math::probability::normalize;
use crate::spatial::direction::Direction;
use ndarray::{Array2, Axis};
use std::collections::HashSet;

/// A single cell value of a tile pattern
pub type Symbol = char;

/// Dense tile identifier in `[0, tile_count)`
pub type TileId = usize;

/// Immutable square matrix of symbols, row-major with row 0 at the top
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TilePattern {
    cells: Array2<Symbol>,
}

impl TilePattern {
    /// Build a pattern from its rows
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or not square
    pub fn from_rows(rows: &[Vec<Symbol>]) -> Result<Self> {
        let side = rows.len();
        if side == 0 {
            return Err(catalog_error(0, &"tile pattern has no rows"));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != side) {
            return Err(catalog_error(
                0,
                &format!(
                    "tile pattern must be square: {side} rows but a row of length {}",
                    row.len()
                ),
            ));
        }

        let flat: Vec<Symbol> = rows.iter().flatten().copied().collect();
        let cells = Array2::from_shape_vec((side, side), flat)
            .map_err(|e| catalog_error(0, &format!("tile pattern shape: {e}")))?;
        Ok(Self { cells })
    }

    /// Build a pattern from string rows, one char per symbol
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or not square
    pub fn from_strs(rows: &[&str]) -> Result<Self> {
        let rows: Vec<Vec<Symbol>> = rows.iter().map(|row| row.chars().collect()).collect();
        Self::from_rows(&rows)
    }

    /// Side length of the square
    pub fn side(&self) -> usize {
        self.cells.nrows()
    }

    /// Symbol at the given row and column
    pub fn get(&self, row: usize, col: usize) -> Option<Symbol> {
        self.cells.get((row, col)).copied()
    }

    /// Rotate a quarter turn: `new[i][j] = old[k-1-j][i]`
    #[must_use]
    pub fn rotate_90(&self) -> Self {
        let mut cells = self.cells.t().to_owned();
        cells.invert_axis(Axis(1));
        Self { cells }
    }

    /// Mirror horizontally by reversing every row
    #[must_use]
    pub fn reflect(&self) -> Self {
        let mut cells = self.cells.clone();
        cells.invert_axis(Axis(1));
        Self { cells }
    }

    /// Symbols along one border
    ///
    /// Horizontal borders read left to right, vertical borders top to bottom,
    /// so opposite borders of two neighbors line up element by element.
    pub fn edge(&self, direction: Direction) -> Vec<Symbol> {
        let last = self.side().saturating_sub(1);
        match direction {
            Direction::Up => self.cells.row(0).to_vec(),
            Direction::Down => self.cells.row(last).to_vec(),
            Direction::Left => self.cells.column(0).to_vec(),
            Direction::Right => self.cells.column(last).to_vec(),
        }
    }

    /// Whether every cell holds the same symbol
    pub fn is_uniform(&self) -> bool {
        let mut symbols = self.cells.iter();
        symbols
            .next()
            .is_none_or(|first| symbols.all(|symbol| symbol == first))
    }

    /// Rows as strings, for display and export
    pub fn to_strings(&self) -> Vec<String> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().collect())
            .collect()
    }

    fn content_key(&self) -> Vec<Symbol> {
        self.cells.iter().copied().collect()
    }
}

/// A catalog entry before symmetry expansion
#[derive(Clone, Debug, PartialEq)]
pub struct SeedTile {
    /// Square symbol pattern
    pub pattern: TilePattern,
    /// Tiles sharing an equal tag may never be adjacent
    pub exclusion_tag: Option<String>,
    /// Relative selection weight (strictly positive)
    pub weight: f64,
}

impl SeedTile {
    /// Seed tile with weight 1 and no exclusion tag
    pub const fn new(pattern: TilePattern) -> Self {
        Self {
            pattern,
            exclusion_tag: None,
            weight: 1.0,
        }
    }

    /// Replace the relative weight
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Attach an exclusion tag
    #[must_use]
    pub fn with_exclusion_tag(mut self, tag: impl Into<String>) -> Self {
        self.exclusion_tag = Some(tag.into());
        self
    }

    /// Every distinct variant under rotation and reflection, in generation order
    ///
    /// Order: the seed, three successive quarter turns, then the reflection of
    /// each of those four. Duplicates keep their first occurrence.
    pub fn symmetry_variants(&self) -> Vec<TilePattern> {
        let mut transforms = Vec::with_capacity(8);
        let mut current = self.pattern.clone();
        transforms.push(current.clone());
        for _ in 0..3 {
            current = current.rotate_90();
            transforms.push(current.clone());
        }

        let rotation_count = transforms.len();
        for i in 0..rotation_count {
            if let Some(rotation) = transforms.get(i) {
                let reflected = rotation.reflect();
                transforms.push(reflected);
            }
        }

        let mut seen = HashSet::new();
        transforms
            .into_iter()
            .filter(|pattern| seen.insert(pattern.content_key()))
            .collect()
    }
}

/// An expanded tile with its dense id
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Dense id assigned at expansion time
    pub id: TileId,
    /// Square symbol pattern
    pub pattern: TilePattern,
    /// Tiles sharing an equal tag may never be adjacent
    pub exclusion_tag: Option<String>,
    /// Relative weight inherited from the seed
    pub weight: f64,
    /// Weight normalized over the whole tile set
    pub probability: f64,
}

impl Tile {
    /// Whether two tiles carry the same, set, exclusion tag
    pub fn excludes(&self, other: &Self) -> bool {
        self.exclusion_tag
            .as_ref()
            .is_some_and(|tag| other.exclusion_tag.as_ref() == Some(tag))
    }
}

/// The symmetry closure of a seed catalog
#[derive(Clone, Debug, PartialEq)]
pub struct TileSet {
    tiles: Vec<Tile>,
    side: usize,
}

impl TileSet {
    /// Expand seed tiles into their full symmetry closure
    ///
    /// Each seed contributes its distinct variants in generation order, seeds
    /// are concatenated in catalog order and ids are assigned from 0. Variants
    /// are only deduplicated within a seed's own orbit. Probabilities start out
    /// equal to the normalized weights.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No seed tiles are given
    /// - Seed patterns differ in side length
    /// - A weight is not a finite positive number
    pub fn expand(seeds: &[SeedTile]) -> Result<Self> {
        let Some(first) = seeds.first() else {
            return Err(invalid_parameter(
                "seed_tiles",
                &0,
                &"at least one seed tile is required",
            ));
        };
        let side = first.pattern.side();

        let mut tiles = Vec::new();
        for seed in seeds {
            if seed.pattern.side() != side {
                return Err(invalid_parameter(
                    "seed_tiles",
                    &seed.pattern.side(),
                    &format!("every tile must have side length {side}"),
                ));
            }
            if !seed.weight.is_finite() || seed.weight <= 0.0 {
                return Err(invalid_parameter(
                    "weight",
                    &seed.weight,
                    &"tile weights must be finite and positive",
                ));
            }

            for pattern in seed.symmetry_variants() {
                tiles.push(Tile {
                    id: tiles.len(),
                    pattern,
                    exclusion_tag: seed.exclusion_tag.clone(),
                    weight: seed.weight,
                    probability: seed.weight,
                });
            }
        }

        let mut tile_set = Self { tiles, side };
        tile_set.normalize_probabilities();
        Ok(tile_set)
    }

    /// Recompute every probability as weight divided by the total weight
    pub fn normalize_probabilities(&mut self) {
        let mut weights: Vec<f64> = self.tiles.iter().map(|tile| tile.weight).collect();
        normalize(&mut weights);
        for (tile, probability) in self.tiles.iter_mut().zip(weights) {
            tile.probability = probability;
        }
    }

    /// Number of tiles after expansion
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Side length shared by every pattern
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Look up a tile by id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Iterate tiles in id order
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Prior probability of every tile, indexed by id
    pub fn probabilities(&self) -> Vec<f64> {
        self.tiles.iter().map(|tile| tile.probability).collect()
    }
}
