//! Caller-pinned cells parsed from `x,y=tile` notation

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::TileId;
use std::fmt;
use std::str::FromStr;

/// Single pinned cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedCell {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
    /// Tile the cell is pinned to
    pub tile: TileId,
}

impl FixedCell {
    /// Pin the center cell of a `cols` x `rows` grid
    ///
    /// Even dimensions round the center down.
    pub const fn center(cols: usize, rows: usize, tile: TileId) -> Self {
        Self {
            x: cols / 2,
            y: rows / 2,
            tile,
        }
    }
}

impl fmt::Display for FixedCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}={}", self.x, self.y, self.tile)
    }
}

fn parse_field(text: &str, field: &'static str, whole: &str) -> Result<usize> {
    text.trim().parse().map_err(|error| {
        invalid_parameter(
            field,
            &whole,
            &format!("{field} must be a non-negative integer, got {text:?}: {error}"),
        )
    })
}

impl FromStr for FixedCell {
    type Err = AlgorithmError;

    fn from_str(text: &str) -> Result<Self> {
        let malformed = || invalid_parameter("fixed cell", &text, &"expected x,y=tile");

        let (position, tile) = text.split_once('=').ok_or_else(malformed)?;
        let (x, y) = position.split_once(',').ok_or_else(malformed)?;

        Ok(Self {
            x: parse_field(x, "x", text)?,
            y: parse_field(y, "y", text)?,
            tile: parse_field(tile, "tile", text)?,
        })
    }
}
