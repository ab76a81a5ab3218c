//! Cardinal directions on the tile grid

use std::fmt;

/// One side of a cell or tile
///
/// `Up` points toward row 0, `Left` toward column 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Toward smaller row indices
    Up,
    /// Toward larger column indices
    Right,
    /// Toward larger row indices
    Down,
    /// Toward smaller column indices
    Left,
}

impl Direction {
    /// All directions in neighborhood visiting order
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// The direction pointing back the other way
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Dense index used for table lookups
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Neighbor of `(x, y)` in this direction, if it lies inside a `cols` x `rows` grid
    pub const fn step(self, x: usize, y: usize, cols: usize, rows: usize) -> Option<(usize, usize)> {
        let (nx, ny) = match self {
            Self::Up => {
                if y == 0 {
                    return None;
                }
                (x, y - 1)
            }
            Self::Right => (x + 1, y),
            Self::Down => (x, y + 1),
            Self::Left => {
                if x == 0 {
                    return None;
                }
                (x - 1, y)
            }
        };
        if nx < cols && ny < rows {
            Some((nx, ny))
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}
