//! Error types for catalog loading, grid operations and sampling

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Coordinate lies outside the grid
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Grid width
        cols: usize,
        /// Grid height
        rows: usize,
    },

    /// Tile id is not part of the adjacency model
    UnknownTile {
        /// The requested tile id
        tile: usize,
        /// Number of tiles in the model
        tile_count: usize,
    },

    /// Sampling temperature must be strictly positive
    InvalidTemperature {
        /// The rejected temperature
        temperature: f64,
    },

    /// A cell has no tile satisfying all of its neighbor constraints
    Contradiction {
        /// Column of the empty cell
        x: usize,
        /// Row of the empty cell
        y: usize,
    },

    /// Tile catalog text could not be parsed
    InvalidCatalog {
        /// 1-based line number where parsing failed (0 when not line specific)
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { x, y, cols, rows } => {
                write!(
                    f,
                    "Coordinates ({x}, {y}) are out of bounds for a {cols}x{rows} grid"
                )
            }
            Self::UnknownTile { tile, tile_count } => {
                write!(
                    f,
                    "Tile id {tile} does not exist (model has {tile_count} tiles)"
                )
            }
            Self::InvalidTemperature { temperature } => {
                write!(
                    f,
                    "Temperature must be greater than 0, got {temperature}"
                )
            }
            Self::Contradiction { x, y } => {
                write!(f, "Contradiction at ({x}, {y}): no tile fits its neighbors")
            }
            Self::InvalidCatalog { line, reason } => {
                write!(f, "Invalid catalog at line {line}: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a catalog parse error for a 1-based line number
pub fn catalog_error(line: usize, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidCatalog {
        line,
        reason: reason.to_string(),
    }
}
