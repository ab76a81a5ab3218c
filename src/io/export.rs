//! Text export of a session's resolved tile ids

use crate::algorithm::executor::Session;
use crate::io::configuration::{OUTPUT_EXTENSION, OUTPUT_SUFFIX};
use crate::io::error::{AlgorithmError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const UNRESOLVED_MARK: &str = "?";
const CONTRADICTION_MARK: &str = "!";

/// Render the grid as text, one row per line
///
/// Resolved cells print their tile id, contradictions print `!` and every
/// other unresolved cell prints `?`. Ids are separated by single spaces.
pub fn render_grid(session: &Session) -> String {
    let contradictions: HashSet<(usize, usize)> = session.contradictions().into_iter().collect();
    let resolved = session.resolved_grid();

    let mut output = String::new();
    for (y, row) in resolved.outer_iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if x > 0 {
                output.push(' ');
            }
            match cell {
                Some(tile) => output.push_str(&tile.to_string()),
                None if contradictions.contains(&(x, y)) => output.push_str(CONTRADICTION_MARK),
                None => output.push_str(UNRESOLVED_MARK),
            }
        }
        output.push('\n');
    }
    output
}

/// Write the rendered grid to `path`
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn export_grid(session: &Session, path: &Path) -> Result<()> {
    std::fs::write(path, render_grid(session)).map_err(|source| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "write result grid",
        source,
    })
}

/// Default output location next to a catalog: `<stem>_result.txt`
pub fn output_path_for(catalog: &Path) -> PathBuf {
    let stem = catalog.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        OUTPUT_EXTENSION
    );

    if let Some(parent) = catalog.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
