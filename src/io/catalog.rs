//! Plain-text tile catalog parsing
//!
//! A catalog lists seed tiles one after another:
//!
//! ```text
//! ; grass with a rare boulder
//! tile weight=10
//! ...
//! ...
//! ...
//!
//! tile weight=0.05 forbid=rock
//! ...
//! .@.
//! ...
//! ```
//!
//! Each tile starts with a `tile` header carrying optional `weight=<f64>` and
//! `forbid=<tag>` attributes, followed by its pattern rows. The first row's
//! length sets the side `k` and exactly `k` rows follow. Rows are taken
//! verbatim apart from a trailing carriage return, so spaces are ordinary
//! symbols. Lines starting with `;` and empty lines between tiles are skipped.

use crate::io::error::{AlgorithmError, Result, catalog_error};
use crate::spatial::tiles::{SeedTile, Symbol, TilePattern};
use std::path::Path;

const HEADER_KEYWORD: &str = "tile";
const COMMENT_PREFIX: char = ';';

/// Read and parse a catalog file
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents are malformed
pub fn load_catalog(path: &Path) -> Result<Vec<SeedTile>> {
    let text = std::fs::read_to_string(path).map_err(|source| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "read catalog",
        source,
    })?;
    parse_catalog(&text)
}

/// Parse catalog text into seed tiles in declaration order
///
/// # Errors
///
/// Returns an error naming the 1-based line where parsing failed if:
/// - A line outside a tile is not a header
/// - A header attribute is unknown or its value is invalid
/// - A tile has fewer rows than its side or rows of differing length
/// - The catalog declares no tiles
pub fn parse_catalog(text: &str) -> Result<Vec<SeedTile>> {
    let mut lines = text
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(index, line)| (index + 1, line));
    let mut seeds = Vec::new();

    while let Some((number, line)) = lines.next() {
        if is_skippable(line) {
            continue;
        }
        let header = parse_header(number, line)?;

        let Some((first_number, first_row)) = lines.next() else {
            return Err(catalog_error(number, &"tile header without pattern rows"));
        };
        let side = first_row.chars().count();
        if side == 0 {
            return Err(catalog_error(first_number, &"pattern row is empty"));
        }

        let mut rows: Vec<Vec<Symbol>> = vec![first_row.chars().collect()];
        while rows.len() < side {
            let Some((row_number, row)) = lines.next() else {
                return Err(catalog_error(
                    number,
                    &format!("tile needs {side} rows but the catalog ended after {}", rows.len()),
                ));
            };
            let symbols: Vec<Symbol> = row.chars().collect();
            if symbols.len() != side {
                return Err(catalog_error(
                    row_number,
                    &format!("row has {} symbols, expected {side}", symbols.len()),
                ));
            }
            rows.push(symbols);
        }

        let pattern = TilePattern::from_rows(&rows)
            .map_err(|error| catalog_error(first_number, &error))?;
        let mut seed = SeedTile::new(pattern);
        if let Some(weight) = header.weight {
            seed = seed.with_weight(weight);
        }
        if let Some(tag) = header.forbid {
            seed = seed.with_exclusion_tag(tag);
        }
        seeds.push(seed);
    }

    if seeds.is_empty() {
        return Err(catalog_error(0, &"catalog declares no tiles"));
    }
    Ok(seeds)
}

fn is_skippable(line: &str) -> bool {
    line.trim().is_empty() || line.trim_start().starts_with(COMMENT_PREFIX)
}

#[derive(Debug, Default)]
struct Header {
    weight: Option<f64>,
    forbid: Option<String>,
}

fn parse_header(number: usize, line: &str) -> Result<Header> {
    let mut words = line.split_whitespace();
    if words.next() != Some(HEADER_KEYWORD) {
        return Err(catalog_error(
            number,
            &format!("expected a `{HEADER_KEYWORD}` header, found {line:?}"),
        ));
    }

    let mut header = Header::default();
    for word in words {
        let Some((key, value)) = word.split_once('=') else {
            return Err(catalog_error(
                number,
                &format!("attribute {word:?} is not key=value"),
            ));
        };
        match key {
            "weight" => {
                let weight: f64 = value.parse().map_err(|error| {
                    catalog_error(number, &format!("weight {value:?} is not a number: {error}"))
                })?;
                if !weight.is_finite() || weight <= 0.0 {
                    return Err(catalog_error(
                        number,
                        &format!("weight must be finite and positive, got {value}"),
                    ));
                }
                header.weight = Some(weight);
            }
            "forbid" => {
                if value.is_empty() {
                    return Err(catalog_error(number, &"forbid tag is empty"));
                }
                header.forbid = Some(value.to_owned());
            }
            other => {
                return Err(catalog_error(
                    number,
                    &format!("unknown attribute {other:?}"),
                ));
            }
        }
    }
    Ok(header)
}
