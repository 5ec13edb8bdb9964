//! Tabular extract loaders
//!
//! The reconciler only needs ordered rows of cells. These loaders produce
//! them from files:
//! - CSV (`.csv`, `.tsv`): every cell is text
//! - JSON (`.json`): an array of arrays of `null` / number / string cells

pub mod csv;
pub mod json;

pub use self::csv::read_csv_rows;
pub use self::json::read_json_rows;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ReconError, ReconResult};
use crate::models::Row;

/// Load an extract, picking the format from the file extension
pub fn load_rows(path: &Path) -> ReconResult<Vec<Row>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let file = File::open(path).map_err(|e| {
        ReconError::Import(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let rows = match extension.as_str() {
        "csv" => read_csv_rows(reader, b',')?,
        "tsv" => read_csv_rows(reader, b'\t')?,
        "json" => read_json_rows(reader)?,
        other => {
            return Err(ReconError::Import(format!(
                "Unsupported extract format '{}' for {}. Use .csv, .tsv or .json",
                other,
                path.display()
            )))
        }
    };

    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded extract");
    Ok(rows)
}
