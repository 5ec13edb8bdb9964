//! Raw cell values of a tabular extract
//!
//! Spreadsheet exports hand us cells of mixed type. `Cell` keeps that shape
//! without committing to any file format; loaders in `crate::import` produce
//! rows of cells.

use serde::{Deserialize, Deserializer, Serialize};

/// A single cell of a tabular extract
///
/// Boolean cells in JSON extracts load as text, so a row holding one is
/// skipped by the extractor rather than failing the whole load.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Cell {
    /// Blank cell (`null` in JSON extracts)
    #[default]
    Empty,
    /// Numeric cell
    Number(f64),
    /// Text cell, possibly holding a currency-formatted amount
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawCell::deserialize(deserializer)? {
            RawCell::Empty => Cell::Empty,
            RawCell::Bool(b) => Cell::Text(b.to_string()),
            RawCell::Number(n) => Cell::Number(n),
            RawCell::Text(s) => Cell::Text(s),
        })
    }
}

/// One row of an extract
pub type Row = Vec<Cell>;

impl Cell {
    /// Build a cell from text, mapping blank strings to `Empty`
    pub fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    /// Whether the cell carries no value (blank or whitespace-only text)
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(_) => false,
            Cell::Text(s) => s.trim().is_empty(),
        }
    }

    /// Text rendering of the cell, used for free-text columns like item names
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.trim().to_string(),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::from_text(s)
    }
}
