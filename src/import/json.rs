//! JSON extract loader
//!
//! Accepts an array of rows, each an array of cells (`null`, booleans, numbers
//! or strings), which is what most spreadsheet libraries emit when asked for
//! raw sheet values.

use std::io::Read;

use crate::error::{ReconError, ReconResult};
use crate::models::Row;

/// Read a JSON array-of-arrays extract
pub fn read_json_rows<R: Read>(reader: R) -> ReconResult<Vec<Row>> {
    serde_json::from_reader(reader)
        .map_err(|e| ReconError::Import(format!("Invalid JSON extract: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;

    #[test]
    fn test_mixed_cells() {
        let data = r#"[["S.No", "Item"], [1, "Rent", 12000, "₹1,000"], [], [null]]"#;
        let rows = read_json_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1][0], Cell::Number(1.0));
        assert_eq!(rows[1][3], Cell::Text("₹1,000".into()));
        assert!(rows[2].is_empty());
        assert_eq!(rows[3][0], Cell::Empty);
    }

    #[test]
    fn test_boolean_cells_do_not_fail_the_load() {
        use crate::services::{extract_line_items, ExtractOptions, SkipReason};

        let data = r#"[["S.No", "Item", "Annual", "Monthly"],
                       [1, "Rent", 12000, 1000],
                       [2, "Flag", true, 100]]"#;
        let rows = read_json_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[2][2], Cell::Text("true".into()));

        let extraction = extract_line_items(&rows, &ExtractOptions::default());
        assert_eq!(extraction.items.len(), 1);
        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extraction.skipped[0].reason, SkipReason::InvalidAnnual);
    }

    #[test]
    fn test_rejects_non_tabular_json() {
        let err = read_json_rows(r#"{"rows": []}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, ReconError::Import(_)));
    }
}
