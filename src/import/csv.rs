//! CSV extract loader
//!
//! Every record becomes a row, header lines included; the extractor decides
//! which rows to skip. Records may have differing lengths.

use std::io::Read;

use csv::ReaderBuilder;

use crate::error::{ReconError, ReconResult};
use crate::models::{Cell, Row};

/// Read all records of a CSV document as rows of text cells
pub fn read_csv_rows<R: Read>(reader: R, delimiter: u8) -> ReconResult<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| ReconError::Import(format!("Error reading CSV record {}: {}", idx + 1, e)))?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_all_lines_including_header() {
        let data = "S.No,Item,Annual,Monthly\n1,Rent,\"₹12,000\",1000\n,,,\n2,Audit,6000\n";
        let rows = read_csv_rows(data.as_bytes(), b',').unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0], Cell::Text("S.No".into()));
        assert_eq!(rows[1][2], Cell::Text("₹12,000".into()));
        assert!(rows[2].iter().all(Cell::is_empty));
        assert_eq!(rows[3].len(), 3);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let rows = read_csv_rows("1;Rent;12000;1000".as_bytes(), b';').unwrap();
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0][3], Cell::Text("1000".into()));
    }
}
