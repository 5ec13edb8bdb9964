//! Line-item extractor
//!
//! Turns the ordered rows of an extract into validated `BudgetLineItem`s.
//! Rows that fail validation are skipped and reported in `Extraction::skipped`
//! for diagnostics; they never make the extraction fail.

use serde::{Deserialize, Serialize};

use crate::models::{BudgetLineItem, Cell, Row};

use super::normalize::{normalize_amount, normalize_serial};

/// Column positions of the fields the extractor reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub serial_column: usize,
    pub name_column: usize,
    pub annual_column: usize,
    pub monthly_column: usize,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            serial_column: 0,
            name_column: 1,
            annual_column: 2,
            monthly_column: 3,
        }
    }
}

/// Extraction configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Rows before the data proper begin
    pub header_rows: usize,
    pub mapping: ColumnMapping,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            header_rows: 1,
            mapping: ColumnMapping::default(),
        }
    }
}

impl ExtractOptions {
    /// Set the number of header rows to skip
    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }

    /// Set the column mapping
    pub fn with_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.mapping = mapping;
        self
    }
}

/// Why a data row was left out of the extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Row absent or its first cell empty
    Blank,
    InvalidSerial,
    InvalidAnnual,
    InvalidMonthly,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Blank => write!(f, "blank row"),
            SkipReason::InvalidSerial => write!(f, "serial number is not a positive integer"),
            SkipReason::InvalidAnnual => write!(f, "annual amount is not a valid amount"),
            SkipReason::InvalidMonthly => write!(f, "monthly amount is not a valid amount"),
        }
    }
}

/// A data row that did not produce a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Zero-based row index in the extract (header rows included)
    pub row_number: usize,
    pub reason: SkipReason,
}

/// Output of the extractor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Valid line items in input order
    pub items: Vec<BudgetLineItem>,
    pub skipped: Vec<SkippedRow>,
}

/// Extract line items from raw rows
///
/// Order is preserved from the input. Duplicate or out-of-order serial
/// numbers are passed through unchanged.
pub fn extract_line_items(rows: &[Row], options: &ExtractOptions) -> Extraction {
    let mut extraction = Extraction::default();

    for (row_number, row) in rows.iter().enumerate().skip(options.header_rows) {
        match parse_row(row, &options.mapping) {
            Ok(item) => extraction.items.push(item.at_row(row_number)),
            Err(reason) => {
                tracing::debug!(row = row_number, %reason, "skipping extract row");
                extraction.skipped.push(SkippedRow { row_number, reason });
            }
        }
    }

    extraction
}

fn parse_row(row: &[Cell], mapping: &ColumnMapping) -> Result<BudgetLineItem, SkipReason> {
    let cell = |idx: usize| row.get(idx).unwrap_or(&Cell::Empty);

    if row.first().map_or(true, Cell::is_empty) {
        return Err(SkipReason::Blank);
    }

    let serial = normalize_serial(cell(mapping.serial_column)).ok_or(SkipReason::InvalidSerial)?;
    let annual = normalize_amount(cell(mapping.annual_column)).ok_or(SkipReason::InvalidAnnual)?;
    let monthly =
        normalize_amount(cell(mapping.monthly_column)).ok_or(SkipReason::InvalidMonthly)?;

    Ok(BudgetLineItem::new(
        serial,
        cell(mapping.name_column).as_text(),
        annual,
        monthly,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn row(cells: &[Cell]) -> Row {
        cells.to_vec()
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            row(&["S.No".into(), "Item".into(), "Annual".into(), "Monthly".into()]),
            row(&[1.0.into(), "Rent".into(), 12000.0.into(), 1000.0.into()]),
            row(&[]),
            row(&["abc".into(), "Notes".into(), 50.0.into(), 4.0.into()]),
            row(&[2.0.into(), "Audit".into(), "₹1,200".into(), "100".into()]),
            row(&[3.0.into(), "Travel".into(), "TBD".into(), 10.0.into()]),
            row(&[4.0.into(), "Misc".into(), 600.0.into(), Cell::Empty]),
        ]
    }

    #[test]
    fn test_extracts_valid_rows_in_order() {
        let extraction = extract_line_items(&sample_rows(), &ExtractOptions::default());

        assert_eq!(extraction.items.len(), 2);
        assert_eq!(extraction.items[0].serial_number, 1);
        assert_eq!(extraction.items[0].item_name, "Rent");
        assert_eq!(extraction.items[0].row_number, 1);
        assert_eq!(extraction.items[1].serial_number, 2);
        assert_eq!(extraction.items[1].annual_amount, Money::from_units(1200));
        assert_eq!(extraction.items[1].monthly_amount, Money::from_units(100));
    }

    #[test]
    fn test_reports_skipped_rows() {
        let extraction = extract_line_items(&sample_rows(), &ExtractOptions::default());

        let reasons: Vec<_> = extraction
            .skipped
            .iter()
            .map(|s| (s.row_number, s.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (2, SkipReason::Blank),
                (3, SkipReason::InvalidSerial),
                (5, SkipReason::InvalidAnnual),
                (6, SkipReason::InvalidMonthly),
            ]
        );
    }

    #[test]
    fn test_header_rows_parameter() {
        let rows = vec![
            row(&[1.0.into(), "A".into(), 12.0.into(), 1.0.into()]),
            row(&[2.0.into(), "B".into(), 24.0.into(), 2.0.into()]),
        ];

        let all = extract_line_items(&rows, &ExtractOptions::default().with_header_rows(0));
        assert_eq!(all.items.len(), 2);

        let skipped_first = extract_line_items(&rows, &ExtractOptions::default());
        assert_eq!(skipped_first.items.len(), 1);
        assert_eq!(skipped_first.items[0].serial_number, 2);

        let past_end = extract_line_items(&rows, &ExtractOptions::default().with_header_rows(5));
        assert!(past_end.items.is_empty());
        assert!(past_end.skipped.is_empty());
    }

    #[test]
    fn test_duplicates_and_order_pass_through() {
        let rows = vec![
            row(&[5.0.into(), "E".into(), 12.0.into(), 1.0.into()]),
            row(&[2.0.into(), "B".into(), 24.0.into(), 2.0.into()]),
            row(&[5.0.into(), "E again".into(), 36.0.into(), 3.0.into()]),
        ];
        let extraction = extract_line_items(&rows, &ExtractOptions::default().with_header_rows(0));
        let serials: Vec<_> = extraction.items.iter().map(|i| i.serial_number).collect();
        assert_eq!(serials, vec![5, 2, 5]);
    }

    #[test]
    fn test_custom_mapping() {
        let rows = vec![row(&[
            "x".into(),
            "Monthly first".into(),
            100.0.into(),
            1200.0.into(),
            7.0.into(),
        ])];
        let mapping = ColumnMapping {
            serial_column: 4,
            name_column: 1,
            annual_column: 3,
            monthly_column: 2,
        };
        let options = ExtractOptions::default()
            .with_header_rows(0)
            .with_mapping(mapping);

        let extraction = extract_line_items(&rows, &options);
        assert_eq!(extraction.items.len(), 1);
        assert_eq!(extraction.items[0].serial_number, 7);
        assert_eq!(extraction.items[0].annual_amount, Money::from_units(1200));
    }
}
