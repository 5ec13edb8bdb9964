//! Budget line items parsed from an extract

use serde::{Deserialize, Serialize};

use super::Money;

/// One validated row of a budget extract
///
/// Constructed fresh on every run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLineItem {
    /// Per-item identifier within one fiscal year's extract
    pub serial_number: u32,
    /// Free-text label, not validated
    pub item_name: String,
    /// Fiscal-year total
    pub annual_amount: Money,
    /// Stated monthly amount, expected to be about annual / 12
    pub monthly_amount: Money,
    /// Zero-based position of the row in the extract it came from
    pub row_number: usize,
}

impl BudgetLineItem {
    pub fn new(
        serial_number: u32,
        item_name: impl Into<String>,
        annual_amount: Money,
        monthly_amount: Money,
    ) -> Self {
        Self {
            serial_number,
            item_name: item_name.into(),
            annual_amount,
            monthly_amount,
            row_number: 0,
        }
    }

    /// Set the source row number
    pub fn at_row(mut self, row_number: usize) -> Self {
        self.row_number = row_number;
        self
    }
}
