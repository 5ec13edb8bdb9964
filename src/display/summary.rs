//! Reconciliation summary display

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::services::reconcile::calculated_monthly;
use crate::services::{Extraction, ReconciliationSummary, MISMATCH_TOLERANCE};

use super::report::{double_separator, format_header, truncate, CurrencyFormat};

const REPORT_WIDTH: usize = 60;

#[derive(Tabled)]
struct MismatchRow {
    #[tabled(rename = "S.No")]
    serial: u32,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Annual")]
    annual: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Annual / 12")]
    calculated: String,
    #[tabled(rename = "Difference")]
    difference: String,
}

/// Format a reconciliation summary as a text report
pub fn format_summary(
    summary: &ReconciliationSummary,
    extraction: &Extraction,
    currency: &CurrencyFormat,
) -> String {
    let mut output = String::new();

    output.push_str(&format_header("Budget Reconciliation", REPORT_WIDTH));
    output.push('\n');
    output.push_str(&double_separator(REPORT_WIDTH));
    output.push('\n');

    output.push_str(&format!("Line items:      {}\n", summary.item_count));
    output.push_str(&format!("Skipped rows:    {}\n", extraction.skipped.len()));
    output.push_str(&format!(
        "Total annual:    {}\n",
        currency.format(summary.total_annual)
    ));
    output.push_str(&format!(
        "Total monthly:   {}\n",
        currency.format(summary.total_monthly)
    ));
    output.push_str(&format!(
        "Annual / 12:     {}\n",
        currency.format(calculated_monthly(summary.total_annual))
    ));
    output.push_str(&format!("Mismatches:      {}\n", summary.mismatch_count));
    output.push('\n');

    if summary.mismatches.is_empty() {
        output.push_str(&format!(
            "All monthly amounts are within {} of annual / 12.\n",
            currency.format(MISMATCH_TOLERANCE)
        ));
        return output;
    }

    let rows = summary.mismatches.iter().map(|m| MismatchRow {
        serial: m.serial_number,
        item: truncate(&m.item_name, 32),
        annual: currency.format(m.annual_amount),
        monthly: currency.format(m.monthly_amount),
        calculated: currency.format(m.calculated_monthly),
        difference: currency.format(m.difference),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(2..), Alignment::right());

    output.push_str(&table.to_string());
    output.push('\n');
    output
}

/// Format the rows the extractor skipped
pub fn format_skipped(extraction: &Extraction) -> String {
    if extraction.skipped.is_empty() {
        return "No rows skipped.".to_string();
    }

    let mut output = String::from("Skipped rows:\n");
    for skipped in &extraction.skipped {
        // Row numbers are shown one-based, as spreadsheets number them
        output.push_str(&format!(
            "  row {:>4}: {}\n",
            skipped.row_number + 1,
            skipped.reason
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DigitGrouping;
    use crate::models::{BudgetLineItem, Money};
    use crate::services::{reconcile, SkipReason, SkippedRow};

    fn currency() -> CurrencyFormat {
        CurrencyFormat::new("₹", DigitGrouping::Indian)
    }

    #[test]
    fn test_consistent_summary() {
        let items = vec![BudgetLineItem::new(
            1,
            "Rent",
            Money::from_units(120000),
            Money::from_units(10000),
        )];
        let summary = reconcile(&items);
        let output = format_summary(&summary, &Extraction::default(), &currency());

        assert!(output.contains("Total annual:    ₹1,20,000.00"));
        assert!(output.contains("Mismatches:      0"));
        assert!(output.contains("within ₹1.00"));
    }

    #[test]
    fn test_mismatch_table() {
        let items = vec![BudgetLineItem::new(
            2,
            "Audit fees",
            Money::from_units(6000),
            Money::from_units(600),
        )];
        let summary = reconcile(&items);
        let output = format_summary(&summary, &Extraction::default(), &currency());

        assert!(output.contains("Audit fees"));
        assert!(output.contains("₹500.00"));
        assert!(output.contains("₹100.00"));
        assert!(output.contains("Annual / 12"));
    }

    #[test]
    fn test_format_skipped() {
        let extraction = Extraction {
            items: Vec::new(),
            skipped: vec![SkippedRow {
                row_number: 4,
                reason: SkipReason::InvalidSerial,
            }],
        };
        let output = format_skipped(&extraction);
        assert!(output.contains("row    5: serial number is not a positive integer"));
        assert_eq!(format_skipped(&Extraction::default()), "No rows skipped.");
    }
}
