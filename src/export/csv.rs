//! CSV Export functionality
//!
//! Exports the mismatch list of a reconciliation and the outcomes of an
//! apply run to CSV format.

use crate::error::{ReconError, ReconResult};
use crate::models::Money;
use crate::services::{ApplyReport, ReconciliationSummary, WriteStatus};
use std::io::Write;

/// Export the mismatches of a summary to CSV
///
/// Amounts are written as plain decimals so spreadsheets read them as numbers.
pub fn export_mismatches_csv<W: Write>(
    summary: &ReconciliationSummary,
    writer: &mut W,
) -> ReconResult<()> {
    writeln!(
        writer,
        "Serial,Item,Annual,Monthly,Calculated Monthly,Difference"
    )
    .map_err(|e| ReconError::Export(e.to_string()))?;

    for mismatch in &summary.mismatches {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            mismatch.serial_number,
            escape_csv(&mismatch.item_name),
            mismatch.annual_amount,
            mismatch.monthly_amount,
            mismatch.calculated_monthly,
            mismatch.difference
        )
        .map_err(|e| ReconError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Export apply outcomes to CSV, one line per planned write
pub fn export_outcomes_csv<W: Write>(report: &ApplyReport, writer: &mut W) -> ReconResult<()> {
    writeln!(
        writer,
        "Run ID,Fiscal Year,Serial,Item,Policy,Annual,Monthly,Status,Reason"
    )
    .map_err(|e| ReconError::Export(e.to_string()))?;

    for outcome in &report.outcomes {
        let (status, reason) = match &outcome.status {
            WriteStatus::Applied => ("Applied", ""),
            WriteStatus::Failed(reason) => ("Failed", reason.as_str()),
        };

        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{}",
            report.run_id,
            escape_csv(outcome.fiscal_year.as_str()),
            outcome.write.serial_number,
            escape_csv(&outcome.write.item_name),
            outcome.write.policy,
            amount_cell(outcome.write.fields.annual_budget),
            amount_cell(outcome.write.fields.monthly_budget),
            status,
            escape_csv(reason)
        )
        .map_err(|e| ReconError::Export(e.to_string()))?;
    }

    Ok(())
}

fn amount_cell(amount: Option<Money>) -> String {
    amount.map(|m| m.to_string()).unwrap_or_default()
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
