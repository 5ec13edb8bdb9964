//! Reconciler
//!
//! Folds validated line items into a `ReconciliationSummary`: totals over all
//! items and the list of items whose stated monthly amount drifts from
//! annual / 12 by more than the tolerance.
//!
//! The tolerance test runs in exact integer arithmetic as
//! `|12 * monthly - annual| > 12 * tolerance`, so an item never crosses the
//! boundary because of rounding.

use serde::{Deserialize, Serialize};

use crate::models::{BudgetLineItem, Money};

/// Months in a fiscal year
pub const MONTHS_PER_YEAR: i64 = 12;

/// Largest accepted gap between the stated monthly amount and annual / 12
pub const MISMATCH_TOLERANCE: Money = Money::from_units(1);

/// A line item whose monthly amount disagrees with annual / 12
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub serial_number: u32,
    pub item_name: String,
    pub annual_amount: Money,
    pub monthly_amount: Money,
    /// annual / 12, rounded to the hundredth
    pub calculated_monthly: Money,
    /// |monthly - annual / 12|, rounded to the hundredth
    pub difference: Money,
}

/// Result of reconciling one extract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub item_count: usize,
    pub total_annual: Money,
    pub total_monthly: Money,
    pub mismatch_count: usize,
    pub mismatches: Vec<Mismatch>,
}

impl ReconciliationSummary {
    /// Whether every item is within tolerance
    pub fn is_consistent(&self) -> bool {
        self.mismatch_count == 0
    }
}

/// The monthly amount implied by an annual amount
pub fn calculated_monthly(annual: Money) -> Money {
    annual.div_round(MONTHS_PER_YEAR)
}

/// Check a single item against the tolerance, returning the finding if it fails
pub fn check_item(item: &BudgetLineItem) -> Option<Mismatch> {
    let annual = i128::from(item.annual_amount.cents());
    let monthly = i128::from(item.monthly_amount.cents());
    let months = i128::from(MONTHS_PER_YEAR);

    // Twelve times the difference, in hundredths
    let scaled_difference = (monthly * months - annual).abs();
    if scaled_difference <= i128::from(MISMATCH_TOLERANCE.cents()) * months {
        return None;
    }

    let difference = (scaled_difference + months / 2) / months;
    Some(Mismatch {
        serial_number: item.serial_number,
        item_name: item.item_name.clone(),
        annual_amount: item.annual_amount,
        monthly_amount: item.monthly_amount,
        calculated_monthly: calculated_monthly(item.annual_amount),
        difference: Money::from_cents(difference as i64),
    })
}

/// Add an item's amount to a running total, clamping instead of overflowing
///
/// Normalized amounts are bounded by `MAX_AMOUNT`, so only extracts with tens
/// of thousands of maximal rows can reach the clamp.
fn add_to_total(total: Money, amount: Money, item: &BudgetLineItem) -> Money {
    total.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!(
            serial = item.serial_number,
            "budget total exceeds the representable range, clamping"
        );
        total.saturating_add(amount)
    })
}

/// Reconcile a sequence of line items
///
/// Pure: the same input always yields the same summary.
pub fn reconcile(items: &[BudgetLineItem]) -> ReconciliationSummary {
    let summary = items
        .iter()
        .fold(ReconciliationSummary::default(), |mut summary, item| {
            summary.item_count += 1;
            summary.total_annual = add_to_total(summary.total_annual, item.annual_amount, item);
            summary.total_monthly = add_to_total(summary.total_monthly, item.monthly_amount, item);
            if let Some(mismatch) = check_item(item) {
                summary.mismatches.push(mismatch);
            }
            summary
        });

    let summary = ReconciliationSummary {
        mismatch_count: summary.mismatches.len(),
        ..summary
    };

    for mismatch in &summary.mismatches {
        tracing::info!(
            serial = mismatch.serial_number,
            item = %mismatch.item_name,
            monthly = %mismatch.monthly_amount,
            expected = %mismatch.calculated_monthly,
            difference = %mismatch.difference,
            "monthly amount disagrees with annual / 12"
        );
    }

    summary
}
