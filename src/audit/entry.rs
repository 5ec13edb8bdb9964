//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FiscalYear, Money, PersistedBudgetRecord};
use crate::services::plan::WritePolicy;

/// One applied store write
///
/// Records which run and policy produced the write and the record before and
/// after it, so a reviewer can trace every change back to an extract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the write was stamped (UTC)
    pub timestamp: DateTime<Utc>,

    /// Identifier shared by all writes of one plan application
    pub run_id: String,

    pub fiscal_year: FiscalYear,
    pub serial_number: u32,
    pub policy: WritePolicy,

    /// Stored record before the write; absent when the plan saw no record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable change summary, e.g. `monthly_budget: 0.00 -> 100.00`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Create an entry for a write applied to the budget store
    pub fn store_write(
        run_id: impl Into<String>,
        policy: WritePolicy,
        before: Option<&PersistedBudgetRecord>,
        after: &PersistedBudgetRecord,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            run_id: run_id.into(),
            fiscal_year: after.fiscal_year.clone(),
            serial_number: after.serial_number,
            policy,
            before: before.and_then(|b| serde_json::to_value(b).ok()),
            after: serde_json::to_value(after).ok(),
            diff_summary: diff_summary(before, after),
        }
    }

    /// Format the entry as a single human-readable line
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "{} [{}] {} #{} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            short_run_id(&self.run_id),
            self.fiscal_year,
            self.serial_number,
            self.policy,
        );
        if let Some(diff) = &self.diff_summary {
            line.push_str(": ");
            line.push_str(diff);
        }
        line
    }
}

fn short_run_id(run_id: &str) -> &str {
    run_id.get(..8).unwrap_or(run_id)
}

fn diff_summary(
    before: Option<&PersistedBudgetRecord>,
    after: &PersistedBudgetRecord,
) -> Option<String> {
    let changes: Vec<String> = [
        (
            "annual_budget",
            before.and_then(|b| b.annual_budget),
            after.annual_budget,
        ),
        (
            "monthly_budget",
            before.and_then(|b| b.monthly_budget),
            after.monthly_budget,
        ),
    ]
    .into_iter()
    .filter(|(_, old, new)| old != new)
    .map(|(field, old, new)| format!("{}: {} -> {}", field, show(old), show(new)))
    .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn show(value: Option<Money>) -> String {
    value.map_or_else(|| "(none)".to_string(), |m| m.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(annual: Option<i64>, monthly: Option<i64>) -> PersistedBudgetRecord {
        let mut r = PersistedBudgetRecord::new(FiscalYear::new("FY25-26"), 7, "Electricity");
        r.annual_budget = annual.map(Money::from_units);
        r.monthly_budget = monthly.map(Money::from_units);
        r
    }

    #[test]
    fn test_diff_summary_lists_changed_fields() {
        let before = record(Some(0), None);
        let after = record(Some(24000), Some(2000));
        let entry = AuditEntry::store_write(
            "0123456789abcdef",
            WritePolicy::AnnualBackfill,
            Some(&before),
            &after,
            Utc::now(),
        );

        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("annual_budget: 0.00 -> 24000.00, monthly_budget: (none) -> 2000.00")
        );
        assert!(entry.before.is_some());
    }

    #[test]
    fn test_unchanged_write_has_no_diff() {
        let r = record(Some(1200), Some(100));
        let entry =
            AuditEntry::store_write("run", WritePolicy::MonthlySync, Some(&r), &r, Utc::now());
        assert!(entry.diff_summary.is_none());
    }

    #[test]
    fn test_human_readable() {
        let stamp = Utc.with_ymd_and_hms(2025, 4, 1, 9, 30, 0).unwrap();
        let after = record(None, Some(100));
        let entry = AuditEntry::store_write(
            "0123456789abcdef",
            WritePolicy::MonthlySync,
            None,
            &after,
            stamp,
        );

        assert_eq!(
            entry.format_human_readable(),
            "2025-04-01 09:30:00 UTC [01234567] FY25-26 #7 (monthly-sync): monthly_budget: (none) -> 100.00"
        );
    }
}
