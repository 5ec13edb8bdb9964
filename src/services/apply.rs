//! Plan application
//!
//! Executes every write of a `Plan` against a `BudgetStore`, in order, and
//! reports one outcome per write. A failed write never stops the remaining
//! ones; callers get the full list and decide what to do with partial
//! application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditEntry, AuditLogger};
use crate::models::{FiscalYear, PersistedBudgetRecord};
use crate::storage::BudgetStore;

use super::plan::{Plan, PlannedWrite};

/// Result of one store write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum WriteStatus {
    Applied,
    Failed(String),
}

/// A planned write together with what happened when it was executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOutcome {
    pub fiscal_year: FiscalYear,
    pub write: PlannedWrite,
    pub status: WriteStatus,
}

impl WriteOutcome {
    pub fn is_applied(&self) -> bool {
        self.status == WriteStatus::Applied
    }
}

/// Per-write outcomes of applying a plan
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplyReport {
    pub run_id: String,
    pub outcomes: Vec<WriteOutcome>,
}

impl ApplyReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.applied_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &WriteOutcome> {
        self.outcomes.iter().filter(|o| !o.is_applied())
    }
}

/// Apply a plan, stamping every write with `now`
///
/// Successful writes are recorded in the audit log when one is given. An
/// audit failure is logged but does not change the write's outcome, since
/// the store already holds the new values.
pub fn apply_plan<S: BudgetStore + ?Sized>(
    store: &S,
    plan: &Plan,
    now: DateTime<Utc>,
    audit: Option<&AuditLogger>,
) -> ApplyReport {
    let run_id = uuid::Uuid::new_v4().to_string();
    let mut outcomes = Vec::with_capacity(plan.writes.len());

    for write in &plan.writes {
        let status = match store.write(&plan.fiscal_year, write.serial_number, &write.fields, now)
        {
            Ok(()) => {
                if let Some(logger) = audit {
                    let entry = audit_entry(&run_id, &plan.fiscal_year, write, now);
                    if let Err(e) = logger.log(&entry) {
                        tracing::warn!(serial = write.serial_number, error = %e, "failed to audit store write");
                    }
                }
                WriteStatus::Applied
            }
            Err(e) => {
                tracing::warn!(
                    fiscal_year = %plan.fiscal_year,
                    serial = write.serial_number,
                    error = %e,
                    "store rejected planned write"
                );
                WriteStatus::Failed(e.to_string())
            }
        };

        outcomes.push(WriteOutcome {
            fiscal_year: plan.fiscal_year.clone(),
            write: write.clone(),
            status,
        });
    }

    let report = ApplyReport { run_id, outcomes };
    tracing::info!(
        run_id = %report.run_id,
        applied = report.applied_count(),
        failed = report.failed_count(),
        "applied plan"
    );
    report
}

fn audit_entry(
    run_id: &str,
    fiscal_year: &FiscalYear,
    write: &PlannedWrite,
    now: DateTime<Utc>,
) -> AuditEntry {
    let before = write.current.clone();
    let mut after = before
        .clone()
        .unwrap_or_else(|| PersistedBudgetRecord::new(fiscal_year.clone(), write.serial_number, &write.item_name));
    after.apply(&write.fields, now);

    AuditEntry::store_write(run_id, write.policy, before.as_ref(), &after, now)
}
