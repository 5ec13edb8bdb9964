//! Service layer for budget-recon
//!
//! The reconciliation pipeline, one module per stage:
//!
//! raw rows -> `normalize` / `extract` -> `reconcile` -> `plan` -> `apply`
//!
//! Everything up to and including `plan` is pure. Only `apply` talks to the
//! budget store.

pub mod apply;
pub mod extract;
pub mod normalize;
pub mod plan;
pub mod reconcile;
pub mod reconciler;

pub use apply::{apply_plan, ApplyReport, WriteOutcome, WriteStatus};
pub use extract::{extract_line_items, ColumnMapping, ExtractOptions, Extraction, SkipReason, SkippedRow};
pub use plan::{plan_corrections, Plan, PlanOptions, PlannedWrite, WritePolicy};
pub use reconcile::{reconcile, Mismatch, ReconciliationSummary, MISMATCH_TOLERANCE};
pub use reconciler::{BudgetReconciler, ReconciliationRun};
