//! BudgetReconciler: the extract -> reconcile -> plan pipeline
//!
//! Wires the stages together for callers that start from raw rows. Each stage
//! stays usable on its own through its module.

use crate::config::Settings;
use crate::error::ReconResult;
use crate::models::{FiscalYear, Row};
use crate::storage::BudgetStore;

use super::extract::{extract_line_items, ExtractOptions, Extraction};
use super::plan::{plan_corrections, Plan, PlanOptions};
use super::reconcile::{reconcile, ReconciliationSummary};

/// Output of extracting and reconciling one extract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationRun {
    pub extraction: Extraction,
    pub summary: ReconciliationSummary,
}

/// Runs the reconciliation pipeline over raw extract rows
#[derive(Debug, Clone, Default)]
pub struct BudgetReconciler {
    options: ExtractOptions,
}

impl BudgetReconciler {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Build a reconciler from settings, with an optional header-row override
    pub fn from_settings(settings: &Settings, header_rows: Option<usize>) -> Self {
        Self::new(
            ExtractOptions::default().with_header_rows(header_rows.unwrap_or(settings.header_rows)),
        )
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract line items and reconcile them
    pub fn run(&self, rows: &[Row]) -> ReconciliationRun {
        let extraction = extract_line_items(rows, &self.options);
        let summary = reconcile(&extraction.items);

        tracing::debug!(
            items = extraction.items.len(),
            skipped = extraction.skipped.len(),
            mismatches = summary.mismatch_count,
            "reconciled extract"
        );

        ReconciliationRun {
            extraction,
            summary,
        }
    }

    /// Extract line items and plan corrections against the store's current state
    pub fn plan<S: BudgetStore + ?Sized>(
        &self,
        rows: &[Row],
        store: &S,
        fiscal_year: &FiscalYear,
        plan_options: &PlanOptions,
    ) -> ReconResult<(ReconciliationRun, Plan)> {
        let run = self.run(rows);
        let stored = store.read(fiscal_year)?;
        let plan = plan_corrections(fiscal_year, &run.extraction.items, &stored, plan_options);
        Ok((run, plan))
    }
}
