//! JSON Export functionality
//!
//! Exports a reconciliation summary, or the outcome of an apply run, as JSON
//! with schema versioning.

use crate::error::{ReconError, ReconResult};
use crate::services::{ApplyReport, Extraction, ReconciliationSummary, SkippedRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Reconciliation summary export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Extract the summary was computed from
    pub source: String,

    /// Totals and mismatches
    pub summary: ReconciliationSummary,

    /// Rows the extractor left out
    pub skipped_rows: Vec<SkippedRow>,
}

impl SummaryExport {
    pub fn new(
        source: impl Into<String>,
        summary: &ReconciliationSummary,
        extraction: &Extraction,
    ) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            source: source.into(),
            summary: summary.clone(),
            skipped_rows: extraction.skipped.clone(),
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.summary.mismatch_count != self.summary.mismatches.len() {
            return Err(format!(
                "Mismatch count {} does not match {} listed mismatches",
                self.summary.mismatch_count,
                self.summary.mismatches.len()
            ));
        }

        Ok(())
    }
}

/// Export a reconciliation summary to JSON
pub fn export_summary_json<W: Write>(
    export: &SummaryExport,
    writer: &mut W,
    pretty: bool,
) -> ReconResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| ReconError::Export(e.to_string()))?;

    Ok(())
}

/// Export apply outcomes to JSON
pub fn export_outcomes_json<W: Write>(
    report: &ApplyReport,
    writer: &mut W,
    pretty: bool,
) -> ReconResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, report)
    } else {
        serde_json::to_writer(writer, report)
    }
    .map_err(|e| ReconError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a summary export, checking its schema
pub fn import_summary_json(json_str: &str) -> ReconResult<SummaryExport> {
    let export: SummaryExport =
        serde_json::from_str(json_str).map_err(|e| ReconError::Import(e.to_string()))?;

    export.validate().map_err(ReconError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLineItem, Money};
    use crate::services::{reconcile, SkipReason};

    fn sample_export() -> SummaryExport {
        let items = vec![
            BudgetLineItem::new(1, "Rent", Money::from_units(12000), Money::from_units(1000)),
            BudgetLineItem::new(2, "Audit", Money::from_units(6000), Money::from_units(600)),
        ];
        let extraction = Extraction {
            items: items.clone(),
            skipped: vec![SkippedRow {
                row_number: 3,
                reason: SkipReason::InvalidAnnual,
            }],
        };
        SummaryExport::new("budget.csv", &reconcile(&items), &extraction)
    }

    #[test]
    fn test_summary_json_export() {
        let export = sample_export();
        let mut output = Vec::new();
        export_summary_json(&export, &mut output, true).unwrap();

        let json = String::from_utf8(output).unwrap();
        assert!(json.contains("\"schema_version\": \"1.0.0\""));
        assert!(json.contains("\"mismatch_count\": 1"));
        assert!(json.contains("\"invalid_annual\""));

        let imported = import_summary_json(&json).unwrap();
        assert_eq!(imported.summary, export.summary);
        assert_eq!(imported.source, "budget.csv");
    }

    #[test]
    fn test_import_rejects_wrong_schema() {
        let mut export = sample_export();
        export.schema_version = "0.1.0".into();
        let json = serde_json::to_string(&export).unwrap();

        let err = import_summary_json(&json).unwrap_err();
        assert!(err.to_string().contains("Schema version mismatch"));
    }

    #[test]
    fn test_outcomes_json_export() {
        let report = ApplyReport {
            run_id: "abc".into(),
            outcomes: Vec::new(),
        };
        let mut output = Vec::new();
        export_outcomes_json(&report, &mut output, false).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), r#"{"run_id":"abc","outcomes":[]}"#);
    }
}
