//! Export module for budget-recon
//!
//! Writes reconciliation results in multiple formats:
//! - CSV: mismatch lists and apply outcomes (spreadsheet-compatible)
//! - JSON: machine-readable summaries and apply outcomes
//! - YAML: human-readable summaries

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_mismatches_csv, export_outcomes_csv};
pub use self::json::{
    export_outcomes_json, export_summary_json, import_summary_json, SummaryExport,
    EXPORT_SCHEMA_VERSION,
};
pub use self::yaml::{export_summary_yaml, import_summary_yaml};
