//! budget-recon - reconcile budget spreadsheet extracts against a budget store
//!
//! This library checks that each line item's monthly amount agrees with its
//! annual amount divided by twelve, totals the extract, and plans corrective
//! writes against the persisted budget for a fiscal year.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, cells, line items, stored records)
//! - `services`: The reconciliation pipeline (normalize, extract, reconcile, plan, apply)
//! - `import`: Extract loaders for CSV, TSV and JSON rows
//! - `storage`: The budget store seam and its JSON file implementation
//! - `audit`: Audit logging of applied store writes
//! - `display`, `export`, `cli`: Terminal output, file export and command handlers
//!
//! # Example
//!
//! ```rust
//! use budget_recon::models::{Cell, Row};
//! use budget_recon::services::BudgetReconciler;
//!
//! let rows: Vec<Row> = vec![
//!     vec!["S.No".into(), "Item".into(), "Annual".into(), "Monthly".into()],
//!     vec![Cell::Number(1.0), "Rent".into(), "₹12,000".into(), Cell::Number(1000.0)],
//!     vec![Cell::Number(2.0), "Audit".into(), Cell::Number(6000.0), Cell::Number(600.0)],
//! ];
//!
//! let run = BudgetReconciler::default().run(&rows);
//! assert_eq!(run.summary.item_count, 2);
//! assert_eq!(run.summary.mismatch_count, 1);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ReconError, ReconResult};
