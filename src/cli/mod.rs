//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod check;
pub mod export;
pub mod plan;
pub mod store;

pub use audit::handle_audit_command;
pub use check::handle_check_command;
pub use export::{handle_export_command, ExportCommands, ExportFormat};
pub use plan::{handle_plan_command, PlanArgs};
pub use store::{handle_store_command, StoreCommands};
