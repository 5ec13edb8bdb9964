//! Audit logging for applied store writes
//!
//! Every write a plan application commits to the budget store is appended to
//! `audit.log` as one JSON line carrying the run id, policy, and the record
//! before and after the write.
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_recon::audit::AuditLogger;
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let report = apply_plan(&store, &plan, Utc::now(), Some(&logger));
//! for entry in logger.read_recent(10)? {
//!     println!("{}", entry.format_human_readable());
//! }
//! ```

mod entry;
mod logger;

pub use entry::AuditEntry;
pub use logger::AuditLogger;
