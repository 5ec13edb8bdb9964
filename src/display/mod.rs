//! Display formatting for terminal output
//!
//! Renders summaries, plans, apply outcomes and stored records as text.

pub mod plan;
pub mod report;
pub mod summary;

pub use plan::{format_apply_report, format_plan, format_records};
pub use report::CurrencyFormat;
pub use summary::{format_skipped, format_summary};
