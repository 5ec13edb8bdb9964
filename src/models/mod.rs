//! Core data models for budget-recon
//!
//! Values parsed from an extract (`Cell`, `BudgetLineItem`), the amounts they
//! carry (`Money`), and the shape of records held by the external budget
//! store (`PersistedBudgetRecord`, `BudgetFields`).

pub mod cell;
pub mod fiscal_year;
pub mod line_item;
pub mod money;
pub mod record;

pub use cell::{Cell, Row};
pub use fiscal_year::FiscalYear;
pub use line_item::BudgetLineItem;
pub use money::{Money, MoneyParseError};
pub use record::{BudgetFields, PersistedBudgetRecord};
