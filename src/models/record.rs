//! Persisted budget records and the fields a write may set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FiscalYear, Money};

/// A budget row as held by the budget store, keyed by `(fiscal_year, serial_number)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedBudgetRecord {
    pub fiscal_year: FiscalYear,
    pub serial_number: u32,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub item_name: String,

    /// Stored annual budget; `None` when the column was never filled
    #[serde(default)]
    pub annual_budget: Option<Money>,

    /// Stored monthly budget
    #[serde(default)]
    pub monthly_budget: Option<Money>,

    /// Last-write timestamp, set on every mutation
    pub updated_at: DateTime<Utc>,
}

impl PersistedBudgetRecord {
    pub fn new(fiscal_year: FiscalYear, serial_number: u32, item_name: impl Into<String>) -> Self {
        Self {
            fiscal_year,
            serial_number,
            item_name: item_name.into(),
            annual_budget: None,
            monthly_budget: None,
            updated_at: Utc::now(),
        }
    }

    /// Whether the stored annual budget is zero or was never set
    pub fn annual_missing(&self) -> bool {
        self.annual_budget.map_or(true, |m| m.is_zero())
    }

    /// Apply a set of fields, stamping `updated_at`
    pub fn apply(&mut self, fields: &BudgetFields, updated_at: DateTime<Utc>) {
        if let Some(annual) = fields.annual_budget {
            self.annual_budget = Some(annual);
        }
        if let Some(monthly) = fields.monthly_budget {
            self.monthly_budget = Some(monthly);
        }
        self.updated_at = updated_at;
    }
}

/// Fields a single store write sets; `None` leaves the stored value alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_budget: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<Money>,
}

impl BudgetFields {
    pub fn monthly(monthly: Money) -> Self {
        Self {
            annual_budget: None,
            monthly_budget: Some(monthly),
        }
    }

    pub fn annual_and_monthly(annual: Money, monthly: Money) -> Self {
        Self {
            annual_budget: Some(annual),
            monthly_budget: Some(monthly),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.annual_budget.is_none() && self.monthly_budget.is_none()
    }
}
