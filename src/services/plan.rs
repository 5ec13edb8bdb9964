//! Diff-against-store planner
//!
//! Compares extracted line items with the records currently held by the
//! budget store and proposes corrective writes. The planner never touches
//! the store; `services::apply` executes a plan.
//!
//! Two policies feed the plan:
//!
//! - **Monthly-sync** proposes setting the stored monthly budget to the
//!   extract's monthly amount for every item (zero amounts only when
//!   `allow_zero_monthly` is set; negative amounts never).
//! - **Annual-backfill** is limited to an explicit allow-list of serials whose
//!   stored annual budget is zero or missing. For those it proposes the
//!   extract's annual amount together with annual / 12 as the monthly budget,
//!   provided the extracted annual amount is strictly positive.
//!
//! A plan holds at most one write per serial. A backfill write already sets
//! the monthly budget, so it replaces the monthly-sync write for that serial.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{BudgetFields, BudgetLineItem, FiscalYear, PersistedBudgetRecord};

use super::reconcile::calculated_monthly;

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanOptions {
    /// Run the monthly-sync policy
    pub monthly_sync: bool,
    /// Propose monthly-sync writes for zero monthly amounts too
    pub allow_zero_monthly: bool,
    /// Serials eligible for annual-backfill
    pub backfill_serials: BTreeSet<u32>,
}

impl PlanOptions {
    /// Monthly-sync only, with zero monthly amounts excluded
    pub fn monthly_sync() -> Self {
        Self {
            monthly_sync: true,
            ..Self::default()
        }
    }

    pub fn with_allow_zero_monthly(mut self, allow: bool) -> Self {
        self.allow_zero_monthly = allow;
        self
    }

    pub fn with_backfill<I: IntoIterator<Item = u32>>(mut self, serials: I) -> Self {
        self.backfill_serials.extend(serials);
        self
    }
}

/// Which policy proposed a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    MonthlySync,
    AnnualBackfill,
}

impl std::fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WritePolicy::MonthlySync => write!(f, "monthly-sync"),
            WritePolicy::AnnualBackfill => write!(f, "annual-backfill"),
        }
    }
}

/// A proposed, not yet applied, write against the budget store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedWrite {
    pub serial_number: u32,
    pub item_name: String,
    pub policy: WritePolicy,
    pub fields: BudgetFields,
    /// The stored record the write was planned against, if one existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<PersistedBudgetRecord>,
}

/// An ordered sequence of proposed writes for one fiscal year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub fiscal_year: FiscalYear,
    pub writes: Vec<PlannedWrite>,
    /// Serials that appeared more than once in the extract; only the first
    /// occurrence is planned
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_duplicates: Vec<u32>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }
}

/// Build a plan from line items and the stored records for `fiscal_year`
///
/// Writes follow the order of the line items.
pub fn plan_corrections(
    fiscal_year: &FiscalYear,
    items: &[BudgetLineItem],
    stored: &[PersistedBudgetRecord],
    options: &PlanOptions,
) -> Plan {
    let by_serial: HashMap<u32, &PersistedBudgetRecord> = stored
        .iter()
        .filter(|r| &r.fiscal_year == fiscal_year)
        .map(|r| (r.serial_number, r))
        .collect();

    let mut seen = HashSet::new();
    let mut plan = Plan {
        fiscal_year: fiscal_year.clone(),
        writes: Vec::new(),
        skipped_duplicates: Vec::new(),
    };

    for item in items {
        if !seen.insert(item.serial_number) {
            tracing::warn!(
                serial = item.serial_number,
                row = item.row_number,
                "duplicate serial in extract, keeping first occurrence"
            );
            if !plan.skipped_duplicates.contains(&item.serial_number) {
                plan.skipped_duplicates.push(item.serial_number);
            }
            continue;
        }

        let current = by_serial.get(&item.serial_number).copied();
        let proposal = backfill_write(item, current, options)
            .or_else(|| monthly_sync_write(item, options));

        if let Some((policy, fields)) = proposal {
            plan.writes.push(PlannedWrite {
                serial_number: item.serial_number,
                item_name: item.item_name.clone(),
                policy,
                fields,
                current: current.cloned(),
            });
        }
    }

    tracing::debug!(
        fiscal_year = %fiscal_year,
        writes = plan.writes.len(),
        "planned store corrections"
    );
    plan
}

fn backfill_write(
    item: &BudgetLineItem,
    current: Option<&PersistedBudgetRecord>,
    options: &PlanOptions,
) -> Option<(WritePolicy, BudgetFields)> {
    if !options.backfill_serials.contains(&item.serial_number) {
        return None;
    }
    if !current.map_or(true, PersistedBudgetRecord::annual_missing) {
        return None;
    }
    if !item.annual_amount.is_positive() {
        return None;
    }

    Some((
        WritePolicy::AnnualBackfill,
        BudgetFields::annual_and_monthly(item.annual_amount, calculated_monthly(item.annual_amount)),
    ))
}

fn monthly_sync_write(
    item: &BudgetLineItem,
    options: &PlanOptions,
) -> Option<(WritePolicy, BudgetFields)> {
    if !options.monthly_sync {
        return None;
    }

    let monthly = item.monthly_amount;
    let eligible = if options.allow_zero_monthly {
        !monthly.is_negative()
    } else {
        monthly.is_positive()
    };

    eligible.then(|| (WritePolicy::MonthlySync, BudgetFields::monthly(monthly)))
}
