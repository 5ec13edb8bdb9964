//! Plan preview and apply-outcome display

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Money, PersistedBudgetRecord};
use crate::services::{ApplyReport, Plan, WriteStatus};

use super::report::{truncate, CurrencyFormat};

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "S.No")]
    serial: u32,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Policy")]
    policy: String,
    #[tabled(rename = "Annual")]
    annual: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "S.No")]
    serial: u32,
    #[tabled(rename = "Policy")]
    policy: String,
    #[tabled(rename = "Result")]
    result: String,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "S.No")]
    serial: u32,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Annual")]
    annual: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

/// Render a proposed field change as `old -> new`, or just the stored value
fn change(current: Option<Money>, proposed: Option<Money>, currency: &CurrencyFormat) -> String {
    match proposed {
        Some(new) => format!("{} -> {}", currency.format_opt(current), currency.format(new)),
        None => currency.format_opt(current),
    }
}

/// Format a plan preview
pub fn format_plan(plan: &Plan, currency: &CurrencyFormat) -> String {
    if plan.is_empty() {
        return format!("No corrections proposed for {}.", plan.fiscal_year);
    }

    let rows = plan.writes.iter().map(|w| {
        let current_annual = w.current.as_ref().and_then(|c| c.annual_budget);
        let current_monthly = w.current.as_ref().and_then(|c| c.monthly_budget);
        PlanRow {
            serial: w.serial_number,
            item: truncate(&w.item_name, 28),
            policy: w.policy.to_string(),
            annual: change(current_annual, w.fields.annual_budget, currency),
            monthly: change(current_monthly, w.fields.monthly_budget, currency),
        }
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(3..), Alignment::right());

    let mut output = format!(
        "Proposed corrections for {} ({} writes)\n\n{}\n",
        plan.fiscal_year,
        plan.len(),
        table
    );
    if !plan.skipped_duplicates.is_empty() {
        let serials: Vec<String> = plan.skipped_duplicates.iter().map(u32::to_string).collect();
        output.push_str(&format!(
            "\nDuplicate serials (first occurrence planned): {}\n",
            serials.join(", ")
        ));
    }
    output
}

/// Format the outcome of applying a plan, failures included
pub fn format_apply_report(report: &ApplyReport) -> String {
    if report.outcomes.is_empty() {
        return "Nothing to apply.".to_string();
    }

    let rows = report.outcomes.iter().map(|o| OutcomeRow {
        serial: o.write.serial_number,
        policy: o.write.policy.to_string(),
        result: match &o.status {
            WriteStatus::Applied => "applied".to_string(),
            WriteStatus::Failed(reason) => format!("FAILED: {}", reason),
        },
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!(
        "{}\n\nApplied {} of {} writes ({} failed).\n",
        table,
        report.applied_count(),
        report.outcomes.len(),
        report.failed_count()
    )
}

/// Format stored records as a table
pub fn format_records(records: &[PersistedBudgetRecord], currency: &CurrencyFormat) -> String {
    if records.is_empty() {
        return "No budget records found.".to_string();
    }

    let rows = records.iter().map(|r| RecordRow {
        serial: r.serial_number,
        item: truncate(&r.item_name, 32),
        annual: currency.format_opt(r.annual_budget),
        monthly: currency.format_opt(r.monthly_budget),
        updated: r.updated_at.format("%Y-%m-%d %H:%M").to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(2..4), Alignment::right());
    table.to_string()
}
