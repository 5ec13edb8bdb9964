//! Plan CLI command
//!
//! Diffs an extract against the budget store and previews, or applies, the
//! proposed corrections.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Args;

use crate::audit::AuditLogger;
use crate::config::{ReconPaths, Settings};
use crate::display::{format_apply_report, format_plan, CurrencyFormat};
use crate::error::{ReconError, ReconResult};
use crate::export::{export_outcomes_csv, export_outcomes_json};
use crate::import::load_rows;
use crate::models::FiscalYear;
use crate::services::{apply_plan, ApplyReport, BudgetReconciler, PlanOptions};
use crate::storage::open_store;

/// Arguments for `budget-recon plan`
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Extract file (.csv, .tsv or .json)
    pub file: PathBuf,

    /// Fiscal year to plan against (e.g. "FY25-26")
    #[arg(long = "fy")]
    pub fiscal_year: Option<FiscalYear>,

    /// Propose monthly-sync writes for zero monthly amounts too
    #[arg(long, overrides_with = "no_allow_zero_monthly")]
    pub allow_zero_monthly: bool,

    /// Never propose zero monthly amounts, whatever the settings say
    #[arg(long, overrides_with = "allow_zero_monthly")]
    pub no_allow_zero_monthly: bool,

    /// Disable the monthly-sync policy
    #[arg(long)]
    pub no_monthly_sync: bool,

    /// Serials eligible for annual backfill (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub backfill: Vec<u32>,

    /// Rows to skip before the data begins
    #[arg(long)]
    pub header_rows: Option<usize>,

    /// Execute the plan against the store
    #[arg(long)]
    pub apply: bool,

    /// Write apply outcomes to a .csv or .json file
    #[arg(long, requires = "apply")]
    pub report: Option<PathBuf>,
}

impl PlanArgs {
    fn plan_options(&self, settings: &Settings) -> PlanOptions {
        PlanOptions {
            monthly_sync: !self.no_monthly_sync,
            allow_zero_monthly: self.allow_zero_monthly(settings),
            backfill_serials: self.backfill.iter().copied().collect(),
        }
    }

    /// The command line wins over settings in either direction
    fn allow_zero_monthly(&self, settings: &Settings) -> bool {
        if self.allow_zero_monthly {
            true
        } else if self.no_allow_zero_monthly {
            false
        } else {
            settings.allow_zero_monthly
        }
    }
}

/// Handle `budget-recon plan`
///
/// Returns the apply report when the plan was applied, so the caller can set
/// the exit status from it.
pub fn handle_plan_command(
    paths: &ReconPaths,
    settings: &Settings,
    args: PlanArgs,
) -> ReconResult<Option<ApplyReport>> {
    let fiscal_year = settings.resolve_fiscal_year(args.fiscal_year.clone())?;
    let store = open_store(paths)?;

    let rows = load_rows(&args.file)?;
    let reconciler = BudgetReconciler::from_settings(settings, args.header_rows);
    let (run, plan) = reconciler.plan(&rows, &store, &fiscal_year, &args.plan_options(settings))?;

    let currency = CurrencyFormat::from_settings(settings);
    println!(
        "Extract: {} line items, {} skipped rows, {} mismatches",
        run.summary.item_count,
        run.extraction.skipped.len(),
        run.summary.mismatch_count
    );
    println!();
    println!("{}", format_plan(&plan, &currency));

    if !args.apply {
        if !plan.is_empty() {
            println!();
            println!("Dry run. Re-run with --apply to write these changes.");
        }
        return Ok(None);
    }

    let audit = AuditLogger::new(paths.audit_log());
    let report = apply_plan(&store, &plan, Utc::now(), Some(&audit));

    println!();
    println!("{}", format_apply_report(&report).trim_end());

    if let Some(path) = &args.report {
        write_outcomes(path, &report)?;
        println!("Outcomes written to: {}", path.display());
    }

    Ok(Some(report))
}

fn write_outcomes(path: &Path, report: &ApplyReport) -> ReconResult<()> {
    let file = File::create(path).map_err(|e| {
        ReconError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => export_outcomes_csv(report, &mut writer),
        _ => export_outcomes_json(report, &mut writer, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        plan: PlanArgs,
    }

    fn parse(args: &[&str]) -> PlanArgs {
        let argv = ["plan", "q1.csv"].into_iter().chain(args.iter().copied());
        TestCli::parse_from(argv).plan
    }

    fn settings(allow_zero_monthly: bool) -> Settings {
        Settings {
            allow_zero_monthly,
            ..Settings::default()
        }
    }

    #[test]
    fn test_zero_monthly_follows_settings_by_default() {
        let args = parse(&[]);
        assert!(!args.plan_options(&settings(false)).allow_zero_monthly);
        assert!(args.plan_options(&settings(true)).allow_zero_monthly);
    }

    #[test]
    fn test_zero_monthly_flags_override_settings() {
        assert!(parse(&["--allow-zero-monthly"])
            .plan_options(&settings(false))
            .allow_zero_monthly);
        assert!(!parse(&["--no-allow-zero-monthly"])
            .plan_options(&settings(true))
            .allow_zero_monthly);
    }

    #[test]
    fn test_last_zero_monthly_flag_wins() {
        let args = parse(&["--allow-zero-monthly", "--no-allow-zero-monthly"]);
        assert!(!args.plan_options(&settings(true)).allow_zero_monthly);

        let args = parse(&["--no-allow-zero-monthly", "--allow-zero-monthly"]);
        assert!(args.plan_options(&settings(false)).allow_zero_monthly);
    }

    #[test]
    fn test_backfill_list_and_monthly_sync() {
        let options =
            parse(&["--backfill", "3,7", "--no-monthly-sync"]).plan_options(&settings(false));
        assert!(!options.monthly_sync);
        assert!(options.backfill_serials.contains(&3));
        assert!(options.backfill_serials.contains(&7));
    }
}
