//! Check CLI command
//!
//! Reconciles an extract and prints the summary. Never touches the store.

use std::path::Path;

use crate::config::Settings;
use crate::display::{format_skipped, format_summary, CurrencyFormat};
use crate::error::{ReconError, ReconResult};
use crate::import::load_rows;
use crate::services::BudgetReconciler;

/// Handle `budget-recon check`
pub fn handle_check_command(
    settings: &Settings,
    file: &Path,
    header_rows: Option<usize>,
    json: bool,
    verbose: bool,
) -> ReconResult<()> {
    let rows = load_rows(file)?;
    let run = BudgetReconciler::from_settings(settings, header_rows).run(&rows);

    if json {
        let output = serde_json::to_string_pretty(&run.summary)
            .map_err(|e| ReconError::Export(e.to_string()))?;
        println!("{}", output);
        return Ok(());
    }

    let currency = CurrencyFormat::from_settings(settings);
    print!("{}", format_summary(&run.summary, &run.extraction, &currency));

    if verbose {
        println!();
        println!("{}", format_skipped(&run.extraction).trim_end());
    }

    Ok(())
}
