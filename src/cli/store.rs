//! Budget store CLI commands
//!
//! Lists, edits and seeds the persisted budget records.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;

use crate::config::{ReconPaths, Settings};
use crate::display::{format_records, CurrencyFormat};
use crate::error::{ReconError, ReconResult};
use crate::import::load_rows;
use crate::models::{BudgetFields, FiscalYear, Money, PersistedBudgetRecord};
use crate::services::normalize::normalize_amount_str;
use crate::services::BudgetReconciler;
use crate::storage::{open_store, BudgetStore};

/// Store subcommands
#[derive(Subcommand, Debug)]
pub enum StoreCommands {
    /// List stored records for a fiscal year
    List {
        /// Fiscal year (e.g. "FY25-26")
        #[arg(long = "fy")]
        fiscal_year: Option<FiscalYear>,
    },

    /// Update fields of a stored record, creating it with --create
    Set {
        /// Fiscal year (e.g. "FY25-26")
        #[arg(long = "fy")]
        fiscal_year: Option<FiscalYear>,

        /// Serial number of the line item
        #[arg(long)]
        serial: u32,

        /// Annual budget (e.g. "24000" or "₹24,000")
        #[arg(long)]
        annual: Option<String>,

        /// Monthly budget
        #[arg(long)]
        monthly: Option<String>,

        /// Item name (only used when creating)
        #[arg(long)]
        name: Option<String>,

        /// Create the record if it does not exist
        #[arg(long)]
        create: bool,
    },

    /// Create one record per line item of an extract
    Seed {
        /// Extract file (.csv, .tsv or .json)
        file: PathBuf,

        /// Fiscal year (e.g. "FY25-26")
        #[arg(long = "fy")]
        fiscal_year: Option<FiscalYear>,

        /// Copy the extract's amounts instead of leaving them unset
        #[arg(long)]
        with_amounts: bool,

        /// Rows to skip before the data begins
        #[arg(long)]
        header_rows: Option<usize>,
    },
}

/// Handle a store command
pub fn handle_store_command(
    paths: &ReconPaths,
    settings: &Settings,
    cmd: StoreCommands,
) -> ReconResult<()> {
    let store = open_store(paths)?;

    match cmd {
        StoreCommands::List { fiscal_year } => {
            let fiscal_year = settings.resolve_fiscal_year(fiscal_year)?;
            let records = store.read(&fiscal_year)?;
            let currency = CurrencyFormat::from_settings(settings);

            println!("Budget records for {} ({})", fiscal_year, records.len());
            println!();
            println!("{}", format_records(&records, &currency));
        }

        StoreCommands::Set {
            fiscal_year,
            serial,
            annual,
            monthly,
            name,
            create,
        } => {
            let fiscal_year = settings.resolve_fiscal_year(fiscal_year)?;
            let fields = BudgetFields {
                annual_budget: annual.as_deref().map(parse_amount).transpose()?,
                monthly_budget: monthly.as_deref().map(parse_amount).transpose()?,
            };

            let now = Utc::now();
            let existing = store.get(&fiscal_year, serial)?;
            match existing {
                Some(_) => store.write(&fiscal_year, serial, &fields, now)?,
                None if create => {
                    let mut record = PersistedBudgetRecord::new(
                        fiscal_year.clone(),
                        serial,
                        name.unwrap_or_default(),
                    );
                    record.apply(&fields, now);
                    store.upsert(record)?;
                }
                None => return Err(ReconError::record_not_found(&fiscal_year, serial)),
            }

            println!("Updated {} #{}", fiscal_year, serial);
        }

        StoreCommands::Seed {
            file,
            fiscal_year,
            with_amounts,
            header_rows,
        } => {
            let fiscal_year = settings.resolve_fiscal_year(fiscal_year)?;
            let rows = load_rows(&file)?;
            let run = BudgetReconciler::from_settings(settings, header_rows).run(&rows);

            let now = Utc::now();
            let mut created = 0;
            let mut existing = 0;
            for item in &run.extraction.items {
                if store.get(&fiscal_year, item.serial_number)?.is_some() {
                    existing += 1;
                    continue;
                }

                let mut record =
                    PersistedBudgetRecord::new(fiscal_year.clone(), item.serial_number, &item.item_name);
                if with_amounts {
                    record.apply(
                        &BudgetFields::annual_and_monthly(item.annual_amount, item.monthly_amount),
                        now,
                    );
                }
                store.upsert(record)?;
                created += 1;
            }

            println!(
                "Seeded {} records for {} ({} already present)",
                created, fiscal_year, existing
            );
        }
    }

    Ok(())
}

/// Parse an amount typed on the command line, accepting the same formats as
/// extract cells
fn parse_amount(raw: &str) -> ReconResult<Money> {
    normalize_amount_str(raw).ok_or_else(|| {
        ReconError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '1200' or '1,200.50'",
            raw
        ))
    })
}
