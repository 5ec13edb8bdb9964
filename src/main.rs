use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use budget_recon::cli::{
    handle_audit_command, handle_check_command, handle_export_command, handle_plan_command,
    handle_store_command, ExportCommands, PlanArgs, StoreCommands,
};
use budget_recon::config::{ReconPaths, Settings};

const LOG_FILTER_ENV: &str = "BUDGET_RECON_LOG";
const LOG_JSON_ENV: &str = "BUDGET_RECON_LOG_JSON";

#[derive(Parser)]
#[command(
    name = "budget-recon",
    version,
    about = "Reconcile budget spreadsheet extracts against a fiscal-year budget store",
    long_about = "budget-recon checks that every line item's monthly amount matches its \
                  annual amount divided by twelve, totals the extract, and plans (or \
                  applies) corrective writes against the stored budget for a fiscal year."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Reconcile an extract and print the summary
    Check {
        /// Extract file (.csv, .tsv or .json)
        file: PathBuf,

        /// Rows to skip before the data begins
        #[arg(long)]
        header_rows: Option<usize>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Also list skipped rows
        #[arg(short, long)]
        verbose: bool,
    },

    /// Plan corrections against the budget store, optionally applying them
    Plan(PlanArgs),

    /// Budget store commands
    #[command(subcommand)]
    Store(StoreCommands),

    /// Export commands
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent store writes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,

        /// Print raw JSON entries
        #[arg(long)]
        json: bool,
    },
}

fn env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    if env_bool(LOG_JSON_ENV) {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    // Initialize paths and settings
    let paths = ReconPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing budget-recon at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Settings written to: {}", paths.settings_file().display());
            println!("Run 'budget-recon store seed <FILE> --fy <FY>' to create budget records.");
        }
        Some(Commands::Config) => {
            println!("budget-recon Configuration");
            println!("==========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Budget store:    {}", paths.budgets_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Initialized:     {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Digit grouping:     {:?}", settings.digit_grouping);
            println!("  Header rows:        {}", settings.header_rows);
            println!("  Allow zero monthly: {}", settings.allow_zero_monthly);
            match &settings.default_fiscal_year {
                Some(fy) => println!("  Default fiscal year: {}", fy),
                None => println!("  Default fiscal year: (none)"),
            }
        }
        Some(Commands::Check {
            file,
            header_rows,
            json,
            verbose,
        }) => {
            handle_check_command(&settings, &file, header_rows, json, verbose)?;
        }
        Some(Commands::Plan(args)) => {
            if let Some(report) = handle_plan_command(&paths, &settings, args)? {
                if report.failed_count() > 0 {
                    return Ok(ExitCode::from(2));
                }
            }
        }
        Some(Commands::Store(cmd)) => {
            handle_store_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&settings, cmd)?;
        }
        Some(Commands::Audit { count, json }) => {
            handle_audit_command(&paths, count, json)?;
        }
        None => {
            println!("budget-recon - budget extract reconciliation");
            println!();
            println!("Run 'budget-recon --help' for usage information.");
        }
    }

    Ok(ExitCode::SUCCESS)
}
