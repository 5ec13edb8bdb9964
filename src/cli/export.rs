//! CLI commands for data export
//!
//! Provides commands for exporting reconciliation results in various formats.

use crate::config::Settings;
use crate::error::{ReconError, ReconResult};
use crate::export::{csv, json, yaml, SummaryExport};
use crate::import::load_rows;
use crate::services::BudgetReconciler;
use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (mismatches only)
    Csv,
    /// JSON format (full summary)
    Json,
    /// YAML format (full summary, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Reconcile an extract and export the summary
    Summary {
        /// Extract file (.csv, .tsv or .json)
        file: PathBuf,

        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Rows to skip before the data begins
        #[arg(long)]
        header_rows: Option<usize>,
    },
}

/// Handle export commands
pub fn handle_export_command(settings: &Settings, cmd: ExportCommands) -> ReconResult<()> {
    match cmd {
        ExportCommands::Summary {
            file,
            output,
            format,
            pretty,
            header_rows,
        } => {
            let rows = load_rows(&file)?;
            let run = BudgetReconciler::from_settings(settings, header_rows).run(&rows);
            let export =
                SummaryExport::new(file.display().to_string(), &run.summary, &run.extraction);

            let out = File::create(&output).map_err(|e| {
                ReconError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(out);

            match format {
                ExportFormat::Csv => {
                    csv::export_mismatches_csv(&run.summary, &mut writer)?;
                    println!(
                        "{} mismatches exported to: {}",
                        run.summary.mismatch_count,
                        output.display()
                    );
                    println!("Note: CSV format exports mismatches only. Use JSON or YAML for the full summary.");
                }
                ExportFormat::Json => {
                    json::export_summary_json(&export, &mut writer, pretty)?;
                    println!("Summary exported to: {}", output.display());
                }
                ExportFormat::Yaml => {
                    yaml::export_summary_yaml(&export, &mut writer)?;
                    println!("Summary exported to: {}", output.display());
                }
            }

            writer
                .flush()
                .map_err(|e| ReconError::Export(e.to_string()))?;
            Ok(())
        }
    }
}
