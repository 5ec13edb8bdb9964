//! YAML Export functionality
//!
//! Exports a reconciliation summary to YAML for human review.

use crate::error::{ReconError, ReconResult};
use crate::export::json::SummaryExport;
use std::io::Write;

/// Export a reconciliation summary to YAML format
pub fn export_summary_yaml<W: Write>(export: &SummaryExport, writer: &mut W) -> ReconResult<()> {
    writeln!(writer, "# Budget Reconciliation Summary")
        .map_err(|e| ReconError::Export(e.to_string()))?;
    writeln!(writer, "# Source: {}", export.source)
        .map_err(|e| ReconError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| ReconError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| ReconError::Export(e.to_string()))?;
    writeln!(writer, "#").map_err(|e| ReconError::Export(e.to_string()))?;
    writeln!(writer, "# Amounts are decimal strings in currency units.")
        .map_err(|e| ReconError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ReconError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| ReconError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML summary export
pub fn import_summary_yaml(yaml_str: &str) -> ReconResult<SummaryExport> {
    let export: SummaryExport =
        serde_yaml::from_str(yaml_str).map_err(|e| ReconError::Import(e.to_string()))?;

    export.validate().map_err(ReconError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLineItem, Money};
    use crate::services::{reconcile, Extraction};

    #[test]
    fn test_yaml_export() {
        let items = vec![BudgetLineItem::new(
            4,
            "Stationery",
            Money::from_units(1200),
            Money::from_units(150),
        )];
        let summary = reconcile(&items);
        let export = SummaryExport::new("q1.csv", &summary, &Extraction::default());

        let mut output = Vec::new();
        export_summary_yaml(&export, &mut output).unwrap();

        let yaml = String::from_utf8(output).unwrap();
        assert!(yaml.starts_with("# Budget Reconciliation Summary"));
        assert!(yaml.contains("# Source: q1.csv"));
        assert!(yaml.contains("item_name: Stationery"));
        // 1200 / 12 = 100, so the 150 monthly is 50 off
        assert!(yaml.contains("difference:"));
        assert!(yaml.contains("50.00"));
        assert!(!yaml.contains("5000"));
        assert!(yaml.contains("# Amounts are decimal strings in currency units."));

        let imported = import_summary_yaml(&yaml).unwrap();
        assert_eq!(imported.summary.mismatch_count, 1);
        assert_eq!(
            imported.summary.mismatches[0].difference,
            Money::from_units(50)
        );
    }

    #[test]
    fn test_import_invalid_yaml() {
        assert!(matches!(
            import_summary_yaml("not: [valid"),
            Err(ReconError::Import(_))
        ));
    }
}
