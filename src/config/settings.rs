//! User settings for budget-recon
//!
//! Manages presentation preferences (currency symbol, digit grouping) and the
//! defaults the reconciliation pipeline runs with when no CLI flag overrides
//! them.

use serde::{Deserialize, Serialize};

use super::paths::ReconPaths;
use crate::error::ReconError;
use crate::models::FiscalYear;

/// How digits are grouped when currency amounts are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// Groups of three: 1,234,567.00
    Western,
    /// Lakh/crore grouping: 12,34,567.00
    #[default]
    Indian,
}

/// User settings for budget-recon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in reports
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Digit grouping used in reports
    #[serde(default)]
    pub digit_grouping: DigitGrouping,

    /// Rows at the top of an extract that precede the data proper
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,

    /// Whether monthly-sync proposes writes for zero monthly amounts
    #[serde(default)]
    pub allow_zero_monthly: bool,

    /// Fiscal year used when a command does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_fiscal_year: Option<FiscalYear>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_header_rows() -> usize {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            digit_grouping: DigitGrouping::default(),
            header_rows: default_header_rows(),
            allow_zero_monthly: false,
            default_fiscal_year: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &ReconPaths) -> Result<Self, ReconError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ReconError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ReconError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReconPaths) -> Result<(), ReconError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ReconError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ReconError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Pick the fiscal year from an explicit flag or the configured default
    pub fn resolve_fiscal_year(
        &self,
        explicit: Option<FiscalYear>,
    ) -> Result<FiscalYear, ReconError> {
        explicit
            .or_else(|| self.default_fiscal_year.clone())
            .ok_or_else(|| {
                ReconError::Config(
                    "No fiscal year given. Pass --fy or set default_fiscal_year in config.json"
                        .into(),
                )
            })
    }
}
