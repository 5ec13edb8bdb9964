//! Fiscal year key
//!
//! Budget records are scoped by a free-form fiscal year label such as
//! `FY25-26`. The label is trimmed and must be non-empty; no calendar meaning
//! is attached to it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReconError;

/// The budgeting period key records are stored under
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiscalYear(String);

impl FiscalYear {
    /// Create a fiscal year from a label, trimming surrounding whitespace
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FiscalYear {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ReconError::Validation(
                "Fiscal year label cannot be empty".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let fy: FiscalYear = "  FY25-26 ".parse().unwrap();
        assert_eq!(fy.as_str(), "FY25-26");
        assert_eq!(fy.to_string(), "FY25-26");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!("   ".parse::<FiscalYear>().is_err());
    }
}
