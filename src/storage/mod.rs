//! Storage layer for budget-recon
//!
//! Provides the `BudgetStore` seam and a JSON file implementation with
//! atomic writes.

pub mod budget;
pub mod file_io;

pub use budget::{BudgetStore, JsonBudgetStore, RecordKey};
pub use file_io::{read_json, write_json_atomic};

use crate::config::paths::ReconPaths;
use crate::error::{ReconError, ReconResult};

/// Open the budget store under an initialized data directory
///
/// A missing data directory is a configuration problem the caller must fix
/// (`budget-recon init`) before any store command can run.
pub fn open_store(paths: &ReconPaths) -> ReconResult<JsonBudgetStore> {
    if !paths.is_initialized() {
        return Err(ReconError::Config(format!(
            "Budget store not initialized at {}. Run 'budget-recon init' first",
            paths.base_dir().display()
        )));
    }
    JsonBudgetStore::open(paths.budgets_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use tempfile::TempDir;

    #[test]
    fn test_open_store_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReconPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(matches!(open_store(&paths), Err(ReconError::Config(_))));

        Settings::default().save(&paths).unwrap();
        let store = open_store(&paths).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }
}
