//! Budget record store
//!
//! `BudgetStore` is the seam between the reconciliation pipeline and whatever
//! holds the authoritative budget table. `JsonBudgetStore` is the file-backed
//! implementation the CLI uses: records live in `budgets.json`, keyed by
//! `(fiscal_year, serial_number)`, and every write is persisted atomically.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::error::{ReconError, ReconResult};
use crate::models::{BudgetFields, FiscalYear, PersistedBudgetRecord};

use super::file_io::{read_json, write_json_atomic};

/// Read and write access to persisted budget records
pub trait BudgetStore {
    /// All records for a fiscal year, ordered by serial number
    fn read(&self, fiscal_year: &FiscalYear) -> ReconResult<Vec<PersistedBudgetRecord>>;

    /// Update one record, stamping `updated_at`
    ///
    /// Fails when no record exists for the key.
    fn write(
        &self,
        fiscal_year: &FiscalYear,
        serial_number: u32,
        fields: &BudgetFields,
        updated_at: DateTime<Utc>,
    ) -> ReconResult<()>;
}

/// Serializable file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    records: Vec<PersistedBudgetRecord>,
}

/// Composite key for budget records
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub fiscal_year: FiscalYear,
    pub serial_number: u32,
}

impl RecordKey {
    pub fn new(fiscal_year: FiscalYear, serial_number: u32) -> Self {
        Self {
            fiscal_year,
            serial_number,
        }
    }
}

/// Budget store backed by a JSON file
pub struct JsonBudgetStore {
    path: PathBuf,
    records: RwLock<HashMap<RecordKey, PersistedBudgetRecord>>,
}

impl JsonBudgetStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store and load its file
    pub fn open(path: PathBuf) -> ReconResult<Self> {
        let store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Load records from disk
    pub fn load(&self) -> ReconResult<()> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut records = self
            .records
            .write()
            .map_err(|e| ReconError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        records.clear();
        for record in file_data.records {
            let key = RecordKey::new(record.fiscal_year.clone(), record.serial_number);
            records.insert(key, record);
        }

        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> ReconResult<()> {
        let records = self
            .records
            .read()
            .map_err(|e| ReconError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = records.values().cloned().collect();
        list.sort_by(|a, b| {
            a.fiscal_year
                .cmp(&b.fiscal_year)
                .then(a.serial_number.cmp(&b.serial_number))
        });

        write_json_atomic(&self.path, &BudgetData { records: list })
    }

    /// Get one record
    pub fn get(
        &self,
        fiscal_year: &FiscalYear,
        serial_number: u32,
    ) -> ReconResult<Option<PersistedBudgetRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| ReconError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let key = RecordKey::new(fiscal_year.clone(), serial_number);
        Ok(records.get(&key).cloned())
    }

    /// Insert or replace a record and persist
    pub fn upsert(&self, record: PersistedBudgetRecord) -> ReconResult<()> {
        {
            let mut records = self
                .records
                .write()
                .map_err(|e| ReconError::Storage(format!("Failed to acquire write lock: {}", e)))?;

            let key = RecordKey::new(record.fiscal_year.clone(), record.serial_number);
            records.insert(key, record);
        }
        self.save()
    }

    /// Count records across all fiscal years
    pub fn count(&self) -> ReconResult<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| ReconError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(records.len())
    }
}

impl BudgetStore for JsonBudgetStore {
    fn read(&self, fiscal_year: &FiscalYear) -> ReconResult<Vec<PersistedBudgetRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| ReconError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = records
            .values()
            .filter(|r| &r.fiscal_year == fiscal_year)
            .cloned()
            .collect();
        list.sort_by_key(|r| r.serial_number);
        Ok(list)
    }

    fn write(
        &self,
        fiscal_year: &FiscalYear,
        serial_number: u32,
        fields: &BudgetFields,
        updated_at: DateTime<Utc>,
    ) -> ReconResult<()> {
        if fields.is_empty() {
            return Err(ReconError::Validation(format!(
                "Write to {} #{} sets no fields",
                fiscal_year, serial_number
            )));
        }

        let previous = {
            let mut records = self
                .records
                .write()
                .map_err(|e| ReconError::Storage(format!("Failed to acquire write lock: {}", e)))?;

            let key = RecordKey::new(fiscal_year.clone(), serial_number);
            let record = records
                .get_mut(&key)
                .ok_or_else(|| ReconError::record_not_found(fiscal_year, serial_number))?;

            let previous = record.clone();
            record.apply(fields, updated_at);
            previous
        };

        // Roll the in-memory change back if it could not be persisted
        if let Err(e) = self.save() {
            if let Ok(mut records) = self.records.write() {
                records.insert(RecordKey::new(fiscal_year.clone(), serial_number), previous);
            }
            return Err(e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonBudgetStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonBudgetStore::open(temp_dir.path().join("budgets.json")).unwrap();
        (temp_dir, store)
    }

    fn fy() -> FiscalYear {
        FiscalYear::new("FY25-26")
    }

    fn seed(store: &JsonBudgetStore, serial: u32, annual: Option<i64>) {
        let mut record = PersistedBudgetRecord::new(fy(), serial, format!("Item {}", serial));
        record.annual_budget = annual.map(Money::from_units);
        store.upsert(record).unwrap();
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, store) = create_test_store();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.read(&fy()).unwrap().is_empty());
    }

    #[test]
    fn test_read_filters_by_year_and_sorts() {
        let (_temp_dir, store) = create_test_store();
        seed(&store, 3, None);
        seed(&store, 1, None);
        store
            .upsert(PersistedBudgetRecord::new(FiscalYear::new("FY24-25"), 2, "Old"))
            .unwrap();

        let serials: Vec<_> = store.read(&fy()).unwrap().iter().map(|r| r.serial_number).collect();
        assert_eq!(serials, vec![1, 3]);
    }

    #[test]
    fn test_write_updates_and_stamps() {
        let (temp_dir, store) = create_test_store();
        seed(&store, 1, Some(0));
        let stamp = Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap();

        store
            .write(
                &fy(),
                1,
                &BudgetFields::annual_and_monthly(Money::from_units(24000), Money::from_units(2000)),
                stamp,
            )
            .unwrap();

        // Reload from disk to check persistence
        let reloaded = JsonBudgetStore::open(temp_dir.path().join("budgets.json")).unwrap();
        let record = reloaded.get(&fy(), 1).unwrap().unwrap();
        assert_eq!(record.annual_budget, Some(Money::from_units(24000)));
        assert_eq!(record.monthly_budget, Some(Money::from_units(2000)));
        assert_eq!(record.updated_at, stamp);
    }

    #[test]
    fn test_write_unknown_key_is_rejected() {
        let (_temp_dir, store) = create_test_store();
        let err = store
            .write(&fy(), 99, &BudgetFields::monthly(Money::from_units(1)), Utc::now())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_without_fields_is_rejected() {
        let (_temp_dir, store) = create_test_store();
        seed(&store, 1, None);
        let err = store
            .write(&fy(), 1, &BudgetFields::default(), Utc::now())
            .unwrap_err();
        assert!(err.is_validation());
    }
}
