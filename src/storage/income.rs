//! Income entry repository
//!
//! Handles persistence of income entries to income.json.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::TallyError;
use crate::models::{IncomeEntry, IncomeEntryId, IncomeSourceId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct IncomeData {
    #[serde(default)]
    entries: Vec<IncomeEntry>,
}

/// Repository for income entries
pub struct IncomeRepository {
    path: PathBuf,
    data: RwLock<HashMap<IncomeEntryId, IncomeEntry>>,
}

fn newest_first(entries: &mut [IncomeEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl IncomeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load entries from disk
    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: IncomeData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for entry in file_data.entries {
            data.insert(entry.id, entry);
        }

        debug!(count = data.len(), "loaded income entries");
        Ok(())
    }

    /// Save entries to disk, newest first
    pub fn save(&self) -> Result<(), TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        newest_first(&mut entries);

        write_json_atomic(&self.path, &IncomeData { entries })
    }

    pub fn get(&self, id: IncomeEntryId) -> Result<Option<IncomeEntry>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All entries, newest first
    pub fn get_all(&self) -> Result<Vec<IncomeEntry>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        newest_first(&mut entries);
        Ok(entries)
    }

    /// Entries for a year, optionally narrowed to one month, newest first
    pub fn get_by_period(
        &self,
        year: i32,
        month: Option<u32>,
    ) -> Result<Vec<IncomeEntry>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<_> = data
            .values()
            .filter(|e| e.year == year && month.map_or(true, |m| e.month == m))
            .cloned()
            .collect();
        newest_first(&mut entries);
        Ok(entries)
    }

    /// Number of entries attributed to a source
    pub fn count_by_source(&self, source_id: IncomeSourceId) -> Result<usize, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().filter(|e| e.source_id == source_id).count())
    }

    pub fn upsert(&self, entry: IncomeEntry) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(entry.id, entry);
        Ok(())
    }

    pub fn delete(&self, id: IncomeEntryId) -> Result<Option<IncomeEntry>, TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn entry(source: IncomeSourceId, y: i32, m: u32, d: u32, net: i64) -> IncomeEntry {
        IncomeEntry::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            source,
            Money::from_units(net),
            Money::from_units(net),
        )
    }

    #[test]
    fn test_period_filter_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let repo = IncomeRepository::new(temp_dir.path().join("income.json"));
        let source = IncomeSourceId::new();

        repo.upsert(entry(source, 2025, 3, 1, 1000)).unwrap();
        repo.upsert(entry(source, 2025, 3, 20, 500)).unwrap();
        repo.upsert(entry(source, 2025, 4, 2, 700)).unwrap();
        repo.upsert(entry(source, 2024, 3, 2, 900)).unwrap();

        let march = repo.get_by_period(2025, Some(3)).unwrap();
        let days: Vec<_> = march.iter().map(|e| e.date.format("%d").to_string()).collect();
        assert_eq!(days, vec!["20", "01"]);

        assert_eq!(repo.get_by_period(2025, None).unwrap().len(), 3);
        assert_eq!(repo.get_all().unwrap().len(), 4);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("income.json");
        let source = IncomeSourceId::new();

        let id = {
            let repo = IncomeRepository::new(path.clone());
            let e = entry(source, 2025, 5, 9, 1234);
            let id = e.id;
            repo.upsert(e).unwrap();
            repo.save().unwrap();
            id
        };

        let repo = IncomeRepository::new(path);
        repo.load().unwrap();
        let loaded = repo.get(id).unwrap().unwrap();
        assert_eq!(loaded.net_amount, Money::from_units(1234));
        assert_eq!(loaded.week, 2);
    }

    #[test]
    fn test_count_by_source() {
        let temp_dir = TempDir::new().unwrap();
        let repo = IncomeRepository::new(temp_dir.path().join("income.json"));
        let a = IncomeSourceId::new();
        let b = IncomeSourceId::new();

        repo.upsert(entry(a, 2025, 1, 1, 1)).unwrap();
        repo.upsert(entry(a, 2025, 1, 2, 1)).unwrap();
        repo.upsert(entry(b, 2025, 1, 3, 1)).unwrap();

        assert_eq!(repo.count_by_source(a).unwrap(), 2);
        assert_eq!(repo.count_by_source(b).unwrap(), 1);
        assert_eq!(repo.count_by_source(IncomeSourceId::new()).unwrap(), 0);
    }
}
