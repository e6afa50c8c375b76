//! Income source repository for JSON storage
//!
//! Manages loading and saving income sources to sources.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::TallyError;
use crate::models::{IncomeSource, IncomeSourceId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SourceData {
    #[serde(default)]
    sources: Vec<IncomeSource>,
}

/// Repository for income source persistence
pub struct SourceRepository {
    path: PathBuf,
    data: RwLock<HashMap<IncomeSourceId, IncomeSource>>,
}

impl SourceRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load sources from disk
    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: SourceData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for source in file_data.sources {
            data.insert(source.id, source);
        }

        debug!(count = data.len(), "loaded income sources");
        Ok(())
    }

    /// Save sources to disk, ordered by name
    pub fn save(&self) -> Result<(), TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut sources: Vec<_> = data.values().cloned().collect();
        sources.sort_by_key(|s| s.name.to_lowercase());

        write_json_atomic(&self.path, &SourceData { sources })
    }

    pub fn get(&self, id: IncomeSourceId) -> Result<Option<IncomeSource>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Find a source by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<IncomeSource>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|s| s.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// All sources sorted by name
    pub fn get_all(&self) -> Result<Vec<IncomeSource>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by_key(|s| s.name.to_lowercase());
        Ok(list)
    }

    pub fn upsert(&self, source: IncomeSource) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(source.id, source);
        Ok(())
    }

    pub fn delete(&self, id: IncomeSourceId) -> Result<Option<IncomeSource>, TallyError> {
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
    use crate::models::IncomeSourceType;
    use tempfile::TempDir;

    fn repo(temp_dir: &TempDir) -> SourceRepository {
        SourceRepository::new(temp_dir.path().join("sources.json"))
    }

    #[test]
    fn test_upsert_and_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        let source = IncomeSource::new("Day Job", IncomeSourceType::Salary);
        let id = source.id;
        repo.upsert(source).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().name, "Day Job");
        assert_eq!(repo.get_by_name("day job").unwrap().unwrap().id, id);
        assert!(repo.get_by_name("Side Gig").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_sorted() {
        let temp_dir = TempDir::new().unwrap();
        {
            let repo = repo(&temp_dir);
            repo.upsert(IncomeSource::new("Rentals", IncomeSourceType::Investment))
                .unwrap();
            repo.upsert(IncomeSource::new("consulting", IncomeSourceType::Freelance))
                .unwrap();
            repo.save().unwrap();
        }

        let repo = repo(&temp_dir);
        repo.load().unwrap();
        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["consulting", "Rentals"]);
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        let source = IncomeSource::new("Day Job", IncomeSourceType::Salary);
        let id = source.id;
        repo.upsert(source).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
