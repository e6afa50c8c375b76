//! Payout repository for JSON storage
//!
//! Manages loading and saving payouts to payouts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::TallyError;
use crate::models::{Payout, PayoutCategoryId, PayoutId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PayoutData {
    #[serde(default)]
    payouts: Vec<Payout>,
}

/// Repository for payout persistence
pub struct PayoutRepository {
    path: PathBuf,
    data: RwLock<HashMap<PayoutId, Payout>>,
    /// Index: category_id -> payout_ids
    by_category: RwLock<HashMap<PayoutCategoryId, Vec<PayoutId>>>,
}

fn newest_first(payouts: &mut [Payout]) {
    payouts.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl PayoutRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load payouts from disk and rebuild the category index
    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: PayoutData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_category.clear();

        for payout in file_data.payouts {
            by_category
                .entry(payout.category_id)
                .or_default()
                .push(payout.id);
            data.insert(payout.id, payout);
        }

        debug!(count = data.len(), "loaded payouts");
        Ok(())
    }

    /// Save payouts to disk, newest first
    pub fn save(&self) -> Result<(), TallyError> {
        let payouts = self.get_all()?;
        write_json_atomic(&self.path, &PayoutData { payouts })
    }

    pub fn get(&self, id: PayoutId) -> Result<Option<Payout>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All payouts, newest first
    pub fn get_all(&self) -> Result<Vec<Payout>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut payouts: Vec<_> = data.values().cloned().collect();
        newest_first(&mut payouts);
        Ok(payouts)
    }

    /// Payouts for a year, optionally narrowed to one month, newest first
    pub fn get_by_period(&self, year: i32, month: Option<u32>) -> Result<Vec<Payout>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut payouts: Vec<_> = data
            .values()
            .filter(|p| p.year == year && month.map_or(true, |m| p.month == m))
            .cloned()
            .collect();
        newest_first(&mut payouts);
        Ok(payouts)
    }

    /// Payouts filed under a category
    pub fn get_by_category(&self, category_id: PayoutCategoryId) -> Result<Vec<Payout>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_category = self
            .by_category
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_category
            .get(&category_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut payouts: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        newest_first(&mut payouts);
        Ok(payouts)
    }

    pub fn count_by_category(&self, category_id: PayoutCategoryId) -> Result<usize, TallyError> {
        let by_category = self
            .by_category
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_category.get(&category_id).map_or(0, |ids| ids.len()))
    }

    /// Insert or update a payout, keeping the category index in step
    pub fn upsert(&self, payout: Payout) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.get(&payout.id) {
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != payout.id);
            }
        }

        by_category
            .entry(payout.category_id)
            .or_default()
            .push(payout.id);
        data.insert(payout.id, payout);
        Ok(())
    }

    pub fn delete(&self, id: PayoutId) -> Result<Option<Payout>, TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = data.remove(&id);
        if let Some(payout) = &removed {
            if let Some(ids) = by_category.get_mut(&payout.category_id) {
                ids.retain(|&other| other != id);
            }
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
