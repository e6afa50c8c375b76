//! JSON Export functionality
//!
//! Exports every source, entry, category and payout to JSON with schema
//! versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::{IncomeEntry, IncomeSource, Payout, PayoutCategory};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub settings: Settings,
    pub sources: Vec<IncomeSource>,
    pub income: Vec<IncomeEntry>,
    pub categories: Vec<PayoutCategory>,
    pub payouts: Vec<Payout>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub source_count: usize,
    pub entry_count: usize,
    pub category_count: usize,
    pub payout_count: usize,

    /// Date of the earliest income entry
    pub earliest_entry: Option<String>,

    /// Date of the latest income entry
    pub latest_entry: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage, settings: &Settings) -> TallyResult<Self> {
        let sources = storage.sources.get_all()?;
        let income = storage.income.get_all()?;
        let categories = storage.categories.get_all()?;
        let payouts = storage.payouts.get_all()?;

        let metadata = ExportMetadata {
            source_count: sources.len(),
            entry_count: income.len(),
            category_count: categories.len(),
            payout_count: payouts.len(),
            earliest_entry: income.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_entry: income.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            settings: settings.clone(),
            sources,
            income,
            categories,
            payouts,
            metadata,
        })
    }

    /// Check schema version and that every reference resolves
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let source_ids: HashSet<_> = self.sources.iter().map(|s| s.id).collect();
        let category_ids: HashSet<_> = self.categories.iter().map(|c| c.id).collect();

        for entry in &self.income {
            if !source_ids.contains(&entry.source_id) {
                return Err(format!(
                    "Income entry {} references unknown source {}",
                    entry.id, entry.source_id
                ));
            }
        }

        for payout in &self.payouts {
            if !category_ids.contains(&payout.category_id) {
                return Err(format!(
                    "Payout {} references unknown category {}",
                    payout.id, payout.category_id
                ));
            }
        }

        Ok(())
    }

    /// Build the export, logging dangling references instead of failing
    pub(crate) fn checked(storage: &Storage, settings: &Settings) -> TallyResult<Self> {
        let export = Self::from_storage(storage, settings)?;
        if let Err(problem) = export.validate() {
            warn!(%problem, "exporting data with dangling references");
        }
        Ok(export)
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    settings: &Settings,
    writer: &mut W,
    pretty: bool,
) -> TallyResult<()> {
    let export = FullExport::checked(storage, settings)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn read_json_export(json_str: &str) -> TallyResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| TallyError::Export(e.to_string()))?;
    export.validate().map_err(TallyError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{IncomeSourceType, Money, PayoutCategoryType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn seed(storage: &Storage) {
        let source = IncomeSource::new("Day Job", IncomeSourceType::Salary);
        let category = PayoutCategory::new("Rent", PayoutCategoryType::Obligation);
        let date = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();

        storage
            .income
            .upsert(IncomeEntry::new(date(1), source.id, Money::from_units(1200), Money::from_units(1000)))
            .unwrap();
        storage
            .income
            .upsert(IncomeEntry::new(date(20), source.id, Money::from_units(1200), Money::from_units(1000)))
            .unwrap();
        storage
            .payouts
            .upsert(Payout::new(date(5), category.id, Money::from_units(800)))
            .unwrap();
        storage.sources.upsert(source).unwrap();
        storage.categories.upsert(category).unwrap();
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let export = FullExport::from_storage(&storage, &Settings::default()).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.source_count, 1);
        assert_eq!(export.metadata.entry_count, 2);
        assert_eq!(export.metadata.payout_count, 1);
        assert_eq!(export.metadata.earliest_entry.as_deref(), Some("2025-03-01"));
        assert_eq!(export.metadata.latest_entry.as_deref(), Some("2025-03-20"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_dangling_reference_detected() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let mut export = FullExport::from_storage(&storage, &Settings::default()).unwrap();
        export.sources.clear();
        assert!(export.validate().unwrap_err().contains("unknown source"));
    }

    #[test]
    fn test_json_export_parses_back() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let mut output = Vec::new();
        export_full_json(&storage, &Settings::default(), &mut output, true).unwrap();

        let imported = read_json_export(&String::from_utf8(output).unwrap()).unwrap();
        assert_eq!(imported.sources[0].name, "Day Job");
        assert_eq!(imported.categories[0].name, "Rent");
        assert_eq!(imported.settings.currency_code, "PHP");
    }
}
