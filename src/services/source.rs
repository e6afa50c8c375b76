//! Income source service
//!
//! CRUD for income sources with unique names, plus lookup by name or id.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{IncomeSource, IncomeSourceId, IncomeSourceType};
use crate::storage::Storage;

/// Service for income source management
pub struct SourceService<'a> {
    storage: &'a Storage,
}

/// Optional changes applied by [`SourceService::update`]
#[derive(Debug, Clone, Default)]
pub struct SourceUpdate {
    pub name: Option<String>,
    pub source_type: Option<IncomeSourceType>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

impl<'a> SourceService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a source; names are unique ignoring case
    pub fn create(
        &self,
        name: &str,
        source_type: IncomeSourceType,
        color: Option<&str>,
    ) -> TallyResult<IncomeSource> {
        let name = name.trim();
        self.ensure_name_free(name, None)?;

        let mut source = IncomeSource::new(name, source_type);
        if let Some(color) = color {
            source.set_color(color);
        }

        source
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.sources.upsert(source.clone())?;
        self.storage.sources.save()?;

        self.storage.log_create(
            EntityType::IncomeSource,
            source.id.to_string(),
            Some(source.name.clone()),
            &source,
        )?;

        info!(id = %source.id, name = %source.name, "created income source");
        Ok(source)
    }

    pub fn get(&self, id: IncomeSourceId) -> TallyResult<Option<IncomeSource>> {
        self.storage.sources.get(id)
    }

    /// Find a source by name, full id, or short id
    pub fn find(&self, identifier: &str) -> TallyResult<Option<IncomeSource>> {
        if let Some(source) = self.storage.sources.get_by_name(identifier)? {
            return Ok(Some(source));
        }

        if let Ok(id) = identifier.parse::<IncomeSourceId>() {
            return self.storage.sources.get(id);
        }

        Ok(self
            .storage
            .sources
            .get_all()?
            .into_iter()
            .find(|s| s.id.matches(identifier)))
    }

    /// Like [`find`](Self::find) but missing sources are an error
    pub fn resolve(&self, identifier: &str) -> TallyResult<IncomeSource> {
        self.find(identifier)?
            .ok_or_else(|| TallyError::source_not_found(identifier))
    }

    /// All sources sorted by name
    pub fn list(&self) -> TallyResult<Vec<IncomeSource>> {
        self.storage.sources.get_all()
    }

    pub fn list_active(&self) -> TallyResult<Vec<IncomeSource>> {
        let mut sources = self.storage.sources.get_all()?;
        sources.retain(|s| s.is_active);
        Ok(sources)
    }

    pub fn update(&self, id: IncomeSourceId, changes: SourceUpdate) -> TallyResult<IncomeSource> {
        let mut source = self
            .storage
            .sources
            .get(id)?
            .ok_or_else(|| TallyError::source_not_found(id.to_string()))?;
        let before = source.clone();

        if let Some(name) = changes.name {
            self.ensure_name_free(name.trim(), Some(id))?;
            source.set_name(name);
        }
        if let Some(source_type) = changes.source_type {
            source.set_type(source_type);
        }
        if let Some(color) = changes.color {
            source.set_color(color);
        }
        if let Some(active) = changes.is_active {
            source.set_active(active);
        }

        source
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.sources.upsert(source.clone())?;
        self.storage.sources.save()?;

        self.storage.log_update(
            EntityType::IncomeSource,
            source.id.to_string(),
            Some(source.name.clone()),
            &before,
            &source,
        )?;

        info!(id = %source.id, "updated income source");
        Ok(source)
    }

    /// Delete a source that no income entry references
    pub fn delete(&self, id: IncomeSourceId) -> TallyResult<IncomeSource> {
        let source = self
            .storage
            .sources
            .get(id)?
            .ok_or_else(|| TallyError::source_not_found(id.to_string()))?;

        let count = self.storage.income.count_by_source(id)?;
        if count > 0 {
            return Err(TallyError::InUse {
                entity_type: "Income source",
                identifier: source.name,
                count,
            });
        }

        self.storage.sources.delete(id)?;
        self.storage.sources.save()?;

        self.storage.log_delete(
            EntityType::IncomeSource,
            source.id.to_string(),
            Some(source.name.clone()),
            &source,
        )?;

        info!(id = %source.id, "deleted income source");
        Ok(source)
    }

    fn ensure_name_free(&self, name: &str, exclude: Option<IncomeSourceId>) -> TallyResult<()> {
        match self.storage.sources.get_by_name(name)? {
            Some(existing) if Some(existing.id) != exclude => Err(TallyError::Duplicate {
                entity_type: "Income source",
                identifier: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
