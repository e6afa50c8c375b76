//! Payout category service
//!
//! CRUD for payout categories. Names are unique ignoring case, and a
//! category cannot be deleted while payouts are filed under it.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{Money, PayoutCategory, PayoutCategoryId, PayoutCategoryType};
use crate::storage::Storage;

/// Service for payout category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Input for creating a category
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    pub name: String,
    pub category_type: PayoutCategoryType,
    pub target_amount: Option<Money>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Optional changes applied by [`CategoryService::update`]
///
/// `target_amount: Some(None)` and `icon: Some(None)` clear those fields.
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub category_type: Option<PayoutCategoryType>,
    pub target_amount: Option<Option<Money>>,
    pub color: Option<String>,
    pub icon: Option<Option<String>>,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateCategoryInput) -> TallyResult<PayoutCategory> {
        let name = input.name.trim();
        self.ensure_name_free(name, None)?;

        let mut category = PayoutCategory::new(name, input.category_type);
        category.set_target(input.target_amount);
        if let Some(color) = input.color {
            category.set_color(color);
        }
        category.set_icon(input.icon);

        category
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::PayoutCategory,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        info!(id = %category.id, name = %category.name, "created payout category");
        Ok(category)
    }

    pub fn get(&self, id: PayoutCategoryId) -> TallyResult<Option<PayoutCategory>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name, full id, or short id
    pub fn find(&self, identifier: &str) -> TallyResult<Option<PayoutCategory>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<PayoutCategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .find(|c| c.id.matches(identifier)))
    }

    pub fn resolve(&self, identifier: &str) -> TallyResult<PayoutCategory> {
        self.find(identifier)?
            .ok_or_else(|| TallyError::category_not_found(identifier))
    }

    /// All categories sorted by name
    pub fn list(&self) -> TallyResult<Vec<PayoutCategory>> {
        self.storage.categories.get_all()
    }

    pub fn update(
        &self,
        id: PayoutCategoryId,
        changes: CategoryUpdate,
    ) -> TallyResult<PayoutCategory> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| TallyError::category_not_found(id.to_string()))?;
        let before = category.clone();

        if let Some(name) = changes.name {
            self.ensure_name_free(name.trim(), Some(id))?;
            category.set_name(name);
        }
        if let Some(category_type) = changes.category_type {
            category.set_type(category_type);
        }
        if let Some(target) = changes.target_amount {
            category.set_target(target);
        }
        if let Some(color) = changes.color {
            category.set_color(color);
        }
        if let Some(icon) = changes.icon {
            category.set_icon(icon);
        }

        category
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::PayoutCategory,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        info!(id = %category.id, "updated payout category");
        Ok(category)
    }

    /// Delete a category no payout references
    pub fn delete(&self, id: PayoutCategoryId) -> TallyResult<PayoutCategory> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| TallyError::category_not_found(id.to_string()))?;

        let count = self.storage.payouts.count_by_category(id)?;
        if count > 0 {
            return Err(TallyError::InUse {
                entity_type: "Payout category",
                identifier: category.name,
                count,
            });
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::PayoutCategory,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        info!(id = %category.id, "deleted payout category");
        Ok(category)
    }

    fn ensure_name_free(&self, name: &str, exclude: Option<PayoutCategoryId>) -> TallyResult<()> {
        match self.storage.categories.get_by_name(name)? {
            Some(existing) if Some(existing.id) != exclude => Err(TallyError::Duplicate {
                entity_type: "Payout category",
                identifier: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
