//! Payout service
//!
//! Records payouts against a category, tracks their payment status, and
//! produces the per-month and per-category totals used by reports.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{
    short_month_name, CategoryLabel, Money, Payout, PayoutCategoryId, PayoutCategoryType, PayoutId,
    PayoutStatus,
};
use crate::storage::Storage;

/// Service for payout management
pub struct PayoutService<'a> {
    storage: &'a Storage,
}

/// Input for creating a payout
#[derive(Debug, Clone)]
pub struct CreatePayoutInput {
    pub date: NaiveDate,
    pub category_id: PayoutCategoryId,
    pub amount: Money,
    pub status: Option<PayoutStatus>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Optional changes applied by [`PayoutService::update`]
#[derive(Debug, Clone, Default)]
pub struct PayoutUpdate {
    pub date: Option<NaiveDate>,
    pub category_id: Option<PayoutCategoryId>,
    pub amount: Option<Money>,
    pub status: Option<PayoutStatus>,
    pub due_date: Option<Option<NaiveDate>>,
    pub notes: Option<Option<String>>,
}

/// Payout total for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthPayoutTotal {
    pub month: u32,
    pub month_name: &'static str,
    pub total_payouts: Money,
}

/// Payouts in one category for a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category_id: PayoutCategoryId,
    pub name: String,
    pub category_type: Option<PayoutCategoryType>,
    pub target_amount: Option<Money>,
    pub total: Money,
    pub paid: Money,
    pub count: usize,
}

impl CategoryTotal {
    /// Target minus total, when a target is set
    pub fn remaining_target(&self) -> Option<Money> {
        self.target_amount.map(|target| target - self.total)
    }
}

impl<'a> PayoutService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a payout; the category must exist
    pub fn create(&self, input: CreatePayoutInput) -> TallyResult<Payout> {
        let category = self
            .storage
            .categories
            .get(input.category_id)?
            .ok_or_else(|| TallyError::category_not_found(input.category_id.to_string()))?;

        let mut payout = Payout::new(input.date, input.category_id, input.amount);
        if let Some(status) = input.status {
            payout.status = status;
        }
        payout.due_date = input.due_date;
        payout.set_notes(input.notes);

        payout
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.payouts.upsert(payout.clone())?;
        self.storage.payouts.save()?;

        self.storage.log_create(
            EntityType::Payout,
            payout.id.to_string(),
            Some(format!("{} {}", payout.date, category.name)),
            &payout,
        )?;

        info!(id = %payout.id, amount = %payout.amount, category = %category.name, "recorded payout");
        payout.category = Some(category.label());
        Ok(payout)
    }

    /// Get a payout with its category joined
    pub fn get(&self, id: PayoutId) -> TallyResult<Option<Payout>> {
        let Some(mut payout) = self.storage.payouts.get(id)? else {
            return Ok(None);
        };
        payout.category = self
            .storage
            .categories
            .get(payout.category_id)?
            .map(|c| c.label());
        Ok(Some(payout))
    }

    /// Find a payout by full or short id
    pub fn find(&self, identifier: &str) -> TallyResult<Option<Payout>> {
        if let Ok(id) = identifier.parse::<PayoutId>() {
            return self.get(id);
        }

        match self
            .storage
            .payouts
            .get_all()?
            .into_iter()
            .find(|p| p.id.matches(identifier))
        {
            Some(payout) => self.get(payout.id),
            None => Ok(None),
        }
    }

    pub fn resolve(&self, identifier: &str) -> TallyResult<Payout> {
        self.find(identifier)?
            .ok_or_else(|| TallyError::payout_not_found(identifier))
    }

    /// Payouts filtered by year and/or month, newest first, categories joined
    pub fn list(&self, year: Option<i32>, month: Option<u32>) -> TallyResult<Vec<Payout>> {
        let mut payouts = match year {
            Some(year) => self.storage.payouts.get_by_period(year, month)?,
            None => {
                let mut all = self.storage.payouts.get_all()?;
                if let Some(month) = month {
                    all.retain(|p| p.month == month);
                }
                all
            }
        };
        self.attach_categories(&mut payouts)?;
        Ok(payouts)
    }

    pub fn update(&self, id: PayoutId, changes: PayoutUpdate) -> TallyResult<Payout> {
        let mut payout = self
            .storage
            .payouts
            .get(id)?
            .ok_or_else(|| TallyError::payout_not_found(id.to_string()))?;
        let before = payout.clone();

        if let Some(category_id) = changes.category_id {
            if self.storage.categories.get(category_id)?.is_none() {
                return Err(TallyError::category_not_found(category_id.to_string()));
            }
            payout.set_category(category_id);
        }
        if let Some(date) = changes.date {
            payout.set_date(date);
        }
        if let Some(amount) = changes.amount {
            payout.set_amount(amount);
        }
        if let Some(status) = changes.status {
            payout.set_status(status);
        }
        if let Some(due_date) = changes.due_date {
            payout.set_due_date(due_date);
        }
        if let Some(notes) = changes.notes {
            payout.set_notes(notes);
        }

        self.persist_update(before, payout)
    }

    /// Change only the payment status
    pub fn set_status(&self, id: PayoutId, status: PayoutStatus) -> TallyResult<Payout> {
        self.update(
            id,
            PayoutUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    pub fn delete(&self, id: PayoutId) -> TallyResult<Payout> {
        let payout = self
            .storage
            .payouts
            .delete(id)?
            .ok_or_else(|| TallyError::payout_not_found(id.to_string()))?;
        self.storage.payouts.save()?;

        self.storage.log_delete(EntityType::Payout, payout.id.to_string(), None, &payout)?;

        info!(id = %payout.id, "deleted payout");
        Ok(payout)
    }

    /// Twelve monthly totals for `year`; months without payouts are zero
    pub fn yearly_totals(&self, year: i32) -> TallyResult<Vec<MonthPayoutTotal>> {
        let mut months: Vec<MonthPayoutTotal> = (1..=12)
            .map(|month| MonthPayoutTotal {
                month,
                month_name: short_month_name(month),
                total_payouts: Money::zero(),
            })
            .collect();

        for payout in self.storage.payouts.get_by_period(year, None)? {
            let index = (payout.month as usize).checked_sub(1);
            if let Some(slot) = index.and_then(|i| months.get_mut(i)) {
                slot.total_payouts += payout.amount;
            }
        }

        Ok(months)
    }

    /// Per-category totals for one month, largest first
    pub fn category_breakdown(&self, year: i32, month: u32) -> TallyResult<Vec<CategoryTotal>> {
        let mut payouts = self.storage.payouts.get_by_period(year, Some(month))?;
        self.attach_categories(&mut payouts)?;
        Ok(group_by_category(&payouts))
    }

    fn persist_update(&self, before: Payout, mut payout: Payout) -> TallyResult<Payout> {
        payout
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.payouts.upsert(payout.clone())?;
        self.storage.payouts.save()?;

        self.storage.log_update(
            EntityType::Payout,
            payout.id.to_string(),
            None,
            &before,
            &payout,
        )?;

        info!(id = %payout.id, status = %payout.status, "updated payout");
        payout.category = self
            .storage
            .categories
            .get(payout.category_id)?
            .map(|c| c.label());
        Ok(payout)
    }

    fn attach_categories(&self, payouts: &mut [Payout]) -> TallyResult<()> {
        let labels: HashMap<PayoutCategoryId, CategoryLabel> = self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .map(|c| (c.id, c.label()))
            .collect();

        for payout in payouts {
            payout.category = labels.get(&payout.category_id).cloned();
        }
        Ok(())
    }
}

/// Group payouts with joined categories into per-category totals
pub fn group_by_category(payouts: &[Payout]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<PayoutCategoryId, CategoryTotal> = HashMap::new();

    for payout in payouts {
        let total = totals
            .entry(payout.category_id)
            .or_insert_with(|| CategoryTotal {
                category_id: payout.category_id,
                name: payout.category_name().to_string(),
                category_type: payout.category.as_ref().map(|c| c.category_type),
                target_amount: payout.category.as_ref().and_then(|c| c.target_amount),
                total: Money::zero(),
                paid: Money::zero(),
                count: 0,
            });
        total.total += payout.amount;
        if payout.status.is_paid() {
            total.paid += payout.amount;
        }
        total.count += 1;
    }

    let mut list: Vec<_> = totals.into_values().collect();
    list.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    list
}
