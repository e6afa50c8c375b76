//! Income entry service
//!
//! Records income events against a source. Period buckets are derived from
//! the entry date; listings come back newest first with the source joined in.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{
    IncomeEntry, IncomeEntryId, IncomeSource, IncomeSourceId, Money, PaymentFrequency, SourceLabel,
};
use crate::storage::Storage;

/// Service for income entries
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

/// Input for creating an income entry
#[derive(Debug, Clone)]
pub struct CreateIncomeInput {
    pub date: NaiveDate,
    pub source_id: IncomeSourceId,
    pub gross_amount: Money,
    pub net_amount: Money,
    pub payment_frequency: Option<PaymentFrequency>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

/// Optional changes applied by [`IncomeService::update`]
///
/// `notes: Some(None)` clears the notes.
#[derive(Debug, Clone, Default)]
pub struct IncomeUpdate {
    pub date: Option<NaiveDate>,
    pub source_id: Option<IncomeSourceId>,
    pub gross_amount: Option<Money>,
    pub net_amount: Option<Money>,
    pub payment_frequency: Option<PaymentFrequency>,
    pub notes: Option<Option<String>>,
}

/// Gross/net totals for a set of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IncomeTotals {
    pub total_gross: Money,
    pub total_net: Money,
    pub entry_count: usize,
}

impl IncomeTotals {
    pub fn from_entries<'e>(entries: impl IntoIterator<Item = &'e IncomeEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |mut totals, e| {
            totals.total_gross += e.gross_amount;
            totals.total_net += e.net_amount;
            totals.entry_count += 1;
            totals
        })
    }

    /// Mean net amount per entry rounded half away from zero, zero when
    /// there are no entries
    pub fn average_net(&self) -> Money {
        if self.entry_count == 0 {
            return Money::zero();
        }
        self.total_net.scale(1.0 / self.entry_count as f64)
    }
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new entry; the source must exist and be active
    pub fn create(&self, input: CreateIncomeInput) -> TallyResult<IncomeEntry> {
        let source = self.active_source(input.source_id)?;

        let mut entry = IncomeEntry::new(
            input.date,
            input.source_id,
            input.gross_amount,
            input.net_amount,
        );
        if let Some(frequency) = input.payment_frequency {
            entry.payment_frequency = frequency;
        }
        if let Some(currency) = input.currency {
            entry.currency = currency.trim().to_uppercase();
        }
        entry.set_notes(input.notes);

        entry
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.income.upsert(entry.clone())?;
        self.storage.income.save()?;

        self.storage.log_create(
            EntityType::IncomeEntry,
            entry.id.to_string(),
            Some(format!("{} {}", entry.date, source.name)),
            &entry,
        )?;

        info!(id = %entry.id, date = %entry.date, net = %entry.net_amount, "recorded income");
        entry.source = Some(source.label());
        Ok(entry)
    }

    /// Get an entry with its source joined
    pub fn get(&self, id: IncomeEntryId) -> TallyResult<Option<IncomeEntry>> {
        let Some(mut entry) = self.storage.income.get(id)? else {
            return Ok(None);
        };
        entry.source = self.storage.sources.get(entry.source_id)?.map(|s| s.label());
        Ok(Some(entry))
    }

    /// Find an entry by full or short id
    pub fn find(&self, identifier: &str) -> TallyResult<Option<IncomeEntry>> {
        if let Ok(id) = identifier.parse::<IncomeEntryId>() {
            return self.get(id);
        }

        match self
            .storage
            .income
            .get_all()?
            .into_iter()
            .find(|e| e.id.matches(identifier))
        {
            Some(entry) => self.get(entry.id),
            None => Ok(None),
        }
    }

    pub fn resolve(&self, identifier: &str) -> TallyResult<IncomeEntry> {
        self.find(identifier)?
            .ok_or_else(|| TallyError::entry_not_found(identifier))
    }

    /// Entries filtered by year and/or month, newest first, sources joined
    pub fn list(&self, year: Option<i32>, month: Option<u32>) -> TallyResult<Vec<IncomeEntry>> {
        let mut entries = match year {
            Some(year) => self.storage.income.get_by_period(year, month)?,
            None => {
                let mut all = self.storage.income.get_all()?;
                if let Some(month) = month {
                    all.retain(|e| e.month == month);
                }
                all
            }
        };
        self.attach_sources(&mut entries)?;
        Ok(entries)
    }

    /// The `count` most recent entries of one month
    pub fn recent(&self, year: i32, month: u32, count: usize) -> TallyResult<Vec<IncomeEntry>> {
        let mut entries = self.storage.income.get_by_period(year, Some(month))?;
        entries.truncate(count);
        self.attach_sources(&mut entries)?;
        Ok(entries)
    }

    pub fn update(&self, id: IncomeEntryId, changes: IncomeUpdate) -> TallyResult<IncomeEntry> {
        let mut entry = self
            .storage
            .income
            .get(id)?
            .ok_or_else(|| TallyError::entry_not_found(id.to_string()))?;
        let before = entry.clone();

        if let Some(source_id) = changes.source_id {
            if source_id != entry.source_id {
                self.active_source(source_id)?;
            }
            entry.set_source(source_id);
        }
        if let Some(date) = changes.date {
            entry.set_date(date);
        }
        if changes.gross_amount.is_some() || changes.net_amount.is_some() {
            let gross = changes.gross_amount.unwrap_or(entry.gross_amount);
            let net = changes.net_amount.unwrap_or(entry.net_amount);
            entry.set_amounts(gross, net);
        }
        if let Some(frequency) = changes.payment_frequency {
            entry.payment_frequency = frequency;
        }
        if let Some(notes) = changes.notes {
            entry.set_notes(notes);
        }

        entry
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.income.upsert(entry.clone())?;
        self.storage.income.save()?;

        self.storage.log_update(
            EntityType::IncomeEntry,
            entry.id.to_string(),
            None,
            &before,
            &entry,
        )?;

        info!(id = %entry.id, "updated income entry");
        entry.source = self.storage.sources.get(entry.source_id)?.map(|s| s.label());
        Ok(entry)
    }

    pub fn delete(&self, id: IncomeEntryId) -> TallyResult<IncomeEntry> {
        let entry = self
            .storage
            .income
            .delete(id)?
            .ok_or_else(|| TallyError::entry_not_found(id.to_string()))?;
        self.storage.income.save()?;

        self.storage.log_delete(EntityType::IncomeEntry, entry.id.to_string(), None, &entry)?;

        info!(id = %entry.id, "deleted income entry");
        Ok(entry)
    }

    /// Gross, net, and count for one month
    pub fn monthly_totals(&self, year: i32, month: u32) -> TallyResult<IncomeTotals> {
        let entries = self.storage.income.get_by_period(year, Some(month))?;
        Ok(IncomeTotals::from_entries(&entries))
    }

    fn active_source(&self, id: IncomeSourceId) -> TallyResult<IncomeSource> {
        let source = self
            .storage
            .sources
            .get(id)?
            .ok_or_else(|| TallyError::source_not_found(id.to_string()))?;
        if !source.is_active {
            return Err(TallyError::Validation(format!(
                "Income source '{}' is inactive",
                source.name
            )));
        }
        Ok(source)
    }

    fn attach_sources(&self, entries: &mut [IncomeEntry]) -> TallyResult<()> {
        let labels: HashMap<IncomeSourceId, SourceLabel> = self
            .storage
            .sources
            .get_all()?
            .into_iter()
            .map(|s| (s.id, s.label()))
            .collect();

        for entry in entries {
            entry.source = labels.get(&entry.source_id).cloned();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{IncomeSource, IncomeSourceType};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn add_source(storage: &Storage, name: &str) -> IncomeSourceId {
        let source = IncomeSource::new(name, IncomeSourceType::Salary);
        let id = source.id;
        storage.sources.upsert(source).unwrap();
        id
    }

    fn input(source_id: IncomeSourceId, m: u32, d: u32, gross: i64, net: i64) -> CreateIncomeInput {
        CreateIncomeInput {
            date: NaiveDate::from_ymd_opt(2025, m, d).unwrap(),
            source_id,
            gross_amount: Money::from_units(gross),
            net_amount: Money::from_units(net),
            payment_frequency: None,
            currency: None,
            notes: None,
        }
    }

    #[test]
    fn test_create_derives_period_and_joins_source() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let job = add_source(&storage, "Day Job");

        let entry = service.create(input(job, 3, 15, 1200, 1000)).unwrap();
        assert_eq!((entry.week, entry.month, entry.year), (3, 3, 2025));
        assert_eq!(entry.source_name(), "Day Job");

        let loaded = service.get(entry.id).unwrap().unwrap();
        assert_eq!(loaded.source_name(), "Day Job");
        assert_eq!(service.find(&entry.id.short()).unwrap().unwrap().id, entry.id);
    }

    #[test]
    fn test_create_requires_existing_source() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        let err = service
            .create(input(IncomeSourceId::new(), 3, 1, 10, 10))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_rejects_inactive_source() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let mut source = IncomeSource::new("Old Gig", IncomeSourceType::Freelance);
        source.is_active = false;
        let id = source.id;
        storage.sources.upsert(source).unwrap();

        let err = service.create(input(id, 3, 1, 10, 10)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.income.count().unwrap(), 0);
    }

    #[test]
    fn test_update_rejects_switch_to_inactive_source() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let job = add_source(&storage, "Day Job");
        let entry = service.create(input(job, 3, 1, 10, 10)).unwrap();

        let mut old = IncomeSource::new("Old Gig", IncomeSourceType::Freelance);
        old.is_active = false;
        let old_id = old.id;
        storage.sources.upsert(old).unwrap();

        let err = service
            .update(
                entry.id,
                IncomeUpdate {
                    source_id: Some(old_id),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(entry.id).unwrap().unwrap().source_id, job);
    }

    #[test]
    fn test_average_net_rounds_to_nearest_cent() {
        let totals = IncomeTotals {
            total_gross: Money::from_cents(5),
            total_net: Money::from_cents(5),
            entry_count: 2,
        };
        assert_eq!(totals.average_net(), Money::from_cents(3));
    }

    #[test]
    fn test_create_rejects_invalid_amounts() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let job = add_source(&storage, "Day Job");

        assert!(service.create(input(job, 3, 1, 0, 10)).unwrap_err().is_validation());
        assert!(service
            .create(input(job, 3, 1, 20_000_000, 10))
            .unwrap_err()
            .is_validation());
        assert_eq!(storage.income.count().unwrap(), 0);
    }

    #[test]
    fn test_list_filters_and_orders() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let job = add_source(&storage, "Day Job");

        service.create(input(job, 3, 1, 100, 100)).unwrap();
        service.create(input(job, 3, 20, 100, 100)).unwrap();
        service.create(input(job, 4, 2, 100, 100)).unwrap();

        let march = service.list(Some(2025), Some(3)).unwrap();
        assert_eq!(march.len(), 2);
        assert!(march[0].date > march[1].date);
        assert!(march.iter().all(|e| e.source.is_some()));

        assert_eq!(service.list(None, Some(4)).unwrap().len(), 1);
        assert_eq!(service.list(None, None).unwrap().len(), 3);
        assert_eq!(service.recent(2025, 3, 5).unwrap().len(), 2);
        assert_eq!(service.recent(2025, 3, 1).unwrap()[0].date, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
    }

    #[test]
    fn test_update_rederives_period() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let job = add_source(&storage, "Day Job");

        let entry = service.create(input(job, 3, 1, 1200, 1000)).unwrap();
        let updated = service
            .update(
                entry.id,
                IncomeUpdate {
                    date: NaiveDate::from_ymd_opt(2025, 5, 30),
                    net_amount: Some(Money::from_units(1100)),
                    notes: Some(Some("bonus".into())),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!((updated.week, updated.month), (5, 5));
        assert_eq!(updated.gross_amount, Money::from_units(1200));
        assert_eq!(updated.net_amount, Money::from_units(1100));
        assert_eq!(updated.notes.as_deref(), Some("bonus"));
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let job = add_source(&storage, "Day Job");

        let entry = service.create(input(job, 3, 1, 10, 10)).unwrap();
        service.delete(entry.id).unwrap();
        assert!(service.get(entry.id).unwrap().is_none());
        assert!(service.delete(entry.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_monthly_totals() {
        let (_temp, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let job = add_source(&storage, "Day Job");

        service.create(input(job, 3, 1, 1200, 1000)).unwrap();
        service.create(input(job, 3, 9, 2500, 2000)).unwrap();
        service.create(input(job, 4, 9, 999, 999)).unwrap();

        let totals = service.monthly_totals(2025, 3).unwrap();
        assert_eq!(totals.total_gross, Money::from_units(3700));
        assert_eq!(totals.total_net, Money::from_units(3000));
        assert_eq!(totals.entry_count, 2);
        assert_eq!(totals.average_net(), Money::from_units(1500));

        let empty = service.monthly_totals(2025, 12).unwrap();
        assert_eq!(empty.entry_count, 0);
        assert_eq!(empty.average_net(), Money::zero());
    }
}
