//! Record retrieval for the savings engine
//!
//! [`LedgerReader`] is the seam between where income and payouts live and
//! the pure aggregation in [`crate::reports::summary`]. Services and reports
//! take a reader instead of reaching into storage directly.

use crate::error::TallyResult;
use crate::reports::summary::{IncomeRecord, PayoutRecord};

use super::Storage;

/// Source of income and payout records for a period
///
/// `month = None` means the whole year. Record order is unspecified.
pub trait LedgerReader {
    fn fetch_income(&self, year: i32, month: Option<u32>) -> TallyResult<Vec<IncomeRecord>>;

    fn fetch_payouts(&self, year: i32, month: Option<u32>) -> TallyResult<Vec<PayoutRecord>>;
}

impl LedgerReader for Storage {
    fn fetch_income(&self, year: i32, month: Option<u32>) -> TallyResult<Vec<IncomeRecord>> {
        Ok(self
            .income
            .get_by_period(year, month)?
            .iter()
            .map(IncomeRecord::from)
            .collect())
    }

    fn fetch_payouts(&self, year: i32, month: Option<u32>) -> TallyResult<Vec<PayoutRecord>> {
        Ok(self
            .payouts
            .get_by_period(year, month)?
            .iter()
            .map(PayoutRecord::from)
            .collect())
    }
}

/// Reader over records already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    pub income: Vec<IncomeRecord>,
    pub payouts: Vec<PayoutRecord>,
}

impl MemoryLedger {
    pub fn new(income: Vec<IncomeRecord>, payouts: Vec<PayoutRecord>) -> Self {
        Self { income, payouts }
    }
}

impl LedgerReader for MemoryLedger {
    fn fetch_income(&self, year: i32, month: Option<u32>) -> TallyResult<Vec<IncomeRecord>> {
        Ok(self
            .income
            .iter()
            .filter(|r| r.year == year && month.map_or(true, |m| r.month == m))
            .copied()
            .collect())
    }

    fn fetch_payouts(&self, year: i32, month: Option<u32>) -> TallyResult<Vec<PayoutRecord>> {
        Ok(self
            .payouts
            .iter()
            .filter(|r| r.year == year && month.map_or(true, |m| r.month == m))
            .copied()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{
        IncomeEntry, IncomeSourceId, Money, Payout, PayoutCategoryId, PayoutStatus,
    };
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_storage_reader_filters_period() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(TallyPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let source = IncomeSourceId::new();
        let category = PayoutCategoryId::new();

        for (m, d, net) in [(3, 2, 1000), (3, 9, 2000), (4, 1, 1000)] {
            storage
                .income
                .upsert(IncomeEntry::new(
                    date(m, d),
                    source,
                    Money::from_units(net),
                    Money::from_units(net),
                ))
                .unwrap();
        }
        storage
            .payouts
            .upsert(Payout::new(date(3, 5), category, Money::from_units(800)))
            .unwrap();

        let march = storage.fetch_income(2025, Some(3)).unwrap();
        assert_eq!(march.len(), 2);
        assert!(march.iter().all(|r| r.month == 3));

        assert_eq!(storage.fetch_income(2025, None).unwrap().len(), 3);
        assert_eq!(storage.fetch_payouts(2025, Some(4)).unwrap().len(), 0);

        let payouts = storage.fetch_payouts(2025, None).unwrap();
        assert_eq!(payouts[0].amount, Money::from_units(800));
        assert_eq!(payouts[0].status, PayoutStatus::Pending);
    }

    #[test]
    fn test_memory_ledger_filters() {
        let ledger = MemoryLedger::new(
            vec![
                IncomeRecord {
                    week: 1,
                    month: 1,
                    year: 2025,
                    net_amount: Money::from_units(10),
                    gross_amount: Money::from_units(12),
                },
                IncomeRecord {
                    week: 1,
                    month: 1,
                    year: 2024,
                    net_amount: Money::from_units(10),
                    gross_amount: Money::from_units(12),
                },
            ],
            Vec::new(),
        );

        assert_eq!(ledger.fetch_income(2025, None).unwrap().len(), 1);
        assert_eq!(ledger.fetch_income(2025, Some(2)).unwrap().len(), 0);
        assert!(ledger.fetch_payouts(2025, None).unwrap().is_empty());
    }
}
