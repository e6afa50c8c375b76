//! Dashboard Report
//!
//! Month-at-a-glance: income totals, payouts against savings, a twelve-month
//! income/payout series for the year, and the latest entries.

use crate::display::report::{format_bar, format_percentage, truncate};
use crate::error::TallyResult;
use crate::models::{short_month_name, IncomeEntry, Money, MonthPeriod};
use crate::services::{IncomeService, IncomeTotals, PayoutService};
use crate::storage::Storage;

const BAR_WIDTH: usize = 20;

/// One month of the yearly series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMonth {
    pub month: u32,
    pub month_name: &'static str,
    pub gross: Money,
    pub net: Money,
    pub payouts: Money,
}

/// Dashboard for a selected month
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub period: MonthPeriod,
    pub income: IncomeTotals,
    pub average_net: Money,
    pub month_payouts: Money,
    /// `max(0, net - payouts)` for the selected month
    pub month_savings: Money,
    /// All twelve months of the selected year
    pub yearly: Vec<DashboardMonth>,
    /// Latest entries of the selected month
    pub recent: Vec<IncomeEntry>,
}

impl DashboardReport {
    pub fn generate(storage: &Storage, period: MonthPeriod, recent_count: usize) -> TallyResult<Self> {
        let income_service = IncomeService::new(storage);
        let payout_service = PayoutService::new(storage);

        let income = income_service.monthly_totals(period.year, period.month)?;

        let mut yearly: Vec<DashboardMonth> = (1..=12)
            .map(|month| DashboardMonth {
                month,
                month_name: short_month_name(month),
                gross: Money::zero(),
                net: Money::zero(),
                payouts: Money::zero(),
            })
            .collect();

        for entry in storage.income.get_by_period(period.year, None)? {
            if let Some(slot) = slot_for(&mut yearly, entry.month) {
                slot.gross += entry.gross_amount;
                slot.net += entry.net_amount;
            }
        }
        for total in payout_service.yearly_totals(period.year)? {
            if let Some(slot) = slot_for(&mut yearly, total.month) {
                slot.payouts = total.total_payouts;
            }
        }

        let month_payouts = yearly
            .iter()
            .find(|m| m.month == period.month)
            .map(|m| m.payouts)
            .unwrap_or_default();

        Ok(Self {
            period,
            average_net: income.average_net(),
            month_savings: (income.total_net - month_payouts).floor_zero(),
            month_payouts,
            income,
            yearly,
            recent: income_service.recent(period.year, period.month, recent_count)?,
        })
    }

    /// Savings as a fraction of the month's net income
    pub fn savings_share(&self) -> f64 {
        self.month_savings.ratio_of(self.income.total_net)
    }

    /// Payouts as a fraction of the month's net income, capped at 1.0
    pub fn payout_share(&self) -> f64 {
        self.month_payouts.ratio_of(self.income.total_net).min(1.0)
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str(&format!("Dashboard: {}\n", self.period));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<24} {:>16}\n", "Gross income:", money(self.income.total_gross)));
        output.push_str(&format!("{:<24} {:>16}\n", "Net income:", money(self.income.total_net)));
        output.push_str(&format!("{:<24} {:>16}\n", "Entries:", self.income.entry_count));
        output.push_str(&format!("{:<24} {:>16}\n", "Average per entry:", money(self.average_net)));
        output.push_str(&format!(
            "{:<24} {:>16} ({})\n",
            "Payouts:",
            money(self.month_payouts),
            format_percentage(self.payout_share())
        ));
        output.push_str(&format!(
            "{:<24} {:>16} ({})\n",
            "Savings:",
            money(self.month_savings),
            format_percentage(self.savings_share())
        ));

        output.push_str(&format!("\n{} by month\n", self.period.year));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("  {:<6} {:>16} {:>16} {:>16}\n", "Month", "Gross", "Net", "Payouts"));
        let peak = self
            .yearly
            .iter()
            .map(|m| m.net.max(m.payouts))
            .max()
            .unwrap_or_default()
            .as_units_f64();
        for month in &self.yearly {
            output.push_str(&format!(
                "  {:<6} {:>16} {:>16} {:>16}  {}\n",
                month.month_name,
                money(month.gross),
                money(month.net),
                money(month.payouts),
                format_bar(month.net.as_units_f64(), peak, BAR_WIDTH)
            ));
        }

        output.push_str("\nRecent entries\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.recent.is_empty() {
            output.push_str("  (none)\n");
        }
        for entry in &self.recent {
            output.push_str(&format!(
                "  {} {:<24} {:>16}\n",
                entry.date,
                truncate(entry.source_name(), 24),
                money(entry.net_amount)
            ));
        }

        output
    }
}

fn slot_for(months: &mut [DashboardMonth], month: u32) -> Option<&mut DashboardMonth> {
    (month as usize)
        .checked_sub(1)
        .and_then(move |index| months.get_mut(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{
        IncomeSource, IncomeSourceType, Payout, PayoutCategory, PayoutCategoryType,
    };
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn seed(storage: &Storage) {
        let source = IncomeSource::new("Day Job", IncomeSourceType::Salary);
        let category = PayoutCategory::new("Rent", PayoutCategoryType::Obligation);

        for (m, d, gross, net) in [(3, 1, 1200, 1000), (3, 9, 2500, 2000), (4, 3, 1100, 1000)] {
            storage
                .income
                .upsert(IncomeEntry::new(
                    date(m, d),
                    source.id,
                    Money::from_units(gross),
                    Money::from_units(net),
                ))
                .unwrap();
        }
        for (m, amount) in [(3, 800), (4, 1500)] {
            storage
                .payouts
                .upsert(Payout::new(date(m, 5), category.id, Money::from_units(amount)))
                .unwrap();
        }
        storage.sources.upsert(source).unwrap();
        storage.categories.upsert(category).unwrap();
    }

    #[test]
    fn test_generate_month() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let report = DashboardReport::generate(&storage, MonthPeriod::new(2025, 3).unwrap(), 5).unwrap();

        assert_eq!(report.income.total_gross, Money::from_units(3700));
        assert_eq!(report.income.total_net, Money::from_units(3000));
        assert_eq!(report.income.entry_count, 2);
        assert_eq!(report.average_net, Money::from_units(1500));
        assert_eq!(report.month_payouts, Money::from_units(800));
        assert_eq!(report.month_savings, Money::from_units(2200));

        assert_eq!(report.yearly.len(), 12);
        assert_eq!(report.yearly[2].net, Money::from_units(3000));
        assert_eq!(report.yearly[3].payouts, Money::from_units(1500));
        assert_eq!(report.yearly[0].gross, Money::zero());

        assert_eq!(report.recent.len(), 2);
        assert_eq!(report.recent[0].date, date(3, 9));
        assert_eq!(report.recent[0].source_name(), "Day Job");
    }

    #[test]
    fn test_recent_scoped_to_selected_month() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);
        let source_id = storage.sources.get_all().unwrap()[0].id;
        storage
            .income
            .upsert(IncomeEntry::new(
                date(12, 20),
                source_id,
                Money::from_units(500),
                Money::from_units(500),
            ))
            .unwrap();

        let report = DashboardReport::generate(&storage, MonthPeriod::new(2025, 3).unwrap(), 5).unwrap();
        assert_eq!(report.recent.len(), 2);
        assert!(report.recent.iter().all(|e| e.month == 3 && e.year == 2025));
    }

    #[test]
    fn test_savings_floored_when_payouts_exceed_income() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let report = DashboardReport::generate(&storage, MonthPeriod::new(2025, 4).unwrap(), 5).unwrap();
        assert_eq!(report.month_savings, Money::zero());
        assert_eq!(report.savings_share(), 0.0);
        assert_eq!(report.payout_share(), 1.0);
        let output = report.format_terminal("₱");
        assert!(output.contains("(100%)"));
        assert!(!output.contains("150%"));
    }

    #[test]
    fn test_empty_month() {
        let (_temp, storage) = create_test_storage();

        let report = DashboardReport::generate(&storage, MonthPeriod::new(2025, 1).unwrap(), 5).unwrap();
        assert_eq!(report.average_net, Money::zero());
        assert_eq!(report.payout_share(), 0.0);

        let output = report.format_terminal("₱");
        assert!(output.contains("Dashboard: January 2025"));
        assert!(output.contains("(none)"));
    }

    #[test]
    fn test_recent_limit() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let report = DashboardReport::generate(&storage, MonthPeriod::new(2025, 3).unwrap(), 1).unwrap();
        assert_eq!(report.recent.len(), 1);
    }
}
