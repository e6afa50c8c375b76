//! Savings aggregation engine
//!
//! Pure functions that turn flat income and payout records into per-month
//! summaries: net income bucketed by week-of-month, payouts summed per month,
//! and savings derived from the two. Nothing here performs I/O or keeps
//! state between calls; every call builds a fresh result.
//!
//! Savings are `max(0, net income - payouts)` unless a caller explicitly asks
//! for the fixed-rate definition through [`SavingsFormula::FixedRate`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{month_name, IncomeEntry, Money, Payout, PayoutStatus};

/// The slice of an income entry the engine needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeRecord {
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub net_amount: Money,
    pub gross_amount: Money,
}

impl From<&IncomeEntry> for IncomeRecord {
    fn from(entry: &IncomeEntry) -> Self {
        Self {
            week: entry.week,
            month: entry.month,
            year: entry.year,
            net_amount: entry.net_amount,
            gross_amount: entry.gross_amount,
        }
    }
}

/// The slice of a payout the engine needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutRecord {
    pub month: u32,
    pub year: i32,
    pub amount: Money,
    /// Carried for callers; never affects sums
    pub status: PayoutStatus,
}

impl From<&Payout> for PayoutRecord {
    fn from(payout: &Payout) -> Self {
        Self {
            month: payout.month,
            year: payout.year,
            amount: payout.amount,
            status: payout.status,
        }
    }
}

/// Net income received in one week-of-month bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyBucket {
    pub week: u32,
    pub net_amount: Money,
}

/// Income, payouts, and savings for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    /// Ascending by week, one bucket per distinct week
    pub weeks: Vec<WeeklyBucket>,
    pub total_net_amount: Money,
    pub total_payouts: Money,
    pub total_savings: Money,
}

impl MonthlySummary {
    /// Net income left after savings are set aside
    pub fn remaining(&self) -> Money {
        self.total_net_amount - self.total_savings
    }

    /// Share of the month's net income received in `bucket`
    pub fn week_share(&self, bucket: &WeeklyBucket) -> f64 {
        week_share_of_month(bucket.net_amount, self.total_net_amount)
    }

    pub fn savings_rate(&self) -> f64 {
        savings_rate_actual(self)
    }
}

/// How savings are derived from a month's income and payouts
///
/// `IncomeMinusPayouts` is the standard definition. `FixedRate` sets aside a
/// fixed fraction of net income regardless of payouts and is only used when
/// selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SavingsFormula {
    #[default]
    IncomeMinusPayouts,
    FixedRate {
        rate: f64,
    },
}

impl SavingsFormula {
    /// Savings for a period with the given totals
    pub fn savings(&self, net_income: Money, payouts: Money) -> Money {
        match self {
            Self::IncomeMinusPayouts => (net_income - payouts).floor_zero(),
            Self::FixedRate { rate } => net_income.scale(*rate).floor_zero(),
        }
    }

    pub fn validate(&self) -> Result<(), SavingsFormulaError> {
        match self {
            Self::IncomeMinusPayouts => Ok(()),
            Self::FixedRate { rate } if rate.is_finite() && (0.0..=1.0).contains(rate) => Ok(()),
            Self::FixedRate { rate } => Err(SavingsFormulaError::RateOutOfRange(*rate)),
        }
    }
}

impl fmt::Display for SavingsFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncomeMinusPayouts => write!(f, "net income - payouts"),
            Self::FixedRate { rate } => write!(f, "{:.0}% of net income", rate * 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SavingsFormulaError {
    RateOutOfRange(f64),
}

impl fmt::Display for SavingsFormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateOutOfRange(rate) => {
                write!(f, "Savings rate must be between 0 and 1, got {}", rate)
            }
        }
    }
}

impl std::error::Error for SavingsFormulaError {}

/// Summarize every month of `year` that has at least one income record
///
/// Records from other years are ignored, so callers may pass unfiltered
/// snapshots. Months that only have payouts are not emitted.
pub fn summarize_year(
    income: &[IncomeRecord],
    payouts: &[PayoutRecord],
    year: i32,
) -> Vec<MonthlySummary> {
    summarize_year_with(income, payouts, year, SavingsFormula::IncomeMinusPayouts)
}

/// [`summarize_year`] with an explicit savings formula
pub fn summarize_year_with(
    income: &[IncomeRecord],
    payouts: &[PayoutRecord],
    year: i32,
    formula: SavingsFormula,
) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<u32, BTreeMap<u32, Money>> = BTreeMap::new();
    for record in income.iter().filter(|r| r.year == year) {
        *months
            .entry(record.month)
            .or_default()
            .entry(record.week)
            .or_default() += record.net_amount;
    }

    let mut payout_totals: BTreeMap<u32, Money> = BTreeMap::new();
    for record in payouts.iter().filter(|r| r.year == year) {
        *payout_totals.entry(record.month).or_default() += record.amount;
    }

    months
        .into_iter()
        .map(|(month, weeks)| {
            let payouts = payout_totals.get(&month).copied().unwrap_or_default();
            build_summary(year, month, weeks, payouts, formula)
        })
        .collect()
}

/// Summarize a single month; `None` when it has no income records
pub fn summarize_month(
    income: &[IncomeRecord],
    payouts: &[PayoutRecord],
    year: i32,
    month: u32,
) -> Option<MonthlySummary> {
    summarize_month_with(income, payouts, year, month, SavingsFormula::IncomeMinusPayouts)
}

/// [`summarize_month`] with an explicit savings formula
pub fn summarize_month_with(
    income: &[IncomeRecord],
    payouts: &[PayoutRecord],
    year: i32,
    month: u32,
    formula: SavingsFormula,
) -> Option<MonthlySummary> {
    let in_month = |y: i32, m: u32| y == year && m == month;

    let mut weeks: BTreeMap<u32, Money> = BTreeMap::new();
    for record in income.iter().filter(|r| in_month(r.year, r.month)) {
        *weeks.entry(record.week).or_default() += record.net_amount;
    }

    if weeks.is_empty() {
        return None;
    }

    let total_payouts: Money = payouts
        .iter()
        .filter(|r| in_month(r.year, r.month))
        .map(|r| r.amount)
        .sum();

    Some(build_summary(year, month, weeks, total_payouts, formula))
}

fn build_summary(
    year: i32,
    month: u32,
    weeks: BTreeMap<u32, Money>,
    total_payouts: Money,
    formula: SavingsFormula,
) -> MonthlySummary {
    let weeks: Vec<WeeklyBucket> = weeks
        .into_iter()
        .map(|(week, net_amount)| WeeklyBucket { week, net_amount })
        .collect();
    let total_net_amount: Money = weeks.iter().map(|w| w.net_amount).sum();

    MonthlySummary {
        month,
        year,
        month_name: month_name(month).to_string(),
        weeks,
        total_net_amount,
        total_payouts,
        total_savings: formula.savings(total_net_amount, total_payouts),
    }
}

/// `week_net / month_total_net`, or 0.0 when the month total is zero
pub fn week_share_of_month(week_net: Money, month_total_net: Money) -> f64 {
    week_net.ratio_of(month_total_net)
}

/// `total_savings / total_net_amount`, or 0.0 when there is no net income
pub fn savings_rate_actual(summary: &MonthlySummary) -> f64 {
    summary.total_savings.ratio_of(summary.total_net_amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn income(month: u32, week: u32, net: i64) -> IncomeRecord {
        IncomeRecord {
            week,
            month,
            year: 2025,
            net_amount: Money::from_units(net),
            gross_amount: Money::from_units(net),
        }
    }

    fn payout(month: u32, amount: i64) -> PayoutRecord {
        PayoutRecord {
            month,
            year: 2025,
            amount: Money::from_units(amount),
            status: PayoutStatus::Pending,
        }
    }

    #[test]
    fn test_march_example() {
        let income = vec![income(3, 1, 1000), income(3, 2, 2000), income(3, 1, 500)];
        let payouts = vec![payout(3, 300), payout(3, 500)];

        let months = summarize_year(&income, &payouts, 2025);
        assert_eq!(months.len(), 1);

        let march = &months[0];
        assert_eq!(march.month_name, "March");
        assert_eq!(
            march.weeks,
            vec![
                WeeklyBucket { week: 1, net_amount: Money::from_units(1500) },
                WeeklyBucket { week: 2, net_amount: Money::from_units(2000) },
            ]
        );
        assert_eq!(march.total_net_amount, Money::from_units(3500));
        assert_eq!(march.total_payouts, Money::from_units(800));
        assert_eq!(march.total_savings, Money::from_units(2700));
        assert_eq!(march.remaining(), Money::from_units(800));
    }

    #[test]
    fn test_extreme_amounts_saturate() {
        let huge = IncomeRecord {
            net_amount: Money::from_cents(i64::MAX - 1),
            gross_amount: Money::from_cents(i64::MAX - 1),
            ..income(6, 1, 0)
        };
        let months = summarize_year(&[huge, huge], &[payout(6, 100)], 2025);
        assert_eq!(months[0].total_net_amount, Money::from_cents(i64::MAX));
        assert!(months[0].total_savings.is_positive());
    }

    #[test]
    fn test_savings_floored_at_zero() {
        let months = summarize_year(&[income(4, 1, 1000)], &[payout(4, 1500)], 2025);
        assert_eq!(months[0].total_savings, Money::zero());
        assert_eq!(months[0].total_payouts, Money::from_units(1500));
    }

    #[test]
    fn test_payout_only_month_omitted() {
        assert!(summarize_year(&[], &[payout(5, 100)], 2025).is_empty());

        let months = summarize_year(&[income(1, 1, 10)], &[payout(2, 100)], 2025);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, 1);
        assert_eq!(months[0].total_payouts, Money::zero());
    }

    #[test]
    fn test_months_and_weeks_sorted() {
        let income = vec![
            income(11, 4, 1),
            income(2, 3, 1),
            income(11, 1, 1),
            income(2, 1, 1),
            income(7, 5, 1),
        ];
        let months = summarize_year(&income, &[], 2025);

        let order: Vec<u32> = months.iter().map(|m| m.month).collect();
        assert_eq!(order, vec![2, 7, 11]);

        for month in &months {
            let weeks: Vec<u32> = month.weeks.iter().map(|w| w.week).collect();
            let mut sorted = weeks.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(weeks, sorted);
        }
    }

    #[test]
    fn test_other_years_ignored() {
        let mut last_year = income(6, 2, 9999);
        last_year.year = 2024;
        let mut old_payout = payout(6, 50);
        old_payout.year = 2024;

        let months = summarize_year(&[last_year, income(6, 2, 100)], &[old_payout], 2025);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].total_net_amount, Money::from_units(100));
        assert_eq!(months[0].total_payouts, Money::zero());
    }

    #[test]
    fn test_totals_match_buckets_and_records() {
        let mut records = Vec::new();
        for i in 0..60u32 {
            records.push(income(i % 12 + 1, i % 5 + 1, i64::from(i) * 37 + 5));
        }
        let payouts: Vec<_> = (1..=12).map(|m| payout(m, i64::from(m) * 400)).collect();

        for summary in summarize_year(&records, &payouts, 2025) {
            let bucket_total: Money = summary.weeks.iter().map(|w| w.net_amount).sum();
            let record_total: Money = records
                .iter()
                .filter(|r| r.month == summary.month)
                .map(|r| r.net_amount)
                .sum();
            assert_eq!(summary.total_net_amount, bucket_total);
            assert_eq!(summary.total_net_amount, record_total);
            assert!(!summary.total_savings.is_negative());
        }
    }

    #[test]
    fn test_idempotent() {
        let income = vec![income(3, 1, 1000), income(8, 2, 2000)];
        let payouts = vec![payout(3, 100), payout(9, 5)];
        assert_eq!(
            summarize_year(&income, &payouts, 2025),
            summarize_year(&income, &payouts, 2025)
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(summarize_year(&[], &[], 2025).is_empty());
    }

    #[test]
    fn test_summarize_month() {
        let income = vec![income(3, 1, 1000), income(3, 1, 500), income(4, 2, 2000)];
        let payouts = vec![payout(3, 800), payout(4, 5000)];

        let march = summarize_month(&income, &payouts, 2025, 3).unwrap();
        assert_eq!(march.total_net_amount, Money::from_units(1500));
        assert_eq!(march.total_savings, Money::from_units(700));

        assert_eq!(summarize_month(&income, &payouts, 2025, 5), None);
        assert_eq!(summarize_month(&[], &payouts, 2025, 3), None);
    }

    #[test]
    fn test_month_matches_year_view() {
        let income = vec![income(3, 1, 1000), income(3, 4, 250), income(4, 2, 2000)];
        let payouts = vec![payout(3, 800), payout(4, 5000)];

        let from_year = summarize_year(&income, &payouts, 2025);
        let april = summarize_month(&income, &payouts, 2025, 4).unwrap();
        assert_eq!(from_year[1], april);
    }

    #[test]
    fn test_zero_net_week_share_is_zero() {
        let months = summarize_year(&[income(1, 1, 0)], &[], 2025);
        let january = &months[0];
        let share = january.week_share(&january.weeks[0]);
        assert_eq!(share, 0.0);
        assert!(!share.is_nan());
        assert_eq!(january.savings_rate(), 0.0);
    }

    #[test]
    fn test_shares_and_rate() {
        let months = summarize_year(&[income(3, 1, 1000), income(3, 2, 3000)], &[payout(3, 1000)], 2025);
        let march = &months[0];
        assert_eq!(march.week_share(&march.weeks[0]), 0.25);
        assert_eq!(march.week_share(&march.weeks[1]), 0.75);
        assert_eq!(savings_rate_actual(march), 0.75);
    }

    #[test]
    fn test_fixed_rate_formula_ignores_payouts() {
        let formula = SavingsFormula::FixedRate { rate: 0.4 };
        let months = summarize_year_with(&[income(3, 1, 1000)], &[payout(3, 5000)], 2025, formula);
        assert_eq!(months[0].total_savings, Money::from_units(400));
        assert_eq!(months[0].total_payouts, Money::from_units(5000));
    }

    #[test]
    fn test_formula_validation() {
        assert!(SavingsFormula::IncomeMinusPayouts.validate().is_ok());
        assert!(SavingsFormula::FixedRate { rate: 0.0 }.validate().is_ok());
        assert!(SavingsFormula::FixedRate { rate: 1.0 }.validate().is_ok());
        assert!(SavingsFormula::FixedRate { rate: -0.1 }.validate().is_err());
        assert!(SavingsFormula::FixedRate { rate: f64::NAN }.validate().is_err());
    }

    #[test]
    fn test_formula_serialization() {
        let json = serde_json::to_string(&SavingsFormula::FixedRate { rate: 0.25 }).unwrap();
        assert_eq!(json, r#"{"kind":"fixed_rate","rate":0.25}"#);
        let default: SavingsFormula =
            serde_json::from_str(r#"{"kind":"income_minus_payouts"}"#).unwrap();
        assert_eq!(default, SavingsFormula::IncomeMinusPayouts);
    }
}
