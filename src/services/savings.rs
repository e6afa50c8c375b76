//! Savings service
//!
//! Fetches records through a [`LedgerReader`] and hands them to the pure
//! aggregation engine with the configured savings formula.

use tracing::debug;

use crate::error::TallyResult;
use crate::reports::summary::{self, MonthlySummary, SavingsFormula};
use crate::storage::LedgerReader;

/// Monthly savings summaries over any record source
pub struct SavingsService<'a, L: LedgerReader + ?Sized> {
    reader: &'a L,
    formula: SavingsFormula,
}

impl<'a, L: LedgerReader + ?Sized> SavingsService<'a, L> {
    /// Service using the standard income-minus-payouts definition
    pub fn new(reader: &'a L) -> Self {
        Self::with_formula(reader, SavingsFormula::default())
    }

    pub fn with_formula(reader: &'a L, formula: SavingsFormula) -> Self {
        Self { reader, formula }
    }

    pub fn formula(&self) -> SavingsFormula {
        self.formula
    }

    /// Every month of `year` with income, ascending
    pub fn summarize_year(&self, year: i32) -> TallyResult<Vec<MonthlySummary>> {
        let income = self.reader.fetch_income(year, None)?;
        let payouts = self.reader.fetch_payouts(year, None)?;
        debug!(year, income = income.len(), payouts = payouts.len(), "summarizing year");

        Ok(summary::summarize_year_with(&income, &payouts, year, self.formula))
    }

    /// One month, or `None` when it has no income
    pub fn summarize_month(&self, year: i32, month: u32) -> TallyResult<Option<MonthlySummary>> {
        let income = self.reader.fetch_income(year, Some(month))?;
        let payouts = self.reader.fetch_payouts(year, Some(month))?;

        Ok(summary::summarize_month_with(
            &income,
            &payouts,
            year,
            month,
            self.formula,
        ))
    }
}
