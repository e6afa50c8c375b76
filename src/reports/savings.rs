//! Savings Report
//!
//! Per-month week breakdown of net income with payouts and savings, plus
//! yearly totals.

use std::io::Write;

use crate::error::{TallyError, TallyResult};
use crate::models::{Money, MonthPeriod};
use crate::services::SavingsService;
use crate::storage::LedgerReader;

use super::summary::{MonthlySummary, SavingsFormula};

/// Savings Report for one year
#[derive(Debug, Clone)]
pub struct SavingsReport {
    pub year: i32,
    pub formula: SavingsFormula,
    /// Months with income, ascending
    pub months: Vec<MonthlySummary>,
    pub total_net: Money,
    pub total_payouts: Money,
    pub total_savings: Money,
    /// Net income not set aside as savings
    pub total_remaining: Money,
}

impl SavingsReport {
    /// Generate the report, optionally narrowed to a single month
    pub fn generate<L: LedgerReader + ?Sized>(
        reader: &L,
        year: i32,
        month: Option<u32>,
        formula: SavingsFormula,
    ) -> TallyResult<Self> {
        let service = SavingsService::with_formula(reader, formula);
        let months = match month {
            Some(month) => service.summarize_month(year, month)?.into_iter().collect(),
            None => service.summarize_year(year)?,
        };

        let total_net: Money = months.iter().map(|m| m.total_net_amount).sum();
        let total_payouts: Money = months.iter().map(|m| m.total_payouts).sum();
        let total_savings: Money = months.iter().map(|m| m.total_savings).sum();

        Ok(Self {
            year,
            formula,
            months,
            total_net,
            total_payouts,
            total_savings,
            total_remaining: total_net - total_savings,
        })
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    /// Savings as a fraction of net income across the report
    pub fn savings_rate(&self) -> f64 {
        self.total_savings.ratio_of(self.total_net)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str(&format!("Savings Report: {} ({})\n", self.year, self.formula));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No income recorded for this period.\n");
            return output;
        }

        output.push_str(&format!("{:<20} {:>18}\n", "Net income:", money(self.total_net)));
        output.push_str(&format!("{:<20} {:>18}\n", "Payouts:", money(self.total_payouts)));
        output.push_str(&format!(
            "{:<20} {:>18} ({:.1}%)\n",
            "Savings:",
            money(self.total_savings),
            self.savings_rate() * 100.0
        ));
        output.push_str(&format!("{:<20} {:>18}\n", "Remaining:", money(self.total_remaining)));
        output.push_str(&format!("{:<20} {:>18}\n", "Months:", self.month_count()));

        for month in &self.months {
            let title = MonthPeriod::new(month.year, month.month)
                .map(|p| p.to_string())
                .unwrap_or_else(|| month.month_name.clone());

            output.push_str(&format!("\n{}\n", title));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            output.push_str(&format!("  {:<10} {:>18} {:>10}\n", "Week", "Net", "Share"));

            for bucket in &month.weeks {
                output.push_str(&format!(
                    "  {:<10} {:>18} {:>9.1}%\n",
                    format!("Week {}", bucket.week),
                    money(bucket.net_amount),
                    month.week_share(bucket) * 100.0
                ));
            }

            output.push_str(&format!("  {:<10} {:>18}\n", "Net", money(month.total_net_amount)));
            output.push_str(&format!("  {:<10} {:>18}\n", "Payouts", money(month.total_payouts)));
            output.push_str(&format!(
                "  {:<10} {:>18} {:>9.1}%\n",
                "Savings",
                money(month.total_savings),
                month.savings_rate() * 100.0
            ));
        }

        output
    }

    /// Export one row per week bucket
    pub fn export_csv<W: Write>(&self, writer: W) -> TallyResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record([
                "Year",
                "Month",
                "Month Name",
                "Week",
                "Week Net",
                "Week Share",
                "Month Net",
                "Month Payouts",
                "Month Savings",
            ])
            .map_err(|e| TallyError::Export(e.to_string()))?;

        for month in &self.months {
            for bucket in &month.weeks {
                csv_writer
                    .write_record([
                        month.year.to_string(),
                        month.month.to_string(),
                        month.month_name.clone(),
                        bucket.week.to_string(),
                        plain(bucket.net_amount),
                        format!("{:.4}", month.week_share(bucket)),
                        plain(month.total_net_amount),
                        plain(month.total_payouts),
                        plain(month.total_savings),
                    ])
                    .map_err(|e| TallyError::Export(e.to_string()))?;
            }
        }

        csv_writer
            .flush()
            .map_err(|e| TallyError::Export(e.to_string()))?;
        Ok(())
    }
}

/// Two-decimal amount without grouping or symbol
pub(crate) fn plain(amount: Money) -> String {
    format!("{:.2}", amount.as_units_f64())
}
