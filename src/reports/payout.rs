//! Payout Report
//!
//! Lists payouts for a year or month with their categories, and breaks the
//! total down per category.

use std::io::Write;

use crate::error::{TallyError, TallyResult};
use crate::models::{month_name, Money, Payout};
use crate::services::{payout::group_by_category, CategoryTotal, PayoutService};
use crate::storage::Storage;

use super::savings::plain;

/// Payout Report
#[derive(Debug, Clone)]
pub struct PayoutReport {
    pub year: i32,
    pub month: Option<u32>,
    /// Payouts in the period, newest first
    pub payouts: Vec<Payout>,
    pub total_amount: Money,
    /// Sum of payouts already marked paid
    pub paid_amount: Money,
    pub by_category: Vec<CategoryTotal>,
}

impl PayoutReport {
    pub fn generate(storage: &Storage, year: i32, month: Option<u32>) -> TallyResult<Self> {
        let payouts = PayoutService::new(storage).list(Some(year), month)?;

        let total_amount: Money = payouts.iter().map(|p| p.amount).sum();
        let paid_amount: Money = payouts
            .iter()
            .filter(|p| p.status.is_paid())
            .map(|p| p.amount)
            .sum();
        let by_category = group_by_category(&payouts);

        Ok(Self {
            year,
            month,
            payouts,
            total_amount,
            paid_amount,
            by_category,
        })
    }

    /// Amount not yet paid
    pub fn outstanding_amount(&self) -> Money {
        self.total_amount - self.paid_amount
    }

    fn title(&self) -> String {
        match self.month {
            Some(month) => format!("{} {}", month_name(month), self.year),
            None => self.year.to_string(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str(&format!("Payout Report: {}\n", self.title()));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.payouts.is_empty() {
            output.push_str("No payouts recorded for this period.\n");
            return output;
        }

        output.push_str(&format!("{:<20} {:>18}\n", "Total:", money(self.total_amount)));
        output.push_str(&format!("{:<20} {:>18}\n", "Paid:", money(self.paid_amount)));
        output.push_str(&format!("{:<20} {:>18}\n", "Outstanding:", money(self.outstanding_amount())));

        output.push_str("\nBy category\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for category in &self.by_category {
            let share = category.total.ratio_of(self.total_amount) * 100.0;
            output.push_str(&format!(
                "  {:<24} {:>16} {:>6.1}%  ({} payout{})\n",
                category.name,
                money(category.total),
                share,
                category.count,
                if category.count == 1 { "" } else { "s" }
            ));
            if let (Some(target), Some(remaining)) = (category.target_amount, category.remaining_target()) {
                output.push_str(&format!(
                    "    target {}, remaining {}\n",
                    money(target),
                    money(remaining)
                ));
            }
        }

        output.push_str("\nPayouts\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for payout in &self.payouts {
            output.push_str(&format!(
                "  {} {:<24} {:>16} {}\n",
                payout.date,
                payout.category_name(),
                money(payout.amount),
                payout.status
            ));
        }

        output
    }

    /// Export one row per payout
    pub fn export_csv<W: Write>(&self, writer: W) -> TallyResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Date", "Category", "Amount", "Status", "Due Date", "Notes"])
            .map_err(|e| TallyError::Export(e.to_string()))?;

        for payout in &self.payouts {
            csv_writer
                .write_record([
                    payout.date.to_string(),
                    payout.category_name().to_string(),
                    plain(payout.amount),
                    payout.status.to_string(),
                    payout.due_date.map(|d| d.to_string()).unwrap_or_default(),
                    payout.notes.clone().unwrap_or_default(),
                ])
                .map_err(|e| TallyError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| TallyError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{PayoutCategory, PayoutCategoryType, PayoutStatus};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn seed(storage: &Storage) {
        let rent = PayoutCategory::new("Rent", PayoutCategoryType::Obligation);
        let mut bills = PayoutCategory::new("Bills", PayoutCategoryType::Expense);
        bills.set_target(Some(Money::from_units(1000)));

        let date = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
        let mut paid = Payout::new(date(3, 1), rent.id, Money::from_units(800));
        paid.set_status(PayoutStatus::Paid);
        storage.payouts.upsert(paid).unwrap();
        storage
            .payouts
            .upsert(Payout::new(date(3, 10), bills.id, Money::from_units(300)))
            .unwrap();
        storage
            .payouts
            .upsert(Payout::new(date(3, 20), bills.id, Money::from_units(200)))
            .unwrap();
        storage
            .payouts
            .upsert(Payout::new(date(4, 2), rent.id, Money::from_units(800)))
            .unwrap();

        storage.categories.upsert(rent).unwrap();
        storage.categories.upsert(bills).unwrap();
    }

    #[test]
    fn test_generate_month() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let report = PayoutReport::generate(&storage, 2025, Some(3)).unwrap();

        assert_eq!(report.payouts.len(), 3);
        assert_eq!(report.total_amount, Money::from_units(1300));
        assert_eq!(report.paid_amount, Money::from_units(800));
        assert_eq!(report.outstanding_amount(), Money::from_units(500));

        assert_eq!(report.by_category.len(), 2);
        assert_eq!(report.by_category[0].name, "Rent");
        assert_eq!(report.by_category[1].name, "Bills");
        assert_eq!(report.by_category[1].count, 2);
        assert_eq!(
            report.by_category[1].remaining_target(),
            Some(Money::from_units(500))
        );
    }

    #[test]
    fn test_generate_year() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let report = PayoutReport::generate(&storage, 2025, None).unwrap();
        assert_eq!(report.payouts.len(), 4);
        assert_eq!(report.by_category[0].total, Money::from_units(1600));
    }

    #[test]
    fn test_format_terminal() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let report = PayoutReport::generate(&storage, 2025, Some(3)).unwrap();
        let output = report.format_terminal("₱");
        assert!(output.contains("Payout Report: March 2025"));
        assert!(output.contains("₱1,300.00"));
        assert!(output.contains("remaining ₱500.00"));

        let empty = PayoutReport::generate(&storage, 2024, None).unwrap();
        assert!(empty.format_terminal("₱").contains("No payouts recorded"));
    }

    #[test]
    fn test_export_csv() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let report = PayoutReport::generate(&storage, 2025, Some(4)).unwrap();
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Date,Category,Amount,Status,Due Date,Notes");
        assert!(lines[1].starts_with("2025-04-02,Rent,800.00,"));
    }
}
