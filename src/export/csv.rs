//! CSV Export functionality
//!
//! Exports income entries and payouts, with their joined source and category
//! names, to spreadsheet-friendly CSV.

use std::io::Write;

use crate::error::{TallyError, TallyResult};
use crate::reports::savings::plain;
use crate::services::{IncomeService, PayoutService};
use crate::storage::Storage;

fn export_err(e: ::csv::Error) -> TallyError {
    TallyError::Export(e.to_string())
}

/// Export income entries, optionally limited to one year
pub fn export_income_csv<W: Write>(
    storage: &Storage,
    writer: &mut W,
    year: Option<i32>,
) -> TallyResult<()> {
    let entries = IncomeService::new(storage).list(year, None)?;
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "ID",
            "Date",
            "Year",
            "Month",
            "Week",
            "Source",
            "Frequency",
            "Gross",
            "Net",
            "Currency",
            "Notes",
        ])
        .map_err(export_err)?;

    for entry in &entries {
        csv_writer
            .write_record([
                entry.id.to_string(),
                entry.date.to_string(),
                entry.year.to_string(),
                entry.month.to_string(),
                entry.week.to_string(),
                entry.source_name().to_string(),
                entry.payment_frequency.to_string(),
                plain(entry.gross_amount),
                plain(entry.net_amount),
                entry.currency.clone(),
                entry.notes.clone().unwrap_or_default(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))?;
    Ok(())
}

/// Export payouts, optionally limited to one year
pub fn export_payouts_csv<W: Write>(
    storage: &Storage,
    writer: &mut W,
    year: Option<i32>,
) -> TallyResult<()> {
    let payouts = PayoutService::new(storage).list(year, None)?;
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "ID", "Date", "Year", "Month", "Category", "Amount", "Status", "Due Date", "Notes",
        ])
        .map_err(export_err)?;

    for payout in &payouts {
        csv_writer
            .write_record([
                payout.id.to_string(),
                payout.date.to_string(),
                payout.year.to_string(),
                payout.month.to_string(),
                payout.category_name().to_string(),
                plain(payout.amount),
                payout.status.to_string(),
                payout.due_date.map(|d| d.to_string()).unwrap_or_default(),
                payout.notes.clone().unwrap_or_default(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{
        IncomeEntry, IncomeSource, IncomeSourceType, Money, Payout, PayoutCategory,
        PayoutCategoryType,
    };
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_export_income_csv() {
        let (_temp_dir, storage) = create_test_storage();

        let source = IncomeSource::new("Freelance, Design", IncomeSourceType::Freelance);
        let mut entry = IncomeEntry::new(
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            source.id,
            Money::from_units(2500),
            Money::from_units(2000),
        );
        entry.set_notes(Some("logo job".into()));
        storage.income.upsert(entry).unwrap();
        storage
            .income
            .upsert(IncomeEntry::new(
                NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
                source.id,
                Money::from_units(100),
                Money::from_units(100),
            ))
            .unwrap();
        storage.sources.upsert(source).unwrap();

        let mut output = Vec::new();
        export_income_csv(&storage, &mut output, Some(2025)).unwrap();
        let csv = String::from_utf8(output).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID,Date,Year,Month,Week,Source"));
        assert!(lines[1].contains(",2025-03-09,2025,3,2,\"Freelance, Design\","));
        assert!(lines[1].contains("2500.00,2000.00,PHP,logo job"));
    }

    #[test]
    fn test_export_payouts_csv() {
        let (_temp_dir, storage) = create_test_storage();

        let category = PayoutCategory::new("Bills", PayoutCategoryType::Expense);
        storage
            .payouts
            .upsert(Payout::new(
                NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
                category.id,
                Money::from_cents(123456),
            ))
            .unwrap();
        storage.categories.upsert(category).unwrap();

        let mut output = Vec::new();
        export_payouts_csv(&storage, &mut output, None).unwrap();
        let csv = String::from_utf8(output).unwrap();

        assert!(csv.contains("Category,Amount,Status"));
        assert!(csv.contains(",2025-04-02,2025,4,Bills,1234.56,Pending,,"));
    }
}
