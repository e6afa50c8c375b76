//! Income entry display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{IncomeEntry, Money};
use crate::services::IncomeTotals;

use super::report::truncate;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Wk")]
    week: u32,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

/// Format entries as a table followed by their totals
pub fn format_entry_list(entries: &[IncomeEntry], symbol: &str, date_format: &str) -> String {
    if entries.is_empty() {
        return "No income entries found.".to_string();
    }

    let rows = entries.iter().map(|e| EntryRow {
        id: e.id.short(),
        date: e.date.format(date_format).to_string(),
        week: e.week,
        source: truncate(e.source_name(), 24),
        gross: e.gross_amount.format_with_symbol(symbol),
        net: e.net_amount.format_with_symbol(symbol),
        notes: e.notes.as_deref().map(|n| truncate(n, 30)).unwrap_or_default(),
    });

    let totals = IncomeTotals::from_entries(entries);
    format!(
        "{}\n{} entr{}  gross {}  net {}",
        Table::new(rows).with(Style::psql()),
        totals.entry_count,
        if totals.entry_count == 1 { "y" } else { "ies" },
        totals.total_gross.format_with_symbol(symbol),
        totals.total_net.format_with_symbol(symbol)
    )
}

/// Format a single entry's details
pub fn format_entry_details(entry: &IncomeEntry, symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!("Income entry: {}\n", entry.id));
    output.push_str(&format!("  Date:        {}\n", entry.date));
    output.push_str(&format!(
        "  Period:      week {} of {}/{}\n",
        entry.week, entry.month, entry.year
    ));
    output.push_str(&format!("  Source:      {}\n", entry.source_name()));
    output.push_str(&format!("  Frequency:   {}\n", entry.payment_frequency));
    output.push_str(&format!("  Gross:       {}\n", money(entry.gross_amount)));
    output.push_str(&format!("  Net:         {}\n", money(entry.net_amount)));
    output.push_str(&format!("  Deductions:  {}\n", money(entry.deductions())));
    output.push_str(&format!("  Currency:    {}\n", entry.currency));
    if let Some(notes) = &entry.notes {
        output.push_str(&format!("  Notes:       {}\n", notes));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomeSourceId;
    use chrono::NaiveDate;

    fn entry(day: u32, net: i64) -> IncomeEntry {
        IncomeEntry::new(
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            IncomeSourceId::new(),
            Money::from_units(net + 200),
            Money::from_units(net),
        )
    }

    #[test]
    fn test_format_entry_list() {
        let output = format_entry_list(&[entry(1, 1000), entry(9, 2000)], "₱", "%Y-%m-%d");
        assert!(output.contains("2025-03-09"));
        assert!(output.contains("Unknown Source"));
        assert!(output.contains("2 entries"));
        assert!(output.contains("net ₱3,000.00"));
    }

    #[test]
    fn test_format_empty_list() {
        assert!(format_entry_list(&[], "₱", "%Y-%m-%d").contains("No income entries"));
    }

    #[test]
    fn test_format_entry_details() {
        let output = format_entry_details(&entry(15, 1000), "$");
        assert!(output.contains("week 3 of 3/2025"));
        assert!(output.contains("Deductions:  $200.00"));
    }
}
