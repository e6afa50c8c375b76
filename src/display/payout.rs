//! Payout display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Money, Payout};
use crate::services::{CategoryTotal, MonthPayoutTotal};

use super::report::{format_percentage, truncate};

#[derive(Tabled)]
struct PayoutRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Due")]
    due: String,
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Target left")]
    remaining: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: &'static str,
    #[tabled(rename = "Payouts")]
    total: String,
}

/// Format payouts as a table with total and paid lines
pub fn format_payout_list(payouts: &[Payout], symbol: &str, date_format: &str) -> String {
    if payouts.is_empty() {
        return "No payouts found.".to_string();
    }

    let rows = payouts.iter().map(|p| PayoutRow {
        id: p.id.short(),
        date: p.date.format(date_format).to_string(),
        category: truncate(p.category_name(), 24),
        amount: p.amount.format_with_symbol(symbol),
        status: p.status.to_string(),
        due: p
            .due_date
            .map(|d| d.format(date_format).to_string())
            .unwrap_or_default(),
    });

    let total: Money = payouts.iter().map(|p| p.amount).sum();
    let paid: Money = payouts
        .iter()
        .filter(|p| p.status.is_paid())
        .map(|p| p.amount)
        .sum();

    format!(
        "{}\nTotal {}  Paid {}",
        Table::new(rows).with(Style::psql()),
        total.format_with_symbol(symbol),
        paid.format_with_symbol(symbol)
    )
}

pub fn format_payout_details(payout: &Payout, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Payout: {}\n", payout.id));
    output.push_str(&format!("  Date:      {}\n", payout.date));
    output.push_str(&format!("  Category:  {}\n", payout.category_name()));
    output.push_str(&format!("  Amount:    {}\n", payout.amount.format_with_symbol(symbol)));
    output.push_str(&format!("  Status:    {}\n", payout.status));
    if let Some(due) = payout.due_date {
        output.push_str(&format!("  Due:       {}\n", due));
    }
    if let Some(notes) = &payout.notes {
        output.push_str(&format!("  Notes:     {}\n", notes));
    }

    output
}

/// Per-category totals for a month
pub fn format_category_breakdown(totals: &[CategoryTotal], symbol: &str) -> String {
    if totals.is_empty() {
        return "No payouts in this month.".to_string();
    }

    let grand_total: Money = totals.iter().map(|t| t.total).sum();
    let rows = totals.iter().map(|t| BreakdownRow {
        name: t.name.clone(),
        count: t.count,
        total: t.total.format_with_symbol(symbol),
        paid: t.paid.format_with_symbol(symbol),
        share: format_percentage(t.total.ratio_of(grand_total)),
        remaining: t
            .remaining_target()
            .map(|r| r.format_with_symbol(symbol))
            .unwrap_or_else(|| "-".to_string()),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

/// Twelve-month payout totals
pub fn format_yearly_totals(totals: &[MonthPayoutTotal], symbol: &str) -> String {
    let rows = totals.iter().map(|t| MonthRow {
        month: t.month_name,
        total: t.total_payouts.format_with_symbol(symbol),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PayoutCategoryId, PayoutStatus};
    use chrono::NaiveDate;

    fn payout(amount: i64, status: PayoutStatus) -> Payout {
        let mut payout = Payout::new(
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            PayoutCategoryId::new(),
            Money::from_units(amount),
        );
        payout.set_status(status);
        payout
    }

    #[test]
    fn test_format_payout_list() {
        let payouts = vec![payout(300, PayoutStatus::Paid), payout(500, PayoutStatus::Pending)];
        let output = format_payout_list(&payouts, "₱", "%Y-%m-%d");

        assert!(output.contains("Uncategorized"));
        assert!(output.contains("Total ₱800.00  Paid ₱300.00"));
    }

    #[test]
    fn test_format_category_breakdown() {
        let totals = vec![CategoryTotal {
            category_id: PayoutCategoryId::new(),
            name: "Bills".into(),
            category_type: None,
            target_amount: Some(Money::from_units(1000)),
            total: Money::from_units(400),
            paid: Money::zero(),
            count: 2,
        }];

        let output = format_category_breakdown(&totals, "₱");
        assert!(output.contains("Bills"));
        assert!(output.contains("100%"));
        assert!(output.contains("₱600.00"));
        assert!(format_category_breakdown(&[], "₱").contains("No payouts"));
    }
}
