//! Payout category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::PayoutCategory;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    category_type: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Color")]
    color: String,
}

/// Format categories as a table
pub fn format_category_list(categories: &[PayoutCategory], symbol: &str) -> String {
    if categories.is_empty() {
        return "No payout categories found. Run 'tally init' to create the defaults.".to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.short(),
        name: match &c.icon {
            Some(icon) => format!("{} {}", icon, c.name),
            None => c.name.clone(),
        },
        category_type: c.category_type.to_string(),
        target: c
            .target_amount
            .map(|t| t.format_with_symbol(symbol))
            .unwrap_or_else(|| "-".to_string()),
        color: c.color.clone(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

pub fn format_category_details(category: &PayoutCategory, payout_count: usize, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Payout category: {}\n", category.name));
    output.push_str(&format!("  Type:     {}\n", category.category_type));
    output.push_str(&format!("  ID:       {}\n", category.id));
    output.push_str(&format!("  Color:    {}\n", category.color));
    if let Some(icon) = &category.icon {
        output.push_str(&format!("  Icon:     {}\n", icon));
    }
    if let Some(target) = category.target_amount {
        output.push_str(&format!("  Target:   {}\n", target.format_with_symbol(symbol)));
    }
    output.push_str(&format!("  Payouts:  {}\n", payout_count));

    output
}
