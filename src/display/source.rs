//! Income source display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::IncomeSource;

#[derive(Tabled)]
struct SourceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    source_type: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Format a list of sources as a table
pub fn format_source_list(sources: &[IncomeSource]) -> String {
    if sources.is_empty() {
        return "No income sources found.".to_string();
    }

    let rows = sources.iter().map(|s| SourceRow {
        id: s.id.short(),
        name: s.name.clone(),
        source_type: s.source_type.to_string(),
        color: s.color.clone(),
        status: if s.is_active { "Active" } else { "Inactive" },
    });

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format a single source's details
pub fn format_source_details(source: &IncomeSource, entry_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Income source: {}\n", source.name));
    output.push_str(&format!("  Type:     {}\n", source.source_type));
    output.push_str(&format!("  ID:       {}\n", source.id));
    output.push_str(&format!("  Color:    {}\n", source.color));
    output.push_str(&format!(
        "  Active:   {}\n",
        if source.is_active { "Yes" } else { "No" }
    ));
    output.push_str(&format!("  Entries:  {}\n", entry_count));
    output.push_str(&format!(
        "  Created:  {}\n",
        source.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomeSourceType;

    #[test]
    fn test_format_source_list() {
        let mut side = IncomeSource::new("Side Gig", IncomeSourceType::Freelance);
        side.set_active(false);
        let sources = vec![IncomeSource::new("Day Job", IncomeSourceType::Salary), side];

        let output = format_source_list(&sources);
        assert!(output.contains("Day Job"));
        assert!(output.contains("Freelance"));
        assert!(output.contains("Inactive"));
    }

    #[test]
    fn test_format_empty_list() {
        assert!(format_source_list(&[]).contains("No income sources"));
    }

    #[test]
    fn test_format_source_details() {
        let source = IncomeSource::new("Day Job", IncomeSourceType::Salary);
        let output = format_source_details(&source, 3);
        assert!(output.contains("Income source: Day Job"));
        assert!(output.contains("Entries:  3"));
    }
}
