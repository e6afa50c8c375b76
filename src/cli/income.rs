//! Income entry CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::income::{format_entry_details, format_entry_list};
use crate::error::TallyResult;
use crate::models::PaymentFrequency;
use crate::services::{CreateIncomeInput, IncomeService, IncomeUpdate, SourceService};
use crate::storage::Storage;

use super::{parse_money, today, PeriodArgs};

/// Income subcommands
#[derive(Subcommand, Debug)]
pub enum IncomeCommands {
    /// Record an income entry
    Add {
        /// Income source name or ID
        #[arg(short, long)]
        source: String,
        /// Gross amount before deductions
        #[arg(short, long)]
        gross: String,
        /// Net amount received (defaults to gross)
        #[arg(short, long)]
        net: Option<String>,
        /// Date received (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Payment frequency (weekly, bi-weekly, monthly)
        #[arg(short, long)]
        frequency: Option<PaymentFrequency>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List income entries, newest first
    List {
        #[command(flatten)]
        period: PeriodArgs,
        /// Show only the N most recent entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show entry details
    Show {
        /// Entry ID (full or short)
        entry: String,
    },

    /// Edit an entry
    Edit {
        /// Entry ID (full or short)
        entry: String,
        #[arg(short, long)]
        source: Option<String>,
        #[arg(short, long)]
        gross: Option<String>,
        #[arg(short, long)]
        net: Option<String>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        frequency: Option<PaymentFrequency>,
        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,
        /// Remove the notes
        #[arg(long)]
        clear_notes: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry ID (full or short)
        entry: String,
    },

    /// Gross/net totals for a month (defaults to the current month)
    Totals {
        #[command(flatten)]
        period: PeriodArgs,
    },
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> TallyResult<()> {
    let service = IncomeService::new(storage);
    let sources = SourceService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::Add {
            source,
            gross,
            net,
            date,
            frequency,
            notes,
        } => {
            let source = sources.resolve(&source)?;
            let gross_amount = parse_money(&gross, "gross")?;
            let net_amount = match net {
                Some(net) => parse_money(&net, "net")?,
                None => gross_amount,
            };

            let entry = service.create(CreateIncomeInput {
                date: date.unwrap_or_else(today),
                source_id: source.id,
                gross_amount,
                net_amount,
                payment_frequency: frequency,
                currency: Some(settings.currency_code.clone()),
                notes,
            })?;

            println!(
                "Recorded {} net from {} on {} (week {})",
                entry.net_amount.format_with_symbol(symbol),
                entry.source_name(),
                entry.date,
                entry.week
            );
            println!("  ID: {}", entry.id);
        }

        IncomeCommands::List { period, limit } => {
            let mut entries = service.list(period.year, period.month)?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            println!(
                "{}",
                format_entry_list(&entries, symbol, &settings.date_format)
            );
        }

        IncomeCommands::Show { entry } => {
            let entry = service.resolve(&entry)?;
            print!("{}", format_entry_details(&entry, symbol));
        }

        IncomeCommands::Edit {
            entry,
            source,
            gross,
            net,
            date,
            frequency,
            notes,
            clear_notes,
        } => {
            let entry = service.resolve(&entry)?;

            let source_id = match source {
                Some(source) => Some(sources.resolve(&source)?.id),
                None => None,
            };
            let notes = if clear_notes { Some(None) } else { notes.map(Some) };

            let changes = IncomeUpdate {
                date,
                source_id,
                gross_amount: gross.as_deref().map(|g| parse_money(g, "gross")).transpose()?,
                net_amount: net.as_deref().map(|n| parse_money(n, "net")).transpose()?,
                payment_frequency: frequency,
                notes,
            };

            let updated = service.update(entry.id, changes)?;
            println!("Updated income entry {}", updated.id.short());
        }

        IncomeCommands::Delete { entry } => {
            let entry = service.resolve(&entry)?;
            service.delete(entry.id)?;
            println!(
                "Deleted income entry {} ({} on {})",
                entry.id.short(),
                entry.net_amount.format_with_symbol(symbol),
                entry.date
            );
        }

        IncomeCommands::Totals { period } => {
            let month = period.month_or_current()?;
            let totals = service.monthly_totals(month.year, month.month)?;

            println!("Income for {}", month);
            println!("  Entries:  {}", totals.entry_count);
            println!("  Gross:    {}", totals.total_gross.format_with_symbol(symbol));
            println!("  Net:      {}", totals.total_net.format_with_symbol(symbol));
            println!("  Average:  {}", totals.average_net().format_with_symbol(symbol));
        }
    }

    Ok(())
}
