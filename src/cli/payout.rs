//! Payout CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::payout::{
    format_category_breakdown, format_payout_details, format_payout_list, format_yearly_totals,
};
use crate::error::TallyResult;
use crate::models::PayoutStatus;
use crate::services::{CategoryService, CreatePayoutInput, PayoutService, PayoutUpdate};
use crate::storage::Storage;

use super::{parse_money, today, PeriodArgs};

/// Payout subcommands
#[derive(Subcommand, Debug)]
pub enum PayoutCommands {
    /// Record a payout
    Add {
        /// Amount paid out
        amount: String,
        /// Payout category name or ID
        #[arg(short, long)]
        category: String,
        /// Payout date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Status (pending, not-paid, partially-paid, paid)
        #[arg(short, long)]
        status: Option<PayoutStatus>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// List payouts, newest first
    List {
        #[command(flatten)]
        period: PeriodArgs,
        /// Only show payouts with this status
        #[arg(short, long)]
        status: Option<PayoutStatus>,
    },

    /// Show payout details
    Show {
        /// Payout ID (full or short)
        payout: String,
    },

    /// Edit a payout
    Edit {
        /// Payout ID (full or short)
        payout: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        status: Option<PayoutStatus>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,
        /// Remove the notes
        #[arg(long)]
        clear_notes: bool,
    },

    /// Change a payout's status
    Status {
        /// Payout ID (full or short)
        payout: String,
        /// New status
        status: PayoutStatus,
    },

    /// Delete a payout
    Delete {
        /// Payout ID (full or short)
        payout: String,
    },

    /// Per-category totals for a month (defaults to the current month)
    Breakdown {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Payout totals for each month of a year
    Yearly {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Handle a payout command
pub fn handle_payout_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PayoutCommands,
) -> TallyResult<()> {
    let service = PayoutService::new(storage);
    let categories = CategoryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        PayoutCommands::Add {
            amount,
            category,
            date,
            status,
            due,
            notes,
        } => {
            let category = categories.resolve(&category)?;
            let payout = service.create(CreatePayoutInput {
                date: date.unwrap_or_else(today),
                category_id: category.id,
                amount: parse_money(&amount, "payout")?,
                status,
                due_date: due,
                notes,
            })?;

            println!(
                "Recorded payout of {} to {} on {} ({})",
                payout.amount.format_with_symbol(symbol),
                payout.category_name(),
                payout.date,
                payout.status
            );
            println!("  ID: {}", payout.id);
        }

        PayoutCommands::List { period, status } => {
            let mut payouts = service.list(period.year, period.month)?;
            if let Some(status) = status {
                payouts.retain(|p| p.status == status);
            }
            println!(
                "{}",
                format_payout_list(&payouts, symbol, &settings.date_format)
            );
        }

        PayoutCommands::Show { payout } => {
            let payout = service.resolve(&payout)?;
            print!("{}", format_payout_details(&payout, symbol));
        }

        PayoutCommands::Edit {
            payout,
            amount,
            category,
            date,
            status,
            due,
            clear_due,
            notes,
            clear_notes,
        } => {
            let payout = service.resolve(&payout)?;

            let category_id = match category {
                Some(category) => Some(categories.resolve(&category)?.id),
                None => None,
            };

            let changes = PayoutUpdate {
                date,
                category_id,
                amount: amount
                    .as_deref()
                    .map(|a| parse_money(a, "payout"))
                    .transpose()?,
                status,
                due_date: if clear_due { Some(None) } else { due.map(Some) },
                notes: if clear_notes { Some(None) } else { notes.map(Some) },
            };

            let updated = service.update(payout.id, changes)?;
            println!("Updated payout {}", updated.id.short());
        }

        PayoutCommands::Status { payout, status } => {
            let payout = service.resolve(&payout)?;
            let updated = service.set_status(payout.id, status)?;
            println!("Payout {} is now {}", updated.id.short(), updated.status);
        }

        PayoutCommands::Delete { payout } => {
            let payout = service.resolve(&payout)?;
            service.delete(payout.id)?;
            println!(
                "Deleted payout {} ({} to {})",
                payout.id.short(),
                payout.amount.format_with_symbol(symbol),
                payout.category_name()
            );
        }

        PayoutCommands::Breakdown { period } => {
            let month = period.month_or_current()?;
            let totals = service.category_breakdown(month.year, month.month)?;
            println!("Payouts by category: {}", month);
            println!("{}", format_category_breakdown(&totals, symbol));
        }

        PayoutCommands::Yearly { year } => {
            let year = PeriodArgs { year, month: None }.year_or_current();
            let totals = service.yearly_totals(year)?;
            println!("Payouts in {}", year);
            println!("{}", format_yearly_totals(&totals, symbol));
        }
    }

    Ok(())
}
