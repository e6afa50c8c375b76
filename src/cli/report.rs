//! CLI commands for reports
//!
//! Savings, dashboard and payout reports, printed to the terminal or
//! written to CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::reports::{DashboardReport, PayoutReport, SavingsFormula, SavingsReport};
use crate::storage::Storage;

use super::PeriodArgs;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Monthly savings with a week-by-week income breakdown
    Savings {
        #[command(flatten)]
        period: PeriodArgs,

        /// Treat this fraction of net income as savings (e.g. 0.4)
        #[arg(long)]
        rate: Option<f64>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month-at-a-glance dashboard
    Dashboard {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Payouts for a year or month, grouped by category
    Payouts {
        #[command(flatten)]
        period: PeriodArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TallyResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Savings {
            period,
            rate,
            output,
        } => {
            let formula = match rate {
                Some(rate) => {
                    let formula = SavingsFormula::FixedRate { rate };
                    formula
                        .validate()
                        .map_err(|e| TallyError::Validation(e.to_string()))?;
                    formula
                }
                None => settings.savings_formula,
            };

            let report =
                SavingsReport::generate(storage, period.year_or_current(), period.month, formula)?;

            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!(
                        "Savings report ({} months) exported to: {}",
                        report.month_count(),
                        path.display()
                    );
                }
                None => print!("{}", report.format_terminal(symbol)),
            }
        }

        ReportCommands::Dashboard { period } => {
            let report =
                DashboardReport::generate(storage, period.month_or_current()?, settings.recent_entries)?;
            print!("{}", report.format_terminal(symbol));
        }

        ReportCommands::Payouts { period, output } => {
            let report = PayoutReport::generate(storage, period.year_or_current(), period.month)?;

            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!(
                        "{} payouts exported to: {}",
                        report.payouts.len(),
                        path.display()
                    );
                }
                None => print!("{}", report.format_terminal(symbol)),
            }
        }
    }

    Ok(())
}

pub(crate) fn create_output(path: &Path) -> TallyResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        TallyError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
