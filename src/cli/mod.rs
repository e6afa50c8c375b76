//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod config;
pub mod export;
pub mod income;
pub mod payout;
pub mod report;
pub mod source;

use chrono::{Datelike, Local, NaiveDate};
use clap::Args;

use crate::error::{TallyError, TallyResult};
use crate::models::{Money, MonthPeriod};

pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, handle_init, ConfigCommands};
pub use export::{handle_export_command, ExportCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use payout::{handle_payout_command, PayoutCommands};
pub use report::{handle_report_command, ReportCommands};
pub use source::{handle_source_command, SourceCommands};

/// Year/month filter shared by listings and reports
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PeriodArgs {
    /// Year (e.g. 2025)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month number (1-12)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

impl PeriodArgs {
    /// The selected month, filling gaps from today's date
    pub fn month_or_current(&self) -> TallyResult<MonthPeriod> {
        let today = Local::now().date_naive();
        let year = self.year.unwrap_or_else(|| today.year());
        let month = self.month.unwrap_or_else(|| today.month());
        MonthPeriod::new(year, month)
            .ok_or_else(|| TallyError::Validation(format!("Invalid period {}-{:02}", year, month)))
    }

    /// The selected year, defaulting to the current one
    pub fn year_or_current(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }
}

/// Parse a user-entered amount, naming the field in the error
pub(crate) fn parse_money(input: &str, field: &str) -> TallyResult<Money> {
    Money::parse(input)
        .map_err(|e| TallyError::Validation(format!("Invalid {} amount: {}", field, e)))
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
