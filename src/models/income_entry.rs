//! Income entry model
//!
//! One income event: a date, the source it came from, and gross/net amounts.
//! The week/month/year buckets are derived from the date and stored so that
//! summaries can group entries without reparsing dates.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{IncomeEntryId, IncomeSourceId};
use super::income_source::SourceLabel;
use super::money::Money;
use super::period::week_of_month;

/// Largest amount accepted on a single entry (10,000,000.00)
pub const MAX_ENTRY_AMOUNT: Money = Money::from_units(10_000_000);

/// Earliest and latest years accepted on entries
pub const MIN_YEAR: i32 = 2020;
pub const MAX_YEAR: i32 = 2100;

/// Maximum length of free-form notes
pub const MAX_NOTES_LEN: usize = 500;

/// How often this income is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    Weekly,
    BiWeekly,
    #[default]
    Monthly,
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::BiWeekly => write!(f, "Bi-weekly"),
            Self::Monthly => write!(f, "Monthly"),
        }
    }
}

impl FromStr for PaymentFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "weekly" => Ok(Self::Weekly),
            "bi_weekly" | "biweekly" => Ok(Self::BiWeekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!(
                "Unknown payment frequency '{}' (expected weekly, bi-weekly or monthly)",
                other
            )),
        }
    }
}

/// Validation errors for income entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    WeekOutOfRange(u32),
    MonthOutOfRange(u32),
    YearOutOfRange(i32),
    NonPositiveGross,
    NonPositiveNet,
    AmountTooLarge(Money),
    NotesTooLong(usize),
    EmptyCurrency,
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeekOutOfRange(w) => write!(f, "Week must be between 1 and 5, got {}", w),
            Self::MonthOutOfRange(m) => write!(f, "Month must be between 1 and 12, got {}", m),
            Self::YearOutOfRange(y) => {
                write!(f, "Year must be between {} and {}, got {}", MIN_YEAR, MAX_YEAR, y)
            }
            Self::NonPositiveGross => write!(f, "Gross amount must be positive"),
            Self::NonPositiveNet => write!(f, "Net amount must be positive"),
            Self::AmountTooLarge(m) => write!(f, "Amount {} exceeds {}", m, MAX_ENTRY_AMOUNT),
            Self::NotesTooLong(len) => {
                write!(f, "Notes too long ({} characters, max {})", len, MAX_NOTES_LEN)
            }
            Self::EmptyCurrency => write!(f, "Currency is required"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// A single income event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: IncomeEntryId,
    pub date: NaiveDate,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub source_id: IncomeSourceId,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    pub gross_amount: Money,
    pub net_amount: Money,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Source display attributes, filled in by the service layer when the
    /// source exists; never persisted
    #[serde(default, skip_serializing)]
    pub source: Option<SourceLabel>,
}

fn default_currency() -> String {
    "PHP".to_string()
}

impl IncomeEntry {
    /// Create an entry for `date`, deriving its week/month/year buckets
    pub fn new(
        date: NaiveDate,
        source_id: IncomeSourceId,
        gross_amount: Money,
        net_amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeEntryId::new(),
            date,
            week: week_of_month(date),
            month: date.month(),
            year: date.year(),
            source_id,
            payment_frequency: PaymentFrequency::default(),
            gross_amount,
            net_amount,
            currency: default_currency(),
            notes: None,
            created_at: now,
            updated_at: now,
            source: None,
        }
    }

    /// Move the entry to a new date, re-deriving the period buckets
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.week = week_of_month(date);
        self.month = date.month();
        self.year = date.year();
        self.touch();
    }

    pub fn set_amounts(&mut self, gross: Money, net: Money) {
        self.gross_amount = gross;
        self.net_amount = net;
        self.touch();
    }

    pub fn set_source(&mut self, source_id: IncomeSourceId) {
        if self.source_id != source_id {
            self.source_id = source_id;
            self.source = None;
        }
        self.touch();
    }

    /// Set notes; blank notes are stored as `None`
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Amount withheld between gross and net
    pub fn deductions(&self) -> Money {
        self.gross_amount - self.net_amount
    }

    /// Name of the joined source, if it resolved
    pub fn source_name(&self) -> &str {
        self.source
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("Unknown Source")
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if !(1..=5).contains(&self.week) {
            return Err(IncomeValidationError::WeekOutOfRange(self.week));
        }
        if !(1..=12).contains(&self.month) {
            return Err(IncomeValidationError::MonthOutOfRange(self.month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(IncomeValidationError::YearOutOfRange(self.year));
        }
        if !self.gross_amount.is_positive() {
            return Err(IncomeValidationError::NonPositiveGross);
        }
        if !self.net_amount.is_positive() {
            return Err(IncomeValidationError::NonPositiveNet);
        }
        for amount in [self.gross_amount, self.net_amount] {
            if amount > MAX_ENTRY_AMOUNT {
                return Err(IncomeValidationError::AmountTooLarge(amount));
            }
        }
        if let Some(notes) = &self.notes {
            let len = notes.chars().count();
            if len > MAX_NOTES_LEN {
                return Err(IncomeValidationError::NotesTooLong(len));
            }
        }
        if self.currency.trim().is_empty() {
            return Err(IncomeValidationError::EmptyCurrency);
        }
        Ok(())
    }
}
