//! Payout model
//!
//! A payout is money leaving: a bill, a transfer to savings, a purchase.
//! Status tracks whether it has been paid; it never changes any totals.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{PayoutCategoryId, PayoutId};
use super::income_entry::{MAX_ENTRY_AMOUNT, MAX_NOTES_LEN, MAX_YEAR, MIN_YEAR};
use super::money::Money;
use super::payout_category::CategoryLabel;

/// Payment status of a payout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    #[default]
    Pending,
    NotPaid,
    PartiallyPaid,
    Paid,
}

impl PayoutStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::NotPaid => write!(f, "Not paid"),
            Self::PartiallyPaid => write!(f, "Partially paid"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}

impl FromStr for PayoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "pending" => Ok(Self::Pending),
            "not_paid" | "unpaid" => Ok(Self::NotPaid),
            "partially_paid" | "partial" => Ok(Self::PartiallyPaid),
            "paid" => Ok(Self::Paid),
            other => Err(format!(
                "Unknown status '{}' (expected pending, not-paid, partially-paid or paid)",
                other
            )),
        }
    }
}

/// Validation errors for payouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayoutValidationError {
    MonthOutOfRange(u32),
    YearOutOfRange(i32),
    NonPositiveAmount,
    AmountTooLarge(Money),
    NotesTooLong(usize),
}

impl fmt::Display for PayoutValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonthOutOfRange(m) => write!(f, "Month must be between 1 and 12, got {}", m),
            Self::YearOutOfRange(y) => {
                write!(f, "Year must be between {} and {}, got {}", MIN_YEAR, MAX_YEAR, y)
            }
            Self::NonPositiveAmount => write!(f, "Amount must be positive"),
            Self::AmountTooLarge(m) => write!(f, "Amount {} exceeds {}", m, MAX_ENTRY_AMOUNT),
            Self::NotesTooLong(len) => {
                write!(f, "Notes too long ({} characters, max {})", len, MAX_NOTES_LEN)
            }
        }
    }
}

impl std::error::Error for PayoutValidationError {}

/// A single payout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payout {
    pub id: PayoutId,
    pub date: NaiveDate,
    pub month: u32,
    pub year: i32,
    pub category_id: PayoutCategoryId,
    pub amount: Money,
    #[serde(default)]
    pub status: PayoutStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Category display attributes, filled in by the service layer; never persisted
    #[serde(default, skip_serializing)]
    pub category: Option<CategoryLabel>,
}

impl Payout {
    pub fn new(date: NaiveDate, category_id: PayoutCategoryId, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: PayoutId::new(),
            date,
            month: date.month(),
            year: date.year(),
            category_id,
            amount,
            status: PayoutStatus::default(),
            due_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
            category: None,
        }
    }

    /// Move the payout to a new date, re-deriving month and year
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.month = date.month();
        self.year = date.year();
        self.touch();
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.touch();
    }

    pub fn set_category(&mut self, category_id: PayoutCategoryId) {
        if self.category_id != category_id {
            self.category_id = category_id;
            self.category = None;
        }
        self.touch();
    }

    pub fn set_status(&mut self, status: PayoutStatus) {
        self.status = status;
        self.touch();
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
        self.touch();
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized")
    }

    pub fn validate(&self) -> Result<(), PayoutValidationError> {
        if !(1..=12).contains(&self.month) {
            return Err(PayoutValidationError::MonthOutOfRange(self.month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(PayoutValidationError::YearOutOfRange(self.year));
        }
        if !self.amount.is_positive() {
            return Err(PayoutValidationError::NonPositiveAmount);
        }
        if self.amount > MAX_ENTRY_AMOUNT {
            return Err(PayoutValidationError::AmountTooLarge(self.amount));
        }
        if let Some(notes) = &self.notes {
            let len = notes.chars().count();
            if len > MAX_NOTES_LEN {
                return Err(PayoutValidationError::NotesTooLong(len));
            }
        }
        Ok(())
    }
}
