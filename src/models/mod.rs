//! Core data models for tally
//!
//! Income sources and entries on the inflow side, payout categories and
//! payouts on the outflow side, plus money, ids, and calendar helpers.

pub mod ids;
pub mod income_entry;
pub mod income_source;
pub mod money;
pub mod payout;
pub mod payout_category;
pub mod period;

pub use ids::{IncomeEntryId, IncomeSourceId, PayoutCategoryId, PayoutId};
pub use income_entry::{IncomeEntry, IncomeValidationError, PaymentFrequency};
pub use income_source::{IncomeSource, IncomeSourceType, SourceLabel, SourceValidationError};
pub use money::{Money, MoneyParseError};
pub use payout::{Payout, PayoutStatus, PayoutValidationError};
pub use payout_category::{
    CategoryLabel, CategoryValidationError, PayoutCategory, PayoutCategoryType,
};
pub use period::{month_name, short_month_name, week_of_month, MonthPeriod};
