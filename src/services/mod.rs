//! Service layer for tally
//!
//! Business logic on top of the storage layer: validation, uniqueness,
//! joined display fields, audit logging, and period totals.

pub mod category;
pub mod income;
pub mod payout;
pub mod savings;
pub mod source;

pub use category::{CategoryService, CategoryUpdate, CreateCategoryInput};
pub use income::{CreateIncomeInput, IncomeService, IncomeTotals, IncomeUpdate};
pub use payout::{CategoryTotal, CreatePayoutInput, MonthPayoutTotal, PayoutService, PayoutUpdate};
pub use savings::SavingsService;
pub use source::{SourceService, SourceUpdate};
