//! Reports module for tally
//!
//! The pure monthly aggregation engine plus the savings, dashboard and
//! payout reports built on top of it.

pub mod dashboard;
pub mod payout;
pub mod savings;
pub mod summary;

pub use dashboard::{DashboardMonth, DashboardReport};
pub use payout::PayoutReport;
pub use savings::SavingsReport;
pub use summary::{
    IncomeRecord, MonthlySummary, PayoutRecord, SavingsFormula, SavingsFormulaError, WeeklyBucket,
};
