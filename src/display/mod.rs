//! Display formatting for terminal output
//!
//! Tables and detail views for sources, entries, categories and payouts,
//! plus small report helpers.

pub mod category;
pub mod income;
pub mod payout;
pub mod report;
pub mod source;

pub use category::{format_category_details, format_category_list};
pub use income::{format_entry_details, format_entry_list};
pub use payout::{
    format_category_breakdown, format_payout_details, format_payout_list, format_yearly_totals,
};
pub use source::{format_source_details, format_source_list};
