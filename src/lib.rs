//! tally - terminal income, payout and savings tracker
//!
//! Income entries are recorded against income sources and payouts against
//! payout categories. Each month is summarized into week-of-month income
//! buckets, total payouts, and savings.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: the [`TallyError`] type
//! - `models`: sources, entries, categories, payouts, money, periods
//! - `storage`: JSON file repositories and the [`storage::LedgerReader`] seam
//! - `services`: validated CRUD and period totals
//! - `reports`: the monthly aggregation engine and the reports built on it
//! - `audit`: append-only change log
//! - `export`: JSON, YAML and CSV export
//! - `display`, `cli`: terminal presentation and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::config::paths::TallyPaths;
//! use tally::reports::{SavingsFormula, SavingsReport};
//! use tally::storage::Storage;
//!
//! let storage = Storage::open(TallyPaths::new()?)?;
//! let report = SavingsReport::generate(&storage, 2025, None, SavingsFormula::default())?;
//! print!("{}", report.format_terminal("₱"));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
