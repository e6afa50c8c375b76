//! Audit logging
//!
//! Every create, update, and delete of a source, entry, category, or payout
//! is appended to `audit.log` as one JSON line carrying the before/after
//! snapshots and a short diff of changed fields.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
