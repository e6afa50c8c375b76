//! Storage layer for tally
//!
//! JSON file repositories with atomic writes, the [`Storage`] coordinator
//! that owns them, and the audit hooks every mutation goes through.

pub mod categories;
pub mod file_io;
pub mod income;
pub mod init;
pub mod ledger;
pub mod payouts;
pub mod sources;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use income::IncomeRepository;
pub use init::initialize_storage;
pub use ledger::{LedgerReader, MemoryLedger};
pub use payouts::PayoutRepository;
pub use sources::SourceRepository;

use serde::Serialize;
use tracing::debug;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TallyPaths;
use crate::error::TallyError;

/// Owns every repository plus the audit log
pub struct Storage {
    paths: TallyPaths,
    audit: AuditLogger,
    pub sources: SourceRepository,
    pub income: IncomeRepository,
    pub categories: CategoryRepository,
    pub payouts: PayoutRepository,
}

impl Storage {
    /// Create storage rooted at `paths`, creating directories as needed
    ///
    /// Repositories start empty; call [`Storage::load_all`] to read disk.
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            sources: SourceRepository::new(paths.sources_file()),
            income: IncomeRepository::new(paths.income_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            payouts: PayoutRepository::new(paths.payouts_file()),
            paths,
        })
    }

    /// Create storage and load everything from disk
    pub fn open(paths: TallyPaths) -> Result<Self, TallyError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> Result<(), TallyError> {
        self.sources.load()?;
        self.income.load()?;
        self.categories.load()?;
        self.payouts.load()?;
        debug!(base_dir = %self.paths.base_dir().display(), "storage loaded");
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), TallyError> {
        self.sources.save()?;
        self.income.save()?;
        self.categories.save()?;
        self.payouts.save()?;
        Ok(())
    }

    /// True once `tally init` has written the settings file
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TallyError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update; the diff summary is derived from the two snapshots
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), TallyError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TallyError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
