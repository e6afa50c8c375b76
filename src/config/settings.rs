//! User settings for tally
//!
//! Manages user preferences: currency presentation, the savings formula used
//! by reports, and display defaults.

use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::error::TallyError;
use crate::reports::summary::SavingsFormula;

/// User settings for tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// ISO currency code stamped on new income entries
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Symbol used when formatting amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// How savings are derived from income and payouts
    #[serde(default)]
    pub savings_formula: SavingsFormula,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Number of recent entries shown on the dashboard
    #[serde(default = "default_recent_entries")]
    pub recent_entries: usize,

    /// Whether `tally init` has been run
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_code() -> String {
    "PHP".to_string()
}

fn default_currency_symbol() -> String {
    "₱".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_entries() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            savings_formula: SavingsFormula::default(),
            date_format: default_date_format(),
            recent_entries: default_recent_entries(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller decides to save
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| TallyError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TallyError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TallyError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings that would make reports meaningless
    pub fn validate(&self) -> Result<(), TallyError> {
        self.savings_formula
            .validate()
            .map_err(|e| TallyError::Config(e.to_string()))?;

        if self.currency_code.trim().is_empty() {
            return Err(TallyError::Config("Currency code cannot be empty".into()));
        }

        Ok(())
    }
}
