//! Income source model
//!
//! An income source is where money comes from (an employer, a client, a
//! side business). Income entries point at exactly one source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::IncomeSourceId;

/// Kind of income source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSourceType {
    #[default]
    Salary,
    Freelance,
    Business,
    Investment,
    Other,
}

impl IncomeSourceType {
    pub fn all() -> &'static [Self] {
        &[
            Self::Salary,
            Self::Freelance,
            Self::Business,
            Self::Investment,
            Self::Other,
        ]
    }
}

impl fmt::Display for IncomeSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Salary => write!(f, "Salary"),
            Self::Freelance => write!(f, "Freelance"),
            Self::Business => write!(f, "Business"),
            Self::Investment => write!(f, "Investment"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for IncomeSourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "salary" => Ok(Self::Salary),
            "freelance" => Ok(Self::Freelance),
            "business" => Ok(Self::Business),
            "investment" => Ok(Self::Investment),
            "other" => Ok(Self::Other),
            other => Err(format!(
                "Unknown source type '{}' (expected salary, freelance, business, investment or other)",
                other
            )),
        }
    }
}

/// Validation errors shared by named, colored entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for SourceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name is required"),
            Self::NameTooLong(len) => {
                write!(f, "Name too long ({} characters, max {})", len, MAX_NAME_LEN)
            }
            Self::InvalidColor(c) => write!(f, "Invalid color '{}', expected #RRGGBB", c),
        }
    }
}

impl std::error::Error for SourceValidationError {}

/// Maximum length of source and category names
pub const MAX_NAME_LEN: usize = 100;

/// Default swatch for newly created sources
pub const DEFAULT_SOURCE_COLOR: &str = "#3B82F6";

/// Check a `#RRGGBB` hex color
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Validate a display name against the shared length rules
pub fn validate_name(name: &str) -> Result<(), SourceValidationError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(SourceValidationError::EmptyName);
    }
    if len > MAX_NAME_LEN {
        return Err(SourceValidationError::NameTooLong(len));
    }
    Ok(())
}

/// Where income comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: IncomeSourceId,
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: IncomeSourceType,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl IncomeSource {
    /// Create a new active source with the default color
    pub fn new(name: impl Into<String>, source_type: IncomeSourceType) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeSourceId::new(),
            name: name.into().trim().to_string(),
            source_type,
            is_active: true,
            color: DEFAULT_SOURCE_COLOR.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into().trim().to_string();
        self.touch();
    }

    pub fn set_type(&mut self, source_type: IncomeSourceType) {
        self.source_type = source_type;
        self.touch();
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into().trim().to_uppercase();
        self.touch();
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), SourceValidationError> {
        validate_name(&self.name)?;
        if !is_hex_color(&self.color) {
            return Err(SourceValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }

    /// Display attributes attached to income entries
    pub fn label(&self) -> SourceLabel {
        SourceLabel {
            name: self.name.clone(),
            source_type: self.source_type,
            color: self.color.clone(),
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Joined source attributes carried on an income entry when the source resolves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLabel {
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: IncomeSourceType,
    pub color: String,
}
