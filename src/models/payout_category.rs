//! Payout category model
//!
//! Categories group payouts (rent, groceries, a savings transfer). A
//! category may carry a monthly target amount.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::PayoutCategoryId;
use super::income_source::{is_hex_color, validate_name, SourceValidationError};
use super::money::Money;

/// Maximum length of an icon name
pub const MAX_ICON_LEN: usize = 50;

/// Default swatch for newly created categories
pub const DEFAULT_CATEGORY_COLOR: &str = "#EF4444";

/// Kind of payout category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayoutCategoryType {
    Savings,
    Obligation,
    Personal,
    #[default]
    Expense,
    Other,
}

impl fmt::Display for PayoutCategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Savings => write!(f, "Savings"),
            Self::Obligation => write!(f, "Obligation"),
            Self::Personal => write!(f, "Personal"),
            Self::Expense => write!(f, "Expense"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for PayoutCategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" => Ok(Self::Savings),
            "obligation" => Ok(Self::Obligation),
            "personal" => Ok(Self::Personal),
            "expense" => Ok(Self::Expense),
            "other" => Ok(Self::Other),
            other => Err(format!(
                "Unknown category type '{}' (expected savings, obligation, personal, expense or other)",
                other
            )),
        }
    }
}

/// Validation errors for payout categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    Name(SourceValidationError),
    InvalidColor(String),
    NonPositiveTarget,
    IconTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(e) => write!(f, "{}", e),
            Self::InvalidColor(c) => write!(f, "Invalid color '{}', expected #RRGGBB", c),
            Self::NonPositiveTarget => write!(f, "Target must be positive"),
            Self::IconTooLong(len) => {
                write!(f, "Icon name too long ({} characters, max {})", len, MAX_ICON_LEN)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// A payout category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutCategory {
    pub id: PayoutCategoryId,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: PayoutCategoryType,
    #[serde(default)]
    pub target_amount: Option<Money>,
    pub color: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PayoutCategory {
    pub fn new(name: impl Into<String>, category_type: PayoutCategoryType) -> Self {
        let now = Utc::now();
        Self {
            id: PayoutCategoryId::new(),
            name: name.into().trim().to_string(),
            category_type,
            target_amount: None,
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            icon: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into().trim().to_string();
        self.touch();
    }

    pub fn set_type(&mut self, category_type: PayoutCategoryType) {
        self.category_type = category_type;
        self.touch();
    }

    /// Set or clear the target; a zero target clears it
    pub fn set_target(&mut self, target: Option<Money>) {
        self.target_amount = target.filter(|t| !t.is_zero());
        self.touch();
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into().trim().to_uppercase();
        self.touch();
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon.map(|i| i.trim().to_string()).filter(|i| !i.is_empty());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name).map_err(CategoryValidationError::Name)?;
        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }
        if let Some(target) = self.target_amount {
            if !target.is_positive() {
                return Err(CategoryValidationError::NonPositiveTarget);
            }
        }
        if let Some(icon) = &self.icon {
            let len = icon.chars().count();
            if len > MAX_ICON_LEN {
                return Err(CategoryValidationError::IconTooLong(len));
            }
        }
        Ok(())
    }

    /// Display attributes attached to payouts
    pub fn label(&self) -> CategoryLabel {
        CategoryLabel {
            name: self.name.clone(),
            category_type: self.category_type,
            color: self.color.clone(),
            icon: self.icon.clone(),
            target_amount: self.target_amount,
        }
    }
}

impl fmt::Display for PayoutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Joined category attributes carried on a payout when the category resolves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: PayoutCategoryType,
    pub color: String,
    pub icon: Option<String>,
    pub target_amount: Option<Money>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = PayoutCategory::new("Rent", PayoutCategoryType::Obligation);
        assert_eq!(category.name, "Rent");
        assert!(category.target_amount.is_none());
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_zero_target_clears() {
        let mut category = PayoutCategory::new("Emergency Fund", PayoutCategoryType::Savings);
        category.set_target(Some(Money::from_units(5000)));
        assert_eq!(category.target_amount, Some(Money::from_units(5000)));

        category.set_target(Some(Money::zero()));
        assert!(category.target_amount.is_none());
    }

    #[test]
    fn test_negative_target_rejected() {
        let mut category = PayoutCategory::new("Fun", PayoutCategoryType::Personal);
        category.target_amount = Some(Money::from_cents(-100));
        assert_eq!(category.validate(), Err(CategoryValidationError::NonPositiveTarget));
    }

    #[test]
    fn test_icon_and_name_validation() {
        let mut category = PayoutCategory::new("Groceries", PayoutCategoryType::Expense);
        category.set_icon(Some("i".repeat(51)));
        assert_eq!(category.validate(), Err(CategoryValidationError::IconTooLong(51)));

        category.set_icon(Some("  ".into()));
        assert!(category.icon.is_none());

        category.set_name(" ");
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::Name(SourceValidationError::EmptyName))
        );
    }
}
