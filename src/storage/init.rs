//! Storage initialization
//!
//! First-run setup: directories plus a starter set of payout categories.

use tracing::info;

use crate::config::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::{PayoutCategory, PayoutCategoryType};

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Starter categories: name, type, swatch
const DEFAULT_CATEGORIES: &[(&str, PayoutCategoryType, &str)] = &[
    ("Savings", PayoutCategoryType::Savings, "#10B981"),
    ("Parents", PayoutCategoryType::Obligation, "#8B5CF6"),
    ("Pocket Money", PayoutCategoryType::Personal, "#F59E0B"),
    ("Bills", PayoutCategoryType::Expense, "#EF4444"),
];

/// Prepare a fresh data directory
///
/// Writes the default categories only when no categories file exists, so
/// running it again never clobbers user data. Returns whether defaults were
/// written.
pub fn initialize_storage(paths: &TallyPaths) -> Result<bool, TallyError> {
    paths.ensure_directories()?;

    if paths.categories_file().exists() {
        return Ok(false);
    }

    let categories = DEFAULT_CATEGORIES
        .iter()
        .map(|(name, category_type, color)| {
            let mut category = PayoutCategory::new(*name, *category_type);
            category.set_color(*color);
            category
        })
        .collect();

    write_json_atomic(paths.categories_file(), &CategoryData { categories })?;
    info!(count = DEFAULT_CATEGORIES.len(), "created default payout categories");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_default_categories_created() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(initialize_storage(&paths).unwrap());

        let data: CategoryData = read_json(paths.categories_file()).unwrap();
        let names: Vec<_> = data.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Savings", "Parents", "Pocket Money", "Bills"]);
        assert!(data.categories.iter().all(|c| c.validate().is_ok()));
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let custom = CategoryData {
            categories: vec![PayoutCategory::new("Tuition", PayoutCategoryType::Obligation)],
        };
        write_json_atomic(paths.categories_file(), &custom).unwrap();

        assert!(!initialize_storage(&paths).unwrap());

        let data: CategoryData = read_json(paths.categories_file()).unwrap();
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.categories[0].name, "Tuition");
    }
}
