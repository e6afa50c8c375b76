//! YAML Export functionality
//!
//! Writes the same document as the JSON export, in YAML, behind a short
//! comment header.

use std::io::Write;

use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write>(
    storage: &Storage,
    settings: &Settings,
    writer: &mut W,
) -> TallyResult<()> {
    let export = FullExport::checked(storage, settings)?;

    let header = format!(
        "# tally full export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| TallyError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn read_yaml_export(yaml_str: &str) -> TallyResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| TallyError::Export(e.to_string()))?;
    export.validate().map_err(TallyError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::{PayoutCategory, PayoutCategoryType};
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        storage
            .categories
            .upsert(PayoutCategory::new("Groceries", PayoutCategoryType::Expense))
            .unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &Settings::default(), &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# tally full export"));
        assert!(yaml.contains("Groceries"));

        let imported = read_yaml_export(&yaml).unwrap();
        assert_eq!(imported.categories.len(), 1);
        assert_eq!(imported.metadata.category_count, 1);
    }
}
