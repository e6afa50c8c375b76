//! CLI commands for data export

use std::io::Write;
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

use super::report::create_output;

/// Full export format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON (machine-readable)
    Json,
    /// YAML (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Export income entries to CSV
    Income {
        /// Output file path
        output: PathBuf,
        /// Only entries from this year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Export payouts to CSV
    Payouts {
        /// Output file path
        output: PathBuf,
        /// Only payouts from this year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Show what an export would contain
    Info,
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> TallyResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            compact,
        } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => json::export_full_json(storage, settings, &mut writer, !compact)?,
                ExportFormat::Yaml => yaml::export_full_yaml(storage, settings, &mut writer)?,
            }
            flush(&mut writer)?;
            println!("Full export written to: {}", output.display());
        }

        ExportCommands::Income { output, year } => {
            let mut writer = create_output(&output)?;
            csv::export_income_csv(storage, &mut writer, year)?;
            flush(&mut writer)?;
            println!("Income entries exported to: {}", output.display());
        }

        ExportCommands::Payouts { output, year } => {
            let mut writer = create_output(&output)?;
            csv::export_payouts_csv(storage, &mut writer, year)?;
            flush(&mut writer)?;
            println!("Payouts exported to: {}", output.display());
        }

        ExportCommands::Info => {
            let export = json::FullExport::from_storage(storage, settings)?;

            println!("Export Information");
            println!("==================\n");
            println!("Schema Version: {}", export.schema_version);
            println!("App Version:    {}", export.app_version);
            println!();
            println!("Data Summary:");
            println!("  Income sources:     {}", export.metadata.source_count);
            println!("  Income entries:     {}", export.metadata.entry_count);
            println!("  Payout categories:  {}", export.metadata.category_count);
            println!("  Payouts:            {}", export.metadata.payout_count);

            if let (Some(earliest), Some(latest)) =
                (&export.metadata.earliest_entry, &export.metadata.latest_entry)
            {
                println!();
                println!("Income from {} to {}", earliest, latest);
            }
        }
    }

    Ok(())
}

fn flush<W: Write>(writer: &mut W) -> TallyResult<()> {
    writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))
}
