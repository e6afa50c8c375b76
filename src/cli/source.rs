//! Income source CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::source::{format_source_details, format_source_list};
use crate::error::TallyResult;
use crate::models::IncomeSourceType;
use crate::services::{SourceService, SourceUpdate};
use crate::storage::Storage;

/// Income source subcommands
#[derive(Subcommand, Debug)]
pub enum SourceCommands {
    /// List income sources
    List {
        /// Only show active sources
        #[arg(long)]
        active: bool,
    },

    /// Create a new income source
    #[command(alias = "create")]
    Add {
        /// Source name
        name: String,
        /// Source type (salary, freelance, business, investment, other)
        #[arg(short = 't', long = "type", default_value = "salary")]
        source_type: IncomeSourceType,
        /// Display color (#RRGGBB)
        #[arg(long)]
        color: Option<String>,
    },

    /// Show source details
    Show {
        /// Source name or ID
        source: String,
    },

    /// Edit a source
    Edit {
        /// Source name or ID
        source: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        source_type: Option<IncomeSourceType>,
        /// New color (#RRGGBB)
        #[arg(long)]
        color: Option<String>,
        /// Mark the source active
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        /// Mark the source inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Delete a source with no income entries
    Delete {
        /// Source name or ID
        source: String,
    },
}

/// Handle a source command
pub fn handle_source_command(
    storage: &Storage,
    _settings: &Settings,
    cmd: SourceCommands,
) -> TallyResult<()> {
    let service = SourceService::new(storage);

    match cmd {
        SourceCommands::List { active } => {
            let sources = if active {
                service.list_active()?
            } else {
                service.list()?
            };
            println!("{}", format_source_list(&sources));
        }

        SourceCommands::Add {
            name,
            source_type,
            color,
        } => {
            let source = service.create(&name, source_type, color.as_deref())?;
            println!("Created income source: {}", source.name);
            println!("  Type: {}", source.source_type);
            println!("  ID: {}", source.id);
        }

        SourceCommands::Show { source } => {
            let source = service.resolve(&source)?;
            let entry_count = storage.income.count_by_source(source.id)?;
            print!("{}", format_source_details(&source, entry_count));
        }

        SourceCommands::Edit {
            source,
            name,
            source_type,
            color,
            active,
            inactive,
        } => {
            let source = service.resolve(&source)?;

            let is_active = match (active, inactive) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };

            if name.is_none() && source_type.is_none() && color.is_none() && is_active.is_none() {
                println!("No changes specified. Use --name, --type, --color, --active or --inactive.");
                return Ok(());
            }

            let updated = service.update(
                source.id,
                SourceUpdate {
                    name,
                    source_type,
                    color,
                    is_active,
                },
            )?;
            println!("Updated income source: {}", updated.name);
        }

        SourceCommands::Delete { source } => {
            let source = service.resolve(&source)?;
            service.delete(source.id)?;
            println!("Deleted income source: {}", source.name);
        }
    }

    Ok(())
}
