//! Payout category CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::category::{format_category_details, format_category_list};
use crate::error::TallyResult;
use crate::models::PayoutCategoryType;
use crate::services::{CategoryService, CategoryUpdate, CreateCategoryInput};
use crate::storage::Storage;

use super::parse_money;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all payout categories
    List,

    /// Create a new payout category
    #[command(alias = "create")]
    Add {
        /// Category name
        name: String,
        /// Category type (savings, obligation, personal, expense, other)
        #[arg(short = 't', long = "type", default_value = "expense")]
        category_type: PayoutCategoryType,
        /// Monthly target amount
        #[arg(long)]
        target: Option<String>,
        /// Display color (#RRGGBB)
        #[arg(long)]
        color: Option<String>,
        /// Short icon label
        #[arg(long)]
        icon: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        category_type: Option<PayoutCategoryType>,
        #[arg(long, conflicts_with = "clear_target")]
        target: Option<String>,
        /// Remove the target amount
        #[arg(long)]
        clear_target: bool,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, conflicts_with = "clear_icon")]
        icon: Option<String>,
        /// Remove the icon
        #[arg(long)]
        clear_icon: bool,
    },

    /// Delete a category with no payouts
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> TallyResult<()> {
    let service = CategoryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            println!("{}", format_category_list(&categories, symbol));
        }

        CategoryCommands::Add {
            name,
            category_type,
            target,
            color,
            icon,
        } => {
            let target_amount = target
                .as_deref()
                .map(|t| parse_money(t, "target"))
                .transpose()?;

            let category = service.create(CreateCategoryInput {
                name,
                category_type,
                target_amount,
                color,
                icon,
            })?;

            println!("Created payout category: {}", category.name);
            println!("  Type: {}", category.category_type);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let category = service.resolve(&category)?;
            let payout_count = storage.payouts.count_by_category(category.id)?;
            print!("{}", format_category_details(&category, payout_count, symbol));
        }

        CategoryCommands::Edit {
            category,
            name,
            category_type,
            target,
            clear_target,
            color,
            icon,
            clear_icon,
        } => {
            let category = service.resolve(&category)?;

            let target_amount = if clear_target {
                Some(None)
            } else {
                target
                    .as_deref()
                    .map(|t| parse_money(t, "target"))
                    .transpose()?
                    .map(Some)
            };
            let icon = if clear_icon { Some(None) } else { icon.map(Some) };

            let changes = CategoryUpdate {
                name,
                category_type,
                target_amount,
                color,
                icon,
            };

            if changes.name.is_none()
                && changes.category_type.is_none()
                && changes.target_amount.is_none()
                && changes.color.is_none()
                && changes.icon.is_none()
            {
                println!("No changes specified. Use --name, --type, --target, --color or --icon.");
                return Ok(());
            }

            let updated = service.update(category.id, changes)?;
            println!("Updated payout category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let category = service.resolve(&category)?;
            service.delete(category.id)?;
            println!("Deleted payout category: {}", category.name);
        }
    }

    Ok(())
}
