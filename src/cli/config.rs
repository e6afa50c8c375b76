//! Setup, configuration and history commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::reports::SavingsFormula;
use crate::storage::{init::initialize_storage, Storage};

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,

    /// Set the currency used for new entries and formatting
    Currency {
        /// ISO currency code (e.g. PHP, USD)
        code: String,
        /// Symbol used when printing amounts
        #[arg(short, long)]
        symbol: Option<String>,
    },

    /// Choose how savings are computed in reports
    Formula {
        /// Fixed fraction of net income (e.g. 0.4); omit for net income minus payouts
        #[arg(long)]
        rate: Option<f64>,
    },

    /// Number of recent entries on the dashboard
    Recent {
        count: usize,
    },

    /// Show recent audit log entries
    History {
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

/// Create the data directory, default categories and settings file
pub fn handle_init(storage: &Storage, settings: &mut Settings) -> TallyResult<()> {
    let paths = storage.paths();
    println!("Initializing tally at: {}", paths.base_dir().display());

    let created = initialize_storage(paths)?;
    settings.setup_completed = true;
    settings.save(paths)?;

    if created {
        storage.categories.load()?;
        println!("Default payout categories have been created:");
        for category in storage.categories.get_all()? {
            println!("  - {} ({})", category.name, category.category_type);
        }
    } else {
        println!("Existing data found; default categories were not recreated.");
    }

    println!();
    println!("Next: add an income source with 'tally source add <name>'.");
    Ok(())
}

/// Handle a config command
pub fn handle_config_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> TallyResult<()> {
    let paths = storage.paths();

    match cmd {
        ConfigCommands::Show => {
            println!("tally configuration");
            println!("===================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency:        {} ({})", settings.currency_code, settings.currency_symbol);
            println!("  Savings formula: {}", settings.savings_formula);
            println!("  Date format:     {}", settings.date_format);
            println!("  Recent entries:  {}", settings.recent_entries);
            println!(
                "  Initialized:     {}",
                if storage.is_initialized() { "yes" } else { "no (run 'tally init')" }
            );
        }

        ConfigCommands::Currency { code, symbol } => {
            settings.currency_code = code.trim().to_uppercase();
            if let Some(symbol) = symbol {
                settings.currency_symbol = symbol;
            }
            settings.save(paths)?;
            println!(
                "Currency set to {} ({})",
                settings.currency_code, settings.currency_symbol
            );
        }

        ConfigCommands::Formula { rate } => {
            let formula = match rate {
                Some(rate) => SavingsFormula::FixedRate { rate },
                None => SavingsFormula::IncomeMinusPayouts,
            };
            formula
                .validate()
                .map_err(|e| TallyError::Validation(e.to_string()))?;

            settings.savings_formula = formula;
            settings.save(paths)?;
            println!("Savings formula set to: {}", formula);
        }

        ConfigCommands::Recent { count } => {
            settings.recent_entries = count;
            settings.save(paths)?;
            println!("Dashboard will show {} recent entries", count);
        }

        ConfigCommands::History { count } => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}
