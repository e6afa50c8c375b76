use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tally::cli::{
    handle_category_command, handle_config_command, handle_export_command, handle_income_command,
    handle_init, handle_payout_command, handle_report_command, handle_source_command,
    CategoryCommands, ConfigCommands, ExportCommands, IncomeCommands, PayoutCommands,
    ReportCommands, SourceCommands,
};
use tally::config::{paths::TallyPaths, settings::Settings};
use tally::storage::Storage;

/// Filter directives, e.g. `TALLY_LOG=tally=debug`
const LOG_ENV: &str = "TALLY_LOG";
/// `json` switches diagnostics to JSON lines
const LOG_FORMAT_ENV: &str = "TALLY_LOG_FORMAT";

#[derive(Parser)]
#[command(
    name = "tally",
    author = "Kaylee Beyene",
    version,
    about = "Track income, payouts and savings from the terminal",
    long_about = "tally records income by source and payouts by category, then \
                  summarizes each month: week-by-week income, payouts, and what \
                  is left over as savings."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income source management
    #[command(subcommand)]
    Source(SourceCommands),

    /// Income entry management
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Payout category management
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Payout management
    #[command(subcommand)]
    Payout(PayoutCommands),

    /// Savings, dashboard and payout reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to JSON, YAML or CSV
    #[command(subcommand)]
    Export(ExportCommands),

    /// Initialize the data directory and default categories
    Init,

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths)?;

    match cli.command {
        Some(Commands::Source(cmd)) => handle_source_command(&storage, &settings, cmd)?,
        Some(Commands::Income(cmd)) => handle_income_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, &settings, cmd)?,
        Some(Commands::Payout(cmd)) => handle_payout_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &settings, cmd)?,
        Some(Commands::Init) => handle_init(&storage, &mut settings)?,
        Some(Commands::Config(cmd)) => handle_config_command(&storage, &mut settings, cmd)?,
        None => {
            println!("tally - income, payouts and savings");
            println!();
            println!("Run 'tally --help' for usage information.");
            if !storage.is_initialized() {
                println!("Run 'tally init' to get started.");
            }
        }
    }

    Ok(())
}
