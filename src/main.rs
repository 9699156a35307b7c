use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger_cli::cli::{
    handle_export_command, handle_import_command, handle_record_command, ExportArgs,
    RecordCommands,
};
use ledger_cli::config::{LedgerPaths, Settings};
use ledger_cli::logging;
use ledger_cli::services::LedgerManager;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Local single-user income and expense ledger",
    long_about = "ledger keeps a flat list of income and expense records in a local \
                  SQLite database and reports totals, balance and per-category \
                  spending from the command line."
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. debug, info, warn)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Record(RecordCommands),

    /// Export the ledger as CSV or JSON
    Export(ExportArgs),

    /// Import records from a CSV file
    Import {
        /// Path to CSV file (columns: description,amount,category,kind[,date])
        file: PathBuf,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(level) = cli.log_level {
        settings.logging.level = level;
    }
    logging::init(&settings.logging);

    let Some(command) = cli.command else {
        println!("ledger - local income and expense tracking");
        println!();
        println!("Run 'ledger --help' for usage information.");
        return Ok(());
    };

    if let Commands::Config = command {
        print_config(&paths, &settings);
        return Ok(());
    }

    // Open the ledger; a database that cannot be opened aborts the run
    paths.ensure_directories()?;
    let location = settings.database_location(&paths);
    let mut manager = LedgerManager::try_open(&location)?;
    tracing::debug!(location = %location.display(), "ledger opened");

    manager.subscribe(|| tracing::debug!("ledger changed"));

    match command {
        Commands::Record(cmd) => handle_record_command(&mut manager, &settings, cmd)?,
        Commands::Export(args) => handle_export_command(&manager, args)?,
        Commands::Import { file } => handle_import_command(&mut manager, &file)?,
        Commands::Config => {}
    }

    Ok(())
}

fn print_config(paths: &LedgerPaths, settings: &Settings) {
    println!("Ledger Configuration");
    println!("====================");
    println!("Base directory:   {}", paths.base_dir().display());
    let saved = if paths.is_initialized() { "" } else { " (defaults, not saved)" };
    println!(
        "Settings file:    {}{}",
        paths.settings_file().display(),
        saved
    );
    println!(
        "Database:         {}",
        settings.database_location(paths).display()
    );
    println!("Export directory: {}", paths.export_dir().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Log level:       {}", settings.logging.level);
    println!("  JSON logs:       {}", settings.logging.json);
}
