//! CLI commands for data export
//!
//! Writes the ledger as CSV or JSON to a file or to stdout.

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_full_json, export_records_csv};
use crate::services::LedgerManager;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per record)
    Csv,
    /// JSON format (full ledger with metadata)
    Json,
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(manager: &LedgerManager, args: ExportArgs) -> LedgerResult<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(manager, &mut writer, &args)?;
            writer.flush()?;

            println!(
                "Exported {} records to: {}",
                manager.get_all().len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(manager, &mut writer, &args)?;
            if args.format == ExportFormat::Json {
                writeln!(writer)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    manager: &LedgerManager,
    writer: &mut W,
    args: &ExportArgs,
) -> LedgerResult<()> {
    match args.format {
        ExportFormat::Csv => export_records_csv(manager.get_all(), writer),
        ExportFormat::Json => export_full_json(manager, writer, args.pretty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Kind;
    use crate::storage::SqliteStore;
    use tempfile::TempDir;

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("ledger.csv");

        let mut manager =
            LedgerManager::with_store(SqliteStore::open_in_memory().unwrap()).unwrap();
        manager.add("Coffee", 3.5, "Food", Kind::Expense).unwrap();

        handle_export_command(
            &manager,
            ExportArgs {
                format: ExportFormat::Csv,
                output: Some(output.clone()),
                pretty: false,
            },
        )
        .unwrap();

        let contents = std::fs::read_to_string(output).unwrap();
        assert!(contents.starts_with("id,date,description,category,kind,amount"));
        assert!(contents.contains("Coffee,Food,Expense,3.50"));
    }
}
