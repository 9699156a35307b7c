//! CLI command handler for CSV import

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::import::import_records_csv;
use crate::services::LedgerManager;

/// Handle the import command
pub fn handle_import_command(manager: &mut LedgerManager, file: &Path) -> LedgerResult<()> {
    let handle = File::open(file).map_err(|e| {
        LedgerError::Import(format!("Failed to open {}: {}", file.display(), e))
    })?;

    let summary = import_records_csv(manager, BufReader::new(handle))?;

    println!("Imported {} of {} rows", summary.imported, summary.total());
    if !summary.skipped.is_empty() {
        println!();
        println!("Skipped rows:");
        for (line, reason) in &summary.skipped {
            println!("  line {}: {}", line, reason);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;
    use tempfile::TempDir;

    #[test]
    fn test_import_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager =
            LedgerManager::with_store(SqliteStore::open_in_memory().unwrap()).unwrap();

        let err = handle_import_command(&mut manager, &temp_dir.path().join("nope.csv"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
    }
}
