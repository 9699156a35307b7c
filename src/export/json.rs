//! JSON Export functionality
//!
//! Exports the complete ledger to JSON format with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Record;
use crate::services::LedgerManager;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All records, most recent first
    pub records: Vec<Record>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub record_count: usize,
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,

    /// Date range of records (earliest)
    pub earliest_record: Option<String>,

    /// Date range of records (latest)
    pub latest_record: Option<String>,
}

impl FullExport {
    /// Create a new full export from the ledger
    pub fn from_manager(manager: &LedgerManager) -> LedgerResult<Self> {
        let records = manager.get_all().to_vec();
        let total_income = manager.total_income()?;
        let total_expenses = manager.total_expenses()?;

        let earliest_record = records
            .iter()
            .map(|r| r.occurred_at)
            .min()
            .map(|d| d.date_naive().to_string());
        let latest_record = records
            .iter()
            .map(|r| r.occurred_at)
            .max()
            .map(|d| d.date_naive().to_string());

        let metadata = ExportMetadata {
            record_count: records.len(),
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            earliest_record,
            latest_record,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            records,
            metadata,
        })
    }

    /// Check the schema version and that the metadata matches the records
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.metadata.record_count != self.records.len() {
            return Err(format!(
                "Metadata lists {} records but export contains {}",
                self.metadata.record_count,
                self.records.len()
            ));
        }

        if let Some(record) = self.records.iter().find(|r| !(r.amount > 0.0)) {
            return Err(format!(
                "Record {} has non-positive amount {}",
                record.id, record.amount
            ));
        }

        Ok(())
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(
    manager: &LedgerManager,
    writer: W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = FullExport::from_manager(manager)?;

    let written = if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    };

    written.map_err(|e| LedgerError::Export(e.to_string()))
}

/// Read back a JSON export (for verification)
pub fn read_full_json(json_str: &str) -> LedgerResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)?;
    export.validate().map_err(LedgerError::Import)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_date, Kind};
    use crate::storage::SqliteStore;

    #[test]
    fn test_export_and_read_back() {
        let mut manager =
            LedgerManager::with_store(SqliteStore::open_in_memory().unwrap()).unwrap();
        manager
            .add_at(
                "Paycheck",
                2000.0,
                "Salary",
                Kind::Income,
                parse_date("2025-01-01").unwrap(),
            )
            .unwrap();
        manager
            .add_at(
                "Rent",
                1200.0,
                "Housing",
                Kind::Expense,
                parse_date("2025-01-03").unwrap(),
            )
            .unwrap();

        let mut buffer = Vec::new();
        export_full_json(&manager, &mut buffer, true).unwrap();

        let export = read_full_json(&String::from_utf8(buffer).unwrap()).unwrap();
        assert_eq!(export.records, manager.get_all());
        assert_eq!(export.metadata.record_count, 2);
        assert_eq!(export.metadata.balance, 800.0);
        assert_eq!(export.metadata.earliest_record.as_deref(), Some("2025-01-01"));
        assert_eq!(export.metadata.latest_record.as_deref(), Some("2025-01-03"));
    }

    #[test]
    fn test_validate_rejects_wrong_schema() {
        let manager = LedgerManager::with_store(SqliteStore::open_in_memory().unwrap()).unwrap();
        let mut export = FullExport::from_manager(&manager).unwrap();
        export.schema_version = "0.1.0".into();

        assert!(export.validate().is_err());
    }
}
