//! Export module for the ledger
//!
//! Provides data export in multiple formats:
//! - CSV: one row per record (spreadsheet-compatible)
//! - JSON: machine-readable full ledger export

pub mod csv;
pub mod json;

pub use self::csv::export_records_csv;
pub use json::{export_full_json, read_full_json, FullExport, EXPORT_SCHEMA_VERSION};
