//! CSV Export functionality
//!
//! Exports records to a spreadsheet-compatible CSV file.

use serde::Serialize;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Record;

/// One exported CSV row
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: i64,
    date: String,
    description: &'a str,
    category: &'a str,
    kind: String,
    amount: String,
}

/// Export records to CSV, one row per record in the given order
///
/// Header: `id,date,description,category,kind,amount`. Dates are
/// `YYYY-MM-DD`, amounts carry two decimals and are always positive.
pub fn export_records_csv<W: Write>(records: &[Record], writer: W) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records {
        csv_writer
            .serialize(CsvRow {
                id: record.id.get(),
                date: record.date_string("%Y-%m-%d"),
                description: &record.description,
                category: &record.category,
                kind: record.kind.to_string(),
                amount: format!("{:.2}", record.amount),
            })
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    if records.is_empty() {
        csv_writer
            .write_record(["id", "date", "description", "category", "kind", "amount"])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}
