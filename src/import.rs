//! CSV import
//!
//! Reads records from a CSV file with a header row and feeds each one through
//! the manager's add path, so imported rows get the same validation as rows
//! typed at the command line.
//!
//! Required columns: `description`, `amount`, `category`, `kind`. An optional
//! `date` column (`YYYY-MM-DD`) sets the occurrence date; rows without one are
//! dated now. Column order does not matter and header names are matched
//! case-insensitively.

use std::io::Read;

use chrono::Utc;
use csv::StringRecord;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date, Kind};
use crate::services::LedgerManager;

/// Outcome of an import run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    /// Rows that were stored
    pub imported: usize,

    /// Rows that were rejected: (line number, reason)
    pub skipped: Vec<(usize, String)>,
}

impl ImportSummary {
    /// Total number of data rows seen
    pub fn total(&self) -> usize {
        self.imported + self.skipped.len()
    }
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    description: usize,
    amount: usize,
    category: usize,
    kind: usize,
    date: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> LedgerResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| LedgerError::Import(format!("Missing '{}' column", name)))
        };

        Ok(Self {
            description: require("description")?,
            amount: require("amount")?,
            category: require("category")?,
            kind: require("kind")?,
            date: find("date"),
        })
    }
}

/// Import every row of `reader` into the ledger
///
/// Rows with unparseable fields, or that the manager rejects, are recorded in
/// [`ImportSummary::skipped`] and do not stop the import. Store failures abort
/// the import and are returned as errors; rows stored before the failure stay.
pub fn import_records_csv<R: Read>(
    manager: &mut LedgerManager,
    reader: R,
) -> LedgerResult<ImportSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| LedgerError::Import(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut summary = ImportSummary::default();

    for (idx, row) in csv_reader.records().enumerate() {
        // Header is line 1
        let line = row
            .as_ref()
            .ok()
            .and_then(|r| r.position())
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                summary.skipped.push((line, format!("Unreadable row: {}", e)));
                continue;
            }
        };

        let field = |col: usize| row.get(col).unwrap_or("");

        let amount = match field(columns.amount).trim().parse::<f64>() {
            Ok(amount) => amount,
            Err(_) => {
                summary.skipped.push((
                    line,
                    format!("Invalid amount '{}'", field(columns.amount)),
                ));
                continue;
            }
        };

        let kind = match field(columns.kind).parse::<Kind>() {
            Ok(kind) => kind,
            Err(e) => {
                summary.skipped.push((line, e.to_string()));
                continue;
            }
        };

        let occurred_at = match columns.date.map(field).filter(|d| !d.trim().is_empty()) {
            Some(date) => match parse_date(date) {
                Ok(date) => date,
                Err(e) => {
                    summary.skipped.push((line, e.to_string()));
                    continue;
                }
            },
            None => Utc::now(),
        };

        let added = manager.add_at(
            field(columns.description),
            amount,
            field(columns.category),
            kind,
            occurred_at,
        )?;

        if added {
            summary.imported += 1;
        } else {
            summary
                .skipped
                .push((line, "Rejected by ledger validation".to_string()));
        }
    }

    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped.len(),
        "CSV import finished"
    );

    Ok(summary)
}
