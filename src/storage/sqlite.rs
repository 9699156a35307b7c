//! SQLite record store
//!
//! Owns one connection for its whole lifetime. All filter values are bound
//! as statement parameters.

use std::path::Path;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Params, Row, ToSql};

use chrono::{DateTime, Utc};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Kind, NewRecord, Record, RecordId};

use super::RecordStore;

/// Location string that opens a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        amount REAL NOT NULL CHECK (amount > 0),
        category TEXT NOT NULL,
        kind INTEGER NOT NULL CHECK (kind IN (0, 1)),
        occurred_at INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_records_occurred
        ON records(occurred_at, id);

    CREATE INDEX IF NOT EXISTS idx_records_category
        ON records(category);
";

const SELECT_COLUMNS: &str = "SELECT id, description, amount, category, kind, occurred_at FROM records";

const ORDER_RECENT_FIRST: &str = "ORDER BY occurred_at DESC, id DESC";

/// Record store backed by a SQLite database
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `location` and ensure the schema exists
    pub fn open(location: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = location.as_ref();
        let location = path.display().to_string();

        let conn = if location == IN_MEMORY {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(|e| {
            LedgerError::Connection(format!("Cannot open database {}: {}", location, e))
        })?;

        conn.execute_batch(SCHEMA).map_err(|e| {
            LedgerError::Connection(format!("Cannot create schema in {}: {}", location, e))
        })?;

        let store = Self { conn };
        let records = store
            .count()
            .map_err(|e| LedgerError::Connection(format!("Cannot read {}: {}", location, e)))?;
        tracing::debug!(%location, records, "record store opened");
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> LedgerResult<Self> {
        Self::open(IN_MEMORY)
    }

    /// Number of persisted records
    pub fn count(&self) -> LedgerResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))
            .map_err(query_error)?;
        Ok(count.max(0) as usize)
    }

    fn query_records<P: Params>(&self, sql: &str, params: P) -> LedgerResult<Vec<Record>> {
        let mut stmt = self.conn.prepare_cached(sql).map_err(query_error)?;
        let rows = stmt.query_map(params, record_from_row).map_err(query_error)?;
        let records = rows.collect::<Result<Vec<_>, _>>().map_err(query_error)?;
        Ok(records)
    }

    fn query_sum<P: Params>(&self, sql: &str, params: P) -> LedgerResult<f64> {
        let mut stmt = self.conn.prepare_cached(sql).map_err(query_error)?;
        let total: f64 = stmt
            .query_row(params, |row| row.get(0))
            .map_err(query_error)?;
        Ok(total)
    }
}

fn query_error(err: rusqlite::Error) -> LedgerError {
    LedgerError::Query(err.to_string())
}

fn write_error(err: rusqlite::Error) -> LedgerError {
    LedgerError::Write(err.to_string())
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    let secs: i64 = row.get(5)?;
    let occurred_at = DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(5, secs))?;

    Ok(Record {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        kind: row.get(4)?,
        occurred_at,
    })
}

impl ToSql for Kind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for Kind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_i64()?;
        Kind::from_code(code).ok_or(FromSqlError::OutOfRange(code))
    }
}

impl ToSql for RecordId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.get()))
    }
}

impl FromSql for RecordId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_i64()?;
        if raw <= 0 {
            return Err(FromSqlError::OutOfRange(raw));
        }
        Ok(RecordId::from_store(raw))
    }
}

impl RecordStore for SqliteStore {
    fn insert(&mut self, record: &NewRecord) -> LedgerResult<RecordId> {
        self.conn
            .execute(
                "INSERT INTO records (description, amount, category, kind, occurred_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.description,
                    record.amount,
                    record.category,
                    record.kind,
                    record.occurred_at.timestamp(),
                ],
            )
            .map_err(write_error)?;

        let id = RecordId::from_store(self.conn.last_insert_rowid());
        tracing::debug!(%id, "record inserted");
        Ok(id)
    }

    fn update(&mut self, record: &Record) -> LedgerResult<bool> {
        let affected = self
            .conn
            .execute(
                "UPDATE records
                 SET description = ?1, amount = ?2, category = ?3, kind = ?4, occurred_at = ?5
                 WHERE id = ?6",
                params![
                    record.description,
                    record.amount,
                    record.category,
                    record.kind,
                    record.occurred_at.timestamp(),
                    record.id,
                ],
            )
            .map_err(write_error)?;

        tracing::debug!(id = %record.id, affected, "record updated");
        Ok(affected > 0)
    }

    fn delete(&mut self, id: RecordId) -> LedgerResult<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM records WHERE id = ?1", params![id])
            .map_err(write_error)?;

        tracing::debug!(%id, affected, "record deleted");
        Ok(affected > 0)
    }

    fn list_all(&self) -> LedgerResult<Vec<Record>> {
        self.query_records(
            &format!("{} {}", SELECT_COLUMNS, ORDER_RECENT_FIRST),
            params![],
        )
    }

    fn list_by_category(&self, category: &str) -> LedgerResult<Vec<Record>> {
        self.query_records(
            &format!("{} WHERE category = ?1 {}", SELECT_COLUMNS, ORDER_RECENT_FIRST),
            params![category],
        )
    }

    fn list_by_kind(&self, kind: Kind) -> LedgerResult<Vec<Record>> {
        self.query_records(
            &format!("{} WHERE kind = ?1 {}", SELECT_COLUMNS, ORDER_RECENT_FIRST),
            params![kind],
        )
    }

    fn sum_by_kind(&self, kind: Kind) -> LedgerResult<f64> {
        self.query_sum(
            "SELECT COALESCE(SUM(amount), 0.0) FROM records WHERE kind = ?1",
            params![kind],
        )
    }

    fn sum_by_category(&self, category: &str) -> LedgerResult<f64> {
        self.query_sum(
            "SELECT COALESCE(SUM(amount), 0.0) FROM records WHERE category = ?1",
            params![category],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap()
    }

    fn create_test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_empty_store() {
        let store = create_test_store();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.sum_by_kind(Kind::Income).unwrap(), 0.0);
        assert_eq!(store.sum_by_category("Housing").unwrap(), 0.0);
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let mut store = create_test_store();
        let first = store
            .insert(&NewRecord::new("Paycheck", 2000.0, "Salary", Kind::Income))
            .unwrap();
        let second = store
            .insert(&NewRecord::new("Rent", 1200.0, "Housing", Kind::Expense))
            .unwrap();

        assert_eq!(first.get(), 1);
        assert!(second > first);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = create_test_store();
        store
            .insert(&NewRecord::new("A", 1.0, "Misc", Kind::Expense))
            .unwrap();
        let last = store
            .insert(&NewRecord::new("B", 2.0, "Misc", Kind::Expense))
            .unwrap();

        assert!(store.delete(last).unwrap());
        let next = store
            .insert(&NewRecord::new("C", 3.0, "Misc", Kind::Expense))
            .unwrap();

        assert!(next > last);
    }

    #[test]
    fn test_round_trip_fields() {
        let mut store = create_test_store();
        let input = NewRecord::new("Groceries", 54.25, "Food", Kind::Expense).at(day(10));
        let id = store.insert(&input).unwrap();

        let records = store.list_all().unwrap();
        assert_eq!(records, vec![input.with_id(id)]);
    }

    #[test]
    fn test_list_ordering() {
        let mut store = create_test_store();
        let old = store
            .insert(&NewRecord::new("Old", 1.0, "Misc", Kind::Expense).at(day(1)))
            .unwrap();
        let tie_a = store
            .insert(&NewRecord::new("Tie A", 1.0, "Misc", Kind::Expense).at(day(5)))
            .unwrap();
        let tie_b = store
            .insert(&NewRecord::new("Tie B", 1.0, "Misc", Kind::Expense).at(day(5)))
            .unwrap();
        let newest = store
            .insert(&NewRecord::new("New", 1.0, "Misc", Kind::Expense).at(day(9)))
            .unwrap();

        let ids: Vec<_> = store.list_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newest, tie_b, tie_a, old]);
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let mut store = create_test_store();
        let id = store
            .insert(&NewRecord::new("Rent", 1200.0, "Housing", Kind::Expense).at(day(1)))
            .unwrap();

        let replacement = NewRecord::new("Bonus", 300.0, "Salary", Kind::Income)
            .at(day(2))
            .with_id(id);
        assert!(store.update(&replacement).unwrap());

        assert_eq!(store.list_all().unwrap(), vec![replacement]);
    }

    #[test]
    fn test_update_missing_row_returns_false() {
        let mut store = create_test_store();
        let ghost = NewRecord::new("Ghost", 1.0, "Misc", Kind::Expense)
            .with_id(RecordId::new(99).unwrap());

        assert!(!store.update(&ghost).unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_twice() {
        let mut store = create_test_store();
        let id = store
            .insert(&NewRecord::new("Rent", 1200.0, "Housing", Kind::Expense))
            .unwrap();

        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
    }

    #[test]
    fn test_filters_and_sums() {
        let mut store = create_test_store();
        store
            .insert(&NewRecord::new("Paycheck", 2000.0, "Salary", Kind::Income))
            .unwrap();
        let rent = store
            .insert(&NewRecord::new("Rent", 1200.0, "Housing", Kind::Expense))
            .unwrap();
        store
            .insert(&NewRecord::new("Coffee", 4.5, "Food", Kind::Expense))
            .unwrap();

        let housing = store.list_by_category("Housing").unwrap();
        assert_eq!(housing.len(), 1);
        assert_eq!(housing[0].id, rent);

        assert_eq!(store.list_by_kind(Kind::Expense).unwrap().len(), 2);
        assert_eq!(store.sum_by_kind(Kind::Income).unwrap(), 2000.0);
        assert_eq!(store.sum_by_kind(Kind::Expense).unwrap(), 1204.5);
        assert_eq!(store.sum_by_category("Food").unwrap(), 4.5);
    }

    #[test]
    fn test_filter_values_are_bound_not_interpolated() {
        let mut store = create_test_store();
        let tricky = "O'Brien's \"fund\"; DROP TABLE records; --";
        store
            .insert(&NewRecord::new("Gift", 25.0, tricky, Kind::Income))
            .unwrap();

        assert_eq!(store.list_by_category(tricky).unwrap().len(), 1);
        assert_eq!(store.sum_by_category(tricky).unwrap(), 25.0);
        assert!(store.list_by_category("' OR '1'='1").unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_non_positive_amount_is_write_error() {
        let mut store = create_test_store();
        let result = store.insert(&NewRecord::new("Zero", 0.0, "Misc", Kind::Expense));
        assert!(matches!(result, Err(LedgerError::Write(_))));
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.db");

        let id = {
            let mut store = SqliteStore::open(&path).unwrap();
            store
                .insert(&NewRecord::new("Rent", 1200.0, "Housing", Kind::Expense))
                .unwrap()
        };

        let mut reopened = SqliteStore::open(&path).unwrap();
        let records = reopened.list_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);

        assert!(reopened.delete(id).unwrap());
        let next = reopened
            .insert(&NewRecord::new("Rent", 1250.0, "Housing", Kind::Expense))
            .unwrap();
        assert!(next > id);
    }

    #[test]
    fn test_open_inaccessible_location() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("dir").join("ledger.db");

        let result = SqliteStore::open(&path);
        assert!(matches!(result, Err(LedgerError::Connection(_))));
    }
}
