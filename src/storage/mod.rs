//! Storage layer for the ledger
//!
//! The [`RecordStore`] trait is the contract the ledger manager relies on;
//! [`SqliteStore`] is the durable implementation backed by a single SQLite table.

pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::LedgerResult;
use crate::models::{Kind, NewRecord, Record, RecordId};

/// Durable CRUD and aggregate queries over ledger records
///
/// Every list operation returns records ordered by `occurred_at` descending,
/// ties broken by id descending, and is re-queried on each call. Sums over
/// an empty selection are `0.0`, not an error.
pub trait RecordStore {
    /// Persist a new record; the store assigns and returns its identity
    fn insert(&mut self, record: &NewRecord) -> LedgerResult<RecordId>;

    /// Replace every field of the row matching `record.id`
    ///
    /// Returns `false` when no row matched.
    fn update(&mut self, record: &Record) -> LedgerResult<bool>;

    /// Remove the row matching `id`, returning whether one was removed
    fn delete(&mut self, id: RecordId) -> LedgerResult<bool>;

    fn list_all(&self) -> LedgerResult<Vec<Record>>;

    fn list_by_category(&self, category: &str) -> LedgerResult<Vec<Record>>;

    fn list_by_kind(&self, kind: Kind) -> LedgerResult<Vec<Record>>;

    fn sum_by_kind(&self, kind: Kind) -> LedgerResult<f64>;

    fn sum_by_category(&self, category: &str) -> LedgerResult<f64>;
}
