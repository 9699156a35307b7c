//! Ledger manager
//!
//! Owns the record store and a cached snapshot of every record. All mutations
//! go through the store first; the snapshot is reloaded and observers are
//! notified only after the store confirms the write. Aggregates are always
//! read live from the store, never from the snapshot.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};

use super::observer::{ObserverRegistry, SubscriptionId};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Kind, NewRecord, Record, RecordId};
use crate::storage::{RecordStore, SqliteStore};

/// Coordinates validation, persistence, the cached snapshot and observers
pub struct LedgerManager {
    store: Option<Box<dyn RecordStore>>,
    init_error: Option<String>,
    snapshot: Vec<Record>,
    observers: ObserverRegistry,
}

impl LedgerManager {
    /// Open the SQLite ledger at `location`
    ///
    /// Never fails: if the store cannot be opened the manager is returned in a
    /// not-ready state, every operation that needs the store reports
    /// [`LedgerError::NotInitialized`], and the cause is kept in
    /// [`init_error`](Self::init_error).
    pub fn open(location: impl AsRef<Path>) -> Self {
        match Self::try_open(location) {
            Ok(manager) => manager,
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize ledger");
                Self {
                    store: None,
                    init_error: Some(e.to_string()),
                    snapshot: Vec::new(),
                    observers: ObserverRegistry::new(),
                }
            }
        }
    }

    /// Open the SQLite ledger at `location`, surfacing connection failures
    pub fn try_open(location: impl AsRef<Path>) -> LedgerResult<Self> {
        Self::with_store(SqliteStore::open(location)?)
    }

    /// Build a manager over any record store and load the initial snapshot
    pub fn with_store(store: impl RecordStore + 'static) -> LedgerResult<Self> {
        let snapshot = store.list_all()?;
        tracing::debug!(records = snapshot.len(), "ledger ready");

        Ok(Self {
            store: Some(Box::new(store)),
            init_error: None,
            snapshot,
            observers: ObserverRegistry::new(),
        })
    }

    /// Whether the store was opened successfully
    pub fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    /// Why initialization failed, if it did
    pub fn init_error(&self) -> Option<&str> {
        self.init_error.as_deref()
    }

    // ----- Mutations -----

    /// Add a record dated now
    ///
    /// Returns `Ok(false)` without touching the store when the input is invalid.
    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        category: &str,
        kind: Kind,
    ) -> LedgerResult<bool> {
        self.add_at(description, amount, category, kind, Utc::now())
    }

    /// Add a record with an explicit occurrence time
    pub fn add_at(
        &mut self,
        description: &str,
        amount: f64,
        category: &str,
        kind: Kind,
        occurred_at: DateTime<Utc>,
    ) -> LedgerResult<bool> {
        self.add_record(description, amount, category, kind, occurred_at)
            .map(|id| id.is_some())
    }

    /// Add a record and return the id the store assigned
    ///
    /// Returns `Ok(None)` without touching the store when the input is invalid.
    pub fn add_record(
        &mut self,
        description: &str,
        amount: f64,
        category: &str,
        kind: Kind,
        occurred_at: DateTime<Utc>,
    ) -> LedgerResult<Option<RecordId>> {
        let store = self.store_mut()?;

        let record = match validate(description, amount, category, kind) {
            Ok(record) => record.at(occurred_at),
            Err(e) => {
                tracing::warn!(error = %e, "rejected new record");
                return Ok(None);
            }
        };

        let id = store.insert(&record).map_err(|e| {
            tracing::error!(error = %e, "failed to insert record");
            e
        })?;
        tracing::info!(%id, kind = %record.kind, amount = record.amount, "record added");

        self.commit();
        Ok(Some(id))
    }

    /// Replace every field of record `id`, dating it now
    ///
    /// Returns `Ok(false)` for invalid input or when no record has that id.
    pub fn update(
        &mut self,
        id: RecordId,
        description: &str,
        amount: f64,
        category: &str,
        kind: Kind,
    ) -> LedgerResult<bool> {
        self.update_at(id, description, amount, category, kind, Utc::now())
    }

    /// Replace every field of record `id` with an explicit occurrence time
    pub fn update_at(
        &mut self,
        id: RecordId,
        description: &str,
        amount: f64,
        category: &str,
        kind: Kind,
        occurred_at: DateTime<Utc>,
    ) -> LedgerResult<bool> {
        let store = self.store_mut()?;

        let record = match validate(description, amount, category, kind) {
            Ok(record) => record.at(occurred_at).with_id(id),
            Err(e) => {
                tracing::warn!(%id, error = %e, "rejected record update");
                return Ok(false);
            }
        };

        let matched = store.update(&record).map_err(|e| {
            tracing::error!(%id, error = %e, "failed to update record");
            e
        })?;
        if !matched {
            tracing::info!(%id, "update matched no record");
            return Ok(false);
        }
        tracing::info!(%id, "record updated");

        self.commit();
        Ok(true)
    }

    /// Hard-delete record `id`; `Ok(false)` when no record has that id
    pub fn delete(&mut self, id: RecordId) -> LedgerResult<bool> {
        let removed = self.store_mut()?.delete(id).map_err(|e| {
            tracing::error!(%id, error = %e, "failed to delete record");
            e
        })?;
        if !removed {
            tracing::info!(%id, "delete matched no record");
            return Ok(false);
        }
        tracing::info!(%id, "record deleted");

        self.commit();
        Ok(true)
    }

    /// Reload the snapshot from the store and notify every observer
    pub fn refresh(&mut self) -> LedgerResult<()> {
        self.reload()?;
        self.observers.notify();
        Ok(())
    }

    // ----- Snapshot queries -----

    /// The cached snapshot, most recent first
    pub fn get_all(&self) -> &[Record] {
        &self.snapshot
    }

    /// Look up a record in the cached snapshot
    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.snapshot.iter().find(|r| r.id == id)
    }

    /// Distinct categories present in the cached snapshot
    pub fn categories(&self) -> BTreeSet<String> {
        self.snapshot.iter().map(|r| r.category.clone()).collect()
    }

    // ----- Live queries -----

    pub fn get_by_category(&self, category: &str) -> LedgerResult<Vec<Record>> {
        self.store()?.list_by_category(category)
    }

    pub fn get_by_kind(&self, kind: Kind) -> LedgerResult<Vec<Record>> {
        self.store()?.list_by_kind(kind)
    }

    pub fn total_income(&self) -> LedgerResult<f64> {
        self.store()?.sum_by_kind(Kind::Income)
    }

    pub fn total_expenses(&self) -> LedgerResult<f64> {
        self.store()?.sum_by_kind(Kind::Expense)
    }

    /// Total income minus total expenses
    pub fn balance(&self) -> LedgerResult<f64> {
        Ok(self.total_income()? - self.total_expenses()?)
    }

    pub fn total_by_category(&self, category: &str) -> LedgerResult<f64> {
        self.store()?.sum_by_category(category)
    }

    // ----- Observers -----

    /// Register a callback run after every committed change
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ----- Internals -----

    fn store(&self) -> LedgerResult<&(dyn RecordStore + 'static)> {
        self.store.as_deref().ok_or(LedgerError::NotInitialized)
    }

    fn store_mut(&mut self) -> LedgerResult<&mut (dyn RecordStore + 'static)> {
        self.store.as_deref_mut().ok_or(LedgerError::NotInitialized)
    }

    fn reload(&mut self) -> LedgerResult<()> {
        let records = self.store()?.list_all()?;
        tracing::debug!(records = records.len(), "snapshot reloaded");
        self.snapshot = records;
        Ok(())
    }

    /// Publish a write the store already confirmed
    ///
    /// The write stands even if the reload fails: the snapshot stays stale
    /// until the next successful reload and observers are not notified.
    fn commit(&mut self) {
        match self.reload() {
            Ok(()) => self.observers.notify(),
            Err(e) => tracing::error!(error = %e, "write committed but snapshot reload failed"),
        }
    }
}

/// Check caller input, producing a record ready for the store
///
/// Blank text is rejected; accepted text is stored exactly as given.
fn validate(description: &str, amount: f64, category: &str, kind: Kind) -> LedgerResult<NewRecord> {
    if description.trim().is_empty() {
        return Err(LedgerError::Validation("Description cannot be empty".into()));
    }
    if category.trim().is_empty() {
        return Err(LedgerError::Validation("Category cannot be empty".into()));
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::Validation(format!(
            "Amount must be a positive number, got {}",
            amount
        )));
    }

    Ok(NewRecord::new(description, amount, category, kind))
}
