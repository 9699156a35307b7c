//! Service layer for the ledger
//!
//! The service layer provides business logic on top of the storage layer:
//! input validation, the cached snapshot, and change notification.

pub mod ledger;
pub mod observer;

pub use ledger::LedgerManager;
pub use observer::{Observer, ObserverRegistry, SubscriptionId};
