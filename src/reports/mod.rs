//! Reports module for the ledger
//!
//! Derived views over the ledger that combine several aggregate queries.

pub mod summary;

pub use summary::{CategoryTotal, LedgerSummary};
