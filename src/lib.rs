//! ledger-cli - local single-user income and expense ledger
//!
//! This library provides the core of the `ledger` command: a SQLite-backed
//! record store, a ledger manager that validates input, caches a snapshot of
//! every record and notifies observers after each committed change, and the
//! reporting, export and import layers built on top of it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Structured logging setup
//! - `models`: Core data models (records, kinds, ids)
//! - `storage`: SQLite storage layer
//! - `services`: Ledger manager and observer registry
//! - `reports`: Ledger summary
//! - `display`: Terminal formatting
//! - `export` / `import`: CSV and JSON data exchange
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger_cli::models::Kind;
//! use ledger_cli::services::LedgerManager;
//!
//! let mut ledger = LedgerManager::try_open("ledger.db")?;
//! ledger.add("Paycheck", 2000.0, "Salary", Kind::Income)?;
//! println!("balance: {}", ledger.balance()?);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
