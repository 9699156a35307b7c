//! Core data models for the ledger
//!
//! A ledger is a flat collection of income and expense records.

pub mod ids;
pub mod record;

pub use ids::RecordId;
pub use record::{parse_date, Kind, NewRecord, Record};
