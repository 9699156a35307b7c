//! Display formatting for terminal output
//!
//! Provides utilities for formatting records and reports for terminal display.

pub mod record;
pub mod report;

pub use record::{format_record_details, format_record_register, format_record_row};
pub use report::{format_categories, format_summary};
