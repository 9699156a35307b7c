//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger manager.

pub mod export;
pub mod import;
pub mod record;

pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use import::handle_import_command;
pub use record::{handle_record_command, RecordCommands};
