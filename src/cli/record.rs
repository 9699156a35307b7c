//! Record CLI commands
//!
//! Implements the everyday ledger commands: adding, listing, editing and
//! deleting records, plus the summary and category views.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_categories, format_record_details, format_record_register, format_summary,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date, Kind, Record, RecordId};
use crate::reports::LedgerSummary;
use crate::services::LedgerManager;

const REJECTED: &str =
    "description and category must not be empty and the amount must be a positive number";

/// Record subcommands
#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// Add a new record
    Add {
        /// What the money was for
        description: String,
        /// Amount (always positive; use --kind for direction)
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// income or expense
        #[arg(short, long, default_value = "expense")]
        kind: Kind,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List records, most recent first
    List {
        /// Only records in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only income or only expense records
        #[arg(short, long)]
        kind: Option<Kind>,
        /// Show at most this many records
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show record details
    Show {
        /// Record ID (e.g. 12 or #12)
        id: RecordId,
    },

    /// Edit a record; fields not given keep their current value
    Update {
        /// Record ID (e.g. 12 or #12)
        id: RecordId,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long, allow_negative_numbers = true)]
        amount: Option<f64>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New kind
        #[arg(short, long)]
        kind: Option<Kind>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a record
    Delete {
        /// Record ID (e.g. 12 or #12)
        id: RecordId,
    },

    /// Show income, expenses, balance and per-category totals
    Summary,

    /// List the categories in use
    Categories,
}

/// Handle a record command
pub fn handle_record_command(
    manager: &mut LedgerManager,
    settings: &Settings,
    cmd: RecordCommands,
) -> LedgerResult<()> {
    match cmd {
        RecordCommands::Add {
            description,
            amount,
            category,
            kind,
            date,
        } => {
            let occurred_at = match date {
                Some(date) => parse_date(&date)?,
                None => chrono::Utc::now(),
            };

            let id = manager
                .add_record(&description, amount, &category, kind, occurred_at)?
                .ok_or_else(|| LedgerError::Validation(REJECTED.to_string()))?;

            println!(
                "Added {} {}: {} ({})",
                kind,
                id,
                description,
                settings.format_amount(amount)
            );
        }

        RecordCommands::List {
            category,
            kind,
            limit,
        } => {
            let mut records: Vec<Record> = match (&category, kind) {
                (Some(category), _) => manager.get_by_category(category)?,
                (None, Some(kind)) => manager.get_by_kind(kind)?,
                (None, None) => manager.get_all().to_vec(),
            };
            if let (Some(_), Some(kind)) = (&category, kind) {
                records.retain(|r| r.kind == kind);
            }
            if let Some(limit) = limit {
                records.truncate(limit);
            }

            print!("{}", format_record_register(&records, settings));
        }

        RecordCommands::Show { id } => {
            let record = manager
                .find(id)
                .ok_or_else(|| LedgerError::record_not_found(id.to_string()))?;
            print!("{}", format_record_details(record, settings));
        }

        RecordCommands::Update {
            id,
            description,
            amount,
            category,
            kind,
            date,
        } => {
            let current = manager
                .find(id)
                .cloned()
                .ok_or_else(|| LedgerError::record_not_found(id.to_string()))?;

            let occurred_at = match date {
                Some(date) => parse_date(&date)?,
                None => current.occurred_at,
            };

            let updated = manager.update_at(
                id,
                description.as_deref().unwrap_or(&current.description),
                amount.unwrap_or(current.amount),
                category.as_deref().unwrap_or(&current.category),
                kind.unwrap_or(current.kind),
                occurred_at,
            )?;
            if !updated {
                return Err(LedgerError::Validation(REJECTED.to_string()));
            }

            println!("Updated record {}", id);
        }

        RecordCommands::Delete { id } => {
            if !manager.delete(id)? {
                return Err(LedgerError::record_not_found(id.to_string()));
            }
            println!("Deleted record {}", id);
        }

        RecordCommands::Summary => {
            let summary = LedgerSummary::build(manager)?;
            print!("{}", format_summary(&summary, settings));
        }

        RecordCommands::Categories => {
            print!("{}", format_categories(&manager.categories()));
        }
    }

    Ok(())
}
