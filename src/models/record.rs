//! Record model
//!
//! A record is a single income or expense occurrence. Amounts are always
//! strictly positive; the direction lives in [`Kind`].

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::RecordId;
use crate::error::LedgerError;

/// Direction of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl Kind {
    /// Integer code persisted in the `kind` column
    pub const fn code(&self) -> i64 {
        match self {
            Self::Income => 0,
            Self::Expense => 1,
        }
    }

    /// Decode a persisted `kind` column value
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Income),
            1 => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for Kind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::Validation(format!(
                "Unknown kind '{}': expected 'income' or 'expense'",
                other
            ))),
        }
    }
}

/// A persisted ledger record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier
    pub id: RecordId,

    /// What the money was for
    pub description: String,

    /// Strictly positive amount
    pub amount: f64,

    /// Free-form category name
    pub category: String,

    /// Income or expense
    pub kind: Kind,

    /// When it happened (only the date is significant)
    pub occurred_at: DateTime<Utc>,
}

impl Record {
    /// Amount with the direction applied (expenses are negative)
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            Kind::Income => self.amount,
            Kind::Expense => -self.amount,
        }
    }

    /// Format the occurrence date with a strftime pattern
    pub fn date_string(&self, format: &str) -> String {
        self.occurred_at.format(format).to_string()
    }
}

/// A record that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub kind: Kind,
    pub occurred_at: DateTime<Utc>,
}

impl NewRecord {
    /// Create a new record stamped with the current time
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        kind: Kind,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            kind,
            occurred_at: Utc::now(),
        }
    }

    /// Override the occurrence time
    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// Attach an id, producing a full record
    pub fn with_id(self, id: RecordId) -> Record {
        Record {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            kind: self.kind,
            occurred_at: self.occurred_at,
        }
    }
}

/// Parse a `YYYY-MM-DD` date into midnight UTC
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, LedgerError> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| {
        LedgerError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD): {}", input, e))
    })?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| LedgerError::Validation(format!("Invalid date '{}'", input)))?;
    Ok(Utc.from_utc_datetime(&midnight))
}
