//! Record identity
//!
//! Record ids are positive integers assigned exclusively by the store. The
//! newtype keeps them from being confused with amounts or counts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

const DISPLAY_PREFIX: &str = "#";

/// Store-assigned identifier of a ledger record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw id, rejecting zero and negative values
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Get the underlying integer
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Wrap a value read back from the store
    pub(crate) const fn from_store(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, self.0)
    }
}

impl FromStr for RecordId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(DISPLAY_PREFIX).unwrap_or(trimmed);
        digits
            .parse::<i64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| LedgerError::Validation(format!("Invalid record id: '{}'", s)))
    }
}
