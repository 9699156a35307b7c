//! Ledger Summary
//!
//! Totals, balance and a per-category breakdown. Figures come from live
//! store aggregates; the category list comes from the cached snapshot.

use serde::Serialize;
use std::cmp::Ordering;

use crate::error::LedgerResult;
use crate::services::LedgerManager;

/// Total for a single category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Category name
    pub category: String,
    /// Sum of amounts (income and expense alike)
    pub total: f64,
    /// Number of records in the category
    pub record_count: usize,
    /// Share of all money moved, in percent
    pub percentage: f64,
}

/// Ledger Summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Income minus expenses
    pub balance: f64,
    pub record_count: usize,
    /// Largest category first
    pub categories: Vec<CategoryTotal>,
}

impl LedgerSummary {
    /// Build the summary from a ready ledger
    pub fn build(manager: &LedgerManager) -> LedgerResult<Self> {
        let total_income = manager.total_income()?;
        let total_expenses = manager.total_expenses()?;
        let records = manager.get_all();
        let moved = total_income + total_expenses;

        let mut categories = Vec::new();
        for category in manager.categories() {
            let total = manager.total_by_category(&category)?;
            let record_count = records.iter().filter(|r| r.category == category).count();
            let percentage = if moved > 0.0 {
                total / moved * 100.0
            } else {
                0.0
            };
            categories.push(CategoryTotal {
                category,
                total,
                record_count,
                percentage,
            });
        }

        categories.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });

        Ok(Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            record_count: records.len(),
            categories,
        })
    }

    /// Total for one category, if present
    pub fn category(&self, name: &str) -> Option<&CategoryTotal> {
        self.categories.iter().find(|c| c.category == name)
    }
}
