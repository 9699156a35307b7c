//! Report formatting utilities for terminal output

use std::collections::BTreeSet;

use crate::config::Settings;
use crate::reports::LedgerSummary;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format the ledger summary
pub fn format_summary(summary: &LedgerSummary, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total Income:   {:>14}\n",
        settings.format_amount(summary.total_income)
    ));
    output.push_str(&format!(
        "Total Expenses: {:>14}\n",
        settings.format_amount(summary.total_expenses)
    ));
    output.push_str(&format!(
        "Balance:        {:>14}\n",
        settings.format_amount(summary.balance)
    ));
    output.push_str(&format!("Records:        {:>14}\n", summary.record_count));

    if summary.categories.is_empty() {
        return output;
    }

    output.push_str("\nBy category:\n");
    let max_total = summary
        .categories
        .iter()
        .map(|c| c.total)
        .fold(0.0_f64, f64::max);

    for category in &summary.categories {
        output.push_str(&format!(
            "  {:16} {:>14} {:>6} {}\n",
            category.category,
            settings.format_amount(category.total),
            format_percentage(category.percentage),
            format_bar(category.total, max_total, 20),
        ));
    }

    output
}

/// Format the distinct category list
pub fn format_categories(categories: &BTreeSet<String>) -> String {
    if categories.is_empty() {
        return "No categories yet.\n".to_string();
    }

    let mut output = String::new();
    for category in categories {
        output.push_str(category);
        output.push('\n');
    }
    output
}
