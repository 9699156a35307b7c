//! Record display formatting
//!
//! Provides utilities for formatting records for terminal display as a
//! register (one row per record) or as a detail view.

use crate::config::Settings;
use crate::models::{Kind, Record};

/// Format a single record for display (register row)
pub fn format_record_row(record: &Record, settings: &Settings) -> String {
    let direction = match record.kind {
        Kind::Income => "+",
        Kind::Expense => "-",
    };

    format!(
        "{:>6} {} {} {} {} {:>12}",
        record.id.to_string(),
        record.date_string(&settings.date_format),
        direction,
        truncate(&record.description, 24),
        truncate(&record.category, 14),
        settings.format_amount(record.signed_amount()),
    )
}

/// Format a list of records as a register
pub fn format_record_register(records: &[Record], settings: &Settings) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let date_width = records[0].date_string(&settings.date_format).chars().count();

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6} {:date_width$}   {:24} {:14} {:>12}\n",
        "ID",
        "Date",
        "Description",
        "Category",
        "Amount",
        date_width = date_width,
    ));
    output.push_str(&"-".repeat(65 + date_width));
    output.push('\n');

    for record in records {
        output.push_str(&format_record_row(record, settings));
        output.push('\n');
    }

    output
}

/// Format record details for display
pub fn format_record_details(record: &Record, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Record:      {}\n", record.id));
    output.push_str(&format!(
        "Date:        {}\n",
        record.date_string(&settings.date_format)
    ));
    output.push_str(&format!("Description: {}\n", record.description));
    output.push_str(&format!("Category:    {}\n", record.category));
    output.push_str(&format!("Kind:        {}\n", record.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        settings.format_amount(record.amount)
    ));

    output
}

/// Pad or cut `s` to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewRecord, RecordId};
    use chrono::{TimeZone, Utc};

    fn sample(kind: Kind) -> Record {
        NewRecord::new("Rent", 1200.0, "Housing", kind)
            .at(Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap())
            .with_id(RecordId::new(3).unwrap())
    }

    #[test]
    fn test_format_row() {
        let settings = Settings::default();
        let row = format_record_row(&sample(Kind::Expense), &settings);

        assert!(row.contains("#3"));
        assert!(row.contains("2025-01-15"));
        assert!(row.contains("Rent"));
        assert!(row.contains("Housing"));
        assert!(row.contains("-$1200.00"));
    }

    #[test]
    fn test_income_row_is_positive() {
        let settings = Settings::default();
        let row = format_record_row(&sample(Kind::Income), &settings);
        assert!(row.contains("$1200.00"));
        assert!(!row.contains("-$1200.00"));
    }

    #[test]
    fn test_empty_register() {
        let settings = Settings::default();
        assert_eq!(format_record_register(&[], &settings), "No records found.\n");
    }

    #[test]
    fn test_register_has_header_and_rows() {
        let settings = Settings::default();
        let output = format_record_register(&[sample(Kind::Expense)], &settings);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Description"));
        assert!(lines[2].contains("Rent"));
    }

    #[test]
    fn test_details() {
        let settings = Settings::default();
        let output = format_record_details(&sample(Kind::Expense), &settings);
        assert!(output.contains("Kind:        Expense"));
        assert!(output.contains("Amount:      $1200.00"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Food", 6), "Food  ");
        assert_eq!(truncate("Groceries and more", 8), "Groce...");
        assert_eq!(truncate("Café au lait", 7), "Café...");
    }
}
