//! Report writers.
//!
//! This module provides writers for the two report formats:
//! - [`write_csv`] / [`to_csv`] - comma separated, one header row - requires `csv-output` feature
//! - [`write_pdf`] - titled A4 table, paginated - requires `pdf-output` feature
//!
//! Both writers are generic over [`ReportRecord`], which fixes the columns
//! and cell text of each record kind:
//!
//! | Kind | CSV columns | PDF columns |
//! |------|-------------|-------------|
//! | Message | Sender, Message, Date, Creator, Type | Sender, Message, Date, Type |
//! | Call | Number, Name, Type, Date, Duration (sec) | Number, Name, Type, Date, Duration |
//! | Media | _data, _display_name, date_added | Path, Name, Date Added |
//! | Chat | Date, Time, Sender, Message | Date, Time, Sender, Message |
//!
//! Writing zero records is not an error: no file is created and the writers
//! return `Ok(0)`.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "pdf-output"))]
//! # fn main() -> droidpack::Result<()> {
//! use std::path::Path;
//! use droidpack::config::{OutputConfig, PdfConfig};
//! use droidpack::core::output::{write_csv, write_pdf};
//! use droidpack::record::CallRecord;
//!
//! let calls = vec![CallRecord::new("+15550100", "1715700000000").with_duration("65")];
//!
//! write_csv(&calls, Path::new("out/call_logs.csv"), &OutputConfig::new())?;
//! write_pdf(&calls, Path::new("out/call_logs.pdf"), &PdfConfig::new())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "pdf-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "pdf-output")]
pub mod font_metrics;
#[cfg(feature = "pdf-output")]
pub mod pdf_layout;
#[cfg(feature = "pdf-output")]
mod pdf_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "pdf-output")]
pub use pdf_writer::write_pdf;

use crate::core::labels::{CallType, MessageType, format_duration};
use crate::record::{CallRecord, ChatRecord, MediaRecord, MessageRecord, RecordKind};
use crate::timestamp::{TimeUnit, to_display};

/// A PDF table column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub title: &'static str,
    /// Width in points
    pub width: f32,
}

const fn col(title: &'static str, width: f32) -> Column {
    Column { title, width }
}

/// How a record kind is laid out in reports.
pub trait ReportRecord {
    const KIND: RecordKind;

    /// CSV header row.
    fn csv_header() -> &'static [&'static str];

    /// One CSV row, same length as [`csv_header`](Self::csv_header).
    fn csv_row(&self) -> Vec<String>;

    /// PDF report title.
    fn pdf_title() -> &'static str;

    /// PDF columns with fixed widths.
    fn pdf_columns() -> &'static [Column];

    /// One PDF row, same length as [`pdf_columns`](Self::pdf_columns).
    /// Free-text bodies are cut to `max_body_chars` characters.
    fn pdf_cells(&self, max_body_chars: usize) -> Vec<String>;
}

/// Prefixes numeric-looking phone identifiers with `'`.
///
/// Spreadsheets otherwise read `+15550100` as a number and drop the `+` or
/// leading zeros, and show the call log's private/withheld markers (`-1`,
/// `-2`) as negative numbers.
pub fn guard_phone_number(value: &str) -> String {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        format!("'{value}")
    } else {
        value.to_string()
    }
}

/// Cuts `text` to at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn display_opt(raw: Option<&str>, unit: TimeUnit) -> String {
    raw.map(|r| to_display(r, unit)).unwrap_or_default()
}

impl ReportRecord for MessageRecord {
    const KIND: RecordKind = RecordKind::Message;

    fn csv_header() -> &'static [&'static str] {
        &["Sender", "Message", "Date", "Creator", "Type"]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            guard_phone_number(self.sender()),
            self.body().to_string(),
            display_opt(self.timestamp_raw(), TimeUnit::Millis),
            self.creator().unwrap_or_default().to_string(),
            MessageType::label_for(self.type_code()).to_string(),
        ]
    }

    fn pdf_title() -> &'static str {
        "SMS Messages Report"
    }

    fn pdf_columns() -> &'static [Column] {
        const COLUMNS: [Column; 4] = [
            col("Sender", 80.0),
            col("Message", 240.0),
            col("Date", 100.0),
            col("Type", 60.0),
        ];
        &COLUMNS
    }

    fn pdf_cells(&self, max_body_chars: usize) -> Vec<String> {
        vec![
            self.sender().to_string(),
            truncate_chars(self.body(), max_body_chars),
            display_opt(self.timestamp_raw(), TimeUnit::Millis),
            MessageType::label_for(self.type_code()).to_string(),
        ]
    }
}

impl ReportRecord for CallRecord {
    const KIND: RecordKind = RecordKind::Call;

    fn csv_header() -> &'static [&'static str] {
        &["Number", "Name", "Type", "Date", "Duration (sec)"]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            guard_phone_number(self.number()),
            self.name().unwrap_or_default().to_string(),
            CallType::label_for(self.type_code()).to_string(),
            to_display(self.timestamp_raw(), TimeUnit::Millis),
            format_duration(self.duration_seconds().unwrap_or_default()),
        ]
    }

    fn pdf_title() -> &'static str {
        "Call Logs Report"
    }

    fn pdf_columns() -> &'static [Column] {
        const COLUMNS: [Column; 5] = [
            col("Number", 100.0),
            col("Name", 100.0),
            col("Type", 60.0),
            col("Date", 110.0),
            col("Duration", 60.0),
        ];
        &COLUMNS
    }

    fn pdf_cells(&self, _max_body_chars: usize) -> Vec<String> {
        vec![
            self.number().to_string(),
            self.name().unwrap_or_default().to_string(),
            CallType::label_for(self.type_code()).to_string(),
            to_display(self.timestamp_raw(), TimeUnit::Millis),
            format_duration(self.duration_seconds().unwrap_or_default()),
        ]
    }
}

impl ReportRecord for MediaRecord {
    const KIND: RecordKind = RecordKind::Media;

    fn csv_header() -> &'static [&'static str] {
        &["_data", "_display_name", "date_added"]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.path().to_string(),
            self.display_name().unwrap_or_default().to_string(),
            display_opt(self.date_added_epoch(), TimeUnit::Seconds),
        ]
    }

    fn pdf_title() -> &'static str {
        "Media Files Report"
    }

    fn pdf_columns() -> &'static [Column] {
        const COLUMNS: [Column; 3] = [
            col("Path", 260.0),
            col("Name", 120.0),
            col("Date Added", 100.0),
        ];
        &COLUMNS
    }

    fn pdf_cells(&self, _max_body_chars: usize) -> Vec<String> {
        self.csv_row()
    }
}

impl ReportRecord for ChatRecord {
    const KIND: RecordKind = RecordKind::Chat;

    fn csv_header() -> &'static [&'static str] {
        &["Date", "Time", "Sender", "Message"]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.date_string(),
            self.time_string(),
            self.sender().to_string(),
            self.message().to_string(),
        ]
    }

    fn pdf_title() -> &'static str {
        "Chat Export Report"
    }

    fn pdf_columns() -> &'static [Column] {
        const COLUMNS: [Column; 4] = [
            col("Date", 70.0),
            col("Time", 45.0),
            col("Sender", 90.0),
            col("Message", 275.0),
        ];
        &COLUMNS
    }

    fn pdf_cells(&self, max_body_chars: usize) -> Vec<String> {
        vec![
            self.date_string(),
            self.time_string(),
            self.sender().to_string(),
            truncate_chars(self.message(), max_body_chars),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_phone_number() {
        assert_eq!(guard_phone_number("+15550100"), "'+15550100");
        assert_eq!(guard_phone_number("0123"), "'0123");
        assert_eq!(guard_phone_number("VM-HDFCBK"), "VM-HDFCBK");
        assert_eq!(guard_phone_number("+"), "+");
        assert_eq!(guard_phone_number(""), "");
    }

    #[test]
    fn test_guard_withheld_call_numbers() {
        assert_eq!(guard_phone_number("-1"), "'-1");
        assert_eq!(guard_phone_number("-2"), "'-2");
        assert_eq!(guard_phone_number("-"), "-");
        assert_eq!(guard_phone_number("--1"), "--1");
        assert_eq!(guard_phone_number("+-1"), "+-1");

        let withheld = CallRecord::new("-2", "1715700000000");
        assert_eq!(withheld.csv_row()[0], "'-2");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("नमस्ते", 2), "नम");
    }

    #[test]
    fn test_rows_match_headers() {
        let msg = MessageRecord::new("1", "b");
        assert_eq!(msg.csv_row().len(), MessageRecord::csv_header().len());
        assert_eq!(msg.pdf_cells(300).len(), MessageRecord::pdf_columns().len());

        let call = CallRecord::new("1", "0");
        assert_eq!(call.csv_row().len(), CallRecord::csv_header().len());
        assert_eq!(call.pdf_cells(300).len(), CallRecord::pdf_columns().len());

        let media = MediaRecord::new("/a").unwrap();
        assert_eq!(media.csv_row().len(), MediaRecord::csv_header().len());
        assert_eq!(media.pdf_cells(300).len(), MediaRecord::pdf_columns().len());
    }

    #[test]
    fn test_message_row_labels_and_blanks() {
        let msg = MessageRecord::new("+15550100", "Hi").with_type_code("2");
        let row = msg.csv_row();
        assert_eq!(row, vec!["'+15550100", "Hi", "", "", "Sent"]);
    }

    #[test]
    fn test_call_row_formats_duration() {
        let call = CallRecord::new("5551234", "not-a-date")
            .with_type_code("3")
            .with_duration("3605");
        let row = call.csv_row();
        assert_eq!(row[0], "'5551234");
        assert_eq!(row[2], "Missed");
        assert_eq!(row[3], "not-a-date");
        assert_eq!(row[4], "1h 0m 5s");
        assert_eq!(call.pdf_cells(300)[0], "5551234");
    }

    #[test]
    fn test_pdf_body_truncated() {
        let body = "x".repeat(400);
        let cells = MessageRecord::new("a", body).pdf_cells(300);
        assert_eq!(cells[1].chars().count(), 300);
    }

    #[test]
    fn test_column_widths() {
        let total = |cols: &[Column]| cols.iter().map(|c| c.width).sum::<f32>();
        assert_eq!(total(MessageRecord::pdf_columns()), 480.0);
        assert_eq!(total(CallRecord::pdf_columns()), 430.0);
        assert_eq!(total(MediaRecord::pdf_columns()), 480.0);
        assert_eq!(total(ChatRecord::pdf_columns()), 480.0);
    }
}
