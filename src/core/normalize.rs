//! Projection of raw rows onto typed records.
//!
//! Each row kind has required fields; a row missing one is dropped, never
//! repaired:
//!
//! | Kind | Required | Optional |
//! |------|----------|----------|
//! | Message | `address`, `body` | `date`, `creator`, `type` |
//! | Call | `number`, `date` | `name`, `type`, `duration` |
//! | Media | non-empty `_data` | `_display_name`, `date_added` |
//!
//! # Example
//!
//! ```
//! use droidpack::core::normalize::normalize_rows;
//! use droidpack::parsing::RowParser;
//! use droidpack::record::{Record, RowKind};
//!
//! let dump = "Row: 0 number=5551234, date=1715700000000, type=3\nRow: 1 name=Bob, type=1\n";
//! let rows = RowParser::for_kind(RowKind::Call).parse_rows(dump);
//! let records = normalize_rows(&rows, RowKind::Call);
//!
//! assert_eq!(records.len(), 1);
//! assert!(matches!(&records[0], Record::Call(c) if c.number() == "5551234"));
//! ```

use crate::parsing::RawRow;
use crate::record::{CallRecord, MediaRecord, MessageRecord, Record, RowKind};

/// Builds a message from `address`, `body`, `date`, `creator`, `type`.
pub fn normalize_message(row: &RawRow) -> Option<MessageRecord> {
    let mut msg = MessageRecord::new(row.get("address")?, row.get("body")?);
    if let Some(date) = row.get("date") {
        msg = msg.with_timestamp_raw(date);
    }
    if let Some(creator) = row.get("creator") {
        msg = msg.with_creator(creator);
    }
    if let Some(code) = row.get("type") {
        msg = msg.with_type_code(code);
    }
    Some(msg)
}

/// Builds a call from `number`, `date`, `name`, `type`, `duration`.
pub fn normalize_call(row: &RawRow) -> Option<CallRecord> {
    let mut call = CallRecord::new(row.get("number")?, row.get("date")?);
    if let Some(name) = row.get("name") {
        call = call.with_name(name);
    }
    if let Some(code) = row.get("type") {
        call = call.with_type_code(code);
    }
    if let Some(duration) = row.get("duration") {
        call = call.with_duration(duration);
    }
    Some(call)
}

/// Builds a media entry from `_data`, `_display_name`, `date_added`.
pub fn normalize_media(row: &RawRow) -> Option<MediaRecord> {
    let mut media = MediaRecord::new(row.get("_data")?)?;
    if let Some(name) = row.get("_display_name") {
        media = media.with_display_name(name);
    }
    if let Some(added) = row.get("date_added") {
        media = media.with_date_added(added);
    }
    Some(media)
}

/// Normalizes one row as `kind`.
pub fn normalize(row: &RawRow, kind: RowKind) -> Option<Record> {
    match kind {
        RowKind::Message => normalize_message(row).map(Record::from),
        RowKind::Call => normalize_call(row).map(Record::from),
        RowKind::Media => normalize_media(row).map(Record::from),
    }
}

/// Normalizes every row, dropping the invalid ones.
pub fn normalize_rows(rows: &[RawRow], kind: RowKind) -> Vec<Record> {
    let records: Vec<Record> = rows.iter().filter_map(|row| normalize(row, kind)).collect();
    let dropped = rows.len() - records.len();
    if dropped > 0 {
        log::debug!("dropped {dropped} {kind:?} rows missing required fields");
    }
    records
}

/// Typed variant of [`normalize_rows`] for messages.
pub fn normalize_messages(rows: &[RawRow]) -> Vec<MessageRecord> {
    rows.iter().filter_map(normalize_message).collect()
}

/// Typed variant of [`normalize_rows`] for calls.
pub fn normalize_calls(rows: &[RawRow]) -> Vec<CallRecord> {
    rows.iter().filter_map(normalize_call).collect()
}

/// Typed variant of [`normalize_rows`] for media.
pub fn normalize_media_rows(rows: &[RawRow]) -> Vec<MediaRecord> {
    rows.iter().filter_map(normalize_media).collect()
}
