//! Edge case tests for parsing, normalization and filtering.

use droidpack::core::labels::{CallType, MessageType, format_duration};
use droidpack::core::{
    filter_by_date, filter_by_folder, normalize_calls, normalize_media_rows, normalize_messages,
};
use droidpack::parsing::{ChatParser, RawRow, RowParser, parse_chat_line, parse_pipe_rows};
use droidpack::record::{CallRecord, MediaRecord, RowKind};
use droidpack::timestamp::{TimeUnit, epoch_seconds, to_display};

fn unrestricted(line: &str) -> Option<RawRow> {
    RowParser::unrestricted().parse(line)
}

// =========================================================================
// Row dump lines
// =========================================================================

#[test]
fn test_non_row_lines_rejected() {
    for line in [
        "",
        "   ",
        "No result found.",
        "Row:",
        "Row: 0",
        "Row: x number=1",
        "Row:0number=1",
        "row: 0 number=1",
        "Error while accessing provider:call_log",
    ] {
        assert!(unrestricted(line).is_none(), "{line:?} parsed as a row");
    }
}

#[test]
fn test_row_without_space_after_colon() {
    let row = unrestricted("Row:12 number=5551234").unwrap();
    assert_eq!(row.index(), 12);
    assert_eq!(row.get("number"), Some("5551234"));
}

#[test]
fn test_row_only_junk_tokens() {
    assert!(unrestricted("Row: 0 nothing here, =value, still nothing").is_none());
}

#[test]
fn test_value_keeps_later_equals() {
    let row = unrestricted("Row: 0 body=a=b=c, type=1").unwrap();
    assert_eq!(row.get("body"), Some("a=b=c"));
}

#[test]
fn test_quoted_and_padded_values() {
    let row = unrestricted(r#"Row: 0 address= "+15550100" , body="", name=NULL"#).unwrap();
    assert_eq!(row.get("address"), Some("+15550100"));
    assert_eq!(row.get("body"), Some(""));
    assert_eq!(row.get("name"), Some("NULL"));
}

#[test]
fn test_body_with_separator_is_cut() {
    let row = RowParser::for_kind(RowKind::Message)
        .parse("Row: 0 address=5551234, body=Hi, how are you, type=1")
        .unwrap();
    assert_eq!(row.get("body"), Some("Hi"));
    assert_eq!(row.get("type"), Some("1"));
}

#[test]
fn test_duplicate_key_last_wins() {
    let row = unrestricted("Row: 0 type=1, type=2").unwrap();
    assert_eq!(row.len(), 1);
    assert_eq!(row.get("type"), Some("2"));
}

#[test]
fn test_unicode_values() {
    let row = unrestricted("Row: 0 address=Дядя Ваня, body=नमस्ते 🎉, date=1").unwrap();
    assert_eq!(row.get("address"), Some("Дядя Ваня"));
    assert_eq!(row.get("body"), Some("नमस्ते 🎉"));
}

#[test]
fn test_crlf_output() {
    let rows = RowParser::for_kind(RowKind::Call)
        .parse_rows("Row: 0 number=1, date=2\r\nRow: 1 number=3, date=4\r\n");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("date"), Some("4"));
}

#[test]
fn test_allow_list_can_empty_a_row() {
    let row = RowParser::for_kind(RowKind::Media)
        .parse("Row: 0 _id=5, mime_type=image/jpeg")
        .unwrap();
    assert!(row.is_empty());
    assert!(normalize_media_rows(&[row]).is_empty());
}

// =========================================================================
// Normalization
// =========================================================================

#[test]
fn test_missing_required_fields_dropped() {
    let rows = vec![
        RawRow::new(0).with("address", "1"),
        RawRow::new(1).with("body", "no address"),
        RawRow::new(2).with("address", "2").with("body", ""),
    ];
    let messages = normalize_messages(&rows);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender(), "2");
    assert_eq!(messages[0].body(), "");

    let calls = normalize_calls(&[RawRow::new(0).with("number", "1")]);
    assert!(calls.is_empty());
}

#[test]
fn test_media_empty_path_dropped() {
    assert!(MediaRecord::new("").is_none());
    let rows = vec![RawRow::new(0).with("_data", "").with("_display_name", "x.jpg")];
    assert!(normalize_media_rows(&rows).is_empty());
}

#[test]
fn test_media_folder() {
    let media = MediaRecord::new("/sdcard/DCIM/Camera/a.jpg").unwrap();
    assert_eq!(media.folder(), Some("Camera"));
    let top = MediaRecord::new("a.jpg").unwrap();
    assert_eq!(top.folder(), None);
}

// =========================================================================
// Labels and durations
// =========================================================================

#[test]
fn test_label_codes_are_trimmed() {
    assert_eq!(MessageType::label_for(Some(" 2 ")), "Sent");
    assert_eq!(CallType::label_for(Some("7")), "External");
    assert_eq!(CallType::label_for(Some("0")), "Unknown");
    assert_eq!(CallType::label_for(Some("-1")), "Unknown");
}

#[test]
fn test_duration_edges() {
    assert_eq!(format_duration("59"), "59s");
    assert_eq!(format_duration("60"), "1m 0s");
    assert_eq!(format_duration("3600"), "1h 0m 0s");
    assert_eq!(format_duration("90061"), "25h 1m 1s");
    assert_eq!(format_duration("-5"), "-5");
    assert_eq!(format_duration("12.5"), "12.5");
    assert_eq!(format_duration(""), "");
}

// =========================================================================
// Timestamps
// =========================================================================

#[test]
fn test_timestamp_passthrough() {
    assert_eq!(to_display("", TimeUnit::Millis), "");
    assert_eq!(to_display("NULL", TimeUnit::Seconds), "NULL");
    assert_eq!(to_display("2024-05-14", TimeUnit::Millis), "2024-05-14");
    assert_eq!(to_display("99999999999999999999", TimeUnit::Millis), "99999999999999999999");
}

#[test]
fn test_epoch_seconds_units() {
    assert_eq!(epoch_seconds("1715700000999", TimeUnit::Millis), Some(1715700000));
    assert_eq!(epoch_seconds("1715700000", TimeUnit::Seconds), Some(1715700000));
    assert_eq!(epoch_seconds("-1", TimeUnit::Millis), Some(-1));
    assert_eq!(epoch_seconds("abc", TimeUnit::Seconds), None);
}

#[test]
fn test_same_instant_in_both_units() {
    assert_eq!(
        to_display("1715700000000", TimeUnit::Millis),
        to_display("1715700000", TimeUnit::Seconds)
    );
}

// =========================================================================
// Chat lines
// =========================================================================

#[test]
fn test_invalid_chat_dates() {
    for line in [
        "31/02/24, 9:23 pm - Alice: no such day",
        "14/13/24, 9:23 pm - Alice: no such month",
        "14/05/24, 13:23 pm - Alice: hour out of range",
        "14/05/24, 0:23 am - Alice: hour zero",
        "14/05/24, 9:60 pm - Alice: minute out of range",
        "14/05/2024, 9:23 pm - Alice: four digit year",
        "14/05/24, 9:23 PM - Alice: upper case meridian",
        "14/05/24, 9:23 pm - Alice no colon",
        "14/05/24, 9:23 pm Alice: no dash",
    ] {
        assert!(parse_chat_line(line).is_none(), "{line:?} accepted");
    }
}

#[test]
fn test_chat_midnight_and_noon() {
    let midnight = parse_chat_line("1/1/24, 12:00 am - A: x").unwrap();
    assert_eq!(midnight.time_string(), "00:00");
    let noon = parse_chat_line("1/1/24, 12:00 pm - A: x").unwrap();
    assert_eq!(noon.time_string(), "12:00");
}

#[test]
fn test_chat_two_digit_years() {
    assert_eq!(parse_chat_line("1/1/68, 1:00 am - A: x").unwrap().date_string(), "2068-01-01");
    assert_eq!(parse_chat_line("1/1/69, 1:00 am - A: x").unwrap().date_string(), "1969-01-01");
}

#[test]
fn test_chat_header_needs_message_separator() {
    // trailing whitespace is trimmed, so an empty message has no ": "
    assert!(parse_chat_line("1/1/24, 1:00 am - A: ").is_none());
    assert_eq!(parse_chat_line("1/1/24, 1:00 am - A: .").unwrap().message(), ".");
}

#[test]
fn test_chat_system_lines_dropped() {
    let export = "\
14/05/24, 9:20 pm - Messages and calls are end-to-end encrypted.
14/05/24, 9:23 pm - Alice: Hello
";
    let records = ChatParser::new().parse_str(export);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sender(), "Alice");
}

#[test]
fn test_chat_empty_input() {
    assert!(ChatParser::new().parse_str("").is_empty());
    assert!(ChatParser::new().parse_str("\n\n  \n").is_empty());
}

// =========================================================================
// sqlite3 output
// =========================================================================

#[test]
fn test_pipe_rows_edge_cases() {
    let rows = parse_pipe_rows("|empty address\nno pipe\n5551234|\n", ["address", "body"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("address"), Some(""));
    assert_eq!(rows[1].get("body"), Some(""));
}

// =========================================================================
// Filters
// =========================================================================

fn calls() -> Vec<CallRecord> {
    vec![
        CallRecord::new("5551234", "1715700000000"),
        CallRecord::new("5559876", "garbage"),
        CallRecord::new("+15550100", "1700000000000"),
    ]
}

#[test]
fn test_date_filter_fails_open() {
    assert_eq!(filter_by_date(calls(), None, None).len(), 3);
    assert_eq!(filter_by_date(calls(), Some("0"), None).len(), 3);
    assert_eq!(filter_by_date(calls(), Some("yesterday"), Some("today")).len(), 3);
    assert_eq!(filter_by_date(calls(), Some("2024-13-01"), Some("2024-12-31")).len(), 3);
}

#[test]
fn test_date_filter_drops_unparsable_timestamps() {
    let kept = filter_by_date(calls(), Some("0"), Some("9999999999"));
    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|c| c.number() != "5559876"));
}

#[test]
fn test_date_filter_inverted_range_is_empty() {
    let kept = filter_by_date(calls(), Some("1715700000"), Some("1700000000"));
    assert!(kept.is_empty());
}

#[test]
fn test_date_filter_inclusive_epoch_bounds() {
    let kept = filter_by_date(calls(), Some("1715700000"), Some("1715700000"));
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].number(), "5551234");
}

#[test]
fn test_folder_filter_tokens() {
    assert_eq!(filter_by_folder(calls(), "").len(), 3);
    assert_eq!(filter_by_folder(calls(), "ALL").len(), 3);
    assert_eq!(filter_by_folder(calls(), "+1").len(), 1);
    assert_eq!(filter_by_folder(calls(), "nothing").len(), 0);
}
