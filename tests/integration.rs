//! Integration tests for the library pipeline: dump → rows → records →
//! filters → reports.

#![cfg(all(feature = "csv-output", feature = "pdf-output"))]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use droidpack::bridge::{DeviceBridge, QuerySource};
use droidpack::config::{ChatConfig, Config, OutputConfig};
use droidpack::core::{apply_filters, media_folders, normalize_rows, sort_newest_first};
use droidpack::extract::{MediaType, SMS_DATABASE, extract_calls, extract_media, extract_messages};
use droidpack::format::{ReportFormat, write_report};
use droidpack::prelude::*;

const SMS_DUMP: &str = "\
Row: 0 _id=1, address=+15550100, body=Running late, date=1715700000000, creator=com.google.android.apps.messaging, type=1
Row: 1 _id=2, address=VM-HDFCBK, body=\"Your OTP is 4821\", date=1715600000000, type=1
Row: 2 _id=3, address=+15550111, body=On my way, date=1700000000000, type=2
";

const CALL_DUMP: &str = "\
Row: 0 number=5551234, name=Alice, date=1700000000000, type=1, duration=65
Row: 1 number=5559876, date=1715700000000, type=3, duration=0
Row: 2 number=+15550100, name=Bob, date=1715600000000, type=2, duration=3605
";

/// Answers queries from a map keyed by the source's display form.
#[derive(Default)]
struct ScriptedDevice {
    outputs: HashMap<String, String>,
    queried: RefCell<Vec<String>>,
}

impl ScriptedDevice {
    fn with(mut self, source: &str, output: &str) -> Self {
        self.outputs.insert(source.to_string(), output.to_string());
        self
    }
}

impl DeviceBridge for ScriptedDevice {
    fn query(&self, source: &QuerySource) -> Option<String> {
        let key = source.to_string();
        self.queried.borrow_mut().push(key.clone());
        self.outputs.get(&key).cloned()
    }

    fn pull(&self, _remote: &str, _dest_dir: &Path) -> Option<PathBuf> {
        None
    }

    fn list_dir(&self, _remote: &str) -> Vec<String> {
        Vec::new()
    }
}

// =========================================================================
// Row dump pipeline
// =========================================================================

#[test]
fn test_sms_dump_to_csv() {
    let rows = RowParser::for_kind(RowKind::Message).parse_rows(SMS_DUMP);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| !r.contains_key("_id")));

    let messages = normalize_messages(&rows);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sms_messages.csv");
    let written = write_csv(&messages, &path, &OutputConfig::new()).unwrap();
    assert_eq!(written, 3);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, ["Sender", "Message", "Date", "Creator", "Type"]);

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&records[0][0], "'+15550100");
    assert_eq!(&records[0][3], "com.google.android.apps.messaging");
    assert_eq!(&records[1][0], "VM-HDFCBK");
    assert_eq!(&records[1][1], "Your OTP is 4821");
    assert_eq!(&records[2][4], "Sent");
    // dates are rendered, not raw millis
    assert!(!records[0][2].contains("1715700000000"));
    assert_eq!(records[0][2].len(), 19);
}

#[test]
fn test_generic_normalize_matches_typed() {
    let rows = RowParser::for_kind(RowKind::Call).parse_rows(CALL_DUMP);
    let generic = normalize_rows(&rows, RowKind::Call);
    let typed = normalize_calls(&rows);

    assert_eq!(generic.len(), typed.len());
    for (record, call) in generic.iter().zip(&typed) {
        assert_eq!(record.kind(), RecordKind::Call);
        assert!(matches!(record, Record::Call(c) if c == call));
    }
}

#[test]
fn test_calls_filtered_and_sorted() {
    let rows = RowParser::for_kind(RowKind::Call).parse_rows(CALL_DUMP);
    let mut calls = normalize_calls(&rows);
    sort_newest_first(&mut calls);
    let numbers: Vec<&str> = calls.iter().map(|c| c.number()).collect();
    assert_eq!(numbers, ["5559876", "+15550100", "5551234"]);

    let filters = FilterConfig::new()
        .with_date_from("2024-05-01")
        .with_date_to("2024-05-31")
        .with_folder("555");
    let kept = apply_filters(calls, &filters);
    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|c| c.number() != "5551234"));
}

#[test]
fn test_media_folders_and_filter() {
    let dump = "\
Row: 0 _data=/storage/emulated/0/DCIM/Camera/IMG_1.jpg, _display_name=IMG_1.jpg, date_added=1715700000
Row: 1 _data=/storage/emulated/0/Pictures/Screenshots/s.png, _display_name=s.png, date_added=1715600000
Row: 2 _data=/storage/emulated/0/DCIM/Camera/IMG_2.jpg, _display_name=IMG_2.jpg, date_added=1700000000
";
    let rows = RowParser::for_kind(RowKind::Media).parse_rows(dump);
    let media = normalize_media_rows(&rows);
    assert_eq!(media_folders(&media), ["All", "Camera", "Screenshots"]);

    let camera = filter_by_folder(media.clone(), "camera");
    assert_eq!(camera.len(), 2);

    let everything = filter_by_folder(media, "All");
    assert_eq!(everything.len(), 3);
}

// =========================================================================
// Source strategies
// =========================================================================

#[test]
fn test_messages_fall_back_to_sqlite() {
    let sqlite = format!("sqlite3 {SMS_DATABASE}");
    let device = ScriptedDevice::default()
        .with("content://sms/", "No result found.\n")
        .with(sqlite.as_str(), "+15550100|hi | there\n5551234|ok\n");

    let messages = extract_messages(&device);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].body(), "hi | there");
    assert_eq!(messages[0].timestamp_raw(), None);

    let queried = device.queried.borrow();
    assert_eq!(queried.first().map(String::as_str), Some("content://sms/"));
    assert_eq!(queried.last(), Some(&sqlite));
    assert_eq!(queried.len(), 5);
}

#[test]
fn test_messages_first_source_wins() {
    let device = ScriptedDevice::default()
        .with("content://sms/inbox", SMS_DUMP)
        .with("content://mms-sms/", "Row: 0 address=x, body=never")
        .with("content://icc/adn", "Row: 0 address=y, body=never");

    let messages = extract_messages(&device);
    assert_eq!(messages.len(), 3);
    assert_eq!(device.queried.borrow().len(), 2);
}

#[test]
fn test_extract_calls_newest_first() {
    let device = ScriptedDevice::default().with("content://call_log/calls", CALL_DUMP);
    let calls = extract_calls(&device);
    assert_eq!(calls[0].number(), "5559876");
    assert_eq!(calls[2].number(), "5551234");
}

#[test]
fn test_extract_media_without_device_output() {
    let device = ScriptedDevice::default();
    assert!(extract_media(&device, MediaType::Video, 0).is_empty());
    assert_eq!(
        device.queried.borrow().as_slice(),
        ["content://media/external/video/media"]
    );
}

// =========================================================================
// Chat pipeline
// =========================================================================

#[test]
fn test_chat_file_to_reports() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("WhatsApp Chat with Alice.txt");
    fs::write(
        &input,
        "14/05/24, 9:23 pm - Alice: Hello there\n\
         14/05/24, 9:24 pm - Bob: multi\n\
         line\n\
         31/02/24, 9:25 pm - Alice: impossible date\n\
         dangling continuation\n\
         15/05/24, 12:05 am - Alice: after midnight\n",
    )
    .unwrap();

    let records = ChatParser::new().parse_file(&input).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].message(), "multi\nline");
    assert_eq!(records[2].time_string(), "00:05");

    let strict = ChatParser::with_config(ChatConfig::strict())
        .parse_file(&input)
        .unwrap();
    assert_eq!(strict.len(), 3);
    assert_eq!(strict[1].message(), "multi");

    let config = Config::new().with_output(OutputConfig::new().with_dir(dir.path()));
    for format in ReportFormat::all() {
        let path = format.output_path(&config.output.dir, RecordKind::Chat.file_stem());
        let written = write_report(&records, &path, *format, &config).unwrap();
        assert_eq!(written, 3);
        assert!(path.exists(), "{format} report missing");
    }
}

#[test]
fn test_chat_date_filter_uses_local_time() {
    let content = "14/05/24, 11:59 pm - Alice: late\n15/05/24, 12:00 am - Bob: midnight\n";
    let records = ChatParser::new().parse_str(content);

    let may14 = filter_by_date(records.clone(), Some("2024-05-14"), Some("2024-05-14"));
    assert_eq!(may14.len(), 1);
    assert_eq!(may14[0].sender(), "Alice");

    let may15 = filter_by_date(records, Some("2024-05-15"), Some("2024-05-15"));
    assert_eq!(may15.len(), 1);
    assert_eq!(may15[0].sender(), "Bob");
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_config_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("droidpack.json");
    fs::write(
        &path,
        r#"{
  "bridge": { "adb_path": "/opt/platform-tools/adb", "timeout_secs": 10 },
  "pdf": { "max_body_chars": 120 },
  "output": { "dir": "reports", "bom": true }
}"#,
    )
    .unwrap();

    let config = Config::from_json_file(&path).unwrap();
    assert_eq!(config.bridge.adb_path, PathBuf::from("/opt/platform-tools/adb"));
    assert_eq!(config.bridge.timeout_secs, 10);
    assert_eq!(config.bridge.user, 0);
    assert_eq!(config.pdf.max_body_chars, 120);
    assert!(config.output.bom);
    assert!(config.chat.join_continuations);
}

#[test]
fn test_config_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = Config::from_json_file(&dir.path().join("nope.json")).unwrap_err();
    assert!(missing.is_io());

    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "bridge": { "timeout_secs": 0 } }"#).unwrap();
    let invalid = Config::from_json_file(&path).unwrap_err();
    assert!(invalid.is_invalid_config());
    assert!(invalid.to_string().contains("bad.json"));
}
