//! Source strategies for messages, call logs and media.
//!
//! Each record kind has an ordered list of [`QuerySource`]s. [`fetch_first`]
//! walks the list and stops at the first source whose output decodes to at
//! least one row; a source that fails or returns nothing is skipped.
//!
//! | Kind | Sources, in order |
//! |------|-------------------|
//! | Messages | `content://sms/`, `content://sms/inbox`, `content://mms-sms/`, `content://icc/adn`, `sqlite3 mmssms.db` |
//! | Calls | `content://call_log/calls` |
//! | Media | `content://media/external/<type>/media` |
//!
//! # Example
//!
//! ```
//! use std::path::{Path, PathBuf};
//! use droidpack::bridge::{DeviceBridge, QuerySource};
//! use droidpack::extract::extract_calls;
//!
//! struct Canned;
//!
//! impl DeviceBridge for Canned {
//!     fn query(&self, _: &QuerySource) -> Option<String> {
//!         Some("Row: 0 number=5551234, date=1715700000000, type=2, duration=65\n".into())
//!     }
//!     fn pull(&self, _: &str, _: &Path) -> Option<PathBuf> { None }
//!     fn list_dir(&self, _: &str) -> Vec<String> { Vec::new() }
//! }
//!
//! let calls = extract_calls(&Canned);
//! assert_eq!(calls[0].number(), "5551234");
//! ```

use serde::{Deserialize, Serialize};

use crate::bridge::{DeviceBridge, QuerySource};
use crate::core::normalize::{normalize_calls, normalize_media_rows, normalize_messages};
use crate::core::processor::sort_newest_first;
use crate::parsing::{RawRow, RowParser, parse_pipe_rows};
use crate::record::{CallRecord, MediaRecord, MessageRecord, RowKind};

/// Telephony provider database read when every content URI comes back empty.
pub const SMS_DATABASE: &str = "/data/data/com.android.providers.telephony/databases/mmssms.db";

/// Columns requested from the media store.
pub const MEDIA_PROJECTION: &str = "_data:_display_name:date_added";

/// Message sources, most specific first.
pub fn message_sources() -> Vec<QuerySource> {
    let mut sources: Vec<QuerySource> = [
        "content://sms/",
        "content://sms/inbox",
        "content://mms-sms/",
        "content://icc/adn",
    ]
    .into_iter()
    .map(QuerySource::content)
    .collect();
    sources.push(QuerySource::sqlite(
        SMS_DATABASE,
        "SELECT address, body FROM sms;",
        ["address", "body"],
    ));
    sources
}

pub fn call_sources() -> Vec<QuerySource> {
    vec![QuerySource::content("content://call_log/calls")]
}

/// Media store collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Images,
    Video,
    Audio,
}

impl MediaType {
    pub fn uri(&self) -> &'static str {
        match self {
            MediaType::Images => "content://media/external/images/media",
            MediaType::Video => "content://media/external/video/media",
            MediaType::Audio => "content://media/external/audio/media",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Images => write!(f, "images"),
            MediaType::Video => write!(f, "video"),
            MediaType::Audio => write!(f, "audio"),
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "images" | "image" => Ok(MediaType::Images),
            "video" | "videos" => Ok(MediaType::Video),
            "audio" => Ok(MediaType::Audio),
            _ => Err(format!(
                "Unknown media type: '{s}'. Expected one of: images, video, audio"
            )),
        }
    }
}

pub fn media_sources(media_type: MediaType, user: u32) -> Vec<QuerySource> {
    vec![
        QuerySource::content(media_type.uri())
            .with_projection(MEDIA_PROJECTION)
            .with_user(user),
    ]
}

/// Decodes a source's raw output into rows of `kind`.
pub fn decode(source: &QuerySource, output: &str, kind: RowKind) -> Vec<RawRow> {
    match source {
        QuerySource::Content { .. } => RowParser::for_kind(kind).parse_rows(output),
        QuerySource::Sqlite { columns, .. } => parse_pipe_rows(output, *columns),
    }
}

/// Rows and the source that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub source: QuerySource,
    pub rows: Vec<RawRow>,
}

/// Queries `sources` in order and returns the first non-empty batch.
pub fn fetch_first<B: DeviceBridge + ?Sized>(
    bridge: &B,
    sources: &[QuerySource],
    kind: RowKind,
) -> Option<Fetched> {
    for source in sources {
        let Some(output) = bridge.query(source) else {
            log::debug!("{source}: no output");
            continue;
        };
        let rows = decode(source, &output, kind);
        if rows.is_empty() {
            log::debug!("{source}: output had no rows");
            continue;
        }
        log::info!("{source}: {} rows", rows.len());
        return Some(Fetched {
            source: source.clone(),
            rows,
        });
    }
    log::info!("no source returned {kind:?} rows");
    None
}

pub fn extract_messages<B: DeviceBridge + ?Sized>(bridge: &B) -> Vec<MessageRecord> {
    fetch_first(bridge, &message_sources(), RowKind::Message)
        .map(|f| normalize_messages(&f.rows))
        .unwrap_or_default()
}

/// Call log entries, newest first.
pub fn extract_calls<B: DeviceBridge + ?Sized>(bridge: &B) -> Vec<CallRecord> {
    let mut calls = fetch_first(bridge, &call_sources(), RowKind::Call)
        .map(|f| normalize_calls(&f.rows))
        .unwrap_or_default();
    sort_newest_first(&mut calls);
    calls
}

pub fn extract_media<B: DeviceBridge + ?Sized>(
    bridge: &B,
    media_type: MediaType,
    user: u32,
) -> Vec<MediaRecord> {
    fetch_first(bridge, &media_sources(media_type, user), RowKind::Media)
        .map(|f| normalize_media_rows(&f.rows))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    /// Returns canned output per source label and records every query.
    #[derive(Default)]
    struct FakeBridge {
        outputs: HashMap<String, String>,
        queried: RefCell<Vec<String>>,
    }

    impl FakeBridge {
        fn with(mut self, source: &str, output: &str) -> Self {
            self.outputs.insert(source.to_string(), output.to_string());
            self
        }
    }

    impl DeviceBridge for FakeBridge {
        fn query(&self, source: &QuerySource) -> Option<String> {
            let key = source.to_string();
            self.queried.borrow_mut().push(key.clone());
            self.outputs.get(&key).cloned()
        }

        fn pull(&self, _remote: &str, _dest: &Path) -> Option<PathBuf> {
            None
        }

        fn list_dir(&self, _remote: &str) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_message_source_order() {
        let labels: Vec<String> = message_sources().iter().map(ToString::to_string).collect();
        let sqlite = format!("sqlite3 {SMS_DATABASE}");
        assert_eq!(
            labels,
            vec![
                "content://sms/",
                "content://sms/inbox",
                "content://mms-sms/",
                "content://icc/adn",
                sqlite.as_str(),
            ]
        );
    }

    #[test]
    fn test_first_source_with_rows_wins() {
        let bridge = FakeBridge::default()
            .with("content://sms/", "No result found.\n")
            .with("content://sms/inbox", "Row: 0 address=111, body=inbox\n")
            .with("content://mms-sms/", "Row: 0 address=222, body=mms\n");

        let messages = extract_messages(&bridge);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body(), "inbox");
        assert_eq!(
            *bridge.queried.borrow(),
            vec!["content://sms/", "content://sms/inbox"]
        );
    }

    #[test]
    fn test_sqlite_fallback() {
        let bridge = FakeBridge::default().with(
            &format!("sqlite3 {SMS_DATABASE}"),
            "+15550100|Hello there\n5551234|a|b\n",
        );
        let messages = extract_messages(&bridge);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender(), "+15550100");
        assert_eq!(messages[1].body(), "a|b");
        assert_eq!(bridge.queried.borrow().len(), 5);
    }

    #[test]
    fn test_nothing_anywhere() {
        let bridge = FakeBridge::default();
        assert!(extract_messages(&bridge).is_empty());
        assert!(extract_calls(&bridge).is_empty());
        assert!(extract_media(&bridge, MediaType::Audio, 0).is_empty());
    }

    #[test]
    fn test_rows_without_required_fields_do_not_count_as_empty() {
        // the source yielded rows, so no fallback happens even if none normalize
        let bridge = FakeBridge::default()
            .with("content://sms/", "Row: 0 _id=1, thread_id=4\n")
            .with("content://sms/inbox", "Row: 0 address=1, body=x\n");
        let messages = extract_messages(&bridge);
        assert!(messages.is_empty());
        assert_eq!(bridge.queried.borrow().len(), 1);
    }

    #[test]
    fn test_calls_sorted_newest_first() {
        let bridge = FakeBridge::default().with(
            "content://call_log/calls",
            "Row: 0 number=1, date=1000000\nRow: 1 number=2, date=3000000\nRow: 2 number=3, date=2000000\n",
        );
        let numbers: Vec<String> = extract_calls(&bridge)
            .iter()
            .map(|c| c.number().to_string())
            .collect();
        assert_eq!(numbers, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_media_source_has_projection_and_user() {
        let sources = media_sources(MediaType::Video, 10);
        assert_eq!(
            sources[0],
            QuerySource::Content {
                uri: "content://media/external/video/media".into(),
                projection: Some(MEDIA_PROJECTION.into()),
                user: Some(10),
            }
        );
    }

    #[test]
    fn test_media_extraction() {
        let bridge = FakeBridge::default().with(
            MediaType::Images.uri(),
            "Row: 0 _data=/sdcard/DCIM/Camera/a.jpg, _display_name=a.jpg, date_added=1700000000\nRow: 1 _data=, _display_name=ghost\n",
        );
        let media = extract_media(&bridge, MediaType::Images, 0);
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].display_name(), Some("a.jpg"));
    }

    #[test]
    fn test_media_type_from_str() {
        assert_eq!("images".parse::<MediaType>().unwrap(), MediaType::Images);
        assert_eq!("VIDEO".parse::<MediaType>().unwrap(), MediaType::Video);
        assert!("docs".parse::<MediaType>().is_err());
        assert_eq!(MediaType::Audio.to_string(), "audio");
    }
}
