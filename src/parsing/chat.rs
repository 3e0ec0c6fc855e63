//! Chat text export parser.
//!
//! Android chat exports write one header line per message:
//!
//! ```text
//! 14/05/24, 9:23 pm - Alice: Hello there
//! ```
//!
//! The sender runs up to the first `": "`, the rest of the line is the
//! message (and may contain more colons). Messages with embedded newlines
//! continue on following lines that carry no header.
//!
//! [`parse_chat_line`] evaluates a single physical line. [`ChatParser`] works
//! on a whole export and, by default, appends continuation lines to the
//! message they belong to.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::ChatConfig;
use crate::error::Result;
use crate::record::ChatRecord;
use crate::timestamp::{Meridian, parse_chat_timestamp};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}/\d{1,2}/\d{2}), (\d{1,2}:\d{2}) (am|pm) - (.*?): (.*)$")
        .expect("chat header pattern is valid")
});

/// Outcome of matching one line against the header grammar.
enum LineMatch {
    /// A header with a valid timestamp.
    Message(ChatRecord),
    /// Matches the grammar but the date or time does not exist.
    InvalidHeader,
    /// Not a header at all.
    NoMatch,
}

fn match_line(line: &str) -> LineMatch {
    let Some(caps) = HEADER.captures(line.trim()) else {
        return LineMatch::NoMatch;
    };
    let date = caps.get(1).map_or("", |m| m.as_str());
    let time = caps.get(2).map_or("", |m| m.as_str());
    let sender = caps.get(4).map_or("", |m| m.as_str());
    let message = caps.get(5).map_or("", |m| m.as_str());

    let Ok(meridian) = caps.get(3).map_or("", |m| m.as_str()).parse::<Meridian>() else {
        return LineMatch::InvalidHeader;
    };
    match parse_chat_timestamp(date, time, meridian) {
        Some(ts) => LineMatch::Message(ChatRecord::new(ts, sender, message)),
        None => LineMatch::InvalidHeader,
    }
}

/// Parses one physical export line.
///
/// Returns `None` for anything that is not a complete header line with a
/// valid date and time.
///
/// # Example
///
/// ```
/// use droidpack::parsing::parse_chat_line;
///
/// let rec = parse_chat_line("14/05/24, 9:23 pm - Alice: Hello there").unwrap();
/// assert_eq!(rec.sender(), "Alice");
/// assert_eq!(rec.message(), "Hello there");
/// assert_eq!(rec.time_string(), "21:23");
///
/// assert!(parse_chat_line("14/05/24, 9:23 pm Alice: no separator").is_none());
/// ```
pub fn parse_chat_line(line: &str) -> Option<ChatRecord> {
    match match_line(line) {
        LineMatch::Message(record) => Some(record),
        LineMatch::InvalidHeader | LineMatch::NoMatch => None,
    }
}

/// Parser for complete chat exports.
///
/// # Example
///
/// ```
/// use droidpack::config::ChatConfig;
/// use droidpack::parsing::ChatParser;
///
/// let export = "14/05/24, 9:23 pm - Alice: first line\nsecond line\n14/05/24, 9:24 pm - Bob: ok";
///
/// let joined = ChatParser::new().parse_str(export);
/// assert_eq!(joined[0].message(), "first line\nsecond line");
///
/// let strict = ChatParser::with_config(ChatConfig::strict()).parse_str(export);
/// assert_eq!(strict[0].message(), "first line");
/// assert_eq!(strict.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ChatConfig,
}

impl ChatParser {
    /// Creates a parser with default configuration (continuations joined).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Parses export text already in memory.
    pub fn parse_str(&self, content: &str) -> Vec<ChatRecord> {
        if !self.config.join_continuations {
            return content.lines().filter_map(parse_chat_line).collect();
        }

        let mut records = Vec::new();
        // message still collecting continuation lines
        let mut pending: Option<ChatRecord> = None;
        let mut skipped = 0usize;

        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match match_line(line) {
                LineMatch::Message(record) => {
                    records.extend(pending.replace(record));
                }
                LineMatch::InvalidHeader => {
                    // Continuations of an invalid header must not attach to the
                    // message before it.
                    records.extend(pending.take());
                    skipped += 1;
                }
                LineMatch::NoMatch => match pending.take() {
                    Some(prev) => {
                        let message = format!("{}\n{}", prev.message(), line);
                        pending = Some(ChatRecord::new(prev.timestamp(), prev.sender(), message));
                    }
                    None => skipped += 1,
                },
            }
        }
        records.extend(pending);

        if skipped > 0 {
            log::debug!("skipped {skipped} chat lines without a message to attach to");
        }
        records
    }

    /// Reads and parses an export file (UTF-8).
    pub fn parse_file(&self, path: &Path) -> Result<Vec<ChatRecord>> {
        let content = fs::read_to_string(path)?;
        let records = self.parse_str(&content);
        log::info!("parsed {} chat messages from {}", records.len(), path.display());
        Ok(records)
    }
}
