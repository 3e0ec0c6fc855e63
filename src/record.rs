//! Normalized record types.
//!
//! Every extraction source ends up as one of four record shapes:
//!
//! | Kind | Type | Required fields |
//! |------|------|-----------------|
//! | SMS message | [`MessageRecord`] | `sender`, `body` |
//! | Call log entry | [`CallRecord`] | `number`, `timestamp_raw` |
//! | Media asset | [`MediaRecord`] | non-empty `path` |
//! | Chat export line | [`ChatRecord`] | `timestamp`, `sender`, `message` |
//!
//! Required fields are plain `String`s taken by the constructors, optional
//! fields are added with `with_*` builders. Records only hold the raw values
//! the device emitted; display dates, type labels and formatted durations are
//! computed when a report is rendered.
//!
//! # Example
//!
//! ```
//! use droidpack::record::{CallRecord, Record, RecordKind};
//!
//! let call = CallRecord::new("+15550100", "1715700000000")
//!     .with_name("Alice")
//!     .with_type_code("2")
//!     .with_duration("65");
//!
//! assert_eq!(call.name(), Some("Alice"));
//! assert_eq!(Record::from(call).kind(), RecordKind::Call);
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An SMS/MMS message from the telephony provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRecord {
    sender: String,
    body: String,
    timestamp_raw: Option<String>,
    creator: Option<String>,
    type_code: Option<String>,
}

impl MessageRecord {
    /// Creates a message with its required sender address and body.
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            timestamp_raw: None,
            creator: None,
            type_code: None,
        }
    }

    /// Sets the raw `date` field (epoch milliseconds).
    #[must_use]
    pub fn with_timestamp_raw(mut self, raw: impl Into<String>) -> Self {
        self.timestamp_raw = Some(raw.into());
        self
    }

    /// Sets the package that created the message.
    #[must_use]
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Sets the raw message box code (`1` inbox, `2` sent, ...).
    #[must_use]
    pub fn with_type_code(mut self, code: impl Into<String>) -> Self {
        self.type_code = Some(code.into());
        self
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn timestamp_raw(&self) -> Option<&str> {
        self.timestamp_raw.as_deref()
    }

    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }

    pub fn type_code(&self) -> Option<&str> {
        self.type_code.as_deref()
    }
}

/// A call log entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallRecord {
    number: String,
    name: Option<String>,
    type_code: Option<String>,
    timestamp_raw: String,
    duration_seconds: Option<String>,
}

impl CallRecord {
    /// Creates a call entry with its required number and raw `date` field.
    pub fn new(number: impl Into<String>, timestamp_raw: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: None,
            type_code: None,
            timestamp_raw: timestamp_raw.into(),
            duration_seconds: None,
        }
    }

    /// Sets the cached contact name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the raw call type code (`1` incoming, `2` outgoing, ...).
    #[must_use]
    pub fn with_type_code(mut self, code: impl Into<String>) -> Self {
        self.type_code = Some(code.into());
        self
    }

    /// Sets the raw duration in seconds.
    #[must_use]
    pub fn with_duration(mut self, seconds: impl Into<String>) -> Self {
        self.duration_seconds = Some(seconds.into());
        self
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn type_code(&self) -> Option<&str> {
        self.type_code.as_deref()
    }

    pub fn timestamp_raw(&self) -> &str {
        &self.timestamp_raw
    }

    pub fn duration_seconds(&self) -> Option<&str> {
        self.duration_seconds.as_deref()
    }
}

/// A media store entry (image, video or audio file on the device).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaRecord {
    path: String,
    display_name: Option<String>,
    date_added_epoch: Option<String>,
}

impl MediaRecord {
    /// Creates a media entry for a device path.
    ///
    /// Returns `None` for an empty path.
    pub fn new(path: impl Into<String>) -> Option<Self> {
        let path = path.into();
        if path.is_empty() {
            return None;
        }
        Some(Self {
            path,
            display_name: None,
            date_added_epoch: None,
        })
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the raw `date_added` field (epoch seconds).
    #[must_use]
    pub fn with_date_added(mut self, raw: impl Into<String>) -> Self {
        self.date_added_epoch = Some(raw.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn date_added_epoch(&self) -> Option<&str> {
        self.date_added_epoch.as_deref()
    }

    /// Returns the name of the directory containing the file.
    ///
    /// `/sdcard/DCIM/Camera/a.jpg` → `Camera`.
    pub fn folder(&self) -> Option<&str> {
        let mut parts = self.path.rsplit('/').filter(|p| !p.is_empty());
        parts.next()?;
        parts.next()
    }
}

/// One message from a chat text export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatRecord {
    timestamp: NaiveDateTime,
    sender: String,
    message: String,
}

impl ChatRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            message: message.into(),
        }
    }

    /// Local wall-clock time as written in the export.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    /// `HH:MM`
    pub fn time_string(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Any normalized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Message(MessageRecord),
    Call(CallRecord),
    Media(MediaRecord),
    Chat(ChatRecord),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Message(_) => RecordKind::Message,
            Record::Call(_) => RecordKind::Call,
            Record::Media(_) => RecordKind::Media,
            Record::Chat(_) => RecordKind::Chat,
        }
    }
}

impl From<MessageRecord> for Record {
    fn from(record: MessageRecord) -> Self {
        Record::Message(record)
    }
}

impl From<CallRecord> for Record {
    fn from(record: CallRecord) -> Self {
        Record::Call(record)
    }
}

impl From<MediaRecord> for Record {
    fn from(record: MediaRecord) -> Self {
        Record::Media(record)
    }
}

impl From<ChatRecord> for Record {
    fn from(record: ChatRecord) -> Self {
        Record::Chat(record)
    }
}

/// The four record shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Message,
    Call,
    Media,
    Chat,
}

impl RecordKind {
    /// Plural noun used in user-facing summaries.
    pub fn noun(&self) -> &'static str {
        match self {
            RecordKind::Message => "messages",
            RecordKind::Call => "call logs",
            RecordKind::Media => "media files",
            RecordKind::Chat => "chat messages",
        }
    }

    /// Default output file stem.
    pub fn file_stem(&self) -> &'static str {
        match self {
            RecordKind::Message => "sms_messages",
            RecordKind::Call => "call_logs",
            RecordKind::Media => "media_files",
            RecordKind::Chat => "chat_export",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Message => write!(f, "SMS"),
            RecordKind::Call => write!(f, "Calls"),
            RecordKind::Media => write!(f, "Media"),
            RecordKind::Chat => write!(f, "Chat"),
        }
    }
}

/// Record kinds backed by content-provider row dumps.
///
/// Each kind owns the allow-list of provider columns it keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Message,
    Call,
    Media,
}

impl RowKind {
    /// Provider columns retained for this kind; everything else is dropped.
    pub fn allowed_keys(&self) -> &'static [&'static str] {
        match self {
            RowKind::Message => &["address", "body", "date", "creator", "type"],
            RowKind::Call => &["number", "name", "type", "date", "duration"],
            RowKind::Media => &["_data", "_display_name", "date_added"],
        }
    }
}

impl From<RowKind> for RecordKind {
    fn from(kind: RowKind) -> Self {
        match kind {
            RowKind::Message => RecordKind::Message,
            RowKind::Call => RecordKind::Call,
            RowKind::Media => RecordKind::Media,
        }
    }
}

impl std::str::FromStr for RowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sms" | "message" | "messages" => Ok(RowKind::Message),
            "calls" | "call" | "call_log" => Ok(RowKind::Call),
            "media" => Ok(RowKind::Media),
            _ => Err(format!(
                "Unknown row kind: '{s}'. Expected one of: sms, calls, media"
            )),
        }
    }
}
