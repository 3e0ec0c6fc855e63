//! Code → label tables and duration formatting.
//!
//! Providers store message boxes and call directions as small integer codes.
//! Reports show their names; codes outside the table show as `"Unknown"`.

/// Label for codes missing from a table.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// `sms.type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Inbox,
    Sent,
    Draft,
    Outbox,
    Failed,
    Queued,
}

impl MessageType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(MessageType::Inbox),
            "2" => Some(MessageType::Sent),
            "3" => Some(MessageType::Draft),
            "4" => Some(MessageType::Outbox),
            "5" => Some(MessageType::Failed),
            "6" => Some(MessageType::Queued),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MessageType::Inbox => "Inbox",
            MessageType::Sent => "Sent",
            MessageType::Draft => "Draft",
            MessageType::Outbox => "Outbox",
            MessageType::Failed => "Failed",
            MessageType::Queued => "Queued",
        }
    }

    /// Label for an optional raw code.
    pub fn label_for(code: Option<&str>) -> &'static str {
        code.and_then(Self::from_code)
            .map_or(UNKNOWN_LABEL, |t| t.label())
    }
}

/// `calls.type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
    Voicemail,
    Rejected,
    Blocked,
    External,
}

impl CallType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(CallType::Incoming),
            "2" => Some(CallType::Outgoing),
            "3" => Some(CallType::Missed),
            "4" => Some(CallType::Voicemail),
            "5" => Some(CallType::Rejected),
            "6" => Some(CallType::Blocked),
            "7" => Some(CallType::External),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CallType::Incoming => "Incoming",
            CallType::Outgoing => "Outgoing",
            CallType::Missed => "Missed",
            CallType::Voicemail => "Voicemail",
            CallType::Rejected => "Rejected",
            CallType::Blocked => "Blocked",
            CallType::External => "External",
        }
    }

    /// Label for an optional raw code.
    pub fn label_for(code: Option<&str>) -> &'static str {
        code.and_then(Self::from_code)
            .map_or(UNKNOWN_LABEL, |t| t.label())
    }
}

/// Formats a duration given in seconds as `1h 0m 5s`.
///
/// Hours are omitted when zero; minutes are shown whenever hours are.
/// Anything that is not a non-negative integer comes back unchanged.
///
/// # Examples
///
/// ```
/// use droidpack::core::labels::format_duration;
///
/// assert_eq!(format_duration("0"), "0s");
/// assert_eq!(format_duration("65"), "1m 5s");
/// assert_eq!(format_duration("3605"), "1h 0m 5s");
/// assert_eq!(format_duration("n/a"), "n/a");
/// ```
pub fn format_duration(raw: &str) -> String {
    let Ok(total) = raw.trim().parse::<u64>() else {
        return raw.to_string();
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
