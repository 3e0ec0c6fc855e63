//! Conversion between device timestamps and display strings.
//!
//! Content providers report dates as epoch milliseconds (SMS, call log) or
//! epoch seconds (media store). Reports show them in local time as
//! `YYYY-MM-DD HH:MM:SS`.
//!
//! Display conversion never fails: a value that is not an integer, or is out
//! of range, is passed through unchanged so the row still renders. Chat export
//! timestamps are the opposite case and parse strictly.
//!
//! ```
//! use droidpack::timestamp::{TimeUnit, to_display};
//!
//! assert_eq!(to_display("not-a-date", TimeUnit::Millis), "not-a-date");
//! assert_eq!(to_display("", TimeUnit::Seconds), "");
//! ```

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Format used for every rendered date/time.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unit of an epoch timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Milliseconds since the Unix epoch (`sms.date`, `calls.date`)
    Millis,
    /// Seconds since the Unix epoch (`media.date_added`)
    Seconds,
}

/// Meridian marker of a 12-hour chat export time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridian {
    Am,
    Pm,
}

impl std::str::FromStr for Meridian {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "am" => Ok(Meridian::Am),
            "pm" => Ok(Meridian::Pm),
            _ => Err(format!("Unknown meridian: '{s}'. Expected am or pm")),
        }
    }
}

/// Resolves a raw epoch value to a local date-time.
fn to_local(raw: &str, unit: TimeUnit) -> Option<DateTime<Local>> {
    let value: i64 = raw.trim().parse().ok()?;
    match unit {
        TimeUnit::Millis => Local.timestamp_millis_opt(value).single(),
        TimeUnit::Seconds => Local.timestamp_opt(value, 0).single(),
    }
}

/// Renders a raw epoch value as a local `YYYY-MM-DD HH:MM:SS` string.
///
/// Returns `raw` unchanged when it is not an integer or is out of range.
///
/// # Examples
///
/// ```
/// use droidpack::timestamp::{TimeUnit, to_display};
///
/// let shown = to_display("1700000000000", TimeUnit::Millis);
/// assert_eq!(shown.len(), 19);
/// assert_eq!(to_display("17/05/2024", TimeUnit::Millis), "17/05/2024");
/// ```
pub fn to_display(raw: &str, unit: TimeUnit) -> String {
    match to_local(raw, unit) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Returns the epoch-seconds value of a raw timestamp field.
///
/// Milliseconds are floored to whole seconds.
pub fn epoch_seconds(raw: &str, unit: TimeUnit) -> Option<i64> {
    let value: i64 = raw.trim().parse().ok()?;
    match unit {
        TimeUnit::Millis => Some(value.div_euclid(1000)),
        TimeUnit::Seconds => Some(value),
    }
}

/// Strictly parses the `D/M/YY`, `H:MM`, `am|pm` parts of a chat header.
///
/// Two-digit years `00`–`68` are 20xx and `69`–`99` are 19xx. Hours must be
/// 1–12; `12 am` is midnight.
///
/// # Examples
///
/// ```
/// use droidpack::timestamp::{Meridian, parse_chat_timestamp};
///
/// let ts = parse_chat_timestamp("14/05/24", "9:23", Meridian::Pm).unwrap();
/// assert_eq!(ts.to_string(), "2024-05-14 21:23:00");
/// assert!(parse_chat_timestamp("31/02/24", "9:23", Meridian::Pm).is_none());
/// ```
pub fn parse_chat_timestamp(date: &str, time: &str, meridian: Meridian) -> Option<NaiveDateTime> {
    let mut date_parts = date.split('/');
    let day: u32 = date_parts.next()?.parse().ok()?;
    let month: u32 = date_parts.next()?.parse().ok()?;
    let year_str = date_parts.next()?;
    if date_parts.next().is_some() || year_str.len() != 2 {
        return None;
    }
    let short_year: i32 = year_str.parse().ok()?;
    let year = if short_year < 69 {
        2000 + short_year
    } else {
        1900 + short_year
    };

    let (hour_str, minute_str) = time.split_once(':')?;
    let hour: u32 = hour_str.parse().ok()?;
    let minute: u32 = minute_str.parse().ok()?;
    if !(1..=12).contains(&hour) || minute_str.len() != 2 {
        return None;
    }
    let hour = match meridian {
        Meridian::Am => hour % 12,
        Meridian::Pm => hour % 12 + 12,
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

/// Converts a local naive date-time to epoch seconds.
///
/// During a DST fold the earlier instant is used; a time skipped by a DST gap
/// has no epoch value.
pub fn local_epoch_seconds(naive: &NaiveDateTime) -> Option<i64> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.timestamp())
}
