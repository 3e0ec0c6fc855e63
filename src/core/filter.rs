//! Filter records by date range and folder/substring.
//!
//! This module provides [`filter_by_date`] and [`filter_by_folder`], plus
//! [`FilterConfig`] and [`apply_filters`] to run both from one set of
//! options.
//!
//! # Filter Types
//!
//! | Filter | Function | Matches |
//! |--------|----------|---------|
//! | Date range | [`filter_by_date`] | `start <= timestamp <= end`, epoch seconds |
//! | Folder | [`filter_by_folder`] | case-insensitive substring of the path-like field |
//!
//! # Examples
//!
//! ```
//! use droidpack::core::filter::{filter_by_date, filter_by_folder};
//! use droidpack::record::MediaRecord;
//!
//! let media = vec![
//!     MediaRecord::new("/sdcard/DCIM/Camera/a.jpg").unwrap().with_date_added("100"),
//!     MediaRecord::new("/sdcard/Pictures/Screenshots/b.png").unwrap().with_date_added("200"),
//!     MediaRecord::new("/sdcard/DCIM/Camera/c.jpg").unwrap().with_date_added("300"),
//! ];
//!
//! let in_range = filter_by_date(media.clone(), Some("150"), Some("250"));
//! assert_eq!(in_range.len(), 1);
//!
//! let camera = filter_by_folder(media, "camera");
//! assert_eq!(camera.len(), 2);
//! ```
//!
//! # Behavior Notes
//!
//! - The date filter needs **both** bounds. With a bound missing or
//!   unparsable it passes everything through (fails open) and logs a warning
//! - Records without a parseable timestamp are **excluded** while the date
//!   filter is active
//! - A folder token of `All` or blank passes everything through
//! - Filters are independent; applying both in either order gives the same
//!   result

use chrono::NaiveDate;

use crate::record::{CallRecord, ChatRecord, MediaRecord, MessageRecord};
use crate::timestamp::{TimeUnit, epoch_seconds, local_epoch_seconds};

/// Folder token that disables the folder filter.
pub const ALL_FOLDERS: &str = "All";

/// Access to the fields the filters look at.
pub trait Filterable {
    /// Timestamp in epoch seconds, if the record has a parseable one.
    fn epoch_seconds(&self) -> Option<i64>;

    /// The field the folder filter matches against.
    fn path_like(&self) -> &str;
}

impl Filterable for MessageRecord {
    fn epoch_seconds(&self) -> Option<i64> {
        epoch_seconds(self.timestamp_raw()?, TimeUnit::Millis)
    }

    fn path_like(&self) -> &str {
        self.sender()
    }
}

impl Filterable for CallRecord {
    fn epoch_seconds(&self) -> Option<i64> {
        epoch_seconds(self.timestamp_raw(), TimeUnit::Millis)
    }

    fn path_like(&self) -> &str {
        self.number()
    }
}

impl Filterable for MediaRecord {
    fn epoch_seconds(&self) -> Option<i64> {
        epoch_seconds(self.date_added_epoch()?, TimeUnit::Seconds)
    }

    fn path_like(&self) -> &str {
        self.path()
    }
}

impl Filterable for ChatRecord {
    fn epoch_seconds(&self) -> Option<i64> {
        local_epoch_seconds(&self.timestamp())
    }

    fn path_like(&self) -> &str {
        self.sender()
    }
}

/// Parses a date bound: decimal epoch seconds or a local `YYYY-MM-DD`.
///
/// A date used as an end bound covers the whole day (up to 23:59:59).
pub fn parse_bound(raw: &str, end_of_day: bool) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<i64>() {
        return Some(secs);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let naive = if end_of_day {
        date.and_hms_opt(23, 59, 59)?
    } else {
        date.and_hms_opt(0, 0, 0)?
    };
    local_epoch_seconds(&naive)
}

/// Keeps records whose timestamp lies in `[start, end]`.
///
/// Both bounds are inclusive. If either is absent or cannot be parsed the
/// input is returned unchanged.
pub fn filter_by_date<R: Filterable>(
    records: Vec<R>,
    start: Option<&str>,
    end: Option<&str>,
) -> Vec<R> {
    let (Some(start_raw), Some(end_raw)) = (start, end) else {
        if start.is_some() || end.is_some() {
            log::warn!("date filter needs both a start and an end bound; ignoring it");
        }
        return records;
    };
    let (Some(start), Some(end)) = (parse_bound(start_raw, false), parse_bound(end_raw, true))
    else {
        log::warn!("unparsable date bounds '{start_raw}'..'{end_raw}'; ignoring date filter");
        return records;
    };

    records
        .into_iter()
        .filter(|r| r.epoch_seconds().is_some_and(|t| start <= t && t <= end))
        .collect()
}

/// Keeps records whose path-like field contains `token`, ignoring case.
///
/// `"All"` (any case) and blank tokens keep everything.
pub fn filter_by_folder<R: Filterable>(records: Vec<R>, token: &str) -> Vec<R> {
    let token = token.trim();
    if token.is_empty() || token.eq_ignore_ascii_case(ALL_FOLDERS) {
        return records;
    }
    let needle = token.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.path_like().to_lowercase().contains(&needle))
        .collect()
}

/// Date range and folder options, applied together by [`apply_filters`].
///
/// # Examples
///
/// ```
/// use droidpack::core::filter::FilterConfig;
///
/// let config = FilterConfig::new()
///     .with_date_from("2024-01-01")
///     .with_date_to("2024-12-31")
///     .with_folder("WhatsApp");
/// assert!(config.is_active());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Inclusive start bound (epoch seconds or `YYYY-MM-DD`).
    pub start: Option<String>,

    /// Inclusive end bound (epoch seconds or `YYYY-MM-DD`).
    pub end: Option<String>,

    /// Substring of the path-like field.
    pub folder: Option<String>,
}

impl FilterConfig {
    /// Creates a configuration with no active filters.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_from(mut self, bound: impl Into<String>) -> Self {
        self.start = Some(bound.into());
        self
    }

    #[must_use]
    pub fn with_date_to(mut self, bound: impl Into<String>) -> Self {
        self.end = Some(bound.into());
        self
    }

    #[must_use]
    pub fn with_folder(mut self, token: impl Into<String>) -> Self {
        self.folder = Some(token.into());
        self
    }

    /// Returns `true` if both date bounds are set and parse.
    pub fn has_date_filter(&self) -> bool {
        matches!(
            (&self.start, &self.end),
            (Some(s), Some(e)) if parse_bound(s, false).is_some() && parse_bound(e, true).is_some()
        )
    }

    /// Returns `true` if a folder token other than `All` is set.
    pub fn has_folder_filter(&self) -> bool {
        self.folder
            .as_deref()
            .is_some_and(|f| !f.trim().is_empty() && !f.trim().eq_ignore_ascii_case(ALL_FOLDERS))
    }

    /// Returns `true` if any filter will remove records.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_folder_filter()
    }
}

/// Applies the date filter, then the folder filter.
pub fn apply_filters<R: Filterable>(records: Vec<R>, config: &FilterConfig) -> Vec<R> {
    let records = filter_by_date(records, config.start.as_deref(), config.end.as_deref());
    match config.folder.as_deref() {
        Some(token) => filter_by_folder(records, token),
        None => records,
    }
}
