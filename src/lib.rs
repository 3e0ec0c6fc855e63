//! # droidpack
//!
//! A Rust library for pulling forensic artifacts off Android devices and
//! turning them into reviewable reports.
//!
//! ## Overview
//!
//! droidpack handles four kinds of data:
//! - **SMS messages** - from the telephony content providers, with a direct
//!   `sqlite3` fallback
//! - **Call logs** - from `content://call_log/calls`
//! - **Media files** - image, video and audio entries of the media store
//! - **Chat exports** - `D/M/YY, H:MM am - Sender: text` text exports
//!
//! Device output is parsed line by line into raw rows, normalized into typed
//! records, filtered by date range and folder, and written as CSV or PDF.
//! App data directories (WhatsApp, Telegram, Instagram) can be pulled and
//! zipped for offline analysis.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "pdf-output"))]
//! # fn main() -> droidpack::Result<()> {
//! use droidpack::prelude::*;
//! use std::path::Path;
//!
//! let bridge = AdbBridge::new(BridgeConfig::new());
//! let messages = extract_messages(&bridge);
//!
//! let filters = FilterConfig::new()
//!     .with_date_from("2024-01-01")
//!     .with_date_to("2024-06-30");
//! let messages = apply_filters(messages, &filters);
//!
//! write_csv(&messages, Path::new("reports/sms_messages.csv"), &OutputConfig::new())?;
//! write_pdf(&messages, Path::new("reports/sms_messages.pdf"), &PdfConfig::new())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "pdf-output")))]
//! # fn main() {}
//! ```
//!
//! ## Working Offline
//!
//! Everything after the device query is pure, so saved dumps work the same:
//!
//! ```rust
//! use droidpack::core::normalize_rows;
//! use droidpack::parsing::RowParser;
//! use droidpack::record::{Record, RowKind};
//!
//! let dump = "Row: 0 _data=/sdcard/DCIM/Camera/a.jpg, _display_name=a.jpg, date_added=1700000000";
//! let rows = RowParser::for_kind(RowKind::Media).parse_rows(dump);
//! let records = normalize_rows(&rows, RowKind::Media);
//! assert!(matches!(&records[0], Record::Media(m) if m.folder() == Some("Camera")));
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - Row dump, `sqlite3` and chat export parsers
//! - [`record`] - [`MessageRecord`], [`CallRecord`], [`MediaRecord`], [`ChatRecord`]
//! - [`timestamp`] - Epoch and chat timestamp conversion
//! - [`core`] - Labels, normalization, filters and report writers
//! - [`bridge`] - [`DeviceBridge`](bridge::DeviceBridge) and the `adb` implementation
//! - [`extract`] - Ordered source strategies per record kind
//! - [`archive`] - App data pulls and zip archives (`archive` feature)
//! - [`format`] - [`ReportFormat`](format::ReportFormat) and runtime dispatch
//! - [`config`] - Configuration types, loadable from JSON
//! - [`cli`] - CLI argument types (`cli` feature)
//! - [`error`] - Unified error types ([`DroidpackError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "archive")]
pub mod archive;
pub mod bridge;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod format;
pub mod parsing;
pub mod record;
pub mod timestamp;

// Re-export the main types at the crate root for convenience
pub use error::{DroidpackError, Result};
pub use record::{CallRecord, ChatRecord, MediaRecord, MessageRecord, Record, RecordKind};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use droidpack::prelude::*;
/// ```
pub mod prelude {
    // Records
    pub use crate::record::{
        CallRecord, ChatRecord, MediaRecord, MessageRecord, Record, RecordKind, RowKind,
    };

    // Error types
    pub use crate::error::{DroidpackError, Result};

    // Configuration
    pub use crate::config::{BridgeConfig, ChatConfig, Config, OutputConfig, PdfConfig, ScriptFont};

    // Parsing and normalization
    pub use crate::core::normalize::{normalize_calls, normalize_media_rows, normalize_messages};
    pub use crate::parsing::{ChatParser, RawRow, RowParser, parse_chat_line};

    // Filtering and processing
    pub use crate::core::filter::{FilterConfig, apply_filters, filter_by_date, filter_by_folder};
    pub use crate::core::processor::{ExtractionStats, sort_newest_first};

    // Device access
    pub use crate::bridge::{AdbBridge, DeviceBridge, QuerySource};
    pub use crate::extract::{MediaType, extract_calls, extract_media, extract_messages};

    // Output
    pub use crate::core::output::ReportRecord;
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "pdf-output")]
    pub use crate::core::output::write_pdf;
    pub use crate::format::{ReportFormat, write_report};
}
