//! Core processing logic for droidpack.
//!
//! This module contains:
//! - [`labels`] - Type code labels and duration formatting
//! - [`normalize`] - Raw rows to typed records
//! - [`filter`] - Record filtering by date and folder
//! - [`processor`] - Ordering, folder listing and statistics
//! - [`output`] - Report writers (CSV, PDF)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn example() -> droidpack::Result<()> {
//! use droidpack::config::OutputConfig;
//! use droidpack::core::{FilterConfig, apply_filters, normalize_messages, to_csv};
//! use droidpack::parsing::RowParser;
//! use droidpack::record::RowKind;
//!
//! let rows = RowParser::for_kind(RowKind::Message)
//!     .parse_rows("Row: 0 address=5551234, body=Hi, date=1715700000000, type=1");
//! let messages = apply_filters(normalize_messages(&rows), &FilterConfig::new());
//! let csv = to_csv(&messages, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! ```

pub mod filter;
pub mod labels;
pub mod normalize;
pub mod output;
pub mod processor;

pub use filter::{FilterConfig, Filterable, apply_filters, filter_by_date, filter_by_folder};
pub use labels::{CallType, MessageType, format_duration};
pub use normalize::{normalize_calls, normalize_media_rows, normalize_messages, normalize_rows};
pub use output::ReportRecord;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "pdf-output")]
pub use output::write_pdf;

pub use processor::{ExtractionStats, media_folders, sort_newest_first};
