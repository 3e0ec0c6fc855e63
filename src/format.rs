//! Report format types.
//!
//! This module provides a format enum that doesn't depend on CLI frameworks,
//! plus [`write_report`] to pick the matching writer at runtime.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "pdf-output"))]
//! # fn example() -> droidpack::Result<()> {
//! use std::path::Path;
//! use droidpack::config::Config;
//! use droidpack::format::{ReportFormat, write_report};
//! use droidpack::record::MediaRecord;
//!
//! let media: Vec<MediaRecord> = MediaRecord::new("/sdcard/DCIM/a.jpg").into_iter().collect();
//! let config = Config::new();
//!
//! for format in ReportFormat::all() {
//!     let path = format.output_path(Path::new("out"), "media_files");
//!     write_report(&media, &path, *format, &config)?;
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::output::ReportRecord;
use crate::error::{DroidpackError, Result};

/// Output format for reports.
///
/// # Example
///
/// ```rust
/// use droidpack::format::ReportFormat;
/// use std::str::FromStr;
///
/// let format = ReportFormat::from_str("pdf").unwrap();
/// assert_eq!(format, ReportFormat::Pdf);
/// assert_eq!(format.extension(), "pdf");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ReportFormat {
    /// Comma separated values, one file per record kind
    #[default]
    Csv,

    /// Titled A4 table
    Pdf,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "pdf"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [ReportFormat] {
        &[ReportFormat::Csv, ReportFormat::Pdf]
    }

    /// `dir/stem.ext`
    ///
    /// ```rust
    /// use droidpack::format::ReportFormat;
    /// use std::path::Path;
    ///
    /// let path = ReportFormat::Pdf.output_path(Path::new("out"), "call_logs");
    /// assert_eq!(path, Path::new("out/call_logs.pdf"));
    /// ```
    pub fn output_path(&self, dir: &Path, stem: &str) -> PathBuf {
        dir.join(format!("{stem}.{}", self.extension()))
    }

    fn feature(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv-output",
            ReportFormat::Pdf => "pdf-output",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Csv => write!(f, "CSV"),
            ReportFormat::Pdf => write!(f, "PDF"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "pdf" => Ok(ReportFormat::Pdf),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes records to `path` in the given format.
///
/// Returns the number of records written; `0` means no file was created.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_report<R: ReportRecord>(
    records: &[R],
    path: &Path,
    format: ReportFormat,
    config: &Config,
) -> Result<usize> {
    match format {
        #[cfg(feature = "csv-output")]
        ReportFormat::Csv => crate::core::output::write_csv(records, path, &config.output),
        #[cfg(feature = "pdf-output")]
        ReportFormat::Pdf => crate::core::output::write_pdf(records, path, &config.pdf),
        #[allow(unreachable_patterns)]
        _ => Err(DroidpackError::invalid_config(
            format!(
                "Report format {format} requires the '{}' feature to be enabled",
                format.feature()
            ),
            None,
        )),
    }
}
