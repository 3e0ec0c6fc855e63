//! Unified error types for droidpack.
//!
//! This module provides a single [`DroidpackError`] enum covering every
//! fallible step of the library. Most of the pipeline is infallible: a
//! source that returns nothing, a malformed dump line or an unparsable
//! timestamp degrade to "no record" or "raw string" instead of an error. What
//! remains here are the steps that touch the filesystem or an output encoder.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Export steps are independent**: a failed PDF write never undoes a CSV
//!   that was already written

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for droidpack operations.
///
/// # Example
///
/// ```rust
/// use droidpack::error::Result;
/// use droidpack::record::MessageRecord;
///
/// fn load() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, DroidpackError>;

/// The error type for all droidpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DroidpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - A chat export or dump file doesn't exist
    /// - Permission denied on the output directory
    /// - Disk is full while writing a report
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error while reading a configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PDF rendering or saving failed.
    ///
    /// The underlying renderer error is kept as text; the PDF backend's own
    /// error type is not part of the public API.
    #[cfg(feature = "pdf-output")]
    #[error("PDF error: {message}")]
    Pdf {
        /// Renderer error message
        message: String,
    },

    /// Writing a zip archive failed.
    #[cfg(feature = "archive")]
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A configuration file or value is invalid.
    #[error("Invalid configuration{}: {message}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
        /// The configuration file, if the value came from one
        path: Option<PathBuf>,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl DroidpackError {
    /// Creates a PDF error from any renderer error.
    #[cfg(feature = "pdf-output")]
    pub fn pdf(err: impl std::fmt::Display) -> Self {
        DroidpackError::Pdf {
            message: err.to_string(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        DroidpackError::InvalidConfig {
            message: message.into(),
            path,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, DroidpackError::Io(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, DroidpackError::InvalidConfig { .. })
    }

    /// Returns `true` if this error came from an output encoder (CSV, PDF or
    /// archive) rather than the filesystem or configuration.
    pub fn is_output(&self) -> bool {
        match self {
            #[cfg(feature = "csv-output")]
            DroidpackError::Csv(_) => true,
            #[cfg(feature = "pdf-output")]
            DroidpackError::Pdf { .. } => true,
            #[cfg(feature = "archive")]
            DroidpackError::Archive(_) => true,
            _ => false,
        }
    }
}
