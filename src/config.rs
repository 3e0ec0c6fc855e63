//! Configuration types for the bridge, parsers and report output.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. Every struct is `serde`-derived
//! with field defaults, so a JSON file only needs the values it changes.
//!
//! - [`BridgeConfig`] - `adb` binary, command timeout, Android user
//! - [`ChatConfig`] - chat export line handling
//! - [`PdfConfig`] / [`ScriptFont`] - PDF text limits and script fonts
//! - [`OutputConfig`] - output directory and CSV encoding
//! - [`Config`] - all of the above, loadable with [`Config::from_json_file`]
//!
//! # Example
//!
//! ```rust
//! use droidpack::config::{BridgeConfig, Config, OutputConfig};
//!
//! let config = Config::new()
//!     .with_bridge(BridgeConfig::new().with_timeout_secs(10))
//!     .with_output(OutputConfig::new().with_bom());
//!
//! assert_eq!(config.bridge.timeout_secs, 10);
//! assert!(config.output.bom);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DroidpackError, Result};

/// Configuration for talking to the device through `adb`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Path or name of the `adb` executable (default: `adb`)
    pub adb_path: PathBuf,

    /// Seconds to wait for one device command (default: 30)
    pub timeout_secs: u64,

    /// Android user passed to media queries (default: 0)
    pub user: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            adb_path: PathBuf::from("adb"),
            timeout_secs: 30,
            user: 0,
        }
    }
}

impl BridgeConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_adb_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.adb_path = path.into();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: u32) -> Self {
        self.user = user;
        self
    }
}

/// Configuration for chat export parsing.
///
/// # Example
///
/// ```rust
/// use droidpack::config::ChatConfig;
///
/// assert!(ChatConfig::default().join_continuations);
/// assert!(!ChatConfig::strict().join_continuations);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Append lines without a header to the previous message (default: true)
    pub join_continuations: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            join_continuations: true,
        }
    }
}

impl ChatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// One message per header line; continuation lines are dropped.
    pub fn strict() -> Self {
        Self {
            join_continuations: false,
        }
    }

    #[must_use]
    pub fn with_join_continuations(mut self, join: bool) -> Self {
        self.join_continuations = join;
        self
    }
}

/// A font used for PDF cells containing a given script.
///
/// A cell is rendered with the first configured font whose code-point ranges
/// contain any of the cell's characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFont {
    /// Script name used in log messages
    pub name: String,

    /// TrueType font file
    pub path: PathBuf,

    /// Inclusive code-point ranges
    pub ranges: Vec<(u32, u32)>,
}

impl ScriptFont {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ranges: Vec::new(),
        }
    }

    /// Devanagari (U+0900..U+097F) with the bundled Noto Sans font.
    pub fn devanagari() -> Self {
        Self::new("Devanagari", "fonts/NotoSansDevanagari-Regular.ttf")
            .with_range(0x0900, 0x097F)
    }

    #[must_use]
    pub fn with_range(mut self, first: u32, last: u32) -> Self {
        self.ranges.push((first, last));
        self
    }

    /// Returns `true` if `ch` lies in one of the ranges.
    pub fn covers(&self, ch: char) -> bool {
        let cp = ch as u32;
        self.ranges.iter().any(|&(lo, hi)| lo <= cp && cp <= hi)
    }

    /// Returns `true` if any character of `text` lies in one of the ranges.
    pub fn detect(&self, text: &str) -> bool {
        text.chars().any(|c| self.covers(c))
    }
}

/// Configuration for PDF reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Script-specific fonts, checked in order (default: Devanagari)
    pub script_fonts: Vec<ScriptFont>,

    /// Message bodies longer than this are truncated (default: 300 chars)
    pub max_body_chars: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            script_fonts: vec![ScriptFont::devanagari()],
            max_body_chars: 300,
        }
    }
}

impl PdfConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_script_font(mut self, font: ScriptFont) -> Self {
        self.script_fonts.push(font);
        self
    }

    /// Removes all script fonts; every cell uses the built-in font.
    #[must_use]
    pub fn without_script_fonts(mut self) -> Self {
        self.script_fonts.clear();
        self
    }

    #[must_use]
    pub fn with_max_body_chars(mut self, max: usize) -> Self {
        self.max_body_chars = max;
        self
    }
}

/// Configuration for writing reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory reports are written to (default: current directory)
    pub dir: PathBuf,

    /// Prefix CSV files with a UTF-8 byte order mark (default: false)
    pub bom: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            bom: false,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Enables the UTF-8 BOM so spreadsheet tools detect the encoding.
    #[must_use]
    pub fn with_bom(mut self) -> Self {
        self.bom = true;
        self
    }
}

/// Complete configuration, as read from a JSON file.
///
/// ```json
/// {
///   "bridge": { "adb_path": "/opt/platform-tools/adb", "timeout_secs": 60 },
///   "output": { "dir": "reports", "bom": true }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bridge: BridgeConfig,
    pub chat: ChatConfig,
    pub pdf: PdfConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration file. Missing sections take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DroidpackError::Io`] if the file cannot be read,
    /// [`DroidpackError::Json`] if it is not valid JSON for this shape and
    /// [`DroidpackError::InvalidConfig`] if a value is out of range.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|message| DroidpackError::invalid_config(message, Some(path.to_path_buf())))?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot work.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.bridge.timeout_secs == 0 {
            return Err("bridge.timeout_secs must be positive".into());
        }
        if self.pdf.max_body_chars == 0 {
            return Err("pdf.max_body_chars must be positive".into());
        }
        if let Some(font) = self
            .pdf
            .script_fonts
            .iter()
            .find(|f| f.ranges.iter().any(|&(lo, hi)| lo > hi))
        {
            return Err(format!("script font '{}' has an empty range", font.name));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_bridge(mut self, bridge: BridgeConfig) -> Self {
        self.bridge = bridge;
        self
    }

    #[must_use]
    pub fn with_chat(mut self, chat: ChatConfig) -> Self {
        self.chat = chat;
        self
    }

    #[must_use]
    pub fn with_pdf(mut self, pdf: PdfConfig) -> Self {
        self.pdf = pdf;
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }
}
