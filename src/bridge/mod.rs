//! Access to a connected Android device.
//!
//! [`DeviceBridge`] is the seam between extraction logic and the device.
//! [`AdbBridge`] implements it by running `adb`; tests use in-memory bridges
//! that return canned dumps.
//!
//! A bridge never fails loudly. A command that cannot start, exits non-zero
//! or runs past the configured timeout yields "no data" and a warning in the
//! log, so the caller can move on to the next source.

pub mod command;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use command::{CommandOutcome, run_with_timeout};

use crate::config::BridgeConfig;

/// Where a batch of rows comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    /// `content query` against a provider URI; output is `Row:` lines.
    Content {
        uri: String,
        projection: Option<String>,
        user: Option<u32>,
    },
    /// Direct `sqlite3` query; output is one `|`-separated line per row,
    /// decoded with the given column names.
    Sqlite {
        database: String,
        sql: String,
        columns: [&'static str; 2],
    },
}

impl QuerySource {
    pub fn content(uri: impl Into<String>) -> Self {
        QuerySource::Content {
            uri: uri.into(),
            projection: None,
            user: None,
        }
    }

    pub fn sqlite(database: impl Into<String>, sql: impl Into<String>, columns: [&'static str; 2]) -> Self {
        QuerySource::Sqlite {
            database: database.into(),
            sql: sql.into(),
            columns,
        }
    }

    /// Sets the `--projection` (colon separated columns) of a content query.
    #[must_use]
    pub fn with_projection(mut self, columns: impl Into<String>) -> Self {
        if let QuerySource::Content { projection, .. } = &mut self {
            *projection = Some(columns.into());
        }
        self
    }

    /// Sets the `--user` of a content query.
    #[must_use]
    pub fn with_user(mut self, id: u32) -> Self {
        if let QuerySource::Content { user, .. } = &mut self {
            *user = Some(id);
        }
        self
    }
}

impl fmt::Display for QuerySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuerySource::Content { uri, .. } => write!(f, "{uri}"),
            QuerySource::Sqlite { database, .. } => write!(f, "sqlite3 {database}"),
        }
    }
}

/// Operations the extractors need from a device.
pub trait DeviceBridge {
    /// Runs a query and returns its raw text output, or `None` if the
    /// source gave nothing usable.
    fn query(&self, source: &QuerySource) -> Option<String>;

    /// Copies a remote file or directory into `dest_dir`.
    ///
    /// Returns the local path of the copy.
    fn pull(&self, remote: &str, dest_dir: &Path) -> Option<PathBuf>;

    /// Names of the entries of a remote directory; empty if it is missing.
    fn list_dir(&self, remote: &str) -> Vec<String>;
}

/// [`DeviceBridge`] backed by the `adb` command line tool.
#[derive(Debug, Clone, Default)]
pub struct AdbBridge {
    config: BridgeConfig,
}

impl AdbBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// `adb` arguments for a query.
    pub fn query_args(source: &QuerySource) -> Vec<String> {
        let mut args: Vec<String> = vec!["shell".into()];
        match source {
            QuerySource::Content {
                uri,
                projection,
                user,
            } => {
                args.extend(["content".into(), "query".into(), "--uri".into(), uri.clone()]);
                if let Some(p) = projection {
                    args.extend(["--projection".into(), p.clone()]);
                }
                if let Some(u) = user {
                    args.extend(["--user".into(), u.to_string()]);
                }
            }
            QuerySource::Sqlite { database, sql, .. } => {
                // the device shell re-splits arguments, so the SQL is quoted
                args.extend(["sqlite3".into(), database.clone(), format!("\"{sql}\"")]);
            }
        }
        args
    }

    fn run(&self, args: &[String]) -> Option<String> {
        log::debug!("running {} {}", self.config.adb_path.display(), args.join(" "));
        match run_with_timeout(&self.config.adb_path, args, self.timeout()) {
            CommandOutcome::Success(out) => Some(out),
            CommandOutcome::Failed { code, stderr } => {
                log::warn!(
                    "adb {} exited with {}: {stderr}",
                    args.join(" "),
                    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
                );
                None
            }
            CommandOutcome::TimedOut => {
                log::warn!(
                    "adb {} timed out after {}s",
                    args.join(" "),
                    self.config.timeout_secs
                );
                None
            }
            CommandOutcome::SpawnError(e) => {
                log::warn!("could not run {}: {e}", self.config.adb_path.display());
                None
            }
        }
    }

    /// Returns `true` if `adb devices` lists at least one ready device.
    pub fn device_connected(&self) -> bool {
        self.run(&["devices".to_string()])
            .is_some_and(|out| has_ready_device(&out))
    }
}

/// Checks `adb devices` output for a line whose state is `device`.
///
/// `unauthorized` and `offline` entries do not count.
pub fn has_ready_device(output: &str) -> bool {
    output
        .lines()
        .skip_while(|l| !l.starts_with("List of devices"))
        .skip(1)
        .any(|l| l.split_whitespace().nth(1) == Some("device"))
}

impl DeviceBridge for AdbBridge {
    fn query(&self, source: &QuerySource) -> Option<String> {
        let out = self.run(&Self::query_args(source))?;
        if out.trim().is_empty() || out.trim_start().starts_with("No result found") {
            log::debug!("{source}: empty result");
            return None;
        }
        Some(out)
    }

    fn pull(&self, remote: &str, dest_dir: &Path) -> Option<PathBuf> {
        let name = remote.trim_end_matches('/').rsplit('/').next()?;
        if name.is_empty() {
            return None;
        }
        if let Err(e) = std::fs::create_dir_all(dest_dir) {
            log::warn!("cannot create {}: {e}", dest_dir.display());
            return None;
        }
        let local = dest_dir.join(name);
        let args = ["pull".to_string(), remote.to_string(), local.display().to_string()];
        self.run(&args)?;
        log::info!("pulled {remote} -> {}", local.display());
        Some(local)
    }

    fn list_dir(&self, remote: &str) -> Vec<String> {
        let args = [
            "shell".to_string(),
            "ls".to_string(),
            "-1".to_string(),
            remote.to_string(),
        ];
        let Some(out) = self.run(&args) else {
            return Vec::new();
        };
        // some devices print the error on stdout with status 0
        if out.contains("No such file or directory") {
            return Vec::new();
        }
        // one entry per line; names such as "WhatsApp Images" contain spaces
        out.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    }
}
