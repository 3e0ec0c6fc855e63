//! Pulling app data directories and packing them into a zip archive.
//!
//! [`pull_app_data`] copies a list of [`PullTarget`]s from the device into a
//! local directory. [`zip_directory`] then packs that directory with deflate
//! compression, naming entries by their path relative to the root.
//!
//! ```text
//! extracted/
//! ├── whatsapp/databases/msgstore.db.crypt14
//! ├── whatsapp/media/WhatsApp Images/...
//! ├── telegram/Telegram/...
//! └── instagram/com.instagram.android/...
//! ```

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::bridge::DeviceBridge;
use crate::error::Result;

pub const WHATSAPP_DATABASES: &str = "/sdcard/Android/media/com.whatsapp/WhatsApp/Databases";
pub const WHATSAPP_MEDIA: &str = "/sdcard/Android/media/com.whatsapp/WhatsApp/Media";
pub const TELEGRAM_DATA: &str = "/sdcard/Android/media/org.telegram.messenger/Telegram";
pub const INSTAGRAM_DATA: &str = "/sdcard/Android/media/com.instagram.android";

/// How a remote directory is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullMode {
    /// List the directory and pull each entry separately.
    EachEntry,
    /// Pull the directory in one go.
    Whole,
}

/// A remote directory to copy and where it goes under the local root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullTarget {
    pub label: String,
    pub remote: String,
    /// Destination relative to the local root.
    pub local: PathBuf,
    pub mode: PullMode,
}

impl PullTarget {
    pub fn new(
        label: impl Into<String>,
        remote: impl Into<String>,
        local: impl Into<PathBuf>,
        mode: PullMode,
    ) -> Self {
        Self {
            label: label.into(),
            remote: remote.into(),
            local: local.into(),
            mode,
        }
    }
}

/// WhatsApp databases and media, then Telegram and Instagram.
pub fn default_targets() -> Vec<PullTarget> {
    vec![
        PullTarget::new(
            "WhatsApp databases",
            WHATSAPP_DATABASES,
            "whatsapp/databases",
            PullMode::EachEntry,
        ),
        PullTarget::new(
            "WhatsApp media",
            WHATSAPP_MEDIA,
            "whatsapp/media",
            PullMode::EachEntry,
        ),
        PullTarget::new("Telegram", TELEGRAM_DATA, "telegram", PullMode::Whole),
        PullTarget::new("Instagram", INSTAGRAM_DATA, "instagram", PullMode::Whole),
    ]
}

/// What [`pull_app_data`] managed to copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullSummary {
    /// Local paths of everything pulled.
    pub pulled: Vec<PathBuf>,
    /// Labels of targets missing on the device.
    pub missing: Vec<String>,
}

/// Copies every target into `dest_root`.
///
/// A target whose remote directory is missing or empty is skipped with a
/// warning. Individual pulls that fail are logged by the bridge and left out.
pub fn pull_app_data<B: DeviceBridge + ?Sized>(
    bridge: &B,
    targets: &[PullTarget],
    dest_root: &Path,
) -> PullSummary {
    let mut summary = PullSummary::default();

    for target in targets {
        let entries = bridge.list_dir(&target.remote);
        if entries.is_empty() {
            log::warn!("{} not found at {}", target.label, target.remote);
            summary.missing.push(target.label.clone());
            continue;
        }

        let dest = dest_root.join(&target.local);
        match target.mode {
            PullMode::EachEntry => {
                for entry in &entries {
                    let remote = format!("{}/{}", target.remote.trim_end_matches('/'), entry);
                    summary.pulled.extend(bridge.pull(&remote, &dest));
                }
            }
            PullMode::Whole => summary.pulled.extend(bridge.pull(&target.remote, &dest)),
        }
    }
    summary
}

/// `forensic_export_YYYYMMDD_HHMMSS.zip`
pub fn archive_name(now: NaiveDateTime) -> String {
    format!("forensic_export_{}.zip", now.format("%Y%m%d_%H%M%S"))
}

/// Packs every file under `root` into a new zip at `archive_path`.
///
/// Entry names are relative to `root` and use `/` separators. If the archive
/// itself lies inside `root` it is not included.
///
/// Returns the number of files added.
pub fn zip_directory(root: &Path, archive_path: &Path) -> Result<usize> {
    if let Some(parent) = archive_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(archive_path)?;
    let archive_abs = fs::canonicalize(archive_path)?;

    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0;
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if fs::canonicalize(path).is_ok_and(|p| p == archive_abs) {
            continue;
        }

        let name = entry_name(root, path);
        log::debug!("adding {name}");
        zip.start_file(name, options)?;
        let mut source = File::open(path)?;
        io::copy(&mut source, &mut zip)?;
        count += 1;
    }

    zip.finish()?;
    log::info!("archived {count} files to {}", archive_path.display());
    Ok(count)
}

fn entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
