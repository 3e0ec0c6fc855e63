//! Ordering, folder listing and per-run statistics.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use super::filter::{ALL_FOLDERS, Filterable};
use crate::record::{MediaRecord, RecordKind};

/// Sorts records by timestamp, newest first.
///
/// Records without a parseable timestamp go last and otherwise keep their
/// relative order.
///
/// # Example
/// Input timestamps:  [100, None, 300, 200]
/// Output timestamps: [300, 200, 100, None]
pub fn sort_newest_first<R: Filterable>(records: &mut [R]) {
    records.sort_by_key(|r| Reverse(r.epoch_seconds()));
}

/// Distinct parent folder names of the media entries, sorted, preceded by
/// `All`.
///
/// This is the list a user picks the folder filter token from.
pub fn media_folders(media: &[MediaRecord]) -> Vec<String> {
    let folders: BTreeSet<&str> = media.iter().filter_map(MediaRecord::folder).collect();
    std::iter::once(ALL_FOLDERS)
        .chain(folders)
        .map(String::from)
        .collect()
}

/// Counts for one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionStats {
    pub kind: RecordKind,
    /// Records after normalization
    pub found: usize,
    /// Records left after filtering
    pub kept: usize,
}

impl ExtractionStats {
    pub fn new(kind: RecordKind, found: usize, kept: usize) -> Self {
        Self { kind, found, kept }
    }

    pub fn filtered_out(&self) -> usize {
        self.found.saturating_sub(self.kept)
    }

    /// Share of records removed by filters, in percent.
    pub fn filtered_ratio(&self) -> f64 {
        if self.found == 0 {
            return 0.0;
        }
        self.filtered_out() as f64 / self.found as f64 * 100.0
    }
}

impl std::fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.found == self.kept {
            write!(f, "{} {}", self.found, self.kind.noun())
        } else {
            write!(
                f,
                "{} of {} {} after filters",
                self.kept,
                self.found,
                self.kind.noun()
            )
        }
    }
}
