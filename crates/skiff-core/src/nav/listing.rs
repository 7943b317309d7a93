//! Directory listing snapshots.
//!
//! A [`Listing`] is built wholesale from the filesystem and never mutated.
//! Refreshing means building a new one and swapping it in.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::CoreError;
use crate::fs::entry::{is_hidden_name, FileEntry};
use crate::fs::format::{self, DIR_SIZE, UNKNOWN_SIZE};
use crate::fs::icon::IconKind;
use crate::fs::ops::read_directory;
use crate::fs::stat::stat;

/// Reported when a directory could not be enumerated.
///
/// The listing that comes with it is empty; navigation still succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingWarning {
    pub dir: PathBuf,
    pub reason: String,
}

impl ListingWarning {
    fn from_error(dir: &Path, err: &CoreError) -> Self {
        let reason = match err {
            CoreError::PermissionDenied(_) => "Permission denied".to_string(),
            other => other.to_string(),
        };
        Self {
            dir: dir.to_path_buf(),
            reason,
        }
    }
}

/// Formatting options for [`Listing::rows`].
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            date_format: format::DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// One table row, every column already rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub icon: IconKind,
    pub name: String,
    pub size: String,
    pub modified: String,
    pub permissions: String,
}

/// Immutable, ordered snapshot of one directory.
///
/// Cloning is cheap: entries are shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    dir: PathBuf,
    entries: Arc<[FileEntry]>,
}

impl Listing {
    /// Reads `dir` and returns a sorted listing.
    ///
    /// Never fails. Entries whose metadata cannot be read are kept with
    /// placeholder fields. If the directory itself cannot be enumerated the
    /// listing is empty and a warning is returned alongside it.
    pub fn build(dir: &Path, show_hidden: bool) -> (Self, Option<ListingWarning>) {
        let raw = match read_directory(dir) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = %err, "directory enumeration failed");
                let warning = ListingWarning::from_error(dir, &err);
                return (Self::empty(dir), Some(warning));
            }
        };

        let mut entries: Vec<FileEntry> = raw
            .into_iter()
            .filter(|r| {
                show_hidden
                    || !r
                        .path
                        .file_name()
                        .is_some_and(|n| is_hidden_name(&n.to_string_lossy()))
            })
            .map(|r| match stat(&r.path) {
                Ok(st) => FileEntry::new(r.path, &st),
                Err(err) => {
                    tracing::debug!(error = %err, "using placeholder entry");
                    FileEntry::placeholder(r.path, r.is_dir)
                }
            })
            .collect();

        entries.sort_by(compare_entries);
        tracing::debug!(dir = %dir.display(), count = entries.len(), show_hidden, "listing built");

        let listing = Self {
            dir: dir.to_path_buf(),
            entries: entries.into(),
        };
        (listing, None)
    }

    /// An empty listing for `dir`, used when enumeration fails.
    pub fn empty(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            entries: Arc::from(Vec::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry called `name`, if present.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    /// Projects the entries into display rows.
    pub fn rows(&self, opts: &DisplayOptions) -> Vec<ListingRow> {
        self.entries.iter().map(|e| row_for(e, opts)).collect()
    }
}

/// Directories first, then case-insensitive name, then exact name.
fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
        .then_with(|| a.name().cmp(b.name()))
}

fn row_for(entry: &FileEntry, opts: &DisplayOptions) -> ListingRow {
    let size = if entry.stat_failed() {
        UNKNOWN_SIZE.to_string()
    } else if entry.is_dir() {
        DIR_SIZE.to_string()
    } else {
        entry
            .size()
            .map(format::human_size)
            .unwrap_or_else(|| UNKNOWN_SIZE.to_string())
    };
    ListingRow {
        icon: entry.icon(),
        name: entry.name().to_string(),
        size,
        modified: format::format_time(entry.modified(), &opts.date_format),
        permissions: entry.permissions().to_string(),
    }
}
