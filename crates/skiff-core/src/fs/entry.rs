//! File entry representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

use crate::fs::icon::IconKind;
use crate::fs::stat::{FileStat, UNKNOWN_PERMISSIONS};

/// A single file or directory as it looked when the listing was built.
///
/// `FileEntry` is immutable. `size` is `None` for directories and for
/// entries whose metadata could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
    size: Option<u64>,
    modified: Option<SystemTime>,
    permissions: String,
    icon: IconKind,
    stat_failed: bool,
}

impl FileEntry {
    /// Builds an entry from a successful stat.
    pub fn new(path: PathBuf, stat: &FileStat) -> Self {
        let name = display_name(&path);
        Self {
            icon: IconKind::classify(&path, stat.is_dir),
            name,
            is_dir: stat.is_dir,
            size: if stat.is_dir { None } else { Some(stat.size) },
            modified: stat.modified,
            permissions: stat.permissions.clone(),
            stat_failed: false,
            path,
        }
    }

    /// Builds an entry whose metadata is unavailable.
    ///
    /// `is_dir` comes from the directory listing's file type (which does not
    /// follow symlinks), so it is usually still accurate.
    pub fn placeholder(path: PathBuf, is_dir: bool) -> Self {
        let name = display_name(&path);
        Self {
            icon: IconKind::classify(&path, is_dir),
            name,
            is_dir,
            size: None,
            modified: None,
            permissions: UNKNOWN_PERMISSIONS.to_string(),
            stat_failed: true,
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the NFC-normalised file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Size in bytes, absent for directories and unreadable entries.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn permissions(&self) -> &str {
        &self.permissions
    }

    pub fn icon(&self) -> IconKind {
        self.icon
    }

    /// Returns `true` if the entry was built from placeholder values.
    pub fn stat_failed(&self) -> bool {
        self.stat_failed
    }
}

/// The platform's hidden-file convention: a leading dot.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().nfc().collect::<String>())
        .unwrap_or_default()
}
