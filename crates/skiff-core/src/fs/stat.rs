//! Best-effort metadata lookup.
//!
//! [`stat`] never aborts a listing: callers that get [`CoreError::StatFailed`]
//! substitute placeholder values instead.

use std::fs::Metadata;
use std::path::Path;
use std::time::SystemTime;

use crate::error::{CoreError, CoreResult};

/// Permissions text shown when the mode bits are unavailable.
pub const UNKNOWN_PERMISSIONS: &str = "----------";

/// Snapshot of the metadata fields the file manager displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub is_dir: bool,
    pub modified: Option<SystemTime>,
    pub created: Option<SystemTime>,
    pub permissions: String,
}

impl FileStat {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            size: metadata.len(),
            is_dir: metadata.is_dir(),
            modified: metadata.modified().ok(),
            created: metadata.created().ok(),
            permissions: permissions_text(metadata),
        }
    }
}

/// Reads metadata for `path`, following symlinks so that a link to a
/// directory is reported as a directory.
///
/// # Errors
///
/// - [`CoreError::StatFailed`] for any failure, including dangling links.
pub fn stat(path: &Path) -> CoreResult<FileStat> {
    std::fs::metadata(path)
        .map(|m| FileStat::from_metadata(&m))
        .map_err(|e| CoreError::StatFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Renders permissions the way `ls -l` does, e.g. `drwxr-xr-x`.
#[cfg(unix)]
pub fn permissions_text(metadata: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    mode_string(metadata.permissions().mode())
}

#[cfg(not(unix))]
pub fn permissions_text(metadata: &Metadata) -> String {
    let kind = if metadata.is_dir() { 'd' } else { '-' };
    let write = if metadata.permissions().readonly() { '-' } else { 'w' };
    format!("{kind}r{write}-r{write}-r{write}-")
}

/// Formats raw Unix mode bits as a ten-character string.
pub fn mode_string(mode: u32) -> String {
    let kind = match mode & 0o170000 {
        0o040000 => 'd',
        0o120000 => 'l',
        0o020000 => 'c',
        0o060000 => 'b',
        0o010000 => 'p',
        0o140000 => 's',
        _ => '-',
    };
    let mut s = String::with_capacity(10);
    s.push(kind);
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 7;
        s.push(if bits & 4 != 0 { 'r' } else { '-' });
        s.push(if bits & 2 != 0 { 'w' } else { '-' });
        s.push(if bits & 1 != 0 { 'x' } else { '-' });
    }
    s
}
