//! Error types for `skiff-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::io;
use std::path::{Path, PathBuf};

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the dispatcher to turn it
/// into a one-line status message.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to something else.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The target of a create, rename, copy or move is already taken.
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    /// A paste would put the source back into the directory it came from.
    #[error("source and destination are the same: {0}")]
    SameLocation(PathBuf),

    /// A directory would be copied or moved into itself.
    #[error("cannot place a directory inside itself: {0}")]
    NestedTarget(PathBuf),

    /// Metadata could not be read; callers fall back to placeholders.
    #[error("cannot stat {path}: {reason}")]
    StatFailed { path: PathBuf, reason: String },

    /// A file or directory name is invalid (empty, contains path separators, etc.).
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Another pending operation holds this path.
    #[error("busy: an operation on {0} is still running")]
    Busy(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Classifies an I/O error against the path it happened on.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }
}

/// Convenience alias used throughout `skiff-core`.
pub type CoreResult<T> = Result<T, CoreError>;
