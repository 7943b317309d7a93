//! Filesystem facade: listing and mutating operations.
//!
//! Every function returns a classified [`CoreError`] instead of panicking.
//! Mutations either complete or leave the filesystem as they found it, with
//! the single exception documented on [`move_into`].

use std::fs::{self, Metadata, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Maximum recursion depth for directory copies, guards against link loops.
const MAX_COPY_DEPTH: usize = 64;

/// `EXDEV`, identical on Linux, macOS and the BSDs.
#[cfg(unix)]
const EXDEV: i32 = 18;

/// One child of a directory, before any metadata lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub path: PathBuf,
    /// File type from the directory stream; does not follow symlinks.
    pub is_dir: bool,
}

/// Reads the immediate children of `dir`.
///
/// The returned entries are **unsorted** and unfiltered. Children whose
/// directory record cannot be read at all are skipped.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `dir` does not exist.
/// - [`CoreError::NotADirectory`] if `dir` is not a directory.
/// - [`CoreError::PermissionDenied`] if read access is denied.
/// - [`CoreError::Io`] for any other I/O error.
pub fn read_directory(dir: &Path) -> CoreResult<Vec<RawEntry>> {
    let meta = fs::metadata(dir).map_err(|e| CoreError::from_io(e, dir))?;
    if !meta.is_dir() {
        return Err(CoreError::NotADirectory(dir.to_path_buf()));
    }

    let read_dir = fs::read_dir(dir).map_err(|e| CoreError::from_io(e, dir))?;

    let entries = read_dir
        .filter_map(|dir_entry| {
            let dir_entry = dir_entry.ok()?;
            let is_dir = dir_entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            Some(RawEntry {
                path: dir_entry.path(),
                is_dir,
            })
        })
        .collect();

    Ok(entries)
}

/// Creates an empty file called `name` inside `parent`.
///
/// Never truncates: an existing file of the same name is reported, not reused.
///
/// # Errors
///
/// - [`CoreError::InvalidName`] if `name` is not a plain file name.
/// - [`CoreError::AlreadyExists`] if the name is taken.
/// - [`CoreError::Io`] for any other I/O failure.
pub fn create_file(parent: &Path, name: &str) -> CoreResult<PathBuf> {
    let target = child_path(parent, name)?;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
        .map_err(|e| CoreError::from_io(e, &target))?;
    Ok(target)
}

/// Creates a directory called `name` inside `parent`.
///
/// # Errors
///
/// Same as [`create_file`].
pub fn create_directory(parent: &Path, name: &str) -> CoreResult<PathBuf> {
    let target = child_path(parent, name)?;
    fs::create_dir(&target).map_err(|e| CoreError::from_io(e, &target))?;
    Ok(target)
}

/// Renames a file or directory within its parent directory.
///
/// Renaming to the current name succeeds without touching the filesystem.
/// An existing sibling with the new name is never overwritten, except when it
/// is the same object (a case-only rename on a case-insensitive volume).
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::InvalidName`] if `new_name` is invalid.
/// - [`CoreError::AlreadyExists`] if a different object already has `new_name`.
/// - [`CoreError::Io`] for any other I/O failure.
pub fn rename_file(path: &Path, new_name: &str) -> CoreResult<PathBuf> {
    fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;

    if path.file_name().is_some_and(|n| n == new_name) {
        return Ok(path.to_path_buf());
    }

    let parent = path
        .parent()
        .ok_or_else(|| CoreError::InvalidName("no parent directory".to_string()))?;
    let new_path = child_path(parent, new_name)?;

    if fs::symlink_metadata(&new_path).is_ok() && !same_object(path, &new_path) {
        return Err(CoreError::AlreadyExists(new_path));
    }

    fs::rename(path, &new_path).map_err(|e| CoreError::from_io(e, path))?;
    Ok(new_path)
}

/// Deletes a file or directory (recursively).
///
/// Symlinks are removed themselves; their targets are left alone.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::PermissionDenied`] / [`CoreError::Io`] on failure.
pub fn delete_file(path: &Path) -> CoreResult<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;
    remove_with(path, &meta).map_err(|e| CoreError::from_io(e, path))
}

/// Copies `src` into `dest_dir`, keeping its file name.
///
/// Directories are copied recursively and symlinks are copied as symlinks.
/// When the copy fails midway, whatever was written to the target is removed
/// again.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::NotADirectory`] if `dest_dir` is not a directory.
/// - [`CoreError::SameLocation`] if `src` already lives in `dest_dir`.
/// - [`CoreError::AlreadyExists`] if `dest_dir` already has that name.
/// - [`CoreError::NestedTarget`] if `dest_dir` is inside `src`.
/// - [`CoreError::Io`] for any other I/O failure.
pub fn copy_into(src: &Path, dest_dir: &Path) -> CoreResult<PathBuf> {
    let (meta, target) = prepare_transfer(src, dest_dir)?;

    if let Err(err) = copy_entry(src, &target, &meta) {
        discard_partial(&target);
        return Err(CoreError::from_io(err, src));
    }
    Ok(target)
}

/// Moves `src` into `dest_dir`, keeping its file name.
///
/// Tries a plain `rename` first. Across filesystems it falls back to copy
/// then delete. If that final delete fails, the new copy is kept (so no data
/// is lost) and the error is returned.
///
/// # Errors
///
/// Same as [`copy_into`].
pub fn move_into(src: &Path, dest_dir: &Path) -> CoreResult<PathBuf> {
    let (meta, target) = prepare_transfer(src, dest_dir)?;

    match fs::rename(src, &target) {
        Ok(()) => Ok(target),
        Err(err) if is_cross_device(&err) => {
            tracing::debug!(src = %src.display(), "rename crosses devices, copying instead");
            if let Err(err) = copy_entry(src, &target, &meta) {
                discard_partial(&target);
                return Err(CoreError::from_io(err, src));
            }
            remove_with(src, &meta).map_err(|e| {
                tracing::warn!(src = %src.display(), error = %e, "moved copy kept, source removal failed");
                CoreError::from_io(e, src)
            })?;
            Ok(target)
        }
        Err(err) => Err(CoreError::from_io(err, src)),
    }
}

/// Returns `true` if something, even a dangling symlink, exists at `path`.
pub fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Returns `true` if `src` already lives directly inside `dest_dir`.
///
/// Both directories are canonicalised, so symlinked or bind-mounted aliases
/// of the same directory compare equal. `src` itself is not resolved.
pub fn same_location(src: &Path, dest_dir: &Path) -> bool {
    let parent = match src.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => return false,
    };
    match (fs::canonicalize(parent), fs::canonicalize(dest_dir)) {
        (Ok(a), Ok(b)) => a == b,
        _ => parent == dest_dir,
    }
}

/// Returns `true` if `name` can be used as a single path component.
pub fn is_valid_filename(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if name.contains('/') || name.contains('\0') {
        return false;
    }
    #[cfg(windows)]
    if name.contains('\\') || name.contains(':') {
        return false;
    }
    true
}

fn child_path(parent: &Path, name: &str) -> CoreResult<PathBuf> {
    if !is_valid_filename(name) {
        return Err(CoreError::InvalidName(name.to_string()));
    }
    Ok(parent.join(name))
}

fn prepare_transfer(src: &Path, dest_dir: &Path) -> CoreResult<(Metadata, PathBuf)> {
    let meta = fs::symlink_metadata(src).map_err(|e| CoreError::from_io(e, src))?;

    let dest_meta = fs::metadata(dest_dir).map_err(|e| CoreError::from_io(e, dest_dir))?;
    if !dest_meta.is_dir() {
        return Err(CoreError::NotADirectory(dest_dir.to_path_buf()));
    }

    if same_location(src, dest_dir) {
        return Err(CoreError::SameLocation(dest_dir.to_path_buf()));
    }

    let name = src
        .file_name()
        .ok_or_else(|| CoreError::InvalidName(src.display().to_string()))?;
    let target = dest_dir.join(name);

    if fs::symlink_metadata(&target).is_ok() {
        return Err(CoreError::AlreadyExists(target));
    }

    if meta.is_dir() && is_nested(src, dest_dir) {
        return Err(CoreError::NestedTarget(dest_dir.to_path_buf()));
    }

    Ok((meta, target))
}

fn is_nested(src_dir: &Path, dest_dir: &Path) -> bool {
    match (fs::canonicalize(src_dir), fs::canonicalize(dest_dir)) {
        (Ok(src), Ok(dest)) => dest.starts_with(src),
        _ => dest_dir.starts_with(src_dir),
    }
}

fn same_object(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy_entry(src: &Path, dest: &Path, meta: &Metadata) -> io::Result<()> {
    if meta.is_symlink() {
        copy_symlink(src, dest)
    } else if meta.is_dir() {
        copy_dir_recursive(src, dest, 0)
    } else {
        fs::copy(src, dest).map(|_| ())
    }
}

fn copy_dir_recursive(src: &Path, dest: &Path, depth: usize) -> io::Result<()> {
    if depth > MAX_COPY_DEPTH {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("maximum recursion depth ({MAX_COPY_DEPTH}) exceeded during copy"),
        ));
    }

    fs::create_dir(dest)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let entry_path = entry.path();
        let target = dest.join(entry.file_name());

        // file_type() does not follow symlinks
        let ft = entry.file_type()?;

        if ft.is_symlink() {
            copy_symlink(&entry_path, &target)?;
        } else if ft.is_dir() {
            copy_dir_recursive(&entry_path, &target, depth + 1)?;
        } else {
            fs::copy(&entry_path, &target)?;
        }
    }

    Ok(())
}

fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        let link_target = fs::read_link(src)?;
        std::os::unix::fs::symlink(link_target, dest)
    }
    #[cfg(not(unix))]
    {
        fs::copy(src, dest).map(|_| ())
    }
}

fn remove_with(path: &Path, meta: &Metadata) -> io::Result<()> {
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        // Handles both regular files and symlinks
        fs::remove_file(path)
    }
}

fn discard_partial(target: &Path) {
    let Ok(meta) = fs::symlink_metadata(target) else {
        return;
    };
    if let Err(e) = remove_with(target, &meta) {
        tracing::warn!(path = %target.display(), error = %e, "failed to clean up partial copy");
    }
}

#[cfg(unix)]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(EXDEV)
}

#[cfg(not(unix))]
fn is_cross_device(err: &io::Error) -> bool {
    err.kind() != io::ErrorKind::NotFound && err.kind() != io::ErrorKind::PermissionDenied
}
