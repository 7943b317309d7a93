//! Single-slot clipboard for copy and cut.

use std::path::{Path, PathBuf};

/// What a paste should do with the clipboard source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
    Copy,
    Cut,
}

impl ClipboardOp {
    pub fn label(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Cut => "cut",
        }
    }
}

/// The pending source path and operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    pub path: PathBuf,
    pub op: ClipboardOp,
}

/// Holds at most one pending copy or cut. Idle by default.
///
/// Setting always replaces the previous content; there is no history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    entry: Option<ClipboardEntry>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, path: PathBuf, op: ClipboardOp) {
        self.entry = Some(ClipboardEntry { path, op });
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn entry(&self) -> Option<&ClipboardEntry> {
        self.entry.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Forgets the clipboard if it refers to `path` or anything below it.
    ///
    /// Used after a delete or rename so a stale source is not pasted later.
    pub fn forget_under(&mut self, path: &Path) {
        if self.entry.as_ref().is_some_and(|e| e.path.starts_with(path)) {
            self.entry = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        let clip = Clipboard::new();
        assert!(clip.is_empty());
        assert!(clip.entry().is_none());
    }

    #[test]
    fn last_set_wins() {
        let mut clip = Clipboard::new();
        clip.set(PathBuf::from("/a"), ClipboardOp::Copy);
        clip.set(PathBuf::from("/b"), ClipboardOp::Cut);

        let entry = clip.entry().unwrap();
        assert_eq!(entry.path, PathBuf::from("/b"));
        assert_eq!(entry.op, ClipboardOp::Cut);
    }

    #[test]
    fn clear_resets() {
        let mut clip = Clipboard::new();
        clip.set(PathBuf::from("/a"), ClipboardOp::Copy);
        clip.clear();
        assert!(clip.is_empty());
    }

    #[test]
    fn forget_under_matches_descendants_only() {
        let mut clip = Clipboard::new();
        clip.set(PathBuf::from("/data/sub/file"), ClipboardOp::Copy);

        clip.forget_under(Path::new("/data/other"));
        assert!(!clip.is_empty());

        clip.forget_under(Path::new("/data"));
        assert!(clip.is_empty());
    }
}
