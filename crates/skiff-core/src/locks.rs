//! Per-path mutual exclusion for in-flight filesystem jobs.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Paths currently held by pending jobs.
///
/// Two paths conflict when one is the other or contains it, so a delete of
/// `a/` is refused while `a/b.txt` is being copied.
#[derive(Debug, Clone, Default)]
pub struct PathLocks {
    held: Vec<PathBuf>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an error naming the first held path that overlaps `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Busy`] if `path` overlaps a held path.
    pub fn check(&self, path: &Path) -> CoreResult<()> {
        match self
            .held
            .iter()
            .find(|held| held.starts_with(path) || path.starts_with(held))
        {
            Some(held) => Err(CoreError::Busy(held.clone())),
            None => Ok(()),
        }
    }

    /// Takes all `paths` or none of them.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Busy`] if any path overlaps a held path.
    pub fn acquire(&mut self, paths: &[PathBuf]) -> CoreResult<()> {
        for path in paths {
            self.check(path)?;
        }
        self.held.extend(paths.iter().cloned());
        Ok(())
    }

    pub fn release(&mut self, paths: &[PathBuf]) {
        for path in paths {
            if let Some(pos) = self.held.iter().position(|held| held == path) {
                self.held.swap_remove(pos);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}
