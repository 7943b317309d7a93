//! File system watcher for automatic directory refresh.
//!
//! Uses [`notify`] with debouncing to detect changes in the current directory
//! and signal the main event loop to rebuild the listing.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Duration;

use notify_debouncer_mini::{new_debouncer, DebouncedEvent, DebouncedEventKind, Debouncer};

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Messages from the watcher to the main event loop.
#[derive(Debug)]
pub enum WatchMessage {
    /// The watched directory contents changed.
    Changed,
    /// An error occurred while watching.
    Error(String),
}

/// Watches the current directory, following it as the user navigates.
pub struct DirWatcher {
    debouncer: Debouncer<notify::RecommendedWatcher>,
    current_dir: Option<PathBuf>,
}

impl DirWatcher {
    /// Creates a new directory watcher that sends messages through `tx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying notify watcher cannot be initialised.
    pub fn new(tx: Sender<WatchMessage>) -> anyhow::Result<Self> {
        let debouncer = new_debouncer(
            DEBOUNCE,
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    if events.iter().any(|e| matches!(e.kind, DebouncedEventKind::Any)) {
                        let _ = tx.send(WatchMessage::Changed);
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchMessage::Error(e.to_string()));
                }
            },
        )?;

        Ok(Self {
            debouncer,
            current_dir: None,
        })
    }

    /// The directory currently watched, if any.
    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Watches `dir`, unwatching the previous directory. No-op if `dir` is
    /// already watched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be watched, e.g. because it
    /// is unreadable. The previous directory is unwatched either way.
    pub fn watch(&mut self, dir: &Path) -> anyhow::Result<()> {
        if self.current_dir.as_deref() == Some(dir) {
            return Ok(());
        }
        if let Some(prev) = self.current_dir.take() {
            let _ = self.debouncer.watcher().unwatch(&prev);
        }

        // Only direct children are listed, so only they are watched
        self.debouncer
            .watcher()
            .watch(dir, notify::RecursiveMode::NonRecursive)?;
        self.current_dir = Some(dir.to_path_buf());
        tracing::debug!(dir = %dir.display(), "watching");
        Ok(())
    }
}
