//! Command dispatch vocabulary: intents, the dialog boundary and jobs.
//!
//! The UI turns key presses into an [`Intent`] and hands it to
//! [`crate::Controller`] together with something implementing
//! [`Interaction`]. Whatever needs to touch the filesystem comes back as an
//! [`FsJob`], which may run on any thread.

use std::path::{Path, PathBuf};

use crate::error::CoreResult;
use crate::fs::format::{self, human_size, DIR_SIZE};
use crate::fs::ops;
use crate::fs::stat::stat;

/// Pattern used for timestamps in the info dialog.
pub const INFO_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A discrete user request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    NewFile,
    NewDirectory,
    Rename,
    Delete,
    Copy,
    Cut,
    Paste,
    Edit,
    Info,
    ToggleHidden,
    GoUp,
    GoTo,
    Refresh,
    /// Highlight the row at this index.
    Select(usize),
    /// Enter the highlighted directory.
    Open,
    /// Jump to a directory chosen outside the table (e.g. the tree).
    Navigate(PathBuf),
}

/// Text input request for the dialog layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub default: String,
    pub placeholder: String,
}

impl Prompt {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            default: String::new(),
            placeholder: String::new(),
        }
    }

    pub fn with_default(self, default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            ..self
        }
    }

    pub fn with_placeholder(self, placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..self
        }
    }
}

/// What the editor collaborator reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The file was written; carries the display name.
    Saved(String),
    /// The editor was closed without saving.
    Cancelled,
    /// Writing failed.
    Failed(String),
}

/// Pre-formatted details for the info dialog.
///
/// When the entry cannot be stat'ed, every metadata field holds the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    pub kind: &'static str,
    pub size: String,
    pub permissions: String,
    pub created: String,
    pub modified: String,
}

impl FileInfo {
    pub fn gather(path: &Path, name: &str) -> Self {
        match stat(path) {
            Ok(st) => Self {
                name: name.to_string(),
                path: path.to_path_buf(),
                kind: if st.is_dir { "Directory" } else { "File" },
                size: if st.is_dir {
                    DIR_SIZE.to_string()
                } else {
                    human_size(st.size)
                },
                permissions: st.permissions,
                created: format::format_time(st.created, INFO_TIME_FORMAT),
                modified: format::format_time(st.modified, INFO_TIME_FORMAT),
            },
            Err(err) => {
                let reason = err.to_string();
                Self {
                    name: name.to_string(),
                    path: path.to_path_buf(),
                    kind: "File",
                    size: reason.clone(),
                    permissions: reason.clone(),
                    created: reason.clone(),
                    modified: reason,
                }
            }
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn fields(&self) -> [(&'static str, String); 7] {
        [
            ("Name", self.name.clone()),
            ("Path", self.path.display().to_string()),
            ("Type", self.kind.to_string()),
            ("Size", self.size.clone()),
            ("Perms", self.permissions.clone()),
            ("Created", self.created.clone()),
            ("Modified", self.modified.clone()),
        ]
    }
}

/// The dialog, editor and info collaborators, as seen by the dispatcher.
///
/// Every method is a synchronous request/response. A `None` from
/// [`Interaction::ask_text`] or `false` from [`Interaction::confirm`] means
/// the user backed out, and the dispatcher then does nothing.
pub trait Interaction {
    fn ask_text(&mut self, prompt: &Prompt) -> Option<String>;
    fn confirm(&mut self, message: &str) -> bool;
    fn edit(&mut self, path: &Path) -> EditOutcome;
    fn show_info(&mut self, info: &FileInfo);
}

/// A filesystem mutation waiting to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    CreateFile { parent: PathBuf, name: String },
    CreateDirectory { parent: PathBuf, name: String },
    Rename { path: PathBuf, new_name: String },
    Delete { path: PathBuf },
    Copy { src: PathBuf, dest_dir: PathBuf },
    Move { src: PathBuf, dest_dir: PathBuf },
}

impl JobKind {
    /// Paths this job must hold exclusively while it runs.
    fn touched_paths(&self) -> Vec<PathBuf> {
        match self {
            Self::CreateFile { parent, name } | Self::CreateDirectory { parent, name } => {
                vec![parent.join(name)]
            }
            Self::Rename { path, new_name } => {
                let mut paths = vec![path.clone()];
                if let Some(parent) = path.parent() {
                    paths.push(parent.join(new_name));
                }
                paths
            }
            Self::Delete { path } => vec![path.clone()],
            Self::Copy { src, dest_dir } | Self::Move { src, dest_dir } => {
                let mut paths = vec![src.clone()];
                if let Some(name) = src.file_name() {
                    paths.push(dest_dir.join(name));
                }
                paths
            }
        }
    }
}

/// A planned mutation together with the paths it has locked.
///
/// Produced by [`crate::Controller::plan`]; the result of [`FsJob::run`]
/// must be handed back to [`crate::Controller::complete`] exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsJob {
    kind: JobKind,
    locked: Vec<PathBuf>,
}

impl FsJob {
    pub(crate) fn new(kind: JobKind) -> Self {
        let locked = kind.touched_paths();
        Self { kind, locked }
    }

    pub fn kind(&self) -> &JobKind {
        &self.kind
    }

    pub(crate) fn locked(&self) -> &[PathBuf] {
        &self.locked
    }

    /// Short progress text for a busy indicator.
    pub fn describe(&self) -> String {
        match &self.kind {
            JobKind::CreateFile { name, .. } => format!("Creating file {name}"),
            JobKind::CreateDirectory { name, .. } => format!("Creating directory {name}"),
            JobKind::Rename { new_name, .. } => format!("Renaming to {new_name}"),
            JobKind::Delete { path } => format!("Deleting {}", file_label(path)),
            JobKind::Copy { src, .. } => format!("Copying {}", file_label(src)),
            JobKind::Move { src, .. } => format!("Moving {}", file_label(src)),
        }
    }

    /// Performs the filesystem call. Blocking; safe to run off the UI thread.
    ///
    /// Returns the path of the created, renamed or pasted object, or `None`
    /// for a delete.
    pub fn run(&self) -> CoreResult<Option<PathBuf>> {
        match &self.kind {
            JobKind::CreateFile { parent, name } => ops::create_file(parent, name).map(Some),
            JobKind::CreateDirectory { parent, name } => {
                ops::create_directory(parent, name).map(Some)
            }
            JobKind::Rename { path, new_name } => ops::rename_file(path, new_name).map(Some),
            JobKind::Delete { path } => ops::delete_file(path).map(|()| None),
            JobKind::Copy { src, dest_dir } => ops::copy_into(src, dest_dir).map(Some),
            JobKind::Move { src, dest_dir } => ops::move_into(src, dest_dir).map(Some),
        }
    }
}

/// What [`crate::Controller::plan`] decided.
#[derive(Debug)]
pub enum Plan {
    /// Handled without a filesystem job.
    Done(Option<crate::status::Status>),
    /// Run this job, then pass its result to `complete`.
    Job(FsJob),
}

pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
