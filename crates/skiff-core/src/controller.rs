//! The navigation-and-mutation state machine.
//!
//! [`Controller`] owns the current directory, the listing snapshot, the
//! selection, the clipboard and the path locks. Every user intent goes
//! through [`Controller::plan`] (validation, dialogs, locking) and, when it
//! needs the filesystem, [`Controller::complete`] (unlock, refresh, status).
//! [`Controller::dispatch`] runs both back to back for synchronous callers.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::clipboard::{Clipboard, ClipboardOp};
use crate::config::settings::Config;
use crate::dispatch::{
    file_label, EditOutcome, FileInfo, FsJob, Intent, Interaction, JobKind, Plan, Prompt,
};
use crate::error::{CoreError, CoreResult};
use crate::event::Event;
use crate::fs::entry::FileEntry;
use crate::fs::ops;
use crate::locks::PathLocks;
use crate::nav::listing::{Listing, ListingWarning};
use crate::nav::navigation::{expand_user, NavigationState};
use crate::nav::selection::Selection;
use crate::status::Status;

/// Behaviour switches taken from the user configuration.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Ask before deleting.
    pub confirm_delete: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            confirm_delete: true,
        }
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            confirm_delete: config.general.confirm_delete,
        }
    }
}

/// Single owner of all file-manager state.
#[derive(Debug)]
pub struct Controller {
    nav: NavigationState,
    listing: Listing,
    selection: Selection,
    clipboard: Clipboard,
    locks: PathLocks,
    options: ControllerOptions,
    subscribers: Vec<UnboundedSender<Event>>,
}

impl Controller {
    /// Creates a controller showing `nav`'s directory.
    ///
    /// Returns the initial status line alongside, e.g. the item count or a
    /// permission warning.
    pub fn new(nav: NavigationState, options: ControllerOptions) -> (Self, Status) {
        let (listing, warning) = Listing::build(nav.current_dir(), nav.show_hidden());
        let selection = Selection::first(listing.len());
        let controller = Self {
            nav,
            listing,
            selection,
            clipboard: Clipboard::new(),
            locks: PathLocks::new(),
            options,
            subscribers: Vec::new(),
        };
        let status = controller.listing_status(warning);
        (controller, status)
    }

    /// Registers a new event subscriber.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Event> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn current_dir(&self) -> &Path {
        self.nav.current_dir()
    }

    pub fn show_hidden(&self) -> bool {
        self.nav.show_hidden()
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selection.index().and_then(|i| self.listing.get(i))
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// `true` while any planned job has not been completed.
    pub fn is_busy(&self) -> bool {
        !self.locks.is_empty()
    }

    /// Plans and, if needed, immediately runs an intent on this thread.
    pub fn dispatch(&mut self, intent: Intent, ui: &mut dyn Interaction) -> Option<Status> {
        match self.plan(intent, ui) {
            Plan::Done(status) => status,
            Plan::Job(job) => {
                let result = job.run();
                self.complete(job, result)
            }
        }
    }

    /// Validates an intent, consults `ui` where needed and either handles
    /// it directly or returns a locked [`FsJob`].
    pub fn plan(&mut self, intent: Intent, ui: &mut dyn Interaction) -> Plan {
        tracing::debug!(?intent, "plan");
        let plan = match self.plan_intent(intent, ui) {
            Ok(plan) => plan,
            Err(status) => Plan::Done(Some(status)),
        };
        match plan {
            Plan::Done(status) => {
                if let Some(status) = &status {
                    self.emit(Event::StatusChanged(status.clone()));
                }
                Plan::Done(status)
            }
            Plan::Job(job) => match self.lock(&job) {
                Ok(()) => Plan::Job(job),
                Err(err) => {
                    let status = failure_status(job.kind(), &err);
                    self.emit(Event::StatusChanged(status.clone()));
                    Plan::Done(Some(status))
                }
            },
        }
    }

    /// Finishes a job planned by [`Controller::plan`].
    ///
    /// On success the listing is rebuilt and a Cut clipboard is cleared after
    /// a move. On failure nothing but the status changes.
    pub fn complete(&mut self, job: FsJob, result: CoreResult<Option<PathBuf>>) -> Option<Status> {
        self.locks.release(job.locked());
        if self.locks.is_empty() {
            self.emit(Event::BusyChanged(false));
        }

        let status = match result {
            Ok(new_path) => {
                tracing::info!(job = %job.describe(), "job finished");
                self.after_success(job.kind(), new_path.as_deref());
                success_status(job.kind(), new_path.as_deref())
            }
            Err(err) => {
                tracing::warn!(job = %job.describe(), error = %err, "job failed");
                failure_status(job.kind(), &err)
            }
        };
        self.emit(Event::StatusChanged(status.clone()));
        Some(status)
    }

    /// Rebuilds the listing for the current directory, keeping the
    /// highlighted entry where possible.
    pub fn refresh(&mut self) -> Option<ListingWarning> {
        let keep = self.selected_entry().map(|e| e.name().to_string());
        let warning = self.rebuild();
        self.reselect(keep.as_deref());
        warning
    }

    fn plan_intent(&mut self, intent: Intent, ui: &mut dyn Interaction) -> Result<Plan, Status> {
        match intent {
            Intent::NewFile => Ok(self.plan_create(ui, false)),
            Intent::NewDirectory => Ok(self.plan_create(ui, true)),
            Intent::Rename => self.plan_rename(ui),
            Intent::Delete => self.plan_delete(ui),
            Intent::Copy => self.mark(ClipboardOp::Copy).map(done),
            Intent::Cut => self.mark(ClipboardOp::Cut).map(done),
            Intent::Paste => self.plan_paste(),
            Intent::Edit => self.edit(ui).map(Plan::Done),
            Intent::Info => self.info(ui).map(|()| Plan::Done(None)),
            Intent::ToggleHidden => {
                let keep = self.selected_entry().map(|e| e.name().to_string());
                self.nav = self.nav.toggle_hidden();
                let warning = self.rebuild();
                self.reselect(keep.as_deref());
                Ok(done(self.listing_status(warning)))
            }
            Intent::GoUp => Ok(Plan::Done(self.go_up())),
            Intent::GoTo => Ok(Plan::Done(self.go_to(ui))),
            Intent::Refresh => {
                let status = match self.refresh() {
                    Some(warning) => Status::warning(warning.reason),
                    None => Status::info("Refreshed."),
                };
                Ok(done(status))
            }
            Intent::Select(index) => {
                self.set_selection(Selection::select(index, self.listing.len()));
                Ok(Plan::Done(None))
            }
            Intent::Open => match self.selected_entry() {
                Some(entry) if entry.is_dir() => {
                    let path = entry.path().to_path_buf();
                    Ok(Plan::Done(Some(self.enter(&path, None))))
                }
                _ => Ok(Plan::Done(None)),
            },
            Intent::Navigate(path) => Ok(Plan::Done(Some(self.enter(&path, None)))),
        }
    }

    fn plan_create(&mut self, ui: &mut dyn Interaction, directory: bool) -> Plan {
        let title = if directory {
            "New Directory Name:"
        } else {
            "New File Name:"
        };
        let Some(name) = ask_name(ui, &Prompt::new(title)) else {
            return Plan::Done(None);
        };
        let parent = self.current_dir().to_path_buf();
        let kind = if directory {
            JobKind::CreateDirectory { parent, name }
        } else {
            JobKind::CreateFile { parent, name }
        };
        Plan::Job(FsJob::new(kind))
    }

    fn plan_rename(&mut self, ui: &mut dyn Interaction) -> Result<Plan, Status> {
        let entry = self.require_selection()?;
        let current = entry.name().to_string();
        let path = entry.path().to_path_buf();

        let prompt = Prompt::new("Rename to:").with_default(current.clone());
        match ask_name(ui, &prompt) {
            Some(new_name) if new_name != current => Ok(Plan::Job(FsJob::new(JobKind::Rename {
                path,
                new_name,
            }))),
            _ => Ok(Plan::Done(None)),
        }
    }

    fn plan_delete(&mut self, ui: &mut dyn Interaction) -> Result<Plan, Status> {
        let entry = self.require_selection()?;
        let path = entry.path().to_path_buf();
        let message = format!("Delete '{}'?\nThis cannot be undone.", entry.name());

        if self.options.confirm_delete && !ui.confirm(&message) {
            return Ok(Plan::Done(None));
        }
        Ok(Plan::Job(FsJob::new(JobKind::Delete { path })))
    }

    fn plan_paste(&mut self) -> Result<Plan, Status> {
        let entry = self
            .clipboard
            .entry()
            .cloned()
            .ok_or_else(|| Status::warning("Clipboard is empty. Copy or cut an item first."))?;
        let dest_dir = self.current_dir().to_path_buf();

        if !ops::exists(&entry.path) {
            return Err(error_status(&CoreError::NotFound(entry.path)));
        }
        if ops::same_location(&entry.path, &dest_dir) {
            return Err(Status::warning("Source and destination are the same."));
        }

        let kind = match entry.op {
            ClipboardOp::Copy => JobKind::Copy {
                src: entry.path,
                dest_dir,
            },
            ClipboardOp::Cut => JobKind::Move {
                src: entry.path,
                dest_dir,
            },
        };
        Ok(Plan::Job(FsJob::new(kind)))
    }

    fn mark(&mut self, op: ClipboardOp) -> Result<Status, Status> {
        let entry = self.require_selection()?;
        let path = entry.path().to_path_buf();
        let name = entry.name().to_string();

        self.clipboard.set(path, op);
        self.emit(Event::ClipboardChanged(self.clipboard.entry().cloned()));

        let verb = match op {
            ClipboardOp::Copy => "Copied",
            ClipboardOp::Cut => "Cut",
        };
        Ok(Status::info(format!("{verb}: {name}  (press v to paste)")))
    }

    fn edit(&mut self, ui: &mut dyn Interaction) -> Result<Option<Status>, Status> {
        let entry = self.require_selection()?;
        if entry.is_dir() {
            return Err(Status::warning("Cannot edit a directory."));
        }
        let path = entry.path().to_path_buf();
        self.locks.check(&path).map_err(|e| error_status(&e))?;

        match ui.edit(&path) {
            EditOutcome::Saved(name) => {
                self.refresh();
                Ok(Some(Status::success(format!("Saved: {name}"))))
            }
            EditOutcome::Failed(msg) => Ok(Some(Status::error(format!("Save error: {msg}")))),
            EditOutcome::Cancelled => Ok(None),
        }
    }

    fn info(&mut self, ui: &mut dyn Interaction) -> Result<(), Status> {
        let entry = self.require_selection()?;
        let info = FileInfo::gather(entry.path(), entry.name());
        ui.show_info(&info);
        Ok(())
    }

    fn go_up(&mut self) -> Option<Status> {
        let came_from = self
            .current_dir()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        let moved = self.nav.go_up()?;
        Some(match moved {
            Ok(nav) => self.show(nav, came_from.as_deref()),
            Err(err) => Status::warning(err.to_string()),
        })
    }

    fn go_to(&mut self, ui: &mut dyn Interaction) -> Option<Status> {
        let prompt = Prompt::new("Go to Path:")
            .with_default(self.current_dir().display().to_string())
            .with_placeholder("/path/to/dir");
        let input = ui.ask_text(&prompt)?;
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        let target = expand_user(input, self.current_dir());
        Some(match self.nav.navigate_to(&target) {
            Ok(nav) => self.show(nav, None),
            Err(err) => {
                tracing::debug!(error = %err, "go-to rejected");
                Status::warning(format!("Not a directory: {input}"))
            }
        })
    }

    fn enter(&mut self, path: &Path, select: Option<&str>) -> Status {
        match self.nav.navigate_to(path) {
            Ok(nav) => self.show(nav, select),
            Err(err) => {
                tracing::debug!(error = %err, "navigation rejected");
                Status::warning(format!("Not a directory: {}", path.display()))
            }
        }
    }

    /// Commits a successful navigation and reports the new listing.
    fn show(&mut self, nav: NavigationState, select: Option<&str>) -> Status {
        self.nav = nav;
        let warning = self.rebuild();
        let selection = select
            .and_then(|name| self.listing.position_of(name))
            .map(|i| Selection::select(i, self.listing.len()))
            .unwrap_or_else(|| Selection::first(self.listing.len()));
        self.set_selection(selection);
        self.listing_status(warning)
    }

    fn after_success(&mut self, kind: &JobKind, new_path: Option<&Path>) {
        match kind {
            JobKind::Move { src, .. } => {
                let was_cut = self
                    .clipboard
                    .entry()
                    .is_some_and(|e| e.op == ClipboardOp::Cut && &e.path == src);
                if was_cut {
                    self.clipboard.clear();
                    self.emit(Event::ClipboardChanged(None));
                }
            }
            JobKind::Delete { path } | JobKind::Rename { path, .. } => {
                if self.clipboard.entry().is_some_and(|e| e.path.starts_with(path)) {
                    self.clipboard.forget_under(path);
                    self.emit(Event::ClipboardChanged(None));
                }
            }
            _ => {}
        }

        let focus = new_path
            .filter(|p| p.parent() == Some(self.current_dir()))
            .map(file_label)
            .or_else(|| self.selected_entry().map(|e| e.name().to_string()));
        if matches!(kind, JobKind::Delete { .. }) {
            self.rebuild();
            self.set_selection(self.selection.revalidate(self.listing.len()));
        } else {
            self.rebuild();
            self.reselect(focus.as_deref());
        }
    }

    fn rebuild(&mut self) -> Option<ListingWarning> {
        let (listing, warning) = Listing::build(self.nav.current_dir(), self.nav.show_hidden());
        self.listing = listing;
        self.emit(Event::ListingReplaced {
            dir: self.listing.dir().to_path_buf(),
            listing: self.listing.clone(),
        });
        warning
    }

    /// Highlights `name` if it is still listed, otherwise keeps the index
    /// while it is in range.
    fn reselect(&mut self, name: Option<&str>) {
        let len = self.listing.len();
        let selection = name
            .and_then(|n| self.listing.position_of(n))
            .map(|i| Selection::select(i, len))
            .unwrap_or_else(|| self.selection.revalidate(len));
        self.set_selection(selection);
    }

    fn set_selection(&mut self, selection: Selection) {
        if selection != self.selection {
            self.selection = selection;
            self.emit(Event::SelectionChanged(selection.index()));
        }
    }

    fn require_selection(&self) -> Result<&FileEntry, Status> {
        self.selected_entry()
            .ok_or_else(|| Status::warning("No item selected."))
    }

    fn lock(&mut self, job: &FsJob) -> CoreResult<()> {
        let was_idle = self.locks.is_empty();
        self.locks.acquire(job.locked())?;
        if was_idle {
            self.emit(Event::BusyChanged(true));
        }
        Ok(())
    }

    fn listing_status(&self, warning: Option<ListingWarning>) -> Status {
        if let Some(warning) = warning {
            return Status::warning(warning.reason);
        }
        let hidden_note = if self.nav.show_hidden() {
            ""
        } else {
            "  (hidden files excluded)"
        };
        Status::info(format!(
            "{} items in {}{}",
            self.listing.len(),
            self.current_dir().display(),
            hidden_note
        ))
    }

    fn emit(&mut self, event: Event) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

fn done(status: Status) -> Plan {
    Plan::Done(Some(status))
}

/// Asks for a name; `None` for cancel or blank input.
fn ask_name(ui: &mut dyn Interaction, prompt: &Prompt) -> Option<String> {
    let answer = ui.ask_text(prompt)?;
    let name = answer.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn success_status(kind: &JobKind, new_path: Option<&Path>) -> Status {
    let new_label = new_path.map(file_label).unwrap_or_default();
    match kind {
        JobKind::CreateFile { name, .. } => Status::success(format!("Created file: {name}")),
        JobKind::CreateDirectory { name, .. } => {
            Status::success(format!("Created directory: {name}"))
        }
        JobKind::Rename { new_name, .. } => Status::success(format!("Renamed to: {new_name}")),
        JobKind::Delete { path } => Status::success(format!("Deleted: {}", file_label(path))),
        JobKind::Copy { .. } => Status::success(format!("Copied: {new_label}")),
        JobKind::Move { .. } => Status::success(format!("Moved: {new_label}")),
    }
}

fn failure_status(kind: &JobKind, err: &CoreError) -> Status {
    match (kind, err) {
        (JobKind::CreateFile { name, .. }, CoreError::AlreadyExists(_)) => {
            Status::warning(format!("File already exists: {name}"))
        }
        (JobKind::CreateDirectory { name, .. }, CoreError::AlreadyExists(_)) => {
            Status::warning(format!("Directory already exists: {name}"))
        }
        _ => error_status(err),
    }
}

fn error_status(err: &CoreError) -> Status {
    match err {
        CoreError::AlreadyExists(path) => {
            Status::warning(format!("Already exists: {}", file_label(path)))
        }
        CoreError::SameLocation(_) => Status::warning("Source and destination are the same."),
        CoreError::NestedTarget(_) => Status::warning("Cannot paste a directory into itself."),
        CoreError::InvalidName(name) => Status::warning(format!("Invalid name: {name}")),
        CoreError::Busy(path) => Status::warning(format!(
            "Busy: {} is still being processed.",
            file_label(path)
        )),
        CoreError::NotFound(path) => Status::error(format!("Not found: {}", path.display())),
        CoreError::PermissionDenied(path) => {
            Status::error(format!("Permission denied: {}", path.display()))
        }
        other => Status::error(format!("Error: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Replays scripted answers and records what was asked.
    #[derive(Default)]
    struct Scripted {
        texts: Vec<String>,
        confirm: bool,
        edit: Option<EditOutcome>,
        asked: Vec<Prompt>,
        confirmations: Vec<String>,
        edited: Vec<PathBuf>,
        info: Option<FileInfo>,
    }

    impl Scripted {
        fn text(answer: &str) -> Self {
            Self {
                texts: vec![answer.to_string()],
                ..Self::default()
            }
        }

        fn confirming(confirm: bool) -> Self {
            Self {
                confirm,
                ..Self::default()
            }
        }
    }

    impl Interaction for Scripted {
        fn ask_text(&mut self, prompt: &Prompt) -> Option<String> {
            self.asked.push(prompt.clone());
            if self.texts.is_empty() {
                None
            } else {
                Some(self.texts.remove(0))
            }
        }

        fn confirm(&mut self, message: &str) -> bool {
            self.confirmations.push(message.to_string());
            self.confirm
        }

        fn edit(&mut self, path: &Path) -> EditOutcome {
            self.edited.push(path.to_path_buf());
            self.edit.clone().unwrap_or(EditOutcome::Cancelled)
        }

        fn show_info(&mut self, info: &FileInfo) {
            self.info = Some(info.clone());
        }
    }

    fn setup(tmp: &TempDir) -> Controller {
        let nav = NavigationState::new(tmp.path(), false).unwrap();
        Controller::new(nav, ControllerOptions::default()).0
    }

    fn names(ctl: &Controller) -> Vec<String> {
        ctl.listing()
            .entries()
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    fn select_name(ctl: &mut Controller, name: &str) {
        let index = ctl.listing().position_of(name).unwrap();
        ctl.dispatch(Intent::Select(index), &mut Scripted::default());
    }

    // --- startup ---

    #[test]
    fn initial_status_counts_items() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::write(tmp.path().join(".hidden"), "").unwrap();

        let nav = NavigationState::new(tmp.path(), false).unwrap();
        let (ctl, status) = Controller::new(nav, ControllerOptions::default());

        assert_eq!(
            status.text,
            format!("1 items in {}  (hidden files excluded)", tmp.path().display())
        );
        assert_eq!(ctl.selection().index(), Some(0));
    }

    // --- create ---

    #[test]
    fn new_file_creates_and_selects() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        let mut ctl = setup(&tmp);

        let status = ctl.dispatch(Intent::NewFile, &mut Scripted::text("  b.txt  "));

        assert_eq!(status.unwrap(), Status::success("Created file: b.txt"));
        assert!(tmp.path().join("b.txt").exists());
        assert_eq!(names(&ctl), vec!["a.txt", "b.txt"]);
        assert_eq!(ctl.selected_entry().unwrap().name(), "b.txt");
    }

    #[test]
    fn new_file_collision_reports_and_keeps_rows() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("x.txt"), "data").unwrap();
        let mut ctl = setup(&tmp);
        let before = ctl.listing().len();

        let status = ctl.dispatch(Intent::NewFile, &mut Scripted::text("x.txt"));
        ctl.refresh();

        assert_eq!(status.unwrap(), Status::warning("File already exists: x.txt"));
        assert_eq!(ctl.listing().len(), before);
        assert_eq!(fs::read_to_string(tmp.path().join("x.txt")).unwrap(), "data");
    }

    #[test]
    fn new_directory_cancel_and_blank_are_silent() {
        let tmp = TempDir::new().unwrap();
        let mut ctl = setup(&tmp);

        assert_eq!(ctl.dispatch(Intent::NewDirectory, &mut Scripted::default()), None);
        assert_eq!(ctl.dispatch(Intent::NewDirectory, &mut Scripted::text("   ")), None);
        assert!(ctl.listing().is_empty());
    }

    #[test]
    fn new_directory_created() {
        let tmp = TempDir::new().unwrap();
        let mut ctl = setup(&tmp);

        let status = ctl.dispatch(Intent::NewDirectory, &mut Scripted::text("docs"));

        assert_eq!(status.unwrap(), Status::success("Created directory: docs"));
        assert!(tmp.path().join("docs").is_dir());
    }

    // --- rename ---

    #[test]
    fn rename_prompt_defaults_to_current_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("old.txt"), "").unwrap();
        let mut ctl = setup(&tmp);
        let mut ui = Scripted::text("new.txt");

        let status = ctl.dispatch(Intent::Rename, &mut ui);

        assert_eq!(ui.asked[0].default, "old.txt");
        assert_eq!(status.unwrap(), Status::success("Renamed to: new.txt"));
        assert_eq!(names(&ctl), vec!["new.txt"]);
        assert_eq!(ctl.selected_entry().unwrap().name(), "new.txt");
    }

    #[test]
    fn rename_to_same_name_is_silent_noop() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("same.txt"), "").unwrap();
        let mut ctl = setup(&tmp);
        let mut events = ctl.subscribe();
        let before = ctl.listing().clone();

        let status = ctl.dispatch(Intent::Rename, &mut Scripted::text("same.txt"));

        assert_eq!(status, None);
        assert_eq!(ctl.listing(), &before);
        assert!(events.try_recv().is_err(), "no listing rebuild expected");
    }

    #[test]
    fn rename_without_selection_warns() {
        let tmp = TempDir::new().unwrap();
        let mut ctl = setup(&tmp);
        let mut ui = Scripted::text("x");

        let status = ctl.dispatch(Intent::Rename, &mut ui);

        assert_eq!(status.unwrap(), Status::warning("No item selected."));
        assert!(ui.asked.is_empty());
    }

    // --- delete ---

    #[test]
    fn delete_declined_changes_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("keep")).unwrap();
        fs::write(tmp.path().join("keep").join("inner.txt"), "").unwrap();
        let mut ctl = setup(&tmp);
        let before = ctl.listing().clone();
        let selection = ctl.selection();

        let mut ui = Scripted::confirming(false);
        let status = ctl.dispatch(Intent::Delete, &mut ui);

        assert_eq!(status, None);
        assert_eq!(ui.confirmations.len(), 1);
        assert!(ui.confirmations[0].starts_with("Delete 'keep'?"));
        assert!(tmp.path().join("keep").join("inner.txt").exists());
        assert_eq!(ctl.listing(), &before);
        assert_eq!(ctl.selection(), selection);
    }

    #[test]
    fn delete_confirmed_removes_and_keeps_index_in_range() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), "").unwrap();
        fs::write(tmp.path().join("b"), "").unwrap();
        let mut ctl = setup(&tmp);
        select_name(&mut ctl, "b");

        let status = ctl.dispatch(Intent::Delete, &mut Scripted::confirming(true));

        assert_eq!(status.unwrap(), Status::success("Deleted: b"));
        assert_eq!(names(&ctl), vec!["a"]);
        assert_eq!(ctl.selection().index(), None);
    }

    #[test]
    fn delete_without_confirmation_when_disabled() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), "").unwrap();
        let nav = NavigationState::new(tmp.path(), false).unwrap();
        let (mut ctl, _) = Controller::new(
            nav,
            ControllerOptions {
                confirm_delete: false,
            },
        );
        let mut ui = Scripted::confirming(false);

        ctl.dispatch(Intent::Delete, &mut ui);

        assert!(ui.confirmations.is_empty());
        assert!(!tmp.path().join("a").exists());
    }

    // --- clipboard & paste ---

    #[test]
    fn paste_with_empty_clipboard_warns() {
        let tmp = TempDir::new().unwrap();
        let mut ctl = setup(&tmp);

        let status = ctl.dispatch(Intent::Paste, &mut Scripted::default());

        assert_eq!(
            status.unwrap(),
            Status::warning("Clipboard is empty. Copy or cut an item first.")
        );
    }

    #[test]
    fn paste_into_same_directory_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("x.txt"), "").unwrap();
        let mut ctl = setup(&tmp);

        ctl.dispatch(Intent::Copy, &mut Scripted::default());
        let status = ctl.dispatch(Intent::Paste, &mut Scripted::default());

        assert_eq!(
            status.unwrap(),
            Status::warning("Source and destination are the same.")
        );
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
        assert!(!ctl.clipboard().is_empty());
    }

    #[test]
    fn copy_paste_keeps_clipboard() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("dest")).unwrap();
        fs::write(tmp.path().join("x.txt"), "x").unwrap();
        let mut ctl = setup(&tmp);
        select_name(&mut ctl, "x.txt");

        ctl.dispatch(Intent::Copy, &mut Scripted::default());
        ctl.dispatch(Intent::Navigate(tmp.path().join("dest")), &mut Scripted::default());
        let status = ctl.dispatch(Intent::Paste, &mut Scripted::default());

        assert_eq!(status.unwrap(), Status::success("Copied: x.txt"));
        assert!(tmp.path().join("x.txt").exists());
        assert!(tmp.path().join("dest").join("x.txt").exists());
        let entry = ctl.clipboard().entry().unwrap();
        assert_eq!(entry.path, tmp.path().join("x.txt"));
        assert_eq!(entry.op, ClipboardOp::Copy);
    }

    #[test]
    fn cut_paste_clears_clipboard() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("dest")).unwrap();
        fs::write(tmp.path().join("x.txt"), "x").unwrap();
        let mut ctl = setup(&tmp);
        select_name(&mut ctl, "x.txt");

        ctl.dispatch(Intent::Cut, &mut Scripted::default());
        ctl.dispatch(Intent::Navigate(tmp.path().join("dest")), &mut Scripted::default());
        let status = ctl.dispatch(Intent::Paste, &mut Scripted::default());

        assert_eq!(status.unwrap(), Status::success("Moved: x.txt"));
        assert!(!tmp.path().join("x.txt").exists());
        assert!(tmp.path().join("dest").join("x.txt").exists());
        assert!(ctl.clipboard().is_empty());
        assert_eq!(names(&ctl), vec!["x.txt"]);
    }

    #[test]
    fn failed_paste_keeps_cut_clipboard() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("dest")).unwrap();
        fs::write(tmp.path().join("x.txt"), "new").unwrap();
        fs::write(tmp.path().join("dest").join("x.txt"), "old").unwrap();
        let mut ctl = setup(&tmp);
        select_name(&mut ctl, "x.txt");

        ctl.dispatch(Intent::Cut, &mut Scripted::default());
        ctl.dispatch(Intent::Navigate(tmp.path().join("dest")), &mut Scripted::default());
        let status = ctl.dispatch(Intent::Paste, &mut Scripted::default());

        assert_eq!(status.unwrap(), Status::warning("Already exists: x.txt"));
        assert!(!ctl.clipboard().is_empty());
        assert_eq!(
            fs::read_to_string(tmp.path().join("dest").join("x.txt")).unwrap(),
            "old"
        );
    }

    #[test]
    fn paste_of_vanished_source_reports_not_found() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("dest")).unwrap();
        fs::write(tmp.path().join("x.txt"), "").unwrap();
        let mut ctl = setup(&tmp);
        select_name(&mut ctl, "x.txt");

        ctl.dispatch(Intent::Copy, &mut Scripted::default());
        fs::remove_file(tmp.path().join("x.txt")).unwrap();
        ctl.dispatch(Intent::Navigate(tmp.path().join("dest")), &mut Scripted::default());
        let status = ctl.dispatch(Intent::Paste, &mut Scripted::default()).unwrap();

        assert!(status.text.starts_with("Not found:"));
    }

    #[test]
    fn copy_without_selection_leaves_clipboard_idle() {
        let tmp = TempDir::new().unwrap();
        let mut ctl = setup(&tmp);

        let status = ctl.dispatch(Intent::Copy, &mut Scripted::default());

        assert_eq!(status.unwrap(), Status::warning("No item selected."));
        assert!(ctl.clipboard().is_empty());
    }

    #[test]
    fn deleting_clipboard_source_forgets_it() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("x.txt"), "").unwrap();
        let mut ctl = setup(&tmp);

        ctl.dispatch(Intent::Copy, &mut Scripted::default());
        ctl.dispatch(Intent::Delete, &mut Scripted::confirming(true));

        assert!(ctl.clipboard().is_empty());
    }

    // --- edit & info ---

    #[test]
    fn edit_directory_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("d")).unwrap();
        let mut ctl = setup(&tmp);
        let mut ui = Scripted::default();

        let status = ctl.dispatch(Intent::Edit, &mut ui);

        assert_eq!(status.unwrap(), Status::warning("Cannot edit a directory."));
        assert!(ui.edited.is_empty());
    }

    #[test]
    fn edit_saved_refreshes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f.txt"), "").unwrap();
        let mut ctl = setup(&tmp);
        let mut events = ctl.subscribe();
        let mut ui = Scripted {
            edit: Some(EditOutcome::Saved("f.txt".to_string())),
            ..Scripted::default()
        };

        let status = ctl.dispatch(Intent::Edit, &mut ui);

        assert_eq!(status.unwrap(), Status::success("Saved: f.txt"));
        assert_eq!(ui.edited, vec![tmp.path().join("f.txt")]);
        assert!(matches!(
            events.try_recv().unwrap(),
            Event::ListingReplaced { .. }
        ));
    }

    #[test]
    fn edit_outcomes_map_to_status() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f.txt"), "").unwrap();
        let mut ctl = setup(&tmp);

        let mut cancelled = Scripted::default();
        assert_eq!(ctl.dispatch(Intent::Edit, &mut cancelled), None);

        let mut failed = Scripted {
            edit: Some(EditOutcome::Failed("disk full".to_string())),
            ..Scripted::default()
        };
        assert_eq!(
            ctl.dispatch(Intent::Edit, &mut failed).unwrap(),
            Status::error("Save error: disk full")
        );
    }

    #[test]
    fn info_hands_details_to_dialog() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f.txt"), "abc").unwrap();
        let mut ctl = setup(&tmp);
        let mut ui = Scripted::default();

        let status = ctl.dispatch(Intent::Info, &mut ui);

        assert_eq!(status, None);
        let info = ui.info.unwrap();
        assert_eq!(info.name, "f.txt");
        assert_eq!(info.size, "3.0 B");
    }

    // --- navigation ---

    #[test]
    fn toggle_hidden_round_trip() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::write(tmp.path().join(".hidden"), "").unwrap();
        let mut ctl = setup(&tmp);
        let original = ctl.listing().clone();

        ctl.dispatch(Intent::ToggleHidden, &mut Scripted::default());
        assert_eq!(ctl.listing().len(), 2);
        assert!(ctl.show_hidden());

        let status = ctl.dispatch(Intent::ToggleHidden, &mut Scripted::default());
        assert_eq!(ctl.listing(), &original);
        assert!(status.unwrap().text.ends_with("(hidden files excluded)"));
    }

    #[test]
    fn toggle_hidden_keeps_selected_entry() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.txt"), "").unwrap();
        fs::write(tmp.path().join(".a"), "").unwrap();
        let mut ctl = setup(&tmp);
        assert_eq!(ctl.selected_entry().unwrap().name(), "b.txt");

        ctl.dispatch(Intent::ToggleHidden, &mut Scripted::default());

        assert_eq!(ctl.selected_entry().unwrap().name(), "b.txt");
        assert_eq!(ctl.selection().index(), Some(1));
    }

    #[test]
    fn refresh_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), "").unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        let mut ctl = setup(&tmp);

        let status = ctl.dispatch(Intent::Refresh, &mut Scripted::default());
        let first = ctl.listing().clone();
        ctl.dispatch(Intent::Refresh, &mut Scripted::default());

        assert_eq!(status.unwrap(), Status::info("Refreshed."));
        assert_eq!(ctl.listing(), &first);
    }

    #[test]
    fn refresh_drops_out_of_range_selection() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), "").unwrap();
        fs::write(tmp.path().join("b"), "").unwrap();
        let mut ctl = setup(&tmp);
        select_name(&mut ctl, "b");

        fs::remove_file(tmp.path().join("a")).unwrap();
        fs::remove_file(tmp.path().join("b")).unwrap();
        ctl.refresh();

        assert_eq!(ctl.selection().index(), None);
    }

    #[test]
    fn open_enters_directory_and_go_up_returns() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("z.txt"), "").unwrap();
        let mut ctl = setup(&tmp);

        ctl.dispatch(Intent::Open, &mut Scripted::default());
        assert_eq!(ctl.current_dir(), tmp.path().join("sub"));

        ctl.dispatch(Intent::GoUp, &mut Scripted::default());
        assert_eq!(ctl.current_dir(), tmp.path());
        assert_eq!(ctl.selected_entry().unwrap().name(), "sub");
    }

    #[test]
    fn open_on_file_does_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f"), "").unwrap();
        let mut ctl = setup(&tmp);

        assert_eq!(ctl.dispatch(Intent::Open, &mut Scripted::default()), None);
        assert_eq!(ctl.current_dir(), tmp.path());
    }

    #[test]
    fn go_to_prompt_and_failure() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("file"), "").unwrap();
        let mut ctl = setup(&tmp);
        let mut ui = Scripted::text("file");

        let status = ctl.dispatch(Intent::GoTo, &mut ui);

        assert_eq!(ui.asked[0].default, tmp.path().display().to_string());
        assert_eq!(status.unwrap(), Status::warning("Not a directory: file"));
        assert_eq!(ctl.current_dir(), tmp.path());
    }

    #[test]
    fn go_to_relative_directory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("inner")).unwrap();
        let mut ctl = setup(&tmp);

        let status = ctl.dispatch(Intent::GoTo, &mut Scripted::text("inner"));

        assert_eq!(ctl.current_dir(), tmp.path().join("inner"));
        assert!(status.unwrap().text.starts_with("0 items in"));
    }

    #[test]
    fn navigate_to_missing_keeps_state() {
        let tmp = TempDir::new().unwrap();
        let mut ctl = setup(&tmp);

        let status = ctl.dispatch(
            Intent::Navigate(tmp.path().join("ghost")),
            &mut Scripted::default(),
        );

        assert_eq!(status.unwrap().level, crate::status::StatusLevel::Warning);
        assert_eq!(ctl.current_dir(), tmp.path());
    }

    #[test]
    fn select_out_of_range_clears() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), "").unwrap();
        let mut ctl = setup(&tmp);

        ctl.dispatch(Intent::Select(5), &mut Scripted::default());
        assert_eq!(ctl.selection().index(), None);
    }

    // --- two-phase jobs & locking ---

    #[test]
    fn overlapping_job_is_refused_while_pending() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("d")).unwrap();
        fs::write(tmp.path().join("d").join("f"), "").unwrap();
        let mut ctl = setup(&tmp);
        ctl.options.confirm_delete = false;

        // Pending delete of "d"
        let Plan::Job(job) = ctl.plan(Intent::Delete, &mut Scripted::default()) else {
            panic!("expected a job");
        };
        assert!(ctl.is_busy());

        // Renaming the same entry must wait
        let second = ctl.plan(Intent::Rename, &mut Scripted::text("e"));
        match second {
            Plan::Done(Some(status)) => assert!(status.text.starts_with("Busy:")),
            other => panic!("expected busy, got {other:?}"),
        }

        let result = job.run();
        let status = ctl.complete(job, result).unwrap();
        assert_eq!(status, Status::success("Deleted: d"));
        assert!(!ctl.is_busy());
    }

    #[test]
    fn failed_job_leaves_listing_untouched() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), "").unwrap();
        let mut ctl = setup(&tmp);
        let before = ctl.listing().clone();

        let Plan::Job(job) = ctl.plan(Intent::NewFile, &mut Scripted::text("a")) else {
            panic!("expected a job");
        };
        let result = job.run();
        let status = ctl.complete(job, result).unwrap();

        assert_eq!(status, Status::warning("File already exists: a"));
        assert_eq!(ctl.listing(), &before);
    }

    #[tokio::test]
    async fn subscribers_receive_events() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), "").unwrap();
        let mut ctl = setup(&tmp);
        let mut events = ctl.subscribe();

        ctl.dispatch(Intent::Copy, &mut Scripted::default());
        ctl.dispatch(Intent::Refresh, &mut Scripted::default());

        assert!(matches!(
            events.recv().await.unwrap(),
            Event::ClipboardChanged(Some(_))
        ));
        assert!(matches!(events.recv().await.unwrap(), Event::StatusChanged(_)));
        assert!(matches!(
            events.recv().await.unwrap(),
            Event::ListingReplaced { .. }
        ));
        assert!(matches!(events.recv().await.unwrap(), Event::StatusChanged(_)));
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let tmp = TempDir::new().unwrap();
        let mut ctl = setup(&tmp);
        drop(ctl.subscribe());

        ctl.dispatch(Intent::Refresh, &mut Scripted::default());

        assert!(ctl.subscribers.is_empty());
    }
}
