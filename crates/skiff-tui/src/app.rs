use std::path::{Path, PathBuf};

use skiff_core::action::ActionRegistry;
use skiff_core::config::keymap::Keymap;
use skiff_core::config::settings::{Config, UiConfig};
use skiff_core::{
    Controller, DisplayOptions, EditOutcome, Event, FileInfo, FsJob, Intent, ListingRow, Plan,
    Prompt, Status,
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::dialog::{Answer, Ask, TuiInteraction};
use crate::input::CursorMove;
use crate::jobs::JobMessage;

/// Application mode; determines how input is routed.
#[derive(Debug, Clone)]
pub enum AppMode {
    Normal,
    /// A text prompt; submitting replays `intent` with the input.
    Prompt(PromptState),
    /// A yes/no question; approving replays `intent` if `target` is
    /// still the highlighted entry.
    Confirm {
        intent: Intent,
        message: String,
        target: Option<PathBuf>,
    },
    /// File details popup.
    Info(FileInfo),
    Help,
}

/// An open text prompt.
#[derive(Debug, Clone)]
pub struct PromptState {
    pub intent: Intent,
    pub prompt: Prompt,
    pub input: String,
    /// Entry the prompt was opened for; the replay is refused if the
    /// highlight has moved off it.
    pub target: Option<PathBuf>,
}

impl PromptState {
    /// Opens a prompt pre-filled with its default.
    pub fn new(intent: Intent, prompt: Prompt) -> Self {
        let input = prompt.default.clone();
        Self {
            intent,
            prompt,
            input,
            target: None,
        }
    }
}

/// Which pane receives cursor keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Table,
}

/// A directory shown in the tree pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub path: PathBuf,
    /// The `..` entry leading to the parent.
    pub is_parent: bool,
}

/// View state around the core [`Controller`].
///
/// The controller owns everything the file manager knows; `App` keeps only
/// what the screen needs (mode, focus, rendered rows, the last status) and
/// updates it from the controller's event stream.
pub struct App {
    controller: Controller,
    events: UnboundedReceiver<Event>,
    mode: AppMode,
    focus: Focus,
    rows: Vec<ListingRow>,
    tree: Vec<TreeNode>,
    tree_dir: PathBuf,
    tree_cursor: usize,
    status: Option<Status>,
    busy: bool,
    running: Vec<String>,
    keymap: Keymap,
    registry: ActionRegistry,
    display: DisplayOptions,
    ui: UiConfig,
    should_quit: bool,
}

impl App {
    pub fn new(mut controller: Controller, status: Status, config: &Config, keymap: Keymap) -> Self {
        let events = controller.subscribe();
        let display = DisplayOptions {
            date_format: config.ui.date_format.clone(),
        };
        let rows = controller.listing().rows(&display);
        let tree = tree_nodes(&controller);
        let tree_dir = controller.current_dir().to_path_buf();
        Self {
            controller,
            events,
            mode: AppMode::Normal,
            focus: Focus::Table,
            rows,
            tree,
            tree_dir,
            tree_cursor: 0,
            status: Some(status),
            busy: false,
            running: Vec::new(),
            keymap,
            registry: ActionRegistry::new(),
            display,
            ui: config.ui.clone(),
            should_quit: false,
        }
    }

    // --- Getters ---

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    pub fn tree(&self) -> &[TreeNode] {
        &self.tree
    }

    pub fn tree_cursor(&self) -> usize {
        self.tree_cursor
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Descriptions of jobs still running.
    pub fn running_jobs(&self) -> &[String] {
        &self.running
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn ui_config(&self) -> &UiConfig {
        &self.ui
    }

    pub fn current_dir(&self) -> &Path {
        self.controller.current_dir()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // --- Controller events ---

    /// Applies every event the controller published since the last call.
    pub fn sync_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                Event::ListingReplaced { dir, listing } => {
                    self.rows = listing.rows(&self.display);
                    self.tree = tree_nodes(&self.controller);
                    if dir != self.tree_dir {
                        self.tree_dir = dir;
                        self.tree_cursor = 0;
                    }
                    self.tree_cursor = self.tree_cursor.min(self.tree.len().saturating_sub(1));
                }
                Event::StatusChanged(status) => self.status = Some(status),
                Event::BusyChanged(busy) => self.busy = busy,
                Event::SelectionChanged(_) | Event::ClipboardChanged(_) => {}
            }
        }
    }

    // --- Intents ---

    /// Plans `intent`, opening a popup if the controller needs an answer.
    ///
    /// Returns the job to run in the background, if any.
    pub fn run_intent(
        &mut self,
        intent: Intent,
        answer: Answer,
        editor: &mut dyn FnMut(&Path) -> EditOutcome,
    ) -> Option<FsJob> {
        let intent = self.retarget(intent);
        if !matches!(intent, Intent::Select(_)) {
            self.status = None;
        }

        let target = self.selected_target(&intent);
        let mut ui = TuiInteraction::new(answer, editor);
        let plan = self.controller.plan(intent.clone(), &mut ui);
        let (asked, info) = ui.finish();

        self.mode = match (asked, info) {
            (Some(Ask::Text(prompt)), _) => AppMode::Prompt(PromptState {
                target,
                ..PromptState::new(intent, prompt)
            }),
            (Some(Ask::Confirm(message)), _) => AppMode::Confirm {
                intent,
                message,
                target,
            },
            (None, Some(info)) => AppMode::Info(info),
            (None, None) => AppMode::Normal,
        };

        match plan {
            Plan::Done(_) => None,
            Plan::Job(job) => {
                self.running.push(job.describe());
                Some(job)
            }
        }
    }

    /// Hands a finished background job back to the controller.
    pub fn complete_job(&mut self, msg: JobMessage) {
        let description = msg.job.describe();
        if let Some(pos) = self.running.iter().position(|d| *d == description) {
            self.running.remove(pos);
        }
        self.controller.complete(msg.job, msg.result);
    }

    /// Rebuilds the listing after an outside change, keeping the status.
    pub fn refresh_listing(&mut self) {
        if let Some(warning) = self.controller.refresh() {
            tracing::debug!(dir = %warning.dir.display(), reason = %warning.reason, "refresh warning");
        }
    }

    /// `Open` in the tree pane means "go to the highlighted tree node".
    fn retarget(&self, intent: Intent) -> Intent {
        match (intent, self.focus) {
            (Intent::Open, Focus::Tree) => match self.tree.get(self.tree_cursor) {
                Some(node) => Intent::Navigate(node.path.clone()),
                None => Intent::Open,
            },
            (intent, _) => intent,
        }
    }

    // --- Popups ---

    pub fn prompt_push(&mut self, c: char) {
        if let AppMode::Prompt(state) = &mut self.mode {
            state.input.push(c);
        }
    }

    pub fn prompt_pop(&mut self) {
        if let AppMode::Prompt(state) = &mut self.mode {
            state.input.pop();
        }
    }

    pub fn prompt_clear(&mut self) {
        if let AppMode::Prompt(state) = &mut self.mode {
            state.input.clear();
        }
    }

    /// Replays the prompt's intent with the typed input.
    pub fn submit_prompt(
        &mut self,
        editor: &mut dyn FnMut(&Path) -> EditOutcome,
    ) -> Option<FsJob> {
        match std::mem::replace(&mut self.mode, AppMode::Normal) {
            AppMode::Prompt(state) => {
                if self.selection_moved(state.target.as_deref()) {
                    return None;
                }
                self.run_intent(state.intent, Answer::Text(state.input), editor)
            }
            other => {
                self.mode = other;
                None
            }
        }
    }

    /// Replays the confirmed intent.
    pub fn approve(&mut self, editor: &mut dyn FnMut(&Path) -> EditOutcome) -> Option<FsJob> {
        match std::mem::replace(&mut self.mode, AppMode::Normal) {
            AppMode::Confirm { intent, target, .. } => {
                if self.selection_moved(target.as_deref()) {
                    return None;
                }
                self.run_intent(intent, Answer::Confirmed, editor)
            }
            other => {
                self.mode = other;
                None
            }
        }
    }

    /// Path of the highlighted entry for intents that act on it.
    fn selected_target(&self, intent: &Intent) -> Option<PathBuf> {
        match intent {
            Intent::Rename | Intent::Delete => self
                .controller
                .selected_entry()
                .map(|e| e.path().to_path_buf()),
            _ => None,
        }
    }

    /// A job finishing or a watcher refresh can move the highlight while a
    /// popup is open. Reports it and returns `true` if so.
    fn selection_moved(&mut self, target: Option<&Path>) -> bool {
        let Some(target) = target else {
            return false;
        };
        if self.controller.selected_entry().map(|e| e.path()) == Some(target) {
            return false;
        }
        tracing::debug!(path = %target.display(), "selection changed under popup");
        self.status = Some(Status::warning("Selection changed."));
        true
    }

    /// Closes any popup without side effects.
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // --- Cursor & focus ---

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Tree => Focus::Table,
            Focus::Table => Focus::Tree,
        };
    }

    pub fn move_cursor(&mut self, motion: CursorMove) {
        match self.focus {
            Focus::Tree => {
                let last = self.tree.len().saturating_sub(1);
                self.tree_cursor = match motion {
                    CursorMove::Up => self.tree_cursor.saturating_sub(1),
                    CursorMove::Down => (self.tree_cursor + 1).min(last),
                    CursorMove::Top => 0,
                    CursorMove::Bottom => last,
                };
            }
            Focus::Table => {
                let len = self.controller.listing().len();
                let current = self.controller.selection();
                let next = match motion {
                    CursorMove::Up => current.previous(len),
                    CursorMove::Down => current.next(len),
                    CursorMove::Top => skiff_core::Selection::first(len),
                    CursorMove::Bottom => skiff_core::Selection::last(len),
                };
                if let Some(index) = next.index() {
                    let mut no_editor = |_: &Path| EditOutcome::Cancelled;
                    self.run_intent(Intent::Select(index), Answer::None, &mut no_editor);
                }
            }
        }
    }
}

/// `..` (unless at a root) followed by the subdirectories of the listing.
fn tree_nodes(controller: &Controller) -> Vec<TreeNode> {
    let parent = controller.current_dir().parent().map(|p| TreeNode {
        label: "..".to_string(),
        path: p.to_path_buf(),
        is_parent: true,
    });
    let children = controller
        .listing()
        .entries()
        .iter()
        .filter(|e| e.is_dir())
        .map(|e| TreeNode {
            label: e.name().to_string(),
            path: e.path().to_path_buf(),
            is_parent: false,
        });
    parent.into_iter().chain(children).collect()
}
