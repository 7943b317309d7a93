//! Unified action system for skiff.
//!
//! Every key-bindable action is represented by the [`Action`] enum.
//! [`ActionRegistry`] provides metadata (id, name, description, category)
//! used by the keymap loader, the footer and the help screen.

use crate::dispatch::Intent;

/// Every key-bindable action in skiff.
///
/// Variants carry no parameters; context is determined at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    Open,
    GoUp,
    GoTo,
    Refresh,
    // File Operations
    NewFile,
    NewDirectory,
    Rename,
    Delete,
    Copy,
    Cut,
    Paste,
    Edit,
    Info,
    // View
    ToggleHidden,
    FocusNext,
    // System
    Help,
    Quit,
}

impl Action {
    /// The dispatcher intent behind this action.
    ///
    /// `None` for actions the UI handles itself (cursor motion, focus,
    /// help, quit).
    pub fn intent(self) -> Option<Intent> {
        let intent = match self {
            Self::Open => Intent::Open,
            Self::GoUp => Intent::GoUp,
            Self::GoTo => Intent::GoTo,
            Self::Refresh => Intent::Refresh,
            Self::NewFile => Intent::NewFile,
            Self::NewDirectory => Intent::NewDirectory,
            Self::Rename => Intent::Rename,
            Self::Delete => Intent::Delete,
            Self::Copy => Intent::Copy,
            Self::Cut => Intent::Cut,
            Self::Paste => Intent::Paste,
            Self::Edit => Intent::Edit,
            Self::Info => Intent::Info,
            Self::ToggleHidden => Intent::ToggleHidden,
            Self::CursorUp
            | Self::CursorDown
            | Self::CursorTop
            | Self::CursorBottom
            | Self::FocusNext
            | Self::Help
            | Self::Quit => return None,
        };
        Some(intent)
    }
}

/// Broad category for grouping actions on the help screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    FileOps,
    View,
    System,
}

impl ActionCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::FileOps => "File",
            Self::View => "View",
            Self::System => "System",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"new_file"`).
    pub id: &'static str,
    /// Short label shown in the footer (e.g. `"New File"`).
    pub name: &'static str,
    pub description: &'static str,
    pub category: ActionCategory,
    /// Whether the footer advertises this action.
    pub footer: bool,
}

macro_rules! descriptor {
    ($action:ident, $id:literal, $name:literal, $desc:literal, $cat:ident, $footer:literal) => {
        ActionDescriptor {
            action: Action::$action,
            id: $id,
            name: $name,
            description: $desc,
            category: ActionCategory::$cat,
            footer: $footer,
        }
    };
}

/// Registry of all available actions, in help-screen order.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action.
    pub fn new() -> Self {
        let descriptors = vec![
            descriptor!(CursorUp, "cursor_up", "Up", "Move cursor up one entry", Navigation, false),
            descriptor!(CursorDown, "cursor_down", "Down", "Move cursor down one entry", Navigation, false),
            descriptor!(CursorTop, "go_first", "First", "Jump to the first entry", Navigation, false),
            descriptor!(CursorBottom, "go_last", "Last", "Jump to the last entry", Navigation, false),
            descriptor!(Open, "open", "Open", "Enter the selected directory", Navigation, false),
            descriptor!(GoUp, "go_up", "Up Dir", "Navigate to the parent directory", Navigation, false),
            descriptor!(GoTo, "go_to", "Go To", "Jump to a typed path", Navigation, false),
            descriptor!(Refresh, "refresh", "Refresh", "Re-read the current directory", Navigation, true),
            descriptor!(NewFile, "new_file", "New File", "Create an empty file", FileOps, true),
            descriptor!(NewDirectory, "new_directory", "New Dir", "Create a directory", FileOps, true),
            descriptor!(Rename, "rename", "Rename", "Rename the selected entry", FileOps, true),
            descriptor!(Delete, "delete", "Delete", "Delete the selected entry", FileOps, true),
            descriptor!(Copy, "copy", "Copy", "Mark the selected entry for copying", FileOps, true),
            descriptor!(Cut, "cut", "Cut", "Mark the selected entry for moving", FileOps, true),
            descriptor!(Paste, "paste", "Paste", "Paste the clipboard here", FileOps, true),
            descriptor!(Edit, "edit", "Edit", "Open the selected file in the editor", FileOps, true),
            descriptor!(Info, "info", "Info", "Show file details", FileOps, true),
            descriptor!(ToggleHidden, "toggle_hidden", "Hidden", "Show or hide dotfiles", View, true),
            descriptor!(FocusNext, "focus_next", "Focus", "Switch between tree and table", View, false),
            descriptor!(Help, "help", "Help", "Show key bindings", System, true),
            descriptor!(Quit, "quit", "Quit", "Exit skiff", System, true),
        ];
        Self { descriptors }
    }

    /// Returns all registered action descriptors.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Descriptors shown in the footer, in registry order.
    pub fn footer(&self) -> impl Iterator<Item = &ActionDescriptor> {
        self.descriptors.iter().filter(|d| d.footer)
    }

    /// Finds an action by its string id (for keymap.toml parsing).
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    /// Returns the descriptor for a given action.
    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
