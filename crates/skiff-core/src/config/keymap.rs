//! Key binding configuration.
//!
//! Key bindings map key names (e.g. `"j"`, `"Ctrl+l"`, `"Enter"`) to
//! [`Action`] values. The defaults mirror the footer hints.
//!
//! TOML files use string action identifiers (e.g. `"new_file"`); these are
//! resolved to [`Action`] via [`ActionRegistry::find_by_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionRegistry};
use crate::error::{CoreError, CoreResult};

/// Raw TOML representation, deserialized first and then resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

/// Complete set of key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    /// Reverse map: Action → key strings (for footer and help display).
    reverse: HashMap<Action, Vec<String>>,
}

const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    // Navigation
    ("j", Action::CursorDown),
    ("Down", Action::CursorDown),
    ("k", Action::CursorUp),
    ("Up", Action::CursorUp),
    ("g", Action::CursorTop),
    ("Home", Action::CursorTop),
    ("G", Action::CursorBottom),
    ("End", Action::CursorBottom),
    ("Enter", Action::Open),
    ("Right", Action::Open),
    ("Backspace", Action::GoUp),
    ("Left", Action::GoUp),
    ("Ctrl+l", Action::GoTo),
    ("F5", Action::Refresh),
    // File operations
    ("n", Action::NewFile),
    ("d", Action::NewDirectory),
    ("r", Action::Rename),
    ("x", Action::Delete),
    ("c", Action::Copy),
    ("m", Action::Cut),
    ("v", Action::Paste),
    ("e", Action::Edit),
    ("i", Action::Info),
    // View
    ("h", Action::ToggleHidden),
    ("Tab", Action::FocusNext),
    // System
    ("?", Action::Help),
    ("q", Action::Quit),
];

impl Default for Keymap {
    fn default() -> Self {
        let bindings: HashMap<String, Action> = DEFAULT_BINDINGS
            .iter()
            .map(|(key, action)| ((*key).to_string(), *action))
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }
}

/// Builds the reverse mapping from Action → Vec<key string>.
fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    // Shortest first, so the footer shows "v" rather than "Ctrl+v"
    for keys in reverse.values_mut() {
        keys.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    }
    reverse
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path`.
    ///
    /// The file's bindings are layered over the defaults, so a keymap only
    /// needs to list the keys it changes. Unknown action strings are logged
    /// and ignored.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    /// Like [`Keymap::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Any error of [`Keymap::load`] other than [`CoreError::NotFound`].
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        match Self::load(path) {
            Err(CoreError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Resolves a raw (string-based) keymap on top of the defaults.
    fn from_raw(raw: RawKeymap) -> Self {
        let registry = ActionRegistry::new();
        let mut bindings = Self::default().bindings;
        for (key, action_id) in raw.bindings {
            match registry.find_by_id(&action_id) {
                Some(action) => {
                    bindings.insert(key, action);
                }
                None => tracing::warn!(key = %key, action = %action_id, "unknown action in keymap"),
            }
        }
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to a given action, shortest first.
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(|v| v.as_slice())
    }

    /// Returns all bindings (for iteration / display).
    pub fn bindings(&self) -> &HashMap<String, Action> {
        &self.bindings
    }
}
