use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use skiff_core::action::Action;
use skiff_core::config::keymap::Keymap;
use skiff_core::Intent;

use crate::app::AppMode;

/// Cursor motion within the focused pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Top,
    Bottom,
}

/// Actions that can result from a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Hand an intent to the controller.
    Intent(Intent),
    /// Move the cursor of the focused pane.
    Cursor(CursorMove),
    /// Switch focus between tree and table.
    FocusNext,
    /// Show the key binding overview.
    ShowHelp,
    /// Append a character to the prompt input.
    PromptChar(char),
    /// Remove the last character from the prompt input.
    PromptBackspace,
    /// Clear the prompt input.
    PromptClear,
    /// Submit the prompt input.
    PromptSubmit,
    /// User confirmed the pending action.
    ConfirmApproved,
    /// Close the popup without side effects.
    Cancel,
    /// Quit the application.
    Quit,
    /// No action for this key.
    None,
}

/// Maps a key event to an InputAction based on the current mode.
///
/// In Normal mode every key is resolved through the `Keymap` except
/// Ctrl+C, which always quits. Popups use fixed keys.
pub fn handle_key(key: KeyEvent, mode: &AppMode, keymap: &Keymap) -> InputAction {
    match mode {
        AppMode::Normal => handle_normal_key(key, keymap),
        AppMode::Prompt(_) => handle_prompt_key(key),
        AppMode::Confirm { .. } => handle_confirm_key(key),
        AppMode::Info(_) | AppMode::Help => handle_dismiss_key(key),
    }
}

/// Converts an `Action` enum variant to the corresponding `InputAction`.
fn action_to_input_action(action: Action) -> InputAction {
    if let Some(intent) = action.intent() {
        return InputAction::Intent(intent);
    }
    match action {
        Action::CursorUp => InputAction::Cursor(CursorMove::Up),
        Action::CursorDown => InputAction::Cursor(CursorMove::Down),
        Action::CursorTop => InputAction::Cursor(CursorMove::Top),
        Action::CursorBottom => InputAction::Cursor(CursorMove::Bottom),
        Action::FocusNext => InputAction::FocusNext,
        Action::Help => InputAction::ShowHelp,
        Action::Quit => InputAction::Quit,
        _ => InputAction::None,
    }
}

/// Names a key the way `keymap.toml` spells it, e.g. `"j"`, `"Ctrl+l"`,
/// `"F5"`, `"Enter"`.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let base = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return None,
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        Some(format!("Ctrl+{base}"))
    } else if key.modifiers.contains(KeyModifiers::ALT) {
        Some(format!("Alt+{base}"))
    } else {
        Some(base)
    }
}

fn handle_normal_key(key: KeyEvent, keymap: &Keymap) -> InputAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputAction::Quit;
    }
    key_name(&key)
        .and_then(|name| keymap.action_for_key(&name))
        .map(action_to_input_action)
        .unwrap_or(InputAction::None)
}

fn handle_prompt_key(key: KeyEvent) -> InputAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => InputAction::Cancel,
        KeyCode::Enter => InputAction::PromptSubmit,
        KeyCode::Backspace => InputAction::PromptBackspace,
        KeyCode::Char('u') if ctrl => InputAction::PromptClear,
        KeyCode::Char('c') if ctrl => InputAction::Cancel,
        KeyCode::Char(c) if !ctrl => InputAction::PromptChar(c),
        _ => InputAction::None,
    }
}

fn handle_confirm_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => InputAction::ConfirmApproved,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => InputAction::Cancel,
        _ => InputAction::None,
    }
}

fn handle_dismiss_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
            InputAction::Cancel
        }
        _ => InputAction::None,
    }
}
