//! The dispatcher's dialog boundary, backed by modal popups.
//!
//! The controller asks its questions synchronously, but a popup needs the
//! event loop to keep running. [`TuiInteraction`] therefore answers from
//! what the user already typed; when it has no answer it records the
//! question and backs out. Backing out has no side effects, so the app opens
//! the matching popup and replays the intent once the user responds.

use std::path::Path;

use skiff_core::{EditOutcome, FileInfo, Interaction, Prompt};

/// What the user has already answered for the intent being replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    None,
    Text(String),
    Confirmed,
}

/// A question the controller asked that still needs a popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ask {
    Text(Prompt),
    Confirm(String),
}

pub struct TuiInteraction<'a> {
    answer: Answer,
    asked: Option<Ask>,
    info: Option<FileInfo>,
    editor: &'a mut dyn FnMut(&Path) -> EditOutcome,
}

impl<'a> TuiInteraction<'a> {
    pub fn new(answer: Answer, editor: &'a mut dyn FnMut(&Path) -> EditOutcome) -> Self {
        Self {
            answer,
            asked: None,
            info: None,
            editor,
        }
    }

    /// The unanswered question, if any, and the info to display, if any.
    pub fn finish(self) -> (Option<Ask>, Option<FileInfo>) {
        (self.asked, self.info)
    }
}

impl Interaction for TuiInteraction<'_> {
    fn ask_text(&mut self, prompt: &Prompt) -> Option<String> {
        match std::mem::replace(&mut self.answer, Answer::None) {
            Answer::Text(text) => Some(text),
            other => {
                self.answer = other;
                self.asked = Some(Ask::Text(prompt.clone()));
                None
            }
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.answer == Answer::Confirmed {
            self.answer = Answer::None;
            return true;
        }
        self.asked = Some(Ask::Confirm(message.to_string()));
        false
    }

    fn edit(&mut self, path: &Path) -> EditOutcome {
        (self.editor)(path)
    }

    fn show_info(&mut self, info: &FileInfo) {
        self.info = Some(info.clone());
    }
}
