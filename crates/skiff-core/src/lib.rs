//! skiff core library: UI-agnostic file manager state.
//!
//! `skiff-core` owns everything that keeps the displayed directory, the
//! selection and the clipboard consistent while the user mutates the
//! filesystem. It knows nothing about terminals; `skiff-tui` drives it
//! through [`Controller`] and the [`Interaction`] trait.
//!
//! # Modules
//!
//! - [`fs`]: filesystem facade (listing, stat, create/rename/delete/copy/move) and row formatting.
//! - [`nav`]: navigation state, listing snapshots and the selection cursor.
//! - [`clipboard`]: the single pending copy/cut source.
//! - [`dispatch`]: intents, the dialog boundary and filesystem jobs.
//! - [`controller`]: the state machine tying the above together.
//! - [`locks`]: per-path exclusion for jobs running off the UI thread.
//! - [`config`]: TOML settings and keymaps.
//! - [`action`]: key-bindable actions and their metadata.
//! - [`event`] and [`status`]: what the core tells its frontends.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod fs;
pub mod locks;
pub mod nav;
pub mod status;

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use clipboard::{Clipboard, ClipboardEntry, ClipboardOp};
pub use config::keymap::Keymap;
pub use config::settings::Config;
pub use controller::{Controller, ControllerOptions};
pub use dispatch::{EditOutcome, FileInfo, FsJob, Intent, Interaction, JobKind, Plan, Prompt};
pub use error::{CoreError, CoreResult};
pub use event::Event;
pub use fs::entry::FileEntry;
pub use fs::icon::IconKind;
pub use nav::{DisplayOptions, Listing, ListingRow, ListingWarning, NavigationState, Selection};
pub use status::{Status, StatusLevel};
