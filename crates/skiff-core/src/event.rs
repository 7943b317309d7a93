//! Notifications from the core to its frontends.
//!
//! The controller publishes an [`Event`] after every state transition.
//! Frontends subscribe with [`crate::Controller::subscribe`] and redraw from
//! the events instead of polling.

use std::path::PathBuf;

use crate::clipboard::ClipboardEntry;
use crate::nav::listing::Listing;
use crate::status::Status;

/// A notification the core sends to subscribers.
///
/// Events flow **Core → UI** only.
#[derive(Debug, Clone)]
pub enum Event {
    /// A new listing snapshot replaced the previous one.
    ListingReplaced {
        /// The directory the listing belongs to.
        dir: PathBuf,
        listing: Listing,
    },
    /// The highlighted row changed.
    SelectionChanged(Option<usize>),
    /// A command produced a status message.
    StatusChanged(Status),
    /// The clipboard was set or cleared.
    ClipboardChanged(Option<ClipboardEntry>),
    /// A filesystem job started (`true`) or the last one finished (`false`).
    BusyChanged(bool),
}
