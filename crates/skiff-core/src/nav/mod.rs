//! Navigation state: the current directory, its listing and the selection.

pub mod listing;
pub mod navigation;
pub mod selection;

pub use listing::{DisplayOptions, Listing, ListingRow, ListingWarning};
pub use navigation::NavigationState;
pub use selection::Selection;
