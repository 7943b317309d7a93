//! Filesystem facade for skiff.
//!
//! [`ops`] holds the listing and mutation primitives, [`stat`] the
//! best-effort metadata lookup, [`entry::FileEntry`] the per-row snapshot and
//! [`format`] the display helpers used by listing rows.

pub mod entry;
pub mod format;
pub mod icon;
pub mod ops;
pub mod stat;

pub use entry::FileEntry;
pub use icon::IconKind;
pub use ops::RawEntry;
pub use stat::FileStat;
