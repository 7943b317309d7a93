//! Display formatting for sizes, timestamps and placeholders.

use std::time::SystemTime;

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

/// Size column for directories.
pub const DIR_SIZE: &str = "-";
/// Size column when the size could not be read.
pub const UNKNOWN_SIZE: &str = "?";
/// Timestamp column when the time could not be read.
pub const UNKNOWN_TIME: &str = "-";
/// Default `strftime` pattern for the modified column.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with one decimal, e.g. `1.5 KB`.
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} PB")
}

/// Formats a timestamp in local time with the given `strftime` pattern.
///
/// Returns the placeholder for `None` or for a pattern chrono rejects.
pub fn format_time(time: Option<SystemTime>, pattern: &str) -> String {
    let Some(t) = time else {
        return UNKNOWN_TIME.to_string();
    };
    let local: DateTime<Local> = t.into();
    let mut out = String::new();
    match write!(out, "{}", local.format(pattern)) {
        Ok(()) => out,
        Err(_) => UNKNOWN_TIME.to_string(),
    }
}

/// `true` if every specifier in `pattern` is one chrono understands.
pub fn is_valid_time_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}
