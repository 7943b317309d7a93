//! UI widget modules for the TUI frontend.
//!
//! Each sub-module renders a single UI component using ratatui.

pub mod footer;
pub mod pathbar;
pub mod popup;
pub mod statusbar;
pub mod table;
pub mod tree;
