//! One-line header showing the current directory and the clipboard.

use std::path::Path;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use skiff_core::ClipboardEntry;

pub fn render_pathbar(f: &mut Frame, area: Rect, dir: &Path, clipboard: Option<&ClipboardEntry>) {
    let mut spans = vec![Span::styled(
        path_label(dir),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(entry) = clipboard {
        spans.push(Span::styled(
            clipboard_label(entry),
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn path_label(dir: &Path) -> String {
    format!(" 📂  {}", dir.display())
}

fn clipboard_label(entry: &ClipboardEntry) -> String {
    let name = entry
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| entry.path.display().to_string());
    format!("   [{}: {name}]", entry.op.label())
}
