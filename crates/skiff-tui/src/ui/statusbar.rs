//! Status bar rendering.
//!
//! The status bar occupies a single row below the panes and shows the
//! cursor position, the hidden-file indicator, the last outcome message
//! and any jobs still running.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use skiff_core::{Status, StatusLevel};

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub entry_count: usize,
    pub selected_index: Option<usize>,
    pub show_hidden: bool,
    pub status: Option<&'a Status>,
    pub running_jobs: &'a [String],
}

pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>) {
    let bg = Color::DarkGray;

    let mut spans = vec![Span::styled(
        position_label(props.selected_index, props.entry_count),
        Style::default().fg(Color::White).bg(bg),
    )];

    if props.show_hidden {
        spans.push(Span::styled(
            " [H]",
            Style::default().fg(Color::Yellow).bg(bg),
        ));
    }

    if let Some(status) = props.status {
        spans.push(Span::styled(
            format!("  {status}"),
            Style::default()
                .fg(level_color(status.level))
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    if let Some(label) = busy_label(props.running_jobs) {
        spans.push(Span::styled(
            label,
            Style::default()
                .fg(Color::Magenta)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn position_label(selected: Option<usize>, total: usize) -> String {
    match selected {
        Some(i) if total > 0 => format!(" {}/{}", i + 1, total),
        _ => format!(" -/{total}"),
    }
}

fn level_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Info => Color::White,
        StatusLevel::Success => Color::Green,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}

fn busy_label(jobs: &[String]) -> Option<String> {
    match jobs {
        [] => None,
        [only] => Some(format!("  ⏳ {only}")),
        [first, rest @ ..] => Some(format!("  ⏳ {first} (+{} more)", rest.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_one_based() {
        assert_eq!(position_label(Some(0), 3), " 1/3");
        assert_eq!(position_label(Some(2), 3), " 3/3");
    }

    #[test]
    fn position_without_selection() {
        assert_eq!(position_label(None, 0), " -/0");
        assert_eq!(position_label(None, 4), " -/4");
    }

    #[test]
    fn errors_are_red() {
        assert_eq!(level_color(StatusLevel::Error), Color::Red);
        assert_eq!(level_color(StatusLevel::Success), Color::Green);
    }

    #[test]
    fn busy_label_counts_extra_jobs() {
        assert_eq!(busy_label(&[]), None);
        let one = vec!["Copying a".to_string()];
        assert_eq!(busy_label(&one).as_deref(), Some("  ⏳ Copying a"));
        let three = vec![
            "Copying a".to_string(),
            "Deleting b".to_string(),
            "Moving c".to_string(),
        ];
        assert_eq!(
            busy_label(&three).as_deref(),
            Some("  ⏳ Copying a (+2 more)")
        );
    }
}
