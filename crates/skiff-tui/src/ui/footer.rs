//! Key hint footer built from the action registry and the active keymap.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use skiff_core::{ActionRegistry, Keymap};

pub fn render_footer(f: &mut Frame, area: Rect, registry: &ActionRegistry, keymap: &Keymap) {
    let mut spans = Vec::new();
    for (key, name) in footer_hints(registry, keymap) {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {name}  ")));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// `(key, label)` pairs for footer actions that have at least one binding.
fn footer_hints(registry: &ActionRegistry, keymap: &Keymap) -> Vec<(String, &'static str)> {
    registry
        .footer()
        .filter_map(|d| {
            let key = keymap.keys_for_action(d.action)?.first()?;
            Some((key.clone(), d.name))
        })
        .collect()
}
