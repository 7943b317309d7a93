use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use skiff_core::{ActionCategory, ActionRegistry, FileInfo, Keymap};

use crate::app::{App, AppMode, Focus, PromptState};
use crate::ui::footer::render_footer;
use crate::ui::pathbar::render_pathbar;
use crate::ui::popup::render_popup;
use crate::ui::statusbar::{render_statusbar, StatusBarProps};
use crate::ui::table::render_table;
use crate::ui::tree::render_tree;

const CATEGORIES: [ActionCategory; 4] = [
    ActionCategory::Navigation,
    ActionCategory::FileOps,
    ActionCategory::View,
    ActionCategory::System,
];

/// Composes the full UI layout each frame.
pub fn render(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let controller = app.controller();
    render_pathbar(
        f,
        outer[0],
        controller.current_dir(),
        controller.clipboard().entry(),
    );

    let tree_width = app.ui_config().tree_width.min(80);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(tree_width),
            Constraint::Percentage(100 - tree_width),
        ])
        .split(outer[1]);

    let show_icons = app.ui_config().show_icons;
    render_tree(
        f,
        body[0],
        app.tree(),
        app.tree_cursor(),
        app.focus() == Focus::Tree,
        show_icons,
    );
    render_table(
        f,
        body[1],
        app.rows(),
        controller.selection().index(),
        app.focus() == Focus::Table,
        show_icons,
    );

    let props = StatusBarProps {
        entry_count: app.rows().len(),
        selected_index: controller.selection().index(),
        show_hidden: controller.show_hidden(),
        status: app.status(),
        running_jobs: app.running_jobs(),
    };
    render_statusbar(f, outer[2], &props);
    render_footer(f, outer[3], app.action_registry(), app.keymap());

    // Render modal overlays based on mode
    match app.mode() {
        AppMode::Prompt(state) => render_popup(f, &state.prompt.title, prompt_lines(state), Color::Cyan),
        AppMode::Confirm { message, .. } => {
            render_popup(f, "Confirm", confirm_lines(message), Color::Red)
        }
        AppMode::Info(info) => render_popup(f, "Info", info_lines(info), Color::Cyan),
        AppMode::Help => render_popup(
            f,
            "Help",
            help_lines(app.action_registry(), app.keymap()),
            Color::Cyan,
        ),
        AppMode::Normal => {}
    }
}

fn prompt_lines(state: &PromptState) -> Vec<Line<'static>> {
    let input = if state.input.is_empty() && !state.prompt.placeholder.is_empty() {
        Line::from(Span::styled(
            state.prompt.placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(format!("{}_", state.input))
    };
    vec![
        input,
        Line::from(""),
        Line::from("Enter to confirm, Esc to cancel"),
    ]
}

fn confirm_lines(message: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = message.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from("y - Yes, proceed"));
    lines.push(Line::from("n - No, cancel"));
    lines
}

fn info_lines(info: &FileInfo) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = info
        .fields()
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:<9}"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(value),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from("Press Esc to close"));
    lines
}

fn help_lines(registry: &ActionRegistry, keymap: &Keymap) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for category in CATEGORIES {
        lines.push(Line::from(Span::styled(
            category.label(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for d in registry.all().iter().filter(|d| d.category == category) {
            let keys = keymap
                .keys_for_action(d.action)
                .map(|k| k.join("/"))
                .unwrap_or_default();
            lines.push(Line::from(format!("  {keys:<14} {}", d.description)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Press Esc or ? to close"));
    lines
}
