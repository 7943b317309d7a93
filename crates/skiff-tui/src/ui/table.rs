//! File table pane rendering.
//!
//! Columns: icon and name, size, modified time, permissions. Rows come
//! pre-formatted from the core listing.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use skiff_core::{IconKind, ListingRow};

use crate::icons::{icon_for, plain_marker};

const HEADER: [&str; 4] = ["Name", "Size", "Modified", "Permissions"];

pub fn render_table(
    f: &mut Frame,
    area: Rect,
    rows: &[ListingRow],
    selected: Option<usize>,
    is_active: bool,
    show_icons: bool,
) {
    let header = Row::new(HEADER.map(Cell::from)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let body: Vec<Row> = rows.iter().map(|row| table_row(row, show_icons)).collect();

    let border_color = if is_active { Color::Cyan } else { Color::DarkGray };
    let title = if rows.is_empty() {
        " (empty) ".to_string()
    } else {
        format!(" {} items ", rows.len())
    };

    let table = Table::new(
        body,
        [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(17),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color)),
    )
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(selected);

    f.render_stateful_widget(table, area, &mut state);
}

fn table_row(row: &ListingRow, show_icons: bool) -> Row<'static> {
    let icon = if show_icons {
        icon_for(row.icon)
    } else {
        plain_marker(row.icon)
    };
    let name = Span::styled(format!("{icon} {}", row.name), name_style(row));
    Row::new(vec![
        Cell::from(name),
        Cell::from(row.size.clone()),
        Cell::from(row.modified.clone()),
        Cell::from(row.permissions.clone()),
    ])
}

fn name_style(row: &ListingRow) -> Style {
    if row.icon == IconKind::Directory {
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else if row.name.starts_with('.') {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}
