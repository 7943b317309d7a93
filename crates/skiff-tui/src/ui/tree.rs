//! Directory tree pane: the parent link and the subdirectories of the
//! current directory.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::TreeNode;

pub fn render_tree(
    f: &mut Frame,
    area: Rect,
    nodes: &[TreeNode],
    cursor: usize,
    is_active: bool,
    show_icons: bool,
) {
    let items: Vec<ListItem> = nodes
        .iter()
        .map(|node| ListItem::new(node_label(node, show_icons)))
        .collect();

    let border_color = if is_active { Color::Cyan } else { Color::DarkGray };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Folders ")
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().fg(Color::Blue))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !nodes.is_empty() && is_active {
        state.select(Some(cursor));
    }

    f.render_stateful_widget(list, area, &mut state);
}

fn node_label(node: &TreeNode, show_icons: bool) -> String {
    match (node.is_parent, show_icons) {
        (true, true) => "⬆  ..".to_string(),
        (true, false) => "..".to_string(),
        (false, true) => format!("📁 {}", node.label),
        (false, false) => format!("{}/", node.label),
    }
}
