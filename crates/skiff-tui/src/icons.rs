//! Emoji icons for listing rows and the tree.

use skiff_core::fs::icon::IconKind;

/// Returns the icon glyph for an entry kind.
pub fn icon_for(kind: IconKind) -> &'static str {
    match kind {
        IconKind::Directory => "📁",
        IconKind::Python => "🐍",
        IconKind::JavaScript => "🟨",
        IconKind::TypeScript => "🔷",
        IconKind::Html => "🌐",
        IconKind::Css => "🎨",
        IconKind::Json => "📋",
        IconKind::Markdown => "📝",
        IconKind::Text => "📄",
        IconKind::Pdf => "📕",
        IconKind::Image => "🖼",
        IconKind::Audio => "🎵",
        IconKind::Video => "🎬",
        IconKind::Archive => "🗜",
        IconKind::Executable => "⚙",
        IconKind::Database => "🗄",
        IconKind::Rust => "🦀",
        IconKind::Go => "🐹",
        IconKind::CSource => "🔧",
        IconKind::Other => "📄",
    }
}

/// Icon used when icons are disabled: a slash marks directories.
pub fn plain_marker(kind: IconKind) -> &'static str {
    if kind == IconKind::Directory {
        "/"
    } else {
        " "
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_icon() {
        assert_eq!(icon_for(IconKind::Directory), "📁");
    }

    #[test]
    fn language_icons() {
        assert_eq!(icon_for(IconKind::Rust), "🦀");
        assert_eq!(icon_for(IconKind::Python), "🐍");
        assert_eq!(icon_for(IconKind::Go), "🐹");
    }

    #[test]
    fn unknown_falls_back_to_page() {
        assert_eq!(icon_for(IconKind::Other), icon_for(IconKind::Text));
    }

    #[test]
    fn plain_marker_flags_directories() {
        assert_eq!(plain_marker(IconKind::Directory), "/");
        assert_eq!(plain_marker(IconKind::Rust), " ");
    }
}
