//! Icon classification for file entries.
//!
//! The core only decides *which kind* of icon an entry gets; the frontend
//! owns the actual glyphs.

use std::path::Path;

/// Coarse file kind derived from the extension, used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Directory,
    Python,
    JavaScript,
    TypeScript,
    Html,
    Css,
    Json,
    Markdown,
    Text,
    Pdf,
    Image,
    Audio,
    Video,
    Archive,
    Executable,
    Database,
    Rust,
    Go,
    CSource,
    Other,
}

impl IconKind {
    /// Classifies a path. Directories always map to [`IconKind::Directory`].
    pub fn classify(path: &Path, is_dir: bool) -> Self {
        if is_dir {
            return Self::Directory;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        Self::for_extension(&ext)
    }

    fn for_extension(ext: &str) -> Self {
        match ext {
            "py" => Self::Python,
            "js" => Self::JavaScript,
            "ts" => Self::TypeScript,
            "html" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "md" => Self::Markdown,
            "txt" => Self::Text,
            "pdf" => Self::Pdf,
            "png" | "jpg" | "jpeg" | "gif" | "svg" => Self::Image,
            "mp3" | "wav" | "flac" => Self::Audio,
            "mp4" | "mkv" | "avi" => Self::Video,
            "zip" | "tar" | "gz" | "rar" => Self::Archive,
            "exe" | "sh" | "bat" => Self::Executable,
            "db" | "sqlite" => Self::Database,
            "rs" => Self::Rust,
            "go" => Self::Go,
            "c" | "cpp" => Self::CSource,
            _ => Self::Other,
        }
    }
}
