//! Application configuration loaded from a TOML file.
//!
//! The default configuration matches the values shown in `config/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fs::format::{is_valid_time_pattern, DEFAULT_DATE_FORMAT};

/// Top-level application configuration.
///
/// All fields have sensible defaults so skiff works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    ///
    /// An unusable `ui.date_format` is replaced by the default.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        if !is_valid_time_pattern(&config.ui.date_format) {
            tracing::warn!(
                pattern = %config.ui.date_format,
                fallback = DEFAULT_DATE_FORMAT,
                "invalid ui.date_format"
            );
            config.ui.date_format = default_date_format();
        }
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Any error of [`Config::load`] other than [`CoreError::NotFound`].
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        match Self::load(path) {
            Err(CoreError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }
}

/// General file-browsing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub show_hidden: bool,
    /// Directory shown at startup; `$HOME` when unset.
    #[serde(default)]
    pub start_dir: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            start_dir: None,
            confirm_delete: true,
        }
    }
}

/// UI layout and display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_icons: bool,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Width of the directory tree, in percent of the screen.
    #[serde(default = "default_tree_width")]
    pub tree_width: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_icons: true,
            date_format: default_date_format(),
            tree_width: default_tree_width(),
        }
    }
}

/// External editor settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Editor command; falls back to `$EDITOR`, then `vi`.
    #[serde(default)]
    pub command: Option<String>,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path; `~/.cache/skiff/skiff.log` when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_tree_width() -> u16 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_general() {
        let config = Config::default();

        assert!(!config.general.show_hidden);
        assert!(config.general.start_dir.is_none());
        assert!(config.general.confirm_delete);
    }

    #[test]
    fn default_config_ui() {
        let config = Config::default();

        assert!(config.ui.show_icons);
        assert_eq!(config.ui.date_format, "%Y-%m-%d %H:%M");
        assert_eq!(config.ui.tree_width, 30);
    }

    #[test]
    fn default_config_editor_and_log() {
        let config = Config::default();

        assert!(config.editor.command.is_none());
        assert_eq!(config.log.level, "info");
        assert!(config.log.file.is_none());
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[general]
show_hidden = true
start_dir = "/srv"
confirm_delete = false

[ui]
show_icons = false
date_format = "%d/%m/%Y"
tree_width = 40

[editor]
command = "nano"

[log]
level = "debug"
file = "/tmp/skiff.log"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.general.show_hidden);
        assert_eq!(config.general.start_dir, Some(PathBuf::from("/srv")));
        assert!(!config.general.confirm_delete);

        assert!(!config.ui.show_icons);
        assert_eq!(config.ui.date_format, "%d/%m/%Y");
        assert_eq!(config.ui.tree_width, 40);

        assert_eq!(config.editor.command.as_deref(), Some("nano"));
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/skiff.log")));
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[general]
show_hidden = true
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.general.show_hidden);
        assert!(config.general.confirm_delete);
        assert_eq!(config.ui.tree_width, 30);
    }

    #[test]
    fn load_replaces_invalid_date_format() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[ui]
date_format = "%Y %Q"
tree_width = 25
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.ui.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(config.ui.tree_width, 25);
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(&tmp.path().join("nope.toml")).unwrap();
        assert!(config.general.confirm_delete);
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load_or_default(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }
}
