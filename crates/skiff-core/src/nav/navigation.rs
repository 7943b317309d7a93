//! Current-directory state machine.
//!
//! [`NavigationState`] follows the same convention as the rest of the
//! crate: transitions take `&self` and return a new state, so a rejected
//! transition leaves the caller holding the old one.

use std::path::{Component, Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// The directory being shown and whether dotfiles are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_dir: PathBuf,
    show_hidden: bool,
}

impl NavigationState {
    /// Starts at `dir`, which must be an existing directory.
    ///
    /// # Errors
    ///
    /// Same as [`NavigationState::navigate_to`].
    pub fn new(dir: &Path, show_hidden: bool) -> CoreResult<Self> {
        let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Ok(Self {
            current_dir: validate_dir(&resolve(dir, &base))?,
            show_hidden,
        })
    }

    /// Picks the first usable start directory: `preferred`, then `$HOME`,
    /// then the working directory, then the filesystem root.
    pub fn initial(preferred: Option<&Path>, show_hidden: bool) -> Self {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(home_dir())
            .chain(std::env::current_dir().ok());

        for candidate in candidates {
            match Self::new(&candidate, show_hidden) {
                Ok(state) => return state,
                Err(err) => {
                    tracing::warn!(dir = %candidate.display(), error = %err, "unusable start directory")
                }
            }
        }
        Self {
            current_dir: PathBuf::from("/"),
            show_hidden,
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// Moves to `path`, resolved against the current directory.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the path does not exist.
    /// - [`CoreError::NotADirectory`] if it is not a directory.
    /// - [`CoreError::PermissionDenied`] if it cannot be inspected.
    pub fn navigate_to(&self, path: &Path) -> CoreResult<Self> {
        let target = validate_dir(&resolve(path, &self.current_dir))?;
        tracing::debug!(from = %self.current_dir.display(), to = %target.display(), "navigate");
        Ok(Self {
            current_dir: target,
            show_hidden: self.show_hidden,
        })
    }

    /// Moves to the parent directory. Returns `None` at a filesystem root.
    ///
    /// # Errors
    ///
    /// Same as [`NavigationState::navigate_to`], e.g. when the parent was
    /// removed behind our back.
    pub fn go_up(&self) -> Option<CoreResult<Self>> {
        let parent = self.current_dir.parent()?;
        Some(self.navigate_to(parent))
    }

    pub fn toggle_hidden(&self) -> Self {
        Self {
            current_dir: self.current_dir.clone(),
            show_hidden: !self.show_hidden,
        }
    }
}

/// Returns `$HOME` if it is set and non-empty.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Expands `~` and `~/...` to the home directory and resolves relative
/// input against `base`. Surrounding whitespace is ignored.
pub fn expand_user(input: &str, base: &Path) -> PathBuf {
    let input = input.trim();
    let expanded = match (input, home_dir()) {
        ("~", Some(home)) => home,
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        (s, _) => PathBuf::from(s),
    };
    resolve(&expanded, base)
}

fn resolve(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Lexically removes `.` and collapses `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push("/");
    }
    out
}

fn validate_dir(path: &Path) -> CoreResult<PathBuf> {
    let meta = std::fs::metadata(path).map_err(|e| CoreError::from_io(e, path))?;
    if !meta.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn new_rejects_files() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f.txt");
        fs::write(&file, "").unwrap();

        let result = NavigationState::new(&file, false);
        assert!(matches!(result.unwrap_err(), CoreError::NotADirectory(_)));
    }

    #[test]
    fn navigate_to_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let nav = NavigationState::new(tmp.path(), false).unwrap();
        let moved = nav.navigate_to(&sub).unwrap();

        assert_eq!(moved.current_dir(), sub);
        assert!(!moved.show_hidden());
    }

    #[test]
    fn navigate_to_relative_path() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a").join("b")).unwrap();

        let nav = NavigationState::new(&tmp.path().join("a"), false).unwrap();
        let moved = nav.navigate_to(Path::new("b")).unwrap();
        assert_eq!(moved.current_dir(), tmp.path().join("a").join("b"));

        let back = moved.navigate_to(Path::new("../..")).unwrap();
        assert_eq!(back.current_dir(), tmp.path());
    }

    #[test]
    fn navigate_to_file_keeps_state() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f.txt");
        fs::write(&file, "").unwrap();

        let nav = NavigationState::new(tmp.path(), false).unwrap();
        let result = nav.navigate_to(&file);

        assert!(matches!(result.unwrap_err(), CoreError::NotADirectory(_)));
        assert_eq!(nav.current_dir(), tmp.path());
    }

    #[test]
    fn navigate_to_missing_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let nav = NavigationState::new(tmp.path(), false).unwrap();

        let result = nav.navigate_to(&tmp.path().join("ghost"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn go_up_moves_to_parent() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let nav = NavigationState::new(&sub, true).unwrap();
        let up = nav.go_up().unwrap().unwrap();

        assert_eq!(up.current_dir(), tmp.path());
        assert!(up.show_hidden());
    }

    #[test]
    fn go_up_at_root_is_none() {
        let nav = NavigationState::new(Path::new("/"), false).unwrap();
        assert!(nav.go_up().is_none());
    }

    #[test]
    fn toggle_hidden_flips_flag_only() {
        let tmp = TempDir::new().unwrap();
        let nav = NavigationState::new(tmp.path(), false).unwrap();

        let toggled = nav.toggle_hidden();
        assert!(toggled.show_hidden());
        assert_eq!(toggled.current_dir(), nav.current_dir());
        assert_eq!(toggled.toggle_hidden(), nav);
    }

    #[test]
    fn initial_falls_back_when_preferred_is_bad() {
        let tmp = TempDir::new().unwrap();
        let ghost = tmp.path().join("ghost");

        let nav = NavigationState::initial(Some(&ghost), false);

        assert_ne!(nav.current_dir(), ghost);
        assert!(nav.current_dir().is_dir());
    }

    #[test]
    fn initial_uses_preferred_when_valid() {
        let tmp = TempDir::new().unwrap();
        let nav = NavigationState::initial(Some(tmp.path()), false);
        assert_eq!(nav.current_dir(), tmp.path());
    }

    #[test]
    fn expand_user_relative_and_absolute() {
        let base = Path::new("/srv/data");
        assert_eq!(expand_user("logs", base), PathBuf::from("/srv/data/logs"));
        assert_eq!(expand_user("  /etc  ", base), PathBuf::from("/etc"));
        assert_eq!(expand_user("../x/./y", base), PathBuf::from("/srv/x/y"));
    }

    #[test]
    fn expand_user_tilde() {
        if let Some(home) = home_dir() {
            let base = Path::new("/");
            assert_eq!(expand_user("~", base), normalize(&home));
            assert_eq!(expand_user("~/docs", base), normalize(&home.join("docs")));
        }
    }

    #[test]
    fn normalize_never_climbs_above_root() {
        assert_eq!(normalize(Path::new("/../..")), PathBuf::from("/"));
    }
}
