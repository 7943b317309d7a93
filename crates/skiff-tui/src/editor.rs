//! External editor support.
//!
//! The TUI is suspended, the editor runs in the foreground, and the
//! terminal is restored afterwards. A save is detected by comparing the
//! file's modification time before and after.

use std::io;
use std::path::Path;
use std::time::SystemTime;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use skiff_core::EditOutcome;

/// Picks the editor command: config, then `$EDITOR`, then `vi`.
pub fn resolve_editor(configured: Option<&str>) -> String {
    configured
        .map(str::to_string)
        .filter(|c| !c.trim().is_empty())
        .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.trim().is_empty()))
        .unwrap_or_else(|| "vi".to_string())
}

/// Suspends the TUI, runs `editor` on `file_path`, then resumes.
pub fn launch_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    editor: &str,
    file_path: &Path,
) -> EditOutcome {
    let before = modified_time(file_path);

    if let Err(e) = suspend(terminal) {
        return EditOutcome::Failed(e.to_string());
    }
    let status = run_editor(editor, file_path);
    // Re-enter alternate screen regardless of editor result
    if let Err(e) = resume(terminal) {
        tracing::error!(error = %e, "failed to restore terminal after editor");
    }

    match status {
        Ok(()) => outcome_for(file_path, before, modified_time(file_path)),
        Err(e) => EditOutcome::Failed(e.to_string()),
    }
}

/// Runs the editor and waits for it. The command may carry arguments,
/// e.g. `code --wait`.
fn run_editor(editor: &str, file_path: &Path) -> anyhow::Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| anyhow::anyhow!("no editor configured"))?;
    let status = std::process::Command::new(program)
        .args(parts)
        .arg(file_path)
        .status()
        .map_err(|e| anyhow::anyhow!("failed to launch {program}: {e}"))?;
    if !status.success() {
        anyhow::bail!("{program} exited with {status}");
    }
    Ok(())
}

fn outcome_for(path: &Path, before: Option<SystemTime>, after: Option<SystemTime>) -> EditOutcome {
    if after.is_some() && after != before {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        EditOutcome::Saved(name)
    } else {
        EditOutcome::Cancelled
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn suspend(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn resume(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(())
}
