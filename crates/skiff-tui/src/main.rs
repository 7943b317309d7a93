//! skiff: a terminal file manager built with ratatui.
//!
//! This binary initialises logging and the terminal, runs the main event
//! loop, and restores the terminal on exit or panic.

mod app;
mod dialog;
mod editor;
mod icons;
mod input;
mod jobs;
mod render;
mod ui;
mod watcher;

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use skiff_core::config::settings::LogConfig;
use skiff_core::{Config, Controller, FsJob, Keymap, NavigationState};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::input::{handle_key, InputAction};
use crate::jobs::{spawn_job, JobMessage};
use crate::render::render;
use crate::watcher::{DirWatcher, WatchMessage};

/// Terminal file manager.
#[derive(Debug, Parser)]
#[command(name = "skiff", version, about)]
struct Cli {
    /// Directory to open instead of the configured start directory.
    start_dir: Option<PathBuf>,

    /// Directory holding `config.toml` and `keymap.toml`.
    #[arg(long, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Show dotfiles from the start.
    #[arg(long)]
    show_hidden: bool,
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> anyhow::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// `--config`, then `./config` when present, then `~/.config/skiff`.
fn config_dir(cli: Option<PathBuf>) -> PathBuf {
    cli.unwrap_or_else(|| {
        if Path::new("config").is_dir() {
            PathBuf::from("config")
        } else {
            home().join(".config").join("skiff")
        }
    })
}

/// Logs go to a file so they never interfere with the terminal.
/// `RUST_LOG` overrides the configured level.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let path = log
        .file
        .clone()
        .unwrap_or_else(|| home().join(".cache").join("skiff").join("skiff.log"));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dir = config_dir(cli.config.clone());

    let (config, config_err) = match Config::load_or_default(&dir.join("config.toml")) {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let (keymap, keymap_err) = match Keymap::load_or_default(&dir.join("keymap.toml")) {
        Ok(k) => (k, None),
        Err(e) => (Keymap::default(), Some(e)),
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("skiff: logging disabled: {e}");
    }
    if let Some(e) = config_err {
        tracing::warn!(error = %e, "config.toml ignored, using defaults");
    }
    if let Some(e) = keymap_err {
        tracing::warn!(error = %e, "keymap.toml ignored, using defaults");
    }

    let start_dir = cli.start_dir.or_else(|| config.general.start_dir.clone());
    let nav = NavigationState::initial(
        start_dir.as_deref(),
        cli.show_hidden || config.general.show_hidden,
    );
    let (controller, status) = Controller::new(nav, (&config).into());
    let editor_cmd = editor::resolve_editor(config.editor.command.as_deref());
    let app = App::new(controller, status, &config, keymap);
    tracing::info!(dir = %app.current_dir().display(), "skiff started");

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, app, &editor_cmd).await;

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(terminal: &mut Term, mut app: App, editor_cmd: &str) -> anyhow::Result<()> {
    let (job_tx, mut job_rx) = mpsc::unbounded_channel::<JobMessage>();

    // Set up file watcher
    let (watch_tx, watch_rx) = std_mpsc::channel::<WatchMessage>();
    let mut dir_watcher = match DirWatcher::new(watch_tx) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!(error = %e, "file watcher unavailable");
            None
        }
    };
    let mut prev_dir = PathBuf::new();

    loop {
        // 1. Drain finished jobs
        while let Ok(msg) = job_rx.try_recv() {
            app.complete_job(msg);
        }

        // 2. Drain file watcher messages
        let mut changed = false;
        while let Ok(msg) = watch_rx.try_recv() {
            match msg {
                WatchMessage::Changed => changed = true,
                WatchMessage::Error(e) => tracing::warn!("Watch error: {e}"),
            }
        }
        if changed && !app.is_busy() {
            app.refresh_listing();
        }

        // 3. Apply controller events
        app.sync_events();

        if app.current_dir() != prev_dir.as_path() {
            prev_dir = app.current_dir().to_path_buf();
            if let Some(ref mut w) = dir_watcher {
                if let Err(e) = w.watch(&prev_dir) {
                    tracing::warn!(dir = %prev_dir.display(), error = %e, "cannot watch directory");
                }
            }
        }

        terminal.draw(|f| render(f, &app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let action = handle_key(key, app.mode(), app.keymap());
        let job = apply(&mut app, action, terminal, editor_cmd);
        if let Some(job) = job {
            spawn_job(job, job_tx.clone());
        }

        if app.should_quit() {
            break;
        }
    }

    tracing::info!("skiff exiting");
    Ok(())
}

/// Applies one input action; returns a job to run in the background.
fn apply(app: &mut App, action: InputAction, terminal: &mut Term, editor_cmd: &str) -> Option<FsJob> {
    let mut editor = |path: &Path| editor::launch_editor(terminal, editor_cmd, path);
    match action {
        InputAction::Intent(intent) => {
            return app.run_intent(intent, dialog::Answer::None, &mut editor);
        }
        InputAction::PromptSubmit => return app.submit_prompt(&mut editor),
        InputAction::ConfirmApproved => return app.approve(&mut editor),
        InputAction::Cursor(motion) => app.move_cursor(motion),
        InputAction::FocusNext => app.focus_next(),
        InputAction::ShowHelp => app.show_help(),
        InputAction::PromptChar(c) => app.prompt_push(c),
        InputAction::PromptBackspace => app.prompt_pop(),
        InputAction::PromptClear => app.prompt_clear(),
        InputAction::Cancel => app.cancel(),
        InputAction::Quit => app.quit(),
        InputAction::None => {}
    }
    None
}
