//! src/main.rs
//! Dual-pane file manager TUI

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, warn};

use commander_core::{
    Logger,
    config::Config,
    controller::EventLoop,
    fs::file_system::LocalFileSystem,
    model::app_state::AppState,
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    setup_panic_handler();

    let (config, config_error) = match Config::load().await {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let _log_guard = Logger::init_tracing(&config.logging).context("Failed to initialize logging")?;
    info!("Starting commander");
    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {e:#}");
    }

    let left: PathBuf = start_path(config.left_path.as_deref(), Path::new(".")).await?;
    let right: PathBuf = start_path(config.right_path.as_deref(), Path::new("/")).await?;

    let app_state = AppState::new(left, right, config.show_hidden);
    let mut event_loop = EventLoop::new(app_state, Arc::new(LocalFileSystem::new()), config.page_size);

    let mut terminal = TerminalGuard::new().context("Failed to initialize terminal")?;
    let outcome = event_loop.run(&mut terminal.terminal).await;
    drop(terminal);

    outcome.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

/// Canonical start directory: the configured one if usable, else `fallback`.
async fn start_path(configured: Option<&Path>, fallback: &Path) -> Result<PathBuf> {
    if let Some(path) = configured {
        match tokio::fs::canonicalize(path).await {
            Ok(path) if path.is_dir() => return Ok(path),
            Ok(path) => warn!("Configured start path {} is not a directory", path.display()),
            Err(e) => warn!("Configured start path {} unusable: {e}", path.display()),
        }
    }

    tokio::fs::canonicalize(fallback)
        .await
        .with_context(|| format!("Failed to resolve {}", fallback.display()))
}

/// Raw mode plus alternate screen for as long as it lives.
struct TerminalGuard {
    terminal: AppTerminal,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        info!("Terminal setup complete");
        Ok(Self { terminal })
    }

    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        info!("Terminal cleanup complete");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            warn!("Failed to cleanup terminal: {e}");
        }
    }
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
