// commander-core/src/model/app_state.rs
// Top-level state machine: two panes, terminal size, status and error lines

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use crate::controller::{
    actions::{Action, Effect, KeyCommand},
    dispatcher::{self, Dispatch, OperationKind, OperationResult},
};
use crate::error::AppError;
use crate::fs::entry::Entry;
use crate::model::fs_state::{FSState, PANE_COUNT};

/// Columns reserved around a pane's content.
const PANE_WIDTH_CHROME: u16 = 4;

/// Rows taken by title, status and help lines plus the pane borders.
const PANE_HEIGHT_CHROME: u16 = 6;

#[derive(Debug, Clone)]
pub struct AppState {
    pub fs: FSState,

    /// Terminal size as last reported.
    pub width: u16,
    pub height: u16,

    /// Listing failure. Once set it stays for the rest of the session.
    pub last_error: Option<AppError>,

    /// Transient status line.
    pub status: Option<String>,

    pub redraw: bool,
    pub should_quit: bool,
}

impl AppState {
    #[must_use]
    pub fn new(left: PathBuf, right: PathBuf, show_hidden: bool) -> Self {
        info!(
            "AppState: left={} right={} show_hidden={show_hidden}",
            left.display(),
            right.display()
        );

        Self {
            fs: FSState::new(left, right, show_hidden),
            width: 0,
            height: 0,
            last_error: None,
            status: None,
            redraw: true,
            should_quit: false,
        }
    }

    /// Initial listing of both panes.
    pub fn init_effects(&mut self) -> Vec<Effect> {
        (0..PANE_COUNT).map(|pane| self.reload(pane)).collect()
    }

    /// Drawing size of one pane, `(columns, rows)`.
    #[must_use]
    pub const fn pane_size(&self) -> (u16, u16) {
        (
            (self.width / 2).saturating_sub(PANE_WIDTH_CHROME),
            self.height.saturating_sub(PANE_HEIGHT_CHROME),
        )
    }

    /// Rows of entries a pane shows at once.
    #[must_use]
    pub const fn viewport_height(&self) -> usize {
        self.pane_size().1 as usize
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        let message: String = message.into();
        debug!("status: {message}");
        self.status = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Make `err` the sticky error shown full screen.
    pub fn set_error(&mut self, err: AppError) {
        warn!("sticky error: {err}");
        self.last_error = Some(err);
    }

    /// Apply one message. Returns the I/O the caller must perform.
    #[instrument(level = "debug", skip_all)]
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        self.redraw = true;

        match action {
            Action::Resize { width, height } => {
                debug!("resize: {width}x{height}");
                self.width = width;
                self.height = height;
                Vec::new()
            }

            Action::DirectoryListed { pane, path, result } => {
                self.on_directory_listed(pane, path, result);
                Vec::new()
            }

            Action::OperationFinished(result) => self.on_operation_finished(&result),

            Action::Key(command) => self.on_key(command),
        }
    }

    fn on_directory_listed(
        &mut self,
        pane: usize,
        path: PathBuf,
        result: Result<Vec<Entry>, AppError>,
    ) {
        let Some(target) = self.fs.panes.get_mut(pane) else {
            warn!("listing for unknown pane {pane} dropped");
            return;
        };

        if target.path != path {
            debug!(
                "stale listing for {} dropped, pane {pane} now shows {}",
                path.display(),
                target.path.display()
            );
            return;
        }

        match result {
            Ok(entries) => {
                debug!("pane {pane}: {} entries in {}", entries.len(), path.display());
                target.apply_listing(entries);
            }
            Err(err) => {
                target.is_loading = false;
                self.set_error(err);
            }
        }
    }

    fn on_operation_finished(&mut self, result: &OperationResult) -> Vec<Effect> {
        self.set_status(result.status_message());

        if !result.is_success() {
            return Vec::new();
        }

        result
            .affected_panes()
            .into_iter()
            .map(|pane| self.reload(pane))
            .collect()
    }

    fn on_key(&mut self, command: KeyCommand) -> Vec<Effect> {
        let active: usize = self.fs.active_pane;

        match command {
            KeyCommand::Quit => {
                info!("quit requested");
                self.should_quit = true;
                vec![Effect::Quit]
            }

            KeyCommand::SwitchPane => {
                self.fs.switch_pane();
                self.clear_status();
                Vec::new()
            }

            KeyCommand::MoveCursor(delta) => {
                self.fs.active_pane_mut().move_cursor(delta);
                Vec::new()
            }

            KeyCommand::EnterSelected => {
                if self.fs.active_pane_mut().enter_selected() {
                    vec![self.reload(active)]
                } else {
                    Vec::new()
                }
            }

            KeyCommand::GoToParent => {
                self.fs.active_pane_mut().go_to_parent();
                vec![self.reload(active)]
            }

            KeyCommand::ToggleHidden => {
                let shown: bool = self.fs.active_pane_mut().toggle_hidden();
                self.set_status(format!("Hidden files: {}", if shown { "on" } else { "off" }));
                Vec::new()
            }

            KeyCommand::Operation(kind) => self.on_operation(kind),
        }
    }

    fn on_operation(&mut self, kind: OperationKind) -> Vec<Effect> {
        let (source, dest) = self.fs.source_and_dest();

        match dispatcher::dispatch(kind, self.fs.active_pane, source, dest) {
            Dispatch::Rejected(message) => {
                self.set_status(message);
                Vec::new()
            }
            Dispatch::Spawn { request, status } => {
                self.set_status(status);
                vec![Effect::Spawn(request)]
            }
        }
    }

    fn reload(&mut self, pane: usize) -> Effect {
        let target = &mut self.fs.panes[pane];
        target.mark_loading();
        Effect::Reload {
            pane,
            path: target.path.clone(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        let fs = FSState::default();
        let [left, right] = fs.panes.map(|pane| pane.path);
        Self::new(left, right, false)
    }
}
