//! ``src/controller/event_loop.rs``
//! ============================================================================
//! # Event Loop: the single owner of `AppState`
//!
//! Multiplexes terminal events and background task results with
//! `tokio::select!`, feeds them through `AppState::handle` and executes the
//! returned effects by spawning tasks that report back over an unbounded
//! channel. Nothing else mutates the state, so no lock is needed.

use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{Event as TermEvent, EventStream};
use futures::StreamExt;
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, trace, warn};

use crate::{
    controller::{
        actions::{Action, Effect},
        dispatcher::{self, OperationRequest, OperationResult},
        keymap,
    },
    error::AppError,
    fs::{entry::Entry, file_system::FileSystem},
    model::app_state::AppState,
    view::ui::View,
};

/// Completion message sent by a spawned task.
#[derive(Debug, Clone)]
pub enum TaskResult {
    Listing {
        pane: usize,
        path: PathBuf,
        result: Result<Vec<Entry>, AppError>,
    },

    Operation(OperationResult),
}

impl From<TaskResult> for Action {
    fn from(result: TaskResult) -> Self {
        match result {
            TaskResult::Listing { pane, path, result } => {
                Self::DirectoryListed { pane, path, result }
            }
            TaskResult::Operation(result) => Self::OperationFinished(result),
        }
    }
}

pub struct EventLoop {
    app: AppState,
    fs: Arc<dyn FileSystem>,
    task_tx: UnboundedSender<TaskResult>,
    task_rx: UnboundedReceiver<TaskResult>,
    page_size: usize,
}

impl EventLoop {
    pub fn new(app: AppState, fs: Arc<dyn FileSystem>, page_size: usize) -> Self {
        info!("Initializing event loop (page size {page_size})");
        let (task_tx, task_rx) = mpsc::unbounded_channel();

        Self {
            app,
            fs,
            task_tx,
            task_rx,
            page_size,
        }
    }

    #[must_use]
    pub const fn app(&self) -> &AppState {
        &self.app
    }

    /// Draw, wait for the next event or task result, apply it; until quit.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let size = terminal
            .size()
            .map_err(|e| AppError::Terminal(e.to_string()))?;
        self.apply(Action::Resize {
            width: size.width,
            height: size.height,
        });

        let initial: Vec<Effect> = self.app.init_effects();
        self.execute(initial);

        let mut events = EventStream::new();

        while !self.app.should_quit {
            if self.app.redraw {
                terminal
                    .draw(|frame| View::redraw(frame, &mut self.app))
                    .map_err(|e| AppError::Terminal(e.to_string()))?;
                self.app.redraw = false;
            }

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => {
                        if let Some(action) = self.map_terminal_event(event) {
                            self.apply(action);
                        }
                    }
                    Some(Err(e)) => return Err(AppError::Terminal(e.to_string())),
                    None => {
                        info!("Terminal event stream closed");
                        break;
                    }
                },

                Some(result) = self.task_rx.recv() => {
                    debug!("Task result received: {:?}", result);
                    self.apply(result.into());
                }
            }
        }

        info!("Event loop finished");
        Ok(())
    }

    /// Translate a raw terminal event; unbound keys and mouse input yield `None`.
    fn map_terminal_event(&self, event: TermEvent) -> Option<Action> {
        match event {
            TermEvent::Key(key) => keymap::map_key(key, self.page_size).map(Action::Key),

            TermEvent::Resize(width, height) => {
                info!("Terminal resize: {width}x{height}");
                Some(Action::Resize { width, height })
            }

            other => {
                trace!("Unhandled terminal event: {:?}", other);
                None
            }
        }
    }

    /// Feed one action through the state machine and run its effects.
    pub fn apply(&mut self, action: Action) {
        let effects: Vec<Effect> = self.app.handle(action);
        self.execute(effects);
    }

    fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Quit => debug!("quit effect"),
                Effect::Reload { pane, path } => self.spawn_listing(pane, path),
                Effect::Spawn(request) => self.spawn_operation(request),
            }
        }
    }

    fn spawn_listing(&self, pane: usize, path: PathBuf) {
        let fs: Arc<dyn FileSystem> = Arc::clone(&self.fs);
        let tx: UnboundedSender<TaskResult> = self.task_tx.clone();

        trace!("spawn listing of {} for pane {pane}", path.display());
        tokio::spawn(async move {
            let result = fs.list_directory(&path).await;
            if let Err(e) = &result {
                warn!("listing {} failed: {e}", path.display());
            }

            if tx.send(TaskResult::Listing { pane, path, result }).is_err() {
                debug!("result channel closed, listing dropped");
            }
        });
    }

    fn spawn_operation(&self, request: OperationRequest) {
        let fs: Arc<dyn FileSystem> = Arc::clone(&self.fs);
        let tx: UnboundedSender<TaskResult> = self.task_tx.clone();

        info!(id = %request.id, "spawn {} of {}", request.kind, request.entry_name);
        tokio::spawn(async move {
            let result: OperationResult = dispatcher::execute(fs.as_ref(), &request).await;

            if tx.send(TaskResult::Operation(result)).is_err() {
                debug!("result channel closed, operation result dropped");
            }
        });
    }

    /// Wait for the next task result and apply it. `None` once the channel is closed.
    pub async fn pump_task_result(&mut self) -> Option<()> {
        let result: TaskResult = self.task_rx.recv().await?;
        self.apply(result.into());
        Some(())
    }
}
