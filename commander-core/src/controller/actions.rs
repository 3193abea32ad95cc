//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Messages In, Effects Out
//!
//! `Action` is everything `AppState::handle` reacts to: terminal input already
//! mapped to a `KeyCommand`, resizes, and completions coming back from
//! background tasks. `Effect` is the I/O the state machine asks the event loop
//! to perform in return.

use std::path::PathBuf;

use crate::{
    controller::dispatcher::{OperationKind, OperationRequest, OperationResult},
    error::AppError,
    fs::entry::Entry,
};

/// A key press the panes understand. Anything else never becomes a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    SwitchPane,

    /// Relative move in full space; `±1` for arrows, `±page_size` for paging.
    MoveCursor(isize),

    EnterSelected,
    GoToParent,
    ToggleHidden,
    Operation(OperationKind),
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Terminal size changed (also sent once at startup).
    Resize { width: u16, height: u16 },

    /// A listing requested by `Effect::Reload` has finished.
    DirectoryListed {
        pane: usize,
        path: PathBuf,
        result: Result<Vec<Entry>, AppError>,
    },

    /// A copy/move/delete task has finished.
    OperationFinished(OperationResult),

    Key(KeyCommand),
}

/// Work requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Quit,

    /// List `path` and deliver it back as `Action::DirectoryListed`.
    Reload { pane: usize, path: PathBuf },

    /// Run the operation and deliver `Action::OperationFinished`.
    Spawn(OperationRequest),
}
