//! ``src/controller/dispatcher.rs``
//! ============================================================================
//! # Operation Dispatcher: copy, move and delete requests
//!
//! `dispatch` is the synchronous half: it validates the selection, snapshots
//! the paths involved and produces the optimistic status line. `execute` is
//! the asynchronous half that runs on a spawned task against a `FileSystem`
//! and reports back an `OperationResult`. Neither half touches pane state.

use std::fmt;
use std::path::PathBuf;

use compact_str::CompactString;
use smallvec::{SmallVec, smallvec};
use tracing::{info, warn};

use crate::{
    error::AppError,
    fs::file_system::FileSystem,
    model::fs_state::{PANE_COUNT, PaneState},
};

/// Types of file operations supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Copy,
    Move,
    Delete,
}

impl OperationKind {
    /// Status-line verb while the task runs.
    #[must_use]
    pub const fn progressive(self) -> &'static str {
        match self {
            Self::Copy => "Copying",
            Self::Move => "Moving",
            Self::Delete => "Deleting",
        }
    }

    /// Status-line verb once the task succeeded.
    #[must_use]
    pub const fn past(self) -> &'static str {
        match self {
            Self::Copy => "Copied",
            Self::Move => "Moved",
            Self::Delete => "Deleted",
        }
    }

    #[must_use]
    pub const fn needs_destination(self) -> bool {
        matches!(self, Self::Copy | Self::Move)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ret_str: &'static str = match *self {
            Self::Copy => "Copy",
            Self::Move => "Move",
            Self::Delete => "Delete",
        };

        write!(f, "{ret_str}")
    }
}

/// A validated operation, with every path resolved at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub id: String,
    pub kind: OperationKind,
    pub entry_name: CompactString,
    pub is_dir: bool,
    pub source_pane: usize,
    pub source_path: PathBuf,

    /// `None` for deletes.
    pub dest_path: Option<PathBuf>,
}

/// Outcome of `execute`, self-contained so results may arrive in any order.
#[derive(Debug, Clone)]
pub struct OperationResult {
    pub id: String,
    pub kind: OperationKind,
    pub entry_name: CompactString,
    pub source_pane: usize,
    pub error: Option<AppError>,
}

impl OperationResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The line shown in the status bar for this outcome.
    #[must_use]
    pub fn status_message(&self) -> String {
        match &self.error {
            Some(err) => format!("{} failed for {}: {err}", self.kind, self.entry_name),
            None => format!("{}: {}", self.kind.past(), self.entry_name),
        }
    }

    /// Panes whose listing is stale after this result.
    #[must_use]
    pub fn affected_panes(&self) -> SmallVec<[usize; PANE_COUNT]> {
        affected_panes(self.kind, self.source_pane)
    }
}

/// What the caller should do with a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing to run; show the message.
    Rejected(String),

    /// Run `request` in the background and show `status` meanwhile.
    Spawn {
        request: OperationRequest,
        status: String,
    },
}

/// Validate and snapshot an operation on the row highlighted in `source`.
///
/// `dest` is only consulted for copy and move.
#[must_use]
pub fn dispatch(
    kind: OperationKind,
    source_index: usize,
    source: &PaneState,
    dest: &PaneState,
) -> Dispatch {
    let Some(entry) = source.highlighted() else {
        return Dispatch::Rejected("Nothing selected".to_string());
    };

    let source_path: PathBuf = source.path.join(entry.name.as_str());

    let dest_path: Option<PathBuf> = if kind.needs_destination() {
        if dest.path == source.path {
            warn!(
                "{kind} of {} rejected: source and destination are the same directory",
                source_path.display()
            );
            return Dispatch::Rejected(format!(
                "Cannot {} {} onto itself",
                kind.to_string().to_lowercase(),
                entry.name
            ));
        }
        if entry.is_dir && dest.path.starts_with(&source_path) {
            warn!(
                "{kind} of {} rejected: destination {} is inside it",
                source_path.display(),
                dest.path.display()
            );
            return Dispatch::Rejected(format!(
                "Cannot {} {} into itself",
                kind.to_string().to_lowercase(),
                entry.name
            ));
        }
        Some(dest.path.join(entry.name.as_str()))
    } else {
        None
    };

    let status: String = match &dest_path {
        Some(_) => format!(
            "{}: {} -> {}",
            kind.progressive(),
            entry.name,
            dest.path.display()
        ),
        None => format!("{}: {}", kind.progressive(), entry.name),
    };

    let request = OperationRequest {
        id: nanoid::nanoid!(),
        kind,
        entry_name: entry.name.clone(),
        is_dir: entry.is_dir,
        source_pane: source_index,
        source_path,
        dest_path,
    };

    info!(
        id = %request.id,
        "dispatch {kind}: {} -> {:?}",
        request.source_path.display(),
        request.dest_path
    );

    Dispatch::Spawn { request, status }
}

/// Run `request` against `fs`. Never retries.
pub async fn execute(fs: &dyn FileSystem, request: &OperationRequest) -> OperationResult {
    let src: &std::path::Path = &request.source_path;

    let outcome: Result<(), AppError> = match (request.kind, &request.dest_path) {
        (OperationKind::Copy, Some(dst)) if request.is_dir => fs.copy_directory(src, dst).await,
        (OperationKind::Copy, Some(dst)) => fs.copy_file(src, dst).await,
        (OperationKind::Move, Some(dst)) => fs.move_entry(src, dst).await,
        (OperationKind::Delete, _) if request.is_dir => fs.delete_directory_recursive(src).await,
        (OperationKind::Delete, _) => fs.delete_file(src).await,
        (kind, None) => Err(AppError::file_operation_failed(
            kind.to_string(),
            src,
            "no destination",
        )),
    };

    match &outcome {
        Ok(()) => info!(id = %request.id, "{} finished: {}", request.kind, request.entry_name),
        Err(e) => warn!(id = %request.id, "{} failed: {}: {e}", request.kind, request.entry_name),
    }

    OperationResult {
        id: request.id.clone(),
        kind: request.kind,
        entry_name: request.entry_name.clone(),
        source_pane: request.source_pane,
        error: outcome.err(),
    }
}

/// Delete touches only its source pane; copy and move touch both.
#[must_use]
pub fn affected_panes(kind: OperationKind, source_pane: usize) -> SmallVec<[usize; PANE_COUNT]> {
    match kind {
        OperationKind::Delete => smallvec![source_pane],
        OperationKind::Copy | OperationKind::Move => {
            smallvec![source_pane, (source_pane + 1) % PANE_COUNT]
        }
    }
}
