//! ``src/model/fs_state.rs``
//! ============================================================================
//! # `FSState`: Two-Pane Filesystem State
//!
//! `PaneState` owns one directory view: its path, the raw listing, a cursor
//! in full-entry space, the viewport offset in visible space and the
//! hidden-file flag. `FSState` owns exactly two panes and the focus index.
//!
//! Panes never sort. The listing collaborator hands entries over in display
//! order and a pane only ever replaces them wholesale.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::fs::entry::Entry;
use crate::model::{entry_filter, viewport};

/// Number of panes. The layout and the tab key assume two.
pub const PANE_COUNT: usize = 2;

/// Everything the renderer needs to draw one pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLines<'a> {
    pub path: &'a Path,
    pub show_hidden: bool,
    pub is_loading: bool,

    /// The visible entries inside the viewport, top to bottom.
    pub lines: Vec<&'a Entry>,

    /// Row of the cursor within `lines`, if the pane has any visible entry.
    pub cursor: Option<usize>,

    /// Visible-space cursor (index into the whole visible projection).
    pub cursor_visible: usize,

    /// Row of the scrollbar thumb, `None` when everything fits.
    pub scrollbar_thumb: Option<usize>,

    /// Number of visible entries in the whole listing.
    pub total_visible: usize,
}

/// Single pane state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneState {
    /// The directory shown by this pane.
    pub path: PathBuf,

    /// Raw listing, hidden entries included.
    pub entries: Vec<Entry>,

    /// Full-space index into `entries`; `0` and inert when empty.
    pub cursor: usize,

    /// First drawn row, visible-space.
    pub viewport_offset: usize,

    /// Show dot-files.
    pub show_hidden: bool,

    /// A reload has been requested and not yet applied.
    pub is_loading: bool,
}

impl PaneState {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: Vec::new(),
            cursor: 0,
            viewport_offset: 0,
            show_hidden: false,
            is_loading: false,
        }
    }

    #[must_use]
    pub const fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    #[must_use]
    /// Entry under the cursor (if any).
    pub fn selected(&self) -> Option<&Entry> {
        self.entries.get(self.cursor)
    }

    /// The entry drawn under the cursor highlight.
    ///
    /// Differs from `selected` when the cursor rests on a hidden entry (right
    /// after a listing): the highlight then sits on the visible row the
    /// cursor maps to, and that row is what enter and operations act on.
    #[must_use]
    pub fn highlighted(&self) -> Option<&Entry> {
        let row: usize =
            entry_filter::to_visible_index(&self.entries, self.show_hidden, self.cursor);
        entry_filter::visible(&self.entries, self.show_hidden)
            .get(row)
            .copied()
    }

    /// Move the cursor by `delta` rows in full space.
    ///
    /// The target is clamped to the listing; if it lands on a filtered entry
    /// the cursor keeps stepping in the direction of travel until it reaches
    /// a visible entry or the boundary.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }

        let last: usize = self.entries.len() - 1;
        let mut cursor: usize = self.cursor.saturating_add_signed(delta).min(last);

        while !self.show_hidden && self.entries[cursor].is_hidden() {
            if delta > 0 && cursor < last {
                cursor += 1;
            } else if delta < 0 && cursor > 0 {
                cursor -= 1;
            } else {
                break;
            }
        }

        trace!(from = self.cursor, to = cursor, delta, "move_cursor");
        self.cursor = cursor;
    }

    /// Flip the hidden-file flag. The cursor stays on the same entry.
    pub const fn toggle_hidden(&mut self) -> bool {
        self.show_hidden = !self.show_hidden;
        self.show_hidden
    }

    /// Descend into the highlighted directory.
    ///
    /// Returns `true` when the path changed and a reload is pending. Files and
    /// empty panes are left alone.
    pub fn enter_selected(&mut self) -> bool {
        let Some(name) = self
            .highlighted()
            .filter(|entry| entry.is_dir)
            .map(|entry| entry.name.clone())
        else {
            return false;
        };

        let target: PathBuf = self.path.join(name.as_str());
        debug!("enter_selected: {} -> {}", self.path.display(), target.display());
        self.reset_to(target);
        true
    }

    /// Go up one directory. At a filesystem root the path stays the same.
    pub fn go_to_parent(&mut self) {
        let parent: PathBuf = parent_of(&self.path);
        debug!("go_to_parent: {} -> {}", self.path.display(), parent.display());
        self.reset_to(parent);
    }

    /// Merge a fresh listing, keeping the cursor where it was if possible.
    pub fn apply_listing(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
        self.is_loading = false;
    }

    /// Mark the pane as waiting for a listing of its current path.
    pub const fn mark_loading(&mut self) {
        self.is_loading = true;
    }

    /// Project the pane into the rows a viewport of `viewport_height` shows.
    ///
    /// Re-clamps and stores `viewport_offset` as a side effect.
    pub fn visible_lines(&mut self, viewport_height: usize) -> VisibleLines<'_> {
        let total_visible: usize = entry_filter::visible_count(&self.entries, self.show_hidden);
        let cursor_visible: usize =
            entry_filter::to_visible_index(&self.entries, self.show_hidden, self.cursor);

        self.viewport_offset = viewport::reclamp(
            self.viewport_offset,
            cursor_visible,
            total_visible,
            viewport_height,
        );

        let lines: Vec<&Entry> = entry_filter::visible(&self.entries, self.show_hidden)
            .into_iter()
            .skip(self.viewport_offset)
            .take(viewport_height)
            .collect();

        let cursor: Option<usize> = (!lines.is_empty())
            .then(|| cursor_visible - self.viewport_offset)
            .filter(|row| *row < lines.len());

        VisibleLines {
            path: &self.path,
            show_hidden: self.show_hidden,
            is_loading: self.is_loading,
            lines,
            cursor,
            cursor_visible,
            scrollbar_thumb: viewport::scrollbar_thumb(
                total_visible,
                viewport_height,
                cursor_visible,
            ),
            total_visible,
        }
    }

    fn reset_to(&mut self, path: PathBuf) {
        self.path = path;
        self.entries.clear();
        self.cursor = 0;
        self.viewport_offset = 0;
        self.is_loading = true;
    }
}

/// Parent directory, or `path` itself at a root.
fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

/// Both panes and which one has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FSState {
    pub panes: [PaneState; PANE_COUNT],

    /// Which pane is currently focused.
    pub active_pane: usize,
}

impl FSState {
    #[must_use]
    pub fn new(left: PathBuf, right: PathBuf, show_hidden: bool) -> Self {
        Self {
            panes: [
                PaneState::new(left).with_show_hidden(show_hidden),
                PaneState::new(right).with_show_hidden(show_hidden),
            ],
            active_pane: 0,
        }
    }

    /// Get the currently active pane as mutable.
    pub fn active_pane_mut(&mut self) -> &mut PaneState {
        &mut self.panes[self.active_pane]
    }

    #[must_use]
    /// Get the currently active pane as immutable.
    pub fn active_pane(&self) -> &PaneState {
        &self.panes[self.active_pane]
    }

    #[must_use]
    pub const fn inactive_index(&self) -> usize {
        (self.active_pane + 1) % PANE_COUNT
    }

    /// Move focus to the other pane.
    pub const fn switch_pane(&mut self) {
        self.active_pane = self.inactive_index();
    }

    #[must_use]
    /// Active pane as source, the other as destination.
    pub fn source_and_dest(&self) -> (&PaneState, &PaneState) {
        (&self.panes[self.active_pane], &self.panes[self.inactive_index()])
    }
}

impl Default for FSState {
    fn default() -> Self {
        Self::new(PathBuf::from("."), PathBuf::from("/"), false)
    }
}
