//! src/view/icons.rs
//! ============================================================================
//! # Pane Glyphs
//!
//! Plain Unicode so panes render without a patched font.

pub const FOLDER_ICON: &str = "📁";
pub const FILE_ICON: &str = "📄";

pub const SCROLL_TRACK: &str = "│";
pub const SCROLL_THUMB: &str = "█";

#[must_use]
pub const fn entry_icon(is_dir: bool) -> &'static str {
    if is_dir { FOLDER_ICON } else { FILE_ICON }
}
