//! src/view/components/status_bar.rs
//!
//! Status line (last message) and the fixed key help line below it.

use crate::view::theme;
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

pub const HELP_TEXT: &str = "Tab: switch | ↑↓ PgUp PgDn: move | Enter: open | Backspace: up | \
                             h: hidden | c/F5: copy | r/F6: move | d/F8: delete | q: quit";

pub struct StatusBar<'a> {
    status: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub const fn new(status: Option<&'a str>) -> Self {
        Self { status }
    }

    pub fn render(&self, frame: &mut Frame<'_>, status_area: Rect, help_area: Rect) {
        Paragraph::new(self.status.unwrap_or_default())
            .style(theme::status_style())
            .alignment(Alignment::Left)
            .render(status_area, frame.buffer_mut());

        Paragraph::new(HELP_TEXT)
            .style(theme::help_style())
            .alignment(Alignment::Left)
            .render(help_area, frame.buffer_mut());
    }
}
