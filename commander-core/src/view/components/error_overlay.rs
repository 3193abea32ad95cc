//! src/view/components/error_overlay.rs
use crate::view::theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Full-screen error view shown while a listing error is pending.
pub struct ErrorOverlay {
    message: String,
}

impl ErrorOverlay {
    pub fn new(message: String) -> Self {
        Self { message }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::RED));

        let text = Paragraph::new(vec![
            Line::from(self.message.as_str()),
            Line::default(),
            Line::from("q: quit"),
        ])
        .block(block)
        .style(theme::error_style())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

        frame.render_widget(Clear, area);
        frame.render_widget(text, area);
    }
}
