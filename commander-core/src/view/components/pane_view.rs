//! src/view/components/pane_view.rs

use crate::{
    model::fs_state::VisibleLines,
    view::{icons, theme},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
};

/// One directory pane: bordered table of the visible window plus a scrollbar.
pub struct PaneView<'a> {
    view: &'a VisibleLines<'a>,
    active: bool,

    /// Columns available for the name cell.
    name_width: u16,
}

impl<'a> PaneView<'a> {
    pub const fn new(view: &'a VisibleLines<'a>, active: bool, name_width: u16) -> Self {
        Self {
            view,
            active,
            name_width,
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        let hidden_marker: &str = if self.view.show_hidden { " (.*)" } else { "" };
        let loading_marker: &str = if self.view.is_loading { " …" } else { "" };
        format!(
            " {}{hidden_marker}{loading_marker} ",
            self.view.path.display()
        )
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title())
            .title_style(theme::pane_title_style(self.active))
            .border_style(theme::pane_border_style(self.active))
            .style(Style::default().bg(theme::BACKGROUND));

        let inner: Rect = block.inner(area);
        frame.render_widget(block, area);

        let (list_area, bar_area) = if self.view.scrollbar_thumb.is_some() {
            let [list, bar] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
            (list, Some(bar))
        } else {
            (inner, None)
        };

        self.render_entries(frame, list_area);

        if let (Some(bar), Some(thumb)) = (bar_area, self.view.scrollbar_thumb) {
            Self::render_scrollbar(frame, bar, thumb);
        }
    }

    fn render_entries(&self, frame: &mut Frame<'_>, area: Rect) {
        let max_name: usize = usize::from(self.name_width).max(1);

        let rows: Vec<Row<'_>> = self
            .view
            .lines
            .iter()
            .map(|entry| {
                let (style, size_str) = if entry.is_dir {
                    (theme::directory_style(), String::new())
                } else {
                    (theme::file_style(), entry.size_human())
                };

                let name: String = entry.to_string().chars().take(max_name).collect();

                Row::new(vec![
                    Cell::from(format!("{} {name}", icons::entry_icon(entry.is_dir))),
                    Cell::from(Text::from(size_str).alignment(Alignment::Right)),
                ])
                .style(style)
            })
            .collect();

        let widths = [Constraint::Fill(1), Constraint::Length(10)];

        // only the focused pane shows its cursor
        let selected: Option<usize> = self.view.cursor.filter(|_| self.active);
        let mut table_state = TableState::default().with_selected(selected);

        let table = Table::new(rows, widths)
            .row_highlight_style(theme::cursor_style())
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn render_scrollbar(frame: &mut Frame<'_>, area: Rect, thumb: usize) {
        let lines: Vec<Line<'_>> = (0..usize::from(area.height))
            .map(|row| {
                if row == thumb {
                    Line::styled(icons::SCROLL_THUMB, theme::scrollbar_thumb_style())
                } else {
                    Line::styled(icons::SCROLL_TRACK, theme::scrollbar_track_style())
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}
