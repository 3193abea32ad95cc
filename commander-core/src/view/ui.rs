//! src/view/ui.rs
//! ============================================================
//! Frame renderer. Draws the whole screen from `AppState`; the only
//! state it touches is each pane's viewport offset, re-clamped through
//! `PaneState::visible_lines`.

use ratatui::{prelude::*, widgets::Paragraph};
use tracing::{instrument, trace};

use crate::{
    model::{app_state::AppState, fs_state::PANE_COUNT},
    view::{
        components::{error_overlay::ErrorOverlay, pane_view::PaneView, status_bar::StatusBar},
        theme,
    },
};

pub const APP_TITLE: &str = "Commander";

pub struct View;

impl View {
    #[instrument(level = "trace", skip_all)]
    pub fn redraw(frame: &mut Frame<'_>, app: &mut AppState) {
        let screen: Rect = frame.area();

        if let Some(err) = &app.last_error {
            ErrorOverlay::new(err.to_string()).render(frame, screen);
            return;
        }

        let viewport_height: usize = app.viewport_height();
        let (name_width, pane_rows) = app.pane_size();

        let [title_area, panes_area, status_area, help_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(pane_rows.saturating_add(2)),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(screen);

        frame.render_widget(
            Paragraph::new(format!(" {APP_TITLE} ")).style(theme::title_style()),
            title_area,
        );

        let pane_areas: [Rect; PANE_COUNT] =
            Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .areas(panes_area);

        let active: usize = app.fs.active_pane;
        for (index, (pane, area)) in app.fs.panes.iter_mut().zip(pane_areas).enumerate() {
            let view = pane.visible_lines(viewport_height);
            trace!(
                pane = index,
                cursor = view.cursor_visible,
                rows = view.lines.len(),
                "draw pane"
            );
            PaneView::new(&view, index == active, name_width).render(frame, area);
        }

        StatusBar::new(app.status.as_deref()).render(frame, status_area, help_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controller::actions::{Action, KeyCommand},
        error::AppError,
        fs::entry::Entry,
    };
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with_entries() -> AppState {
        let mut app = AppState::new(PathBuf::from("/left"), PathBuf::from("/right"), false);
        app.handle(Action::Resize {
            width: 80,
            height: 24,
        });
        for (pane, path) in [(0, "/left"), (1, "/right")] {
            app.handle(Action::DirectoryListed {
                pane,
                path: PathBuf::from(path),
                result: Ok(vec![
                    Entry::dir(".git"),
                    Entry::dir("src"),
                    Entry::file("notes.txt", 2048),
                ]),
            });
        }
        app
    }

    #[test]
    fn draws_both_panes_status_and_help() {
        let mut app = app_with_entries();
        app.handle(Action::Key(KeyCommand::ToggleHidden));

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| View::redraw(frame, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains(APP_TITLE));
        assert!(text.contains("/left (.*)"));
        assert!(text.contains("/right"));
        assert!(!text.contains("/right (.*)"));
        assert!(text.contains(".git/"));
        assert!(text.contains("src/"));
        assert!(text.contains("notes.txt"));
        assert!(text.contains("Hidden files: on"));
        assert!(text.contains("Tab: switch"));
    }

    #[test]
    fn error_view_replaces_panes() {
        let mut app = app_with_entries();
        app.set_error(AppError::PermissionDenied(PathBuf::from("/root")));

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|frame| View::redraw(frame, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Error"));
        assert!(text.contains("permission denied: /root"));
        assert!(!text.contains("notes.txt"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = app_with_entries();
        app.handle(Action::Resize {
            width: 3,
            height: 2,
        });

        let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
        terminal.draw(|frame| View::redraw(frame, &mut app)).unwrap();
        assert_eq!(app.viewport_height(), 0);
        assert_eq!(app.fs.panes[0].viewport_offset, 0);
    }

    #[test]
    fn drawing_stores_reclamped_offset() {
        let mut app = AppState::new(PathBuf::from("/a"), PathBuf::from("/b"), false);
        app.handle(Action::Resize {
            width: 80,
            height: 16,
        });
        app.handle(Action::DirectoryListed {
            pane: 0,
            path: PathBuf::from("/a"),
            result: Ok((0..30).map(|i| Entry::file(format!("f{i:02}"), 1)).collect()),
        });
        app.handle(Action::Key(KeyCommand::MoveCursor(15)));

        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|frame| View::redraw(frame, &mut app)).unwrap();

        // 10 rows visible, cursor on 15
        assert_eq!(app.fs.panes[0].viewport_offset, 6);
        let text = screen_text(&terminal);
        assert!(text.contains("f15"));
        assert!(!text.contains("f05"));
    }
}
