//! src/view/theme.rs
//! ============================================================================
//! # Catppuccin Mocha Theme Color Palette
//!
//! Colors are from the official Catppuccin palette:
//! https://github.com/catppuccin/catppuccin

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const CURRENT_LINE: Color = Color::Rgb(69, 71, 90); // Surface1
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow

pub fn title_style() -> Style {
    Style::default()
        .fg(PURPLE)
        .bg(BACKGROUND)
        .add_modifier(Modifier::BOLD)
}

pub fn pane_border_style(active: bool) -> Style {
    if active {
        Style::default().fg(GREEN)
    } else {
        Style::default().fg(COMMENT)
    }
}

pub fn pane_title_style(active: bool) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    if active { style.fg(GREEN) } else { style.fg(COMMENT) }
}

pub fn directory_style() -> Style {
    Style::default().fg(CYAN)
}

pub fn file_style() -> Style {
    Style::default().fg(FOREGROUND)
}

pub fn cursor_style() -> Style {
    Style::default()
        .bg(CURRENT_LINE)
        .add_modifier(Modifier::BOLD)
}

pub fn scrollbar_track_style() -> Style {
    Style::default().fg(CURRENT_LINE)
}

pub fn scrollbar_thumb_style() -> Style {
    Style::default().fg(PURPLE)
}

pub fn status_style() -> Style {
    Style::default().fg(YELLOW).bg(BACKGROUND)
}

pub fn help_style() -> Style {
    Style::default().fg(COMMENT).bg(BACKGROUND)
}

pub fn error_style() -> Style {
    Style::default().fg(RED).bg(BACKGROUND)
}
