//! ``src/controller/keymap.rs``
//!
//! Fixed key bindings for navigation mode.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use crate::controller::{actions::KeyCommand, dispatcher::OperationKind};

/// Map a terminal key event to a command, or `None` if the key is unbound.
///
/// `page_size` is the distance moved by PageUp/PageDown.
#[must_use]
pub fn map_key(key: KeyEvent, page_size: usize) -> Option<KeyCommand> {
    // Windows reports releases as well
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let page: isize = isize::try_from(page_size).unwrap_or(isize::MAX);

    let command: Option<KeyCommand> = match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), _) => {
            Some(KeyCommand::Quit)
        }

        (KeyCode::Tab, _) => Some(KeyCommand::SwitchPane),

        (KeyCode::Up, _) => Some(KeyCommand::MoveCursor(-1)),
        (KeyCode::Down, _) => Some(KeyCommand::MoveCursor(1)),
        (KeyCode::PageUp, _) => Some(KeyCommand::MoveCursor(-page)),
        (KeyCode::PageDown, _) => Some(KeyCommand::MoveCursor(page)),

        (KeyCode::Enter, _) => Some(KeyCommand::EnterSelected),
        (KeyCode::Backspace, _) => Some(KeyCommand::GoToParent),

        (KeyCode::Char('h'), KeyModifiers::NONE) => Some(KeyCommand::ToggleHidden),

        (KeyCode::Char('c'), KeyModifiers::NONE) | (KeyCode::F(5), _) => {
            Some(KeyCommand::Operation(OperationKind::Copy))
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) | (KeyCode::F(6), _) => {
            Some(KeyCommand::Operation(OperationKind::Move))
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::F(8), _) => {
            Some(KeyCommand::Operation(OperationKind::Delete))
        }

        _ => None,
    };

    trace!(code = ?key.code, modifiers = ?key.modifiers, ?command, "map_key");
    command
}
