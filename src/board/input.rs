//! Keyboard navigation for the interactive board.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Something the viewer asked the board to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    Next,
    Previous,
    /// Zero-based slide index
    GoTo(usize),
    Quit,
}

/// Map a key press to a board command.
///
/// `→`/`l` next, `←`/`h` previous, `1`-`9` jump to a slide, `q`/`Esc`/`Ctrl+C`
/// quit. Raw mode swallows Ctrl+C as a key, so it is handled here rather than
/// by the signal thread.
pub fn command_for_key(key: &KeyEvent) -> Option<BoardCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(BoardCommand::Quit)
        }
        KeyCode::Right | KeyCode::Char('l') => Some(BoardCommand::Next),
        KeyCode::Left | KeyCode::Char('h') => Some(BoardCommand::Previous),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|digit| BoardCommand::GoTo(digit as usize - 1)),
        KeyCode::Char('q') | KeyCode::Esc => Some(BoardCommand::Quit),
        _ => None,
    }
}

/// Wait up to `timeout` for a key press that maps to a command.
pub fn poll_command(timeout: Duration) -> Result<Option<BoardCommand>> {
    if !event::poll(timeout).context("failed to poll terminal events")? {
        return Ok(None);
    }

    match event::read().context("failed to read terminal event")? {
        Event::Key(key) => Ok(command_for_key(&key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(command_for_key(&press(KeyCode::Right)), Some(BoardCommand::Next));
        assert_eq!(command_for_key(&press(KeyCode::Char('l'))), Some(BoardCommand::Next));
        assert_eq!(command_for_key(&press(KeyCode::Left)), Some(BoardCommand::Previous));
        assert_eq!(command_for_key(&press(KeyCode::Char('h'))), Some(BoardCommand::Previous));
    }

    #[test]
    fn test_digit_keys_are_one_based() {
        assert_eq!(command_for_key(&press(KeyCode::Char('1'))), Some(BoardCommand::GoTo(0)));
        assert_eq!(command_for_key(&press(KeyCode::Char('9'))), Some(BoardCommand::GoTo(8)));
        assert_eq!(command_for_key(&press(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(command_for_key(&press(KeyCode::Char('q'))), Some(BoardCommand::Quit));
        assert_eq!(command_for_key(&press(KeyCode::Esc)), Some(BoardCommand::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for_key(&ctrl_c), Some(BoardCommand::Quit));
        assert_eq!(command_for_key(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = press(KeyCode::Right);
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for_key(&release), None);
    }
}
