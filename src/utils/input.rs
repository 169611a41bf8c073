use crate::app::state::ControlButton;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Press(ControlButton),
    MouseClick { col: u16, row: u16 },
    None,
}

pub fn map_key(ev: KeyEvent) -> Action {
    if ev.kind == KeyEventKind::Release {
        return Action::None;
    }

    if ev.modifiers.contains(KeyModifiers::CONTROL) {
        return match ev.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Action::Quit,
            _ => Action::None,
        };
    }

    match ev.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => Action::Press(ControlButton::PlayPause),
        KeyCode::Left | KeyCode::Char('b') | KeyCode::Char('B') => Action::Press(ControlButton::Previous),
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('N') => Action::Press(ControlButton::Next),
        _ => Action::None,
    }
}

pub fn map_mouse(ev: MouseEvent) -> Action {
    if let MouseEventKind::Down(MouseButton::Left) = ev.kind {
        return Action::MouseClick {
            col: ev.column,
            row: ev.row,
        };
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys() {
        assert_eq!(map_key(key(KeyCode::Char(' '))), Action::Press(ControlButton::PlayPause));
        assert_eq!(map_key(key(KeyCode::Left)), Action::Press(ControlButton::Previous));
        assert_eq!(map_key(key(KeyCode::Char('n'))), Action::Press(ControlButton::Next));
        assert_eq!(map_key(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut ev = key(KeyCode::Char(' '));
        ev.kind = KeyEventKind::Release;
        assert_eq!(map_key(ev), Action::None);
    }
}
