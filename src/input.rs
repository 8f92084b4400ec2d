use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Pause,
    Restart,
    Quit,
    None,
}

pub fn map_key(ev: &KeyEvent) -> KeyAction {
    if is_ctrl_c(ev) {
        return KeyAction::Quit;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => KeyAction::Turn(Direction::Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => KeyAction::Turn(Direction::Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => KeyAction::Turn(Direction::Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => KeyAction::Turn(Direction::Right),
        KeyCode::Esc => KeyAction::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn arrows_and_wasd_turn() {
        assert_eq!(map_key(&key(KeyCode::Up)), KeyAction::Turn(Direction::Up));
        assert_eq!(map_key(&key(KeyCode::Char('w'))), KeyAction::Turn(Direction::Up));
        assert_eq!(map_key(&key(KeyCode::Left)), KeyAction::Turn(Direction::Left));
        assert_eq!(map_key(&key(KeyCode::Char('a'))), KeyAction::Turn(Direction::Left));
        assert_eq!(map_key(&key(KeyCode::Down)), KeyAction::Turn(Direction::Down));
        assert_eq!(map_key(&key(KeyCode::Char('S'))), KeyAction::Turn(Direction::Down));
        assert_eq!(map_key(&key(KeyCode::Right)), KeyAction::Turn(Direction::Right));
        assert_eq!(map_key(&key(KeyCode::Char('d'))), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn controls() {
        assert_eq!(map_key(&key(KeyCode::Esc)), KeyAction::Pause);
        assert_eq!(map_key(&key(KeyCode::Char('r'))), KeyAction::Restart);
        assert_eq!(map_key(&key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(map_key(&key(KeyCode::Char('x'))), KeyAction::None);
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert!(is_ctrl_c(&ev));
        assert_eq!(map_key(&ev), KeyAction::Quit);
        assert!(!is_ctrl_c(&key(KeyCode::Char('c'))));
    }
}
