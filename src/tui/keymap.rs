//! Physical keys → engine actions.
//!
//! | Action | Keys |
//! |---|---|
//! | `MoveLeft` / `MoveRight` | `←` `h` / `→` `l` |
//! | `MoveUp` / `MoveDown` | `↑` `k` / `↓` `j` |
//! | `Confirm` | `Enter` |
//! | `Back` | `Backspace` |
//! | `Quit` | `q`, `ctrl+c` |
//! | `HalfPageUp` / `HalfPageDown` | `ctrl+u` `PageUp` / `ctrl+d` `PageDown` |
//! | `ChordKey('g')` | `g` (twice = top) |
//! | `GotoBottom` | `G` |
//!
//! Any other key press maps to `Unbound`, which still reaches the reducer and
//! cancels a pending chord. Key releases map to `None`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use crate::core::action::Action;

pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('u') if ctrl => Action::HalfPageUp,
        KeyCode::Char('d') if ctrl => Action::HalfPageDown,
        _ if ctrl => Action::Unbound,

        KeyCode::Left | KeyCode::Char('h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::MoveRight,
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Backspace => Action::Back,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::PageUp => Action::HalfPageUp,
        KeyCode::PageDown => Action::HalfPageDown,
        KeyCode::Char('g') => Action::ChordKey('g'),
        KeyCode::Char('G') => Action::GotoBottom,
        _ => Action::Unbound,
    };
    debug!("Key {:?} ({:?}) → {:?}", key.code, key.modifiers, action);
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_arrows_and_vim_keys_agree() {
        assert_eq!(action_for(&key(KeyCode::Left)), action_for(&key(KeyCode::Char('h'))));
        assert_eq!(action_for(&key(KeyCode::Right)), action_for(&key(KeyCode::Char('l'))));
        assert_eq!(action_for(&key(KeyCode::Up)), Some(Action::MoveUp));
        assert_eq!(action_for(&key(KeyCode::Char('j'))), Some(Action::MoveDown));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for(&key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for(&ctrl('c')), Some(Action::Quit));
    }

    #[test]
    fn test_half_page_keys() {
        assert_eq!(action_for(&ctrl('u')), Some(Action::HalfPageUp));
        assert_eq!(action_for(&ctrl('d')), Some(Action::HalfPageDown));
        assert_eq!(action_for(&key(KeyCode::PageDown)), Some(Action::HalfPageDown));
    }

    #[test]
    fn test_chord_and_bottom() {
        assert_eq!(action_for(&key(KeyCode::Char('g'))), Some(Action::ChordKey('g')));
        let shifted = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(action_for(&shifted), Some(Action::GotoBottom));
    }

    #[test]
    fn test_unbound_keys_map_to_unbound() {
        assert_eq!(action_for(&key(KeyCode::Char('x'))), Some(Action::Unbound));
        assert_eq!(action_for(&key(KeyCode::Esc)), Some(Action::Unbound));
        assert_eq!(action_for(&ctrl('h')), Some(Action::Unbound));
    }

    #[test]
    fn test_unrelated_key_between_g_presses_breaks_chord() {
        use crate::core::action::update;
        use crate::test_support::{long_library, ready_session};

        let mut session = ready_session(long_library(), 80, 24);
        update(&mut session, Action::HalfPageDown);
        let offset = session.viewport.offset();
        assert!(offset > 0);

        for code in [KeyCode::Char('g'), KeyCode::Char('x'), KeyCode::Char('g')] {
            if let Some(action) = action_for(&key(code)) {
                update(&mut session, action);
            }
        }
        assert_eq!(session.viewport.offset(), offset);
        assert_eq!(session.pending_chord, Some('g'));

        let action = action_for(&key(KeyCode::Char('g'))).unwrap();
        update(&mut session, action);
        assert_eq!(session.viewport.offset(), 0);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(action_for(&release), None);
    }
}
