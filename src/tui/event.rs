use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};

use crate::core::action::Action;
use crate::tui::keymap;

/// Wait up to `timeout` for a terminal event and translate it.
///
/// Returns `Ok(None)` on timeout, for key releases and for non-key events
/// other than resizes.
pub fn poll_action(timeout: Duration) -> io::Result<Option<Action>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let action = match event::read()? {
        Event::Key(key) => keymap::action_for(&key),
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    };
    Ok(action)
}

/// Drain events that are already queued, without blocking.
pub fn poll_action_immediate() -> io::Result<Option<Action>> {
    poll_action(Duration::ZERO)
}
