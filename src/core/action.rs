//! # Actions
//!
//! Everything that can happen to a session becomes an `Action`.
//! User presses → ? That's `Action::MoveRight`.
//! Terminal resized? That's `Action::Resize { width, height }`.
//! One second passed? That's `Action::Tick(now)`.
//!
//! The `update()` function takes the session and an action, mutates the
//! session, and returns an [`Effect`] telling the adapter what to do next.
//! No I/O here; the local terminal and the SSH server drive the same reducer.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```
//!
//! ## Rules
//!
//! - Until the first `Resize` arrives, only `Resize`, `Tick` and `Quit` do anything.
//! - `ChordKey(c)` twice in a row jumps to the top. Any other key in
//!   between cancels the pending chord, including one with no binding
//!   (`Unbound`).
//! - `Tick` only updates the clock. It never touches navigation, scroll or
//!   the pending chord.

use chrono::{DateTime, Local};
use log::{debug, info};

use crate::core::page::Page;
use crate::core::resolve;
use crate::core::state::{Geometry, HALF_PAGE, Session};
use crate::core::viewport::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Resize { width: u16, height: u16 },
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Confirm,
    Back,
    HalfPageUp,
    HalfPageDown,
    /// One key of a two-key "go to top" sequence.
    ChordKey(char),
    GotoBottom,
    /// A key press with no binding. Does nothing but break a pending chord.
    Unbound,
    Tick(DateTime<Local>),
    Quit,
}

/// What the adapter should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Redraw,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scroll {
    Top,
    Keep,
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    if !matches!(action, Action::Tick(_)) {
        debug!("Action: {:?}", action);
    }

    match action {
        Action::Quit => return Effect::Quit,
        Action::Resize { width, height } => return resize(session, width, height),
        Action::Tick(now) => {
            session.clock = Some(now);
            return if session.is_ready() {
                Effect::Redraw
            } else {
                Effect::None
            };
        }
        _ => {}
    }

    if !session.is_ready() {
        return Effect::None;
    }

    if let Action::ChordKey(key) = action {
        if session.pending_chord.take() == Some(key) {
            return goto_top(session);
        }
        session.pending_chord = Some(key);
        return Effect::None;
    }
    session.pending_chord = None;

    match action {
        Action::MoveLeft => {
            let target = session.page.previous();
            change_page(session, target)
        }
        Action::MoveRight => {
            let target = session.page.next();
            change_page(session, target)
        }
        Action::MoveUp if session.on_blog_index() => {
            let target = session.selected.checked_sub(1);
            select(session, target)
        }
        Action::MoveDown if session.on_blog_index() => {
            let next = session.selected + 1;
            let target = (next < session.post_count()).then_some(next);
            select(session, target)
        }
        Action::MoveUp => scroll(session, |vp| vp.scroll_up(1)),
        Action::MoveDown => scroll(session, |vp| vp.scroll_down(1)),
        Action::HalfPageUp => scroll(session, |vp| vp.scroll_up(HALF_PAGE)),
        Action::HalfPageDown => scroll(session, |vp| vp.scroll_down(HALF_PAGE)),
        Action::Confirm => open_post(session),
        Action::Back => close_post(session),
        Action::GotoBottom => goto_bottom(session),
        Action::Unbound => Effect::None,
        // Handled above
        Action::Resize { .. } | Action::Tick(_) | Action::ChordKey(_) | Action::Quit => {
            Effect::None
        }
    }
}

/// Re-render the current view into the viewport.
fn reload(session: &mut Session, scroll: Scroll) {
    let Some(geometry) = session.geometry else {
        return;
    };
    let text = resolve::page_text(session, geometry.width);
    session.viewport.set_content(text);
    if scroll == Scroll::Top {
        session.viewport.goto_top();
    }
}

fn resize(session: &mut Session, width: u16, height: u16) -> Effect {
    let geometry = Geometry {
        width: width.max(1),
        height: height.max(1),
    };
    let first = session.geometry.is_none();
    session.geometry = Some(geometry);
    session.viewport.set_height(geometry.body_height());

    if first {
        info!("Session ready at {}x{}", geometry.width, geometry.height);
        reload(session, Scroll::Top);
    } else {
        reload(session, Scroll::Keep);
    }
    Effect::Redraw
}

fn change_page(session: &mut Session, target: Option<Page>) -> Effect {
    if session.viewing_detail {
        return Effect::None;
    }
    let Some(page) = target else {
        return Effect::None;
    };
    session.page = page;
    reload(session, Scroll::Top);
    Effect::Redraw
}

fn select(session: &mut Session, target: Option<usize>) -> Effect {
    let Some(index) = target else {
        return Effect::None;
    };
    session.selected = index;
    reload(session, Scroll::Top);
    Effect::Redraw
}

fn scroll(session: &mut Session, f: impl FnOnce(&mut Viewport)) -> Effect {
    let before = session.viewport.offset();
    f(&mut session.viewport);
    if session.viewport.offset() == before {
        Effect::None
    } else {
        Effect::Redraw
    }
}

fn open_post(session: &mut Session) -> Effect {
    if !session.on_blog_index() || session.selected_post().is_none() {
        return Effect::None;
    }
    session.viewing_detail = true;
    reload(session, Scroll::Top);
    Effect::Redraw
}

fn close_post(session: &mut Session) -> Effect {
    if !session.viewing_detail {
        return Effect::None;
    }
    session.viewing_detail = false;
    session.clamp_selection();
    reload(session, Scroll::Top);
    Effect::Redraw
}

fn goto_top(session: &mut Session) -> Effect {
    if session.on_blog_index() {
        session.selected = 0;
    }
    reload(session, Scroll::Top);
    Effect::Redraw
}

fn goto_bottom(session: &mut Session) -> Effect {
    if session.on_blog_index() && session.post_count() > 0 {
        session.selected = session.post_count() - 1;
    }
    reload(session, Scroll::Keep);
    session.viewport.goto_bottom();
    Effect::Redraw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{empty_library, long_library, ready_session, sample_library};

    fn to_blog(session: &mut Session) {
        update(session, Action::MoveRight);
        update(session, Action::MoveRight);
        assert_eq!(session.page, Page::Blog);
    }

    #[test]
    fn test_actions_ignored_before_first_resize() {
        let mut session = Session::new(sample_library());
        assert_eq!(update(&mut session, Action::MoveRight), Effect::None);
        assert_eq!(update(&mut session, Action::ChordKey('g')), Effect::None);
        assert_eq!(session.page, Page::Home);
        assert!(session.pending_chord.is_none());
    }

    #[test]
    fn test_quit_works_before_ready() {
        let mut session = Session::new(sample_library());
        assert_eq!(update(&mut session, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_first_resize_loads_content() {
        let mut session = Session::new(sample_library());
        let effect = update(&mut session, Action::Resize { width: 80, height: 24 });
        assert_eq!(effect, Effect::Redraw);
        assert!(session.is_ready());
        assert_eq!(session.viewport.height(), 20);
        assert!(session.viewport.line_count() > 0);
        assert_eq!(session.viewport.offset(), 0);
    }

    #[test]
    fn test_resize_keeps_scroll_offset() {
        let mut session = ready_session(long_library(), 80, 24);
        update(&mut session, Action::HalfPageDown);
        assert_eq!(session.viewport.offset(), HALF_PAGE);
        update(&mut session, Action::Resize { width: 100, height: 30 });
        assert_eq!(session.viewport.offset(), HALF_PAGE);
    }

    #[test]
    fn test_resize_to_zero_is_clamped() {
        let mut session = Session::new(sample_library());
        update(&mut session, Action::Resize { width: 0, height: 0 });
        assert_eq!(session.geometry, Some(Geometry { width: 1, height: 1 }));
    }

    #[test]
    fn test_page_navigation_stops_at_ends() {
        let mut session = ready_session(sample_library(), 80, 24);
        assert_eq!(update(&mut session, Action::MoveLeft), Effect::None);
        assert_eq!(session.page, Page::Home);

        for _ in 0..10 {
            update(&mut session, Action::MoveRight);
        }
        assert_eq!(session.page, Page::Contact);
    }

    #[test]
    fn test_page_change_resets_scroll() {
        let mut session = ready_session(long_library(), 80, 24);
        update(&mut session, Action::HalfPageDown);
        update(&mut session, Action::MoveRight);
        assert_eq!(session.page, Page::Projects);
        assert_eq!(session.viewport.offset(), 0);
    }

    #[test]
    fn test_blog_index_selection_moves() {
        let mut session = ready_session(sample_library(), 80, 24);
        to_blog(&mut session);
        assert_eq!(update(&mut session, Action::MoveUp), Effect::None);
        assert_eq!(session.selected, 0);
        assert_eq!(update(&mut session, Action::MoveDown), Effect::Redraw);
        assert_eq!(session.selected, 1);
        assert_eq!(update(&mut session, Action::MoveDown), Effect::None);
        assert_eq!(session.selected, 1);
    }

    #[test]
    fn test_confirm_and_back() {
        let mut session = ready_session(sample_library(), 80, 24);
        to_blog(&mut session);
        update(&mut session, Action::MoveDown);
        assert_eq!(update(&mut session, Action::Confirm), Effect::Redraw);
        assert!(session.viewing_detail);
        assert_eq!(session.selected, 1);

        // Page changes are blocked while reading
        assert_eq!(update(&mut session, Action::MoveLeft), Effect::None);
        assert_eq!(session.page, Page::Blog);

        assert_eq!(update(&mut session, Action::Back), Effect::Redraw);
        assert!(!session.viewing_detail);
        assert_eq!(session.selected, 1);
    }

    #[test]
    fn test_confirm_outside_blog_does_nothing() {
        let mut session = ready_session(sample_library(), 80, 24);
        assert_eq!(update(&mut session, Action::Confirm), Effect::None);
        assert!(!session.viewing_detail);
        assert_eq!(update(&mut session, Action::Back), Effect::None);
    }

    #[test]
    fn test_confirm_without_posts_does_nothing() {
        let mut session = ready_session(empty_library(), 80, 24);
        to_blog(&mut session);
        assert_eq!(update(&mut session, Action::Confirm), Effect::None);
        assert!(!session.viewing_detail);
        assert_eq!(update(&mut session, Action::MoveDown), Effect::None);
    }

    #[test]
    fn test_chord_goes_to_top() {
        let mut session = ready_session(long_library(), 80, 24);
        update(&mut session, Action::HalfPageDown);
        assert_eq!(update(&mut session, Action::ChordKey('g')), Effect::None);
        assert_eq!(session.pending_chord, Some('g'));
        assert_eq!(session.viewport.offset(), HALF_PAGE);

        assert_eq!(update(&mut session, Action::ChordKey('g')), Effect::Redraw);
        assert_eq!(session.viewport.offset(), 0);
        assert!(session.pending_chord.is_none());
    }

    #[test]
    fn test_other_action_cancels_chord() {
        let mut session = ready_session(long_library(), 80, 24);
        update(&mut session, Action::ChordKey('g'));
        update(&mut session, Action::MoveDown);
        assert!(session.pending_chord.is_none());
        assert_eq!(session.viewport.offset(), 1);

        update(&mut session, Action::ChordKey('g'));
        assert_eq!(session.viewport.offset(), 1);
        assert_eq!(session.pending_chord, Some('g'));
    }

    #[test]
    fn test_goto_bottom_cancels_chord() {
        let mut session = ready_session(long_library(), 80, 24);
        update(&mut session, Action::ChordKey('g'));
        update(&mut session, Action::GotoBottom);
        assert!(session.pending_chord.is_none());
        assert!(session.viewport.at_bottom());
    }

    #[test]
    fn test_unbound_key_cancels_chord() {
        let mut session = ready_session(long_library(), 80, 24);
        update(&mut session, Action::HalfPageDown);
        update(&mut session, Action::ChordKey('g'));
        assert_eq!(update(&mut session, Action::Unbound), Effect::None);
        assert!(session.pending_chord.is_none());

        update(&mut session, Action::ChordKey('g'));
        assert_eq!(session.viewport.offset(), HALF_PAGE);
        assert_eq!(session.pending_chord, Some('g'));
    }

    #[test]
    fn test_tick_keeps_chord_and_scroll() {
        let mut session = ready_session(long_library(), 80, 24);
        update(&mut session, Action::HalfPageDown);
        update(&mut session, Action::ChordKey('g'));
        let now = Local::now();
        assert_eq!(update(&mut session, Action::Tick(now)), Effect::Redraw);
        assert_eq!(session.pending_chord, Some('g'));
        assert_eq!(session.viewport.offset(), HALF_PAGE);
        assert_eq!(session.clock, Some(now));
    }

    #[test]
    fn test_tick_before_ready_sets_clock_only() {
        let mut session = Session::new(sample_library());
        assert_eq!(update(&mut session, Action::Tick(Local::now())), Effect::None);
        assert!(session.clock.is_some());
    }

    #[test]
    fn test_chord_on_blog_index_selects_first() {
        let mut session = ready_session(sample_library(), 80, 24);
        to_blog(&mut session);
        update(&mut session, Action::MoveDown);
        update(&mut session, Action::ChordKey('g'));
        update(&mut session, Action::ChordKey('g'));
        assert_eq!(session.selected, 0);
    }

    #[test]
    fn test_goto_bottom_on_blog_index_selects_last() {
        let mut session = ready_session(sample_library(), 80, 24);
        to_blog(&mut session);
        update(&mut session, Action::GotoBottom);
        assert_eq!(session.selected, session.post_count() - 1);
        assert!(session.viewport.at_bottom());
    }

    #[test]
    fn test_scroll_clamps_at_bottom() {
        let mut session = ready_session(long_library(), 80, 24);
        for _ in 0..1000 {
            update(&mut session, Action::HalfPageDown);
        }
        assert_eq!(session.viewport.offset(), session.viewport.max_offset());
        assert_eq!(update(&mut session, Action::MoveDown), Effect::None);
    }
}
