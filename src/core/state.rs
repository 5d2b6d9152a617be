//! # Session State
//!
//! Everything one viewer's screen depends on. One `Session` exists per
//! connected viewer (or one for the local terminal); sessions share only the
//! read-only [`Library`].
//!
//! ```text
//! Session
//! ├── page: Page                    // current top-level page
//! ├── viewing_detail: bool          // Blog only: full post instead of cards
//! ├── selected: usize               // highlighted post, 0 ≤ selected < posts
//! ├── pending_chord: Option<char>   // first key of a two-key sequence
//! ├── viewport: Viewport            // rendered body + scroll offset
//! ├── geometry: Option<Geometry>    // None until the first size report
//! ├── library: Arc<Library>         // shared, never mutated
//! └── clock: Option<DateTime>       // last heartbeat tick
//! ```
//!
//! State changes only happen through `update(session, action)` in action.rs.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::content::{Library, Post};
use crate::core::page::Page;
use crate::core::viewport::Viewport;

/// Rows taken by the navigation bar (3) and status bar (1).
pub const CHROME_HEIGHT: u16 = 4;

/// Lines moved by a half-page jump.
pub const HALF_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
}

impl Geometry {
    /// Rows left for the scrollable body.
    pub fn body_height(&self) -> usize {
        self.height.saturating_sub(CHROME_HEIGHT) as usize
    }
}

pub struct Session {
    pub page: Page,
    pub viewing_detail: bool,
    pub selected: usize,
    pub pending_chord: Option<char>,
    pub viewport: Viewport,
    pub geometry: Option<Geometry>,
    pub library: Arc<Library>,
    pub clock: Option<DateTime<Local>>,
}

impl Session {
    pub fn new(library: Arc<Library>) -> Self {
        Self {
            page: Page::first(),
            viewing_detail: false,
            selected: 0,
            pending_chord: None,
            viewport: Viewport::new(0),
            geometry: None,
            library,
            clock: None,
        }
    }

    /// Ready once the first geometry report has arrived.
    pub fn is_ready(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn post_count(&self) -> usize {
        self.library.posts.len()
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.library.posts.get(self.selected)
    }

    /// On the Blog page, showing the card list.
    pub fn on_blog_index(&self) -> bool {
        self.page == Page::Blog && !self.viewing_detail
    }

    /// Pull `selected` back into `[0, post_count - 1]` (0 when there are no posts).
    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.post_count().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{empty_library, sample_library};

    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(sample_library());
        assert_eq!(session.page, Page::Home);
        assert!(!session.viewing_detail);
        assert_eq!(session.selected, 0);
        assert!(session.pending_chord.is_none());
        assert!(!session.is_ready());
    }

    #[test]
    fn test_body_height_leaves_room_for_chrome() {
        let g = Geometry { width: 80, height: 24 };
        assert_eq!(g.body_height(), 20);
        let tiny = Geometry { width: 80, height: 2 };
        assert_eq!(tiny.body_height(), 0);
    }

    #[test]
    fn test_clamp_selection() {
        let mut session = Session::new(sample_library());
        session.selected = 99;
        session.clamp_selection();
        assert_eq!(session.selected, session.post_count() - 1);

        let mut empty = Session::new(empty_library());
        empty.selected = 3;
        empty.clamp_selection();
        assert_eq!(empty.selected, 0);
        assert!(empty.selected_post().is_none());
    }
}
