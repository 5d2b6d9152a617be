//! The View step: one frame from one session.
//!
//! ```text
//! ┌────────────────────────────┐
//! │ NavBar          Length(3)  │
//! ├────────────────────────────┤
//! │ ContentView     Min(0)     │
//! ├────────────────────────────┤
//! │ StatusBar       Length(1)  │
//! └────────────────────────────┘
//! ```
//!
//! Until the session has seen its first size report it shows a loading
//! placeholder instead.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Paragraph;

use crate::core::state::Session;
use crate::tui::component::Component;
use crate::tui::components::{ContentView, NavBar, StatusBar, scroll_label, status_text};
use crate::tui::theme::Theme;

pub const LOADING: &str = "Loading...";
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Per-process presentation settings, the same for every session.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub title: String,
    pub show_clock: bool,
}

pub fn draw(frame: &mut Frame, session: &Session, options: &ViewOptions) {
    if !session.is_ready() {
        frame.render_widget(Paragraph::new(LOADING), frame.area());
        return;
    }

    use Constraint::{Length, Min};
    let [nav_area, body_area, status_area] =
        Layout::vertical([Length(3), Min(0), Length(1)]).areas(frame.area());
    let theme = Theme::for_width(frame.area().width);

    NavBar::new(options.title.clone(), session.page, theme).render(frame, nav_area);

    ContentView {
        viewport: &session.viewport,
    }
    .render(frame, body_area);

    let clock = if options.show_clock {
        session
            .clock
            .map(|now| now.format(CLOCK_FORMAT).to_string())
    } else {
        None
    };
    StatusBar {
        text: status_text(session.page, session.viewing_detail),
        position: scroll_label(&session.viewport),
        clock,
        theme,
    }
    .render(frame, status_area);
}
