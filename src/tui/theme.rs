//! Styles for the chrome, computed per frame from the frame width.
//!
//! Every session may have a different terminal size, so there is no global
//! style table: the view asks for a `Theme` each time it draws.

use ratatui::style::{Color, Modifier, Style};

use crate::render::ACCENT;

/// Below this width the navigation bar drops the brand label.
pub const COMPACT_WIDTH: u16 = 60;

const LIGHT: Color = Color::Rgb(0xfa, 0xfa, 0xfa);
const FOOTER_FG: Color = Color::Rgb(0x62, 0x62, 0x62);
const FOOTER_BG: Color = Color::Rgb(0x1a, 0x1a, 0x1a);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub compact: bool,
    pub navbar: Style,
    pub active_tab: Style,
    pub inactive_tab: Style,
    pub status: Style,
    pub clock: Style,
}

impl Theme {
    pub fn for_width(width: u16) -> Self {
        Self {
            compact: width < COMPACT_WIDTH,
            navbar: Style::default()
                .fg(LIGHT)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
            active_tab: Style::default()
                .fg(ACCENT)
                .bg(LIGHT)
                .add_modifier(Modifier::BOLD),
            inactive_tab: Style::default().fg(LIGHT).bg(ACCENT),
            status: Style::default().fg(FOOTER_FG).bg(FOOTER_BG),
            clock: Style::default().fg(LIGHT).bg(FOOTER_BG),
        }
    }

    /// Horizontal padding inside each navigation tab.
    pub fn tab_padding(&self) -> &'static str {
        if self.compact { "" } else { " " }
    }
}
