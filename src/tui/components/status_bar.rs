//! # StatusBar Component
//!
//! Bottom line: key hints for the current view, the scroll position when the
//! content overflows and, optionally, the clock.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::core::page::Page;
use crate::core::viewport::Viewport;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

const DETAIL_HINT: &str =
    "Reading blog post • ↑/↓ scroll • ctrl+u/ctrl+d half page • Backspace to return • q to quit";
const BLOG_HINT: &str = "Blog posts • ↑/↓ navigate • Enter to read • ←/→ change page • q to quit";
const PAGE_HINT: &str =
    "Portfolio navigation • ←/→ navigate pages • ↑/↓ scroll content • q to quit";

/// Key hints for the given view.
pub fn status_text(page: Page, viewing_detail: bool) -> &'static str {
    match (page, viewing_detail) {
        (Page::Blog, true) => DETAIL_HINT,
        (Page::Blog, false) => BLOG_HINT,
        _ => PAGE_HINT,
    }
}

/// `Top`, `Bot` or a percentage, like a pager. `None` when the content fits.
pub fn scroll_label(viewport: &Viewport) -> Option<String> {
    if viewport.max_offset() == 0 {
        return None;
    }
    let label = if viewport.at_top() {
        "Top".to_string()
    } else if viewport.at_bottom() {
        "Bot".to_string()
    } else {
        format!("{:.0}%", viewport.scroll_percent() * 100.0)
    };
    Some(label)
}

pub struct StatusBar {
    pub text: &'static str,
    /// From [`scroll_label`].
    pub position: Option<String>,
    /// Pre-formatted `HH:MM:SS`, or `None` to hide the clock.
    pub clock: Option<String>,
    pub theme: Theme,
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let right = [self.position.as_deref(), self.clock.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("  ");
        let right_width = if right.is_empty() {
            0
        } else {
            right.chars().count() as u16 + 2
        };
        let [text_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(format!("  {}", self.text))).style(self.theme.status),
            text_area,
        );
        if !right.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(format!("{right}  "))).style(self.theme.clock),
                right_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(bar: &mut StatusBar, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_status_text_per_view() {
        assert!(status_text(Page::Blog, true).starts_with("Reading blog post"));
        assert!(status_text(Page::Blog, false).starts_with("Blog posts"));
        for page in [Page::Home, Page::Projects, Page::About, Page::Contact] {
            assert!(status_text(page, false).starts_with("Portfolio navigation"));
        }
    }

    #[test]
    fn test_clock_is_right_aligned() {
        let mut bar = StatusBar {
            text: PAGE_HINT,
            position: None,
            clock: Some("12:34:56".to_string()),
            theme: Theme::for_width(120),
        };
        let text = draw(&mut bar, 120);
        assert!(text.contains("Portfolio navigation"));
        assert!(text.trim_end().ends_with("12:34:56"));
    }

    #[test]
    fn test_no_clock() {
        let mut bar = StatusBar {
            text: BLOG_HINT,
            position: None,
            clock: None,
            theme: Theme::for_width(120),
        };
        let text = draw(&mut bar, 120);
        assert!(text.contains("Enter to read"));
        assert!(!text.contains(':'));
    }

    #[test]
    fn test_scroll_label_tracks_position() {
        let mut vp = Viewport::new(10);
        vp.set_content((0..5).map(|i| i.to_string()).collect::<Vec<_>>().join("\n").into());
        assert_eq!(scroll_label(&vp), None);

        vp.set_content((0..30).map(|i| i.to_string()).collect::<Vec<_>>().join("\n").into());
        assert_eq!(scroll_label(&vp).as_deref(), Some("Top"));
        vp.scroll_down(10);
        assert_eq!(scroll_label(&vp).as_deref(), Some("50%"));
        vp.goto_bottom();
        assert_eq!(scroll_label(&vp).as_deref(), Some("Bot"));
    }

    #[test]
    fn test_position_sits_before_clock() {
        let mut bar = StatusBar {
            text: PAGE_HINT,
            position: Some("42%".to_string()),
            clock: Some("12:34:56".to_string()),
            theme: Theme::for_width(120),
        };
        let text = draw(&mut bar, 120);
        assert!(text.trim_end().ends_with("42%  12:34:56"));
    }
}
