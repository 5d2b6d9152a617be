//! # NavBar Component
//!
//! Top bar listing every page, with the current one highlighted.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │  📍 termfolio  |   Home   Projects   Blog   About   Contact  │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stateless: it renders what it's given. On narrow terminals
//! (`theme.compact`) the brand label and tab padding are dropped.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::page::Page;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct NavBar {
    /// Brand label shown before the tabs.
    pub title: String,
    pub current: Page,
    pub theme: Theme,
}

impl NavBar {
    pub fn new(title: String, current: Page, theme: Theme) -> Self {
        Self {
            title,
            current,
            theme,
        }
    }

    pub fn line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        if !self.theme.compact {
            spans.push(Span::styled(
                format!("📍 {}  |  ", self.title),
                self.theme.navbar,
            ));
        }

        let pad = self.theme.tab_padding();
        for (i, page) in Page::ORDER.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", self.theme.navbar));
            }
            let style = if page == self.current {
                self.theme.active_tab
            } else {
                self.theme.inactive_tab
            };
            spans.push(Span::styled(format!("{pad}{}{pad}", page.title()), style));
        }
        Line::from(spans)
    }
}

impl Component for NavBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let horizontal = if self.theme.compact { 1 } else { 2 };
        let block = Block::default()
            .style(self.theme.navbar)
            .padding(Padding::new(horizontal, horizontal, 1, 1));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(self.line()), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(nav: &mut NavBar, width: u16) -> Vec<String> {
        let backend = TestBackend::new(width, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| nav.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        (0..3)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_nav_bar_lists_pages_in_order() {
        let mut nav = NavBar::new("jo.dev".to_string(), Page::Home, Theme::for_width(100));
        let rows = draw(&mut nav, 100);
        assert!(rows[0].trim().is_empty());
        assert!(rows[2].trim().is_empty());

        let row = &rows[1];
        assert!(row.contains("jo.dev"));
        let positions: Vec<usize> = Page::ORDER
            .iter()
            .map(|p| row.find(p.title()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_current_page_uses_active_style() {
        let theme = Theme::for_width(100);
        let nav = NavBar::new("t".to_string(), Page::Blog, theme);
        let line = nav.line();
        let blog = line
            .spans
            .iter()
            .find(|s| s.content.trim() == "Blog")
            .unwrap();
        assert_eq!(blog.style, theme.active_tab);
        let home = line
            .spans
            .iter()
            .find(|s| s.content.trim() == "Home")
            .unwrap();
        assert_eq!(home.style, theme.inactive_tab);
    }

    #[test]
    fn test_compact_drops_brand_label() {
        let mut nav = NavBar::new("jo.dev".to_string(), Page::Home, Theme::for_width(50));
        let rows = draw(&mut nav, 50);
        assert!(!rows[1].contains("jo.dev"));
        assert!(rows[1].contains("Contact"));
    }
}
