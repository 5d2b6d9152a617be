//! # ContentView Component
//!
//! Draws the visible window of the session viewport. Scrolling and clamping
//! happen in the engine; this only paints `viewport.visible_lines()`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;

use crate::core::viewport::Viewport;
use crate::tui::component::Component;

pub struct ContentView<'a> {
    pub viewport: &'a Viewport,
}

impl Component for ContentView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = Text::from(self.viewport.visible_lines().to_vec());
        frame.render_widget(Paragraph::new(visible), area);
    }
}
