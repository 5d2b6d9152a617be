//! # Viewport
//!
//! A vertical window over pre-rendered lines. The viewport knows nothing
//! about pages or posts; it only tracks the content, the visible height and
//! the top line currently shown.
//!
//! Invariant: `offset <= max_offset()` after every public method, where
//! `max_offset() == line_count().saturating_sub(height)`.

use ratatui::text::{Line, Text};

#[derive(Debug, Default, Clone)]
pub struct Viewport {
    content: Text<'static>,
    offset: usize,
    height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            content: Text::default(),
            offset: 0,
            height,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn line_count(&self) -> usize {
        self.content.lines.len()
    }

    pub fn content(&self) -> &Text<'static> {
        &self.content
    }

    /// Largest valid offset: the last page of content is flush with the bottom.
    pub fn max_offset(&self) -> usize {
        self.line_count().saturating_sub(self.height)
    }

    /// Replace the content. The offset is kept, clamped to the new extent.
    pub fn set_content(&mut self, content: Text<'static>) {
        self.content = content;
        self.clamp();
    }

    /// Change the visible height (terminal resize). The offset is re-clamped.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.clamp();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset());
    }

    pub fn goto_top(&mut self) {
        self.offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn at_top(&self) -> bool {
        self.offset == 0
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Fraction of scrollable distance covered, 0.0 to 1.0.
    /// Content that fits entirely reports 1.0.
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            1.0
        } else {
            self.offset as f64 / max as f64
        }
    }

    /// The lines currently inside the window.
    pub fn visible_lines(&self) -> &[Line<'static>] {
        let lines = &self.content.lines;
        let start = self.offset.min(lines.len());
        let end = (start + self.height).min(lines.len());
        &lines[start..end]
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}
