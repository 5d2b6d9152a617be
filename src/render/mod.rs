//! # Render Adapter
//!
//! Turns markdown into wrapped, styled [`Text`] for a given terminal width.
//!
//! Two guarantees callers rely on:
//!
//! - **Width floor.** The wrap width is the terminal width minus fixed side
//!   padding, but never less than [`MIN_WIDTH`]. Tiny terminals get content
//!   that is cut off at the edge instead of one word per line.
//! - **Never fails.** If rendering fails internally, [`render`] returns the
//!   input as plain, unstyled text.

pub mod cards;
mod markdown;
mod wrap;

use std::fmt;

use log::warn;
use ratatui::style::Color;
use ratatui::text::Text;

/// Brand colour: headings, borders, active navigation tab.
pub const ACCENT: Color = Color::Rgb(0x7d, 0x56, 0xf4);
/// Selection colour.
pub const HIGHLIGHT: Color = Color::Rgb(0xf2, 0x5d, 0x94);

/// Smallest wrap width, in columns.
pub const MIN_WIDTH: u16 = 40;
/// Columns reserved for content padding and borders.
pub const SIDE_PADDING: u16 = 8;

#[derive(Debug)]
pub enum RenderError {
    UnknownTheme(String),
    Highlight(syntect::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnknownTheme(name) => write!(f, "unknown highlight theme: {name}"),
            RenderError::Highlight(e) => write!(f, "highlight error: {e}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<syntect::Error> for RenderError {
    fn from(e: syntect::Error) -> Self {
        RenderError::Highlight(e)
    }
}

/// Wrap width used for a terminal `width` columns wide.
pub fn effective_width(width: u16) -> u16 {
    width.saturating_sub(SIDE_PADDING).max(MIN_WIDTH)
}

/// Render markdown for a terminal `width` columns wide, falling back to the
/// raw input if rendering fails.
pub fn render(source: &str, width: u16) -> Text<'static> {
    match try_render(source, width) {
        Ok(text) => text,
        Err(e) => {
            warn!("Markdown rendering failed, showing plain text: {}", e);
            plain(source)
        }
    }
}

pub fn try_render(source: &str, width: u16) -> Result<Text<'static>, RenderError> {
    let wrap_width = effective_width(width) as usize;
    let lines = markdown::parse(source, Color::Reset, wrap_width)?;
    Ok(Text::from(wrap::wrap_lines(lines, wrap_width)))
}

/// The input, unstyled, one display line per source line.
pub fn plain(source: &str) -> Text<'static> {
    Text::raw(source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_width_subtracts_padding() {
        assert_eq!(effective_width(120), 112);
        assert_eq!(effective_width(48), 40);
    }

    #[test]
    fn test_effective_width_floor() {
        assert_eq!(effective_width(10), MIN_WIDTH);
        assert_eq!(effective_width(0), MIN_WIDTH);
    }

    #[test]
    fn test_narrow_terminal_wraps_at_floor() {
        let para = "word ".repeat(60);
        let text = render(&para, 10);
        assert!(text.lines.len() > 1);
        for line in &text.lines {
            assert!(line.width() <= MIN_WIDTH as usize);
        }
        // At the floor, rows are filled close to the floor width, not one word each
        assert!(text.lines[0].width() > 30);
    }

    #[test]
    fn test_wider_terminal_means_fewer_lines() {
        let para = "lorem ipsum dolor sit amet ".repeat(20);
        let narrow = render(&para, 50).lines.len();
        let wide = render(&para, 150).lines.len();
        assert!(wide < narrow);
    }

    #[test]
    fn test_render_is_deterministic() {
        let src = "# Title\n\nSome *text* and `code`.\n\n- a\n- b\n";
        assert_eq!(render(src, 80), render(src, 80));
    }

    #[test]
    fn test_malformed_markdown_still_renders() {
        let src = "# Unclosed **bold\n\n```rust\nfn main() {\n\n[link](";
        let text = render(src, 80);
        assert!(!text.lines.is_empty());
        let joined: String = text.lines.iter().map(|l| l.to_string()).collect();
        assert!(joined.contains("Unclosed"));
    }

    #[test]
    fn test_plain_keeps_input_lines() {
        let text = plain("a\nb\nc");
        assert_eq!(text.lines.len(), 3);
    }

    #[test]
    fn test_highlighted_code_renders() {
        let text = render("```rust\nlet x = 1;\n```", 80);
        let joined: String = text.lines.iter().map(|l| l.to_string()).collect();
        assert!(joined.contains("let x = 1;"));
    }
}
