//! Blog index cards: one rounded box per post, selected box highlighted.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::{ACCENT, HIGHLIGHT};
use crate::content::Post;

/// Widest a card gets, borders included.
pub const MAX_CARD_WIDTH: usize = 70;
const MIN_CARD_WIDTH: usize = 24;
/// Border plus one column of padding on each side.
const CARD_OVERHEAD: usize = 4;

const SELECTED_BG: Color = Color::Rgb(0x2a, 0x2a, 0x2a);

fn card_width(width: usize) -> usize {
    width.min(MAX_CARD_WIDTH).max(MIN_CARD_WIDTH)
}

fn boxed_row(content: Line<'static>, inner: usize, border: Style, fill: Style) -> Line<'static> {
    let pad = inner.saturating_sub(content.width());
    let mut spans = vec![Span::styled("│ ", border)];
    spans.extend(content.spans.into_iter().map(|s| {
        let style = fill.patch(s.style);
        Span::styled(s.content, style)
    }));
    spans.push(Span::styled(" ".repeat(pad), fill));
    spans.push(Span::styled(" │", border));
    Line::from(spans)
}

fn wrapped(text: &str, inner: usize, style: Style) -> Vec<Line<'static>> {
    if text.is_empty() {
        return vec![Line::default()];
    }
    let options = textwrap::Options::new(inner).break_words(true);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|row| Line::from(Span::styled(row.into_owned(), style)))
        .collect()
}

fn card(post: &Post, selected: bool, width: usize) -> Vec<Line<'static>> {
    let outer = card_width(width);
    let inner = outer - CARD_OVERHEAD;
    let (border, fill) = if selected {
        (
            Style::default().fg(HIGHLIGHT),
            Style::default().bg(SELECTED_BG),
        )
    } else {
        (Style::default().fg(ACCENT), Style::default())
    };

    let title_style = Style::default().add_modifier(Modifier::BOLD);
    let date_style = Style::default().fg(Color::DarkGray);

    let mut body = Vec::new();
    body.push(Line::default());
    body.extend(wrapped(&format!("📝 {}", post.title), inner, title_style));
    body.push(Line::default());
    body.extend(wrapped(&post.summary, inner, Style::default()));
    body.push(Line::default());
    body.push(Line::from(Span::styled(
        format!("📅 {}", post.date_label()),
        date_style,
    )));
    body.push(Line::default());

    let rule = "─".repeat(outer - 2);
    let mut lines = vec![Line::from(Span::styled(format!("╭{rule}╮"), border))];
    lines.extend(
        body.into_iter()
            .map(|content| boxed_row(content, inner, border, fill)),
    );
    lines.push(Line::from(Span::styled(format!("╰{rule}╯"), border)));
    lines
}

/// The Blog page index: header, then one card per post with a blank line
/// between cards. `width` is the usable content width.
pub fn blog_index(posts: &[Post], selected: usize, width: usize) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            "📚 Blog Posts",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Use ↑/↓ to navigate posts, Enter to read, scroll within posts",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    for (i, post) in posts.iter().enumerate() {
        lines.push(Line::default());
        lines.extend(card(post, i == selected, width));
    }
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback;

    fn row_texts(text: &Text<'_>) -> Vec<String> {
        text.lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_one_card_per_post() {
        let posts = fallback::posts();
        let text = blog_index(&posts, 0, 100);
        let tops = row_texts(&text).iter().filter(|l| l.starts_with('╭')).count();
        assert_eq!(tops, posts.len());
    }

    #[test]
    fn test_cards_capped_at_max_width() {
        let posts = fallback::posts();
        let text = blog_index(&posts, 0, 200);
        for line in text.lines.iter().skip(3) {
            assert!(line.width() <= MAX_CARD_WIDTH);
        }
    }

    #[test]
    fn test_card_rows_are_aligned() {
        let posts = fallback::posts();
        let text = blog_index(&posts, 1, 50);
        for line in text.lines.iter().skip(3) {
            let w = line.width();
            assert!(w == 0 || w == 50, "row width {w}: {:?}", line.to_string());
        }
    }

    #[test]
    fn test_selected_card_uses_highlight_border() {
        let posts = fallback::posts();
        let text = blog_index(&posts, 1, 80);
        let borders: Vec<_> = text
            .lines
            .iter()
            .filter(|l| l.to_string().starts_with('╭'))
            .map(|l| l.spans[0].style.fg)
            .collect();
        assert_eq!(borders, [Some(ACCENT), Some(HIGHLIGHT), Some(ACCENT)]);
    }

    #[test]
    fn test_card_shows_title_summary_date() {
        let posts = fallback::posts();
        let joined = row_texts(&blog_index(&posts[..1], 0, 100)).join("\n");
        assert!(joined.contains(&posts[0].title));
        assert!(joined.contains("2024-01-15"));
    }
}
