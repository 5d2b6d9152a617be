//! Word wrapping for styled lines.
//!
//! `textwrap` works on plain strings, so styled spans are wrapped here by
//! hand: greedy fill on display width, breaking at whitespace, and splitting
//! words that can't fit on a row of their own.

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::markdown::DocLine;

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

/// Split into alternating runs of whitespace and non-whitespace.
fn pieces(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut last_ws: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        if last_ws.is_some_and(|prev| prev != ws) {
            out.push(&text[start..i]);
            start = i;
        }
        last_ws = Some(ws);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

struct Rows {
    rows: Vec<Vec<Span<'static>>>,
    row_width: usize,
    avail: usize,
}

impl Rows {
    fn new(avail: usize) -> Self {
        Self {
            rows: vec![Vec::new()],
            row_width: 0,
            avail,
        }
    }

    fn break_row(&mut self) {
        self.rows.push(Vec::new());
        self.row_width = 0;
    }

    fn push(&mut self, content: String, span: &Span<'_>, width: usize) {
        if let Some(row) = self.rows.last_mut() {
            row.push(Span::styled(content, span.style));
        }
        self.row_width += width;
    }

    fn add(&mut self, piece: &str, span: &Span<'_>) {
        let width = piece.width();
        let is_ws = piece.chars().all(char::is_whitespace);

        if self.row_width + width <= self.avail {
            // Continuation rows don't start with whitespace
            if is_ws && self.row_width == 0 && self.rows.len() > 1 {
                return;
            }
            self.push(piece.to_string(), span, width);
            return;
        }

        if is_ws {
            self.break_row();
            return;
        }

        if self.row_width > 0 {
            self.break_row();
        }

        if width <= self.avail {
            self.push(piece.to_string(), span, width);
            return;
        }

        let mut chunk = String::new();
        let mut chunk_width = 0;
        for ch in piece.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if chunk_width + ch_width > self.avail && !chunk.is_empty() {
                self.push(std::mem::take(&mut chunk), span, chunk_width);
                self.break_row();
                chunk_width = 0;
            }
            chunk.push(ch);
            chunk_width += ch_width;
        }
        if !chunk.is_empty() {
            self.push(chunk, span, chunk_width);
        }
    }
}

/// Wrap one document line to at most `width` columns (gutter included,
/// unless the gutter alone is wider).
pub fn wrap_line(line: DocLine, width: usize) -> Vec<Line<'static>> {
    let avail = width.saturating_sub(spans_width(&line.gutter)).max(1);
    let mut rows = Rows::new(avail);
    for span in &line.body {
        for piece in pieces(&span.content) {
            rows.add(piece, span);
        }
    }

    rows.rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let prefix = if i == 0 { &line.gutter } else { &line.hang };
            let mut spans = prefix.clone();
            spans.extend(row);
            Line::from(spans)
        })
        .collect()
}

pub fn wrap_lines(lines: Vec<DocLine>, width: usize) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}
