//! Markdown → styled document lines.
//!
//! Walks `pulldown_cmark` events and produces [`DocLine`]s: unwrapped lines
//! whose leading gutter (blockquote bars, code-block borders, list markers)
//! is kept apart from the body so the wrapper can repeat or indent it on
//! continuation lines.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use unicode_width::UnicodeWidthStr;

use super::{ACCENT, RenderError};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_THEME: &str = "base16-ocean.dark";
const MAX_RULE_WIDTH: usize = 60;

/// One logical output line before wrapping.
#[derive(Debug, Default, Clone)]
pub struct DocLine {
    /// Prefix on the first visual row.
    pub gutter: Vec<Span<'static>>,
    /// Prefix on continuation rows.
    pub hang: Vec<Span<'static>>,
    pub body: Vec<Span<'static>>,
}

/// Parse markdown into document lines. `width` sizes horizontal rules.
pub fn parse(content: &str, base_fg: Color, width: usize) -> Result<Vec<DocLine>, RenderError> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut w = Writer::new(base_fg, width);
    for event in Parser::new_ext(content, opts) {
        w.handle(event)?;
    }
    Ok(w.lines)
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    lines: Vec<DocLine>,
    base_fg: Color,
    width: usize,
    /// Inline style stack; nested styles compose via `patch`.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote and code-block bars).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    highlighter: Option<HighlightLines<'static>>,
    in_plain_code: bool,
    link_url: Option<String>,
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color, width: usize) -> Self {
        Self {
            lines: Vec::new(),
            base_fg,
            width,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            highlighter: None,
            in_plain_code: false,
            link_url: None,
            needs_newline: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    // ── Line/span helpers ───────────────────────────────────────────────

    fn push_line(&mut self, body: Vec<Span<'static>>) {
        self.lines.push(DocLine {
            gutter: self.line_prefixes.clone(),
            hang: self.line_prefixes.clone(),
            body,
        });
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.lines.last_mut() {
            Some(line) => line.body.push(span),
            None => self.push_line(vec![span]),
        }
    }

    /// Attach a list marker to the current line; continuation rows hang under it.
    fn set_marker(&mut self, marker: String) {
        let pad = " ".repeat(marker.width());
        if let Some(line) = self.lines.last_mut() {
            line.gutter
                .push(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            line.hang.push(Span::raw(pad));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Vec::new());
            self.needs_newline = false;
        }
    }

    // ── Event dispatch ──────────────────────────────────────────────────

    fn handle(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.open(tag)?,
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t)?,
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Vec::new()),
            Event::Rule => {
                self.blank_line_if_needed();
                let width = self.width.clamp(1, MAX_RULE_WIDTH);
                self.push_line(vec![Span::styled(
                    "─".repeat(width),
                    Style::default().fg(Color::DarkGray),
                )]);
                self.needs_newline = true;
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_span(Span::raw(marker));
            }
            // HTML is shown verbatim rather than interpreted
            Event::Html(html) => {
                let style = Style::default().fg(Color::DarkGray);
                self.push_line(vec![Span::styled(html.trim_end().to_string(), style)]);
            }
            Event::InlineHtml(html) => {
                let style = Style::default().fg(Color::DarkGray);
                self.push_span(Span::styled(html.to_string(), style));
            }
            _ => {}
        }
        Ok(())
    }

    fn open(&mut self, tag: Tag<'_>) -> Result<(), RenderError> {
        match tag {
            Tag::Paragraph => {
                self.blank_line_if_needed();
                // A paragraph directly inside a list item continues the item line
                let in_fresh_item = self
                    .lines
                    .last()
                    .is_some_and(|l| l.body.is_empty() && !self.list_indices.is_empty());
                if !in_fresh_item {
                    self.push_line(Vec::new());
                }
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                let hs = heading_style(self.base_fg, level);
                self.push_line(Vec::new());
                self.push_style(hs);
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.line_prefixes
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            Tag::CodeBlock(kind) => {
                if !self.lines.is_empty() {
                    self.push_line(Vec::new());
                }
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.as_ref(),
                    CodeBlockKind::Indented => "",
                };

                let bs = Style::default().fg(Color::DarkGray);
                let top = if lang.is_empty() {
                    vec![Span::styled("╭──", bs)]
                } else {
                    vec![
                        Span::styled("╭── ", bs),
                        Span::styled(lang.to_owned(), bs.add_modifier(Modifier::BOLD)),
                        Span::styled(" ──", bs),
                    ]
                };
                self.push_line(top);
                self.line_prefixes.push(Span::styled("│ ", bs));

                if !lang.is_empty()
                    && let Some(syn) = SYNTAX_SET.find_syntax_by_token(lang)
                {
                    let theme = THEME_SET
                        .themes
                        .get(CODE_THEME)
                        .ok_or_else(|| RenderError::UnknownTheme(CODE_THEME.to_string()))?;
                    self.highlighter = Some(HighlightLines::new(syn, theme));
                }
                if self.highlighter.is_none() {
                    self.in_plain_code = true;
                }
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Vec::new());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                let marker = match self.list_indices.last_mut() {
                    Some(None) => Some(format!("{indent}• ")),
                    Some(Some(n)) => {
                        let s = format!("{indent}{n}. ");
                        *n += 1;
                        Some(s)
                    }
                    None => None,
                };
                if let Some(marker) = marker {
                    self.set_marker(marker);
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                self.highlighter = None;
                self.in_plain_code = false;
                self.line_prefixes.pop();
                let bs = Style::default().fg(Color::DarkGray);
                self.push_line(vec![Span::styled("╰──", bs)]);
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Item => {
                // Tight items don't emit paragraphs; a loose item's paragraph
                // end must not add a gap inside the list
                if !self.list_indices.is_empty() {
                    self.needs_newline = false;
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    let shown = self
                        .lines
                        .last()
                        .and_then(|l| l.body.last())
                        .is_some_and(|s| s.content == url);
                    if !shown {
                        self.push_span(Span::raw(" ("));
                        self.push_span(Span::styled(
                            url,
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::UNDERLINED),
                        ));
                        self.push_span(Span::raw(")"));
                    }
                }
            }
            _ => {}
        }
    }

    // ── Content handlers ────────────────────────────────────────────────

    fn text(&mut self, cow: CowStr<'_>) -> Result<(), RenderError> {
        let raw = cow.to_string();
        let text = if raw.contains('\t') {
            raw.replace('\t', "    ")
        } else {
            raw
        };

        if let Some(mut hl) = self.highlighter.take() {
            for line in LinesWithEndings::from(text.as_str()) {
                let ranges = hl.highlight_line(line, &SYNTAX_SET)?;
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|(hl_style, frag)| {
                        let content = frag.trim_end_matches('\n').to_string();
                        if content.is_empty() {
                            return None;
                        }
                        let fg = Color::Rgb(
                            hl_style.foreground.r,
                            hl_style.foreground.g,
                            hl_style.foreground.b,
                        );
                        Some(Span::styled(content, Style::default().fg(fg)))
                    })
                    .collect();
                self.push_line(spans);
            }
            self.highlighter = Some(hl);
            return Ok(());
        }

        if self.in_plain_code {
            let code_style = Style::default().fg(Color::White);
            for line in text.lines() {
                self.push_line(vec![Span::styled(line.to_owned(), code_style)]);
            }
            return Ok(());
        }

        let style = self.style();
        self.push_span(Span::styled(text, style));
        Ok(())
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }
}

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}
