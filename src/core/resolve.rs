//! # Page Content Resolver
//!
//! Maps `(page, viewing_detail, selected)` to the rendered body shown in the
//! viewport. Markdown pages go through the render adapter; the Blog index is
//! built from cards.

use std::fmt::Write as _;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::content::{Post, Project};
use crate::core::page::Page;
use crate::core::state::Session;
use crate::render::{self, ACCENT, cards};

/// Blank rows above and below the body.
pub const PAD_ROWS: usize = 1;
/// Spaces left of every body line.
pub const PAD_COLUMNS: usize = 2;

/// Rendered body for the session's current view at `width` columns.
pub fn page_text(session: &Session, width: u16) -> Text<'static> {
    let library = &session.library;
    let body = match session.page {
        Page::Home => render::render(&library.pages.home, width),
        Page::Projects => render::render(&projects_markdown(&library.projects), width),
        Page::Blog if session.viewing_detail => match session.selected_post() {
            Some(post) => post_detail(post, width),
            None => Text::raw("Blog entry not found"),
        },
        Page::Blog => {
            let usable = (width as usize).saturating_sub(PAD_COLUMNS * 2);
            cards::blog_index(&library.posts, session.selected, usable)
        }
        Page::About => render::render(&library.pages.about, width),
        Page::Contact => render::render(&library.pages.contact, width),
    };
    pad(body)
}

/// The Projects page as markdown.
pub fn projects_markdown(projects: &[Project]) -> String {
    let mut md = String::new();
    md.push_str("# Featured Projects\n\n");
    md.push_str("Here are some notable projects and contributions:\n\n");

    for (i, project) in projects.iter().enumerate() {
        let _ = writeln!(md, "## {}. {}\n", i + 1, project.name);
        let _ = writeln!(md, "**Description:** {}\n", project.description);

        if !project.technologies.is_empty() {
            md.push_str("**Technologies:**\n\n");
            for tech in &project.technologies {
                let _ = writeln!(md, "- {tech}");
            }
            md.push('\n');
        }

        if !project.features.is_empty() {
            md.push_str("**Key Features:**\n\n");
            for feature in &project.features {
                let _ = writeln!(md, "- {feature}");
            }
            md.push('\n');
        }

        if !project.status.is_empty() {
            let _ = writeln!(md, "**Status:** {}\n", project.status);
        }
        if let Some(url) = &project.url {
            let _ = writeln!(md, "**Repository:** [{url}]({url})\n");
        }
        md.push_str("---\n\n");
    }

    md.push_str("## Links\n\n");
    md.push_str("Source code and documentation for everything above lives on GitHub.\n");
    md
}

fn post_detail(post: &Post, width: u16) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("📝 {}", post.title),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("📅 {}", post.date_label())),
    ];

    let mut meta = Vec::new();
    if !post.author.is_empty() {
        meta.push(format!("by {}", post.author));
    }
    if !post.read_time.is_empty() {
        meta.push(post.read_time.clone());
    }
    if !post.tags.is_empty() {
        meta.push(
            post.tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(
            meta.join(" · "),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::default());
    lines.extend(render::render(&post.body, width).lines);
    Text::from(lines)
}

fn pad(text: Text<'static>) -> Text<'static> {
    let indent = " ".repeat(PAD_COLUMNS);
    let mut lines: Vec<Line<'static>> = vec![Line::default(); PAD_ROWS];
    lines.extend(text.lines.into_iter().map(|mut line| {
        line.spans.insert(0, Span::raw(indent.clone()));
        line
    }));
    lines.extend(std::iter::repeat_n(Line::default(), PAD_ROWS));
    Text::from(lines)
}
