//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use chrono::NaiveDate;
use ratatui::text::Text;

use crate::content::{Library, Post, StaticPages, fallback};
use crate::core::action::{Action, update};
use crate::core::state::Session;

fn post(id: &str, title: &str, date: (i32, u32, u32)) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        summary: format!("{title} summary"),
        body: format!("{title} body\n\nMore text."),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
        published: true,
        tags: Vec::new(),
        read_time: String::new(),
        author: String::new(),
        path: None,
    }
}

/// Two posts ("First" newer than "Second") and the built-in pages.
pub fn sample_library() -> Arc<Library> {
    let mut first = post("first", "First", (2024, 2, 1));
    first.author = "Sam".to_string();
    first.read_time = "3 min".to_string();
    first.tags = vec!["rust".to_string(), "tui".to_string()];
    let second = post("second", "Second", (2024, 1, 1));

    Arc::new(Library {
        posts: vec![first, second],
        projects: fallback::projects(),
        pages: fallback::pages(),
    })
}

pub fn empty_library() -> Arc<Library> {
    Arc::new(Library {
        posts: Vec::new(),
        projects: fallback::projects(),
        pages: fallback::pages(),
    })
}

/// A library whose Home page is far taller than any test terminal.
pub fn long_library() -> Arc<Library> {
    let home = (1..=200)
        .map(|i| format!("Paragraph number {i}."))
        .collect::<Vec<_>>()
        .join("\n\n");
    let mut library = (*sample_library()).clone();
    library.pages = StaticPages {
        home,
        ..fallback::pages()
    };
    Arc::new(library)
}

/// A session that has already received its first size report.
pub fn ready_session(library: Arc<Library>, width: u16, height: u16) -> Session {
    let mut session = Session::new(library);
    update(&mut session, Action::Resize { width, height });
    session
}

/// All lines of `text` as plain strings joined by newlines.
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
