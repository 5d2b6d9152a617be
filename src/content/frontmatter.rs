//! Header-block parsing for post files.
//!
//! A post file looks like:
//!
//! ```text
//! ---
//! title: "Hello"
//! summary: A first post
//! date: 2024-02-01
//! published: true
//! tags: [rust, "tui"]
//! ---
//! # Body markdown
//! ```
//!
//! Parsing is lenient: unknown keys are ignored, lines without a `:` are
//! skipped, and missing keys stay empty. The only hard failure is an opening
//! delimiter with no closing one, because then the header and body can't be
//! told apart.

use std::fmt;

const DELIMITER: &str = "---";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub summary: String,
    /// Raw date text; interpreted by the caller.
    pub date: String,
    pub tags: Vec<String>,
    pub read_time: String,
    pub author: String,
    pub published: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FrontMatterError {
    /// Opening `---` found but no closing `---` line.
    MissingClose,
}

impl fmt::Display for FrontMatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontMatterError::MissingClose => write!(f, "header block has no closing delimiter"),
        }
    }
}

impl std::error::Error for FrontMatterError {}

/// Split a post file into its header and body.
///
/// Input without a leading delimiter line has no header: the whole input is
/// the body and the header is all defaults (so the post is unpublished).
pub fn parse(source: &str) -> Result<(FrontMatter, String), FrontMatterError> {
    let normalized = source.replace("\r\n", "\n");
    let mut lines = normalized.split_inclusive('\n');

    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return Ok((FrontMatter::default(), normalized)),
    }

    let mut header = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == DELIMITER {
            closed = true;
            break;
        }
        header.push(line);
    }
    if !closed {
        return Err(FrontMatterError::MissingClose);
    }

    let body: String = lines.collect();
    let mut fm = FrontMatter::default();
    for line in header {
        apply_line(&mut fm, line);
    }
    Ok((fm, body))
}

fn apply_line(fm: &mut FrontMatter, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    let Some((key, value)) = line.split_once(':') else {
        return;
    };
    let value = unquote(value.trim());

    match key.trim() {
        "title" => fm.title = value.to_string(),
        "summary" => fm.summary = value.to_string(),
        "date" => fm.date = value.to_string(),
        "readTime" => fm.read_time = value.to_string(),
        "author" => fm.author = value.to_string(),
        "published" => fm.published = value == "true",
        "tags" => fm.tags = parse_tags(value),
        _ => {}
    }
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

fn parse_tags(value: &str) -> Vec<String> {
    let inner = value.trim_start_matches('[').trim_end_matches(']').trim();
    if inner.is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|tag| unquote(tag.trim()).to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_known_keys() {
        let src = "---\n\
title: \"Hello: World\"\n\
summary: First post\n\
date: 2024-02-01\n\
published: true\n\
tags: [rust, \"tui\", ssh]\n\
readTime: 5 min\n\
author: Sam\n\
---\n\
# Body\n";
        let (fm, body) = parse(src).unwrap();
        assert_eq!(fm.title, "Hello: World");
        assert_eq!(fm.summary, "First post");
        assert_eq!(fm.date, "2024-02-01");
        assert!(fm.published);
        assert_eq!(fm.tags, ["rust", "tui", "ssh"]);
        assert_eq!(fm.read_time, "5 min");
        assert_eq!(fm.author, "Sam");
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_unknown_and_malformed_lines_ignored() {
        let src = "---\nlayout: post\njust some words\ntitle: T\n---\nbody";
        let (fm, body) = parse(src).unwrap();
        assert_eq!(fm.title, "T");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let (fm, _) = parse("---\ndate: 2024-01-01\n---\n").unwrap();
        assert_eq!(fm.title, "");
        assert_eq!(fm.summary, "");
        assert!(fm.tags.is_empty());
        assert!(!fm.published);
    }

    #[test]
    fn test_published_only_for_literal_true() {
        for value in ["yes", "TRUE", "1", "\"false\""] {
            let (fm, _) = parse(&format!("---\npublished: {value}\n---\n")).unwrap();
            assert!(!fm.published, "{value} should not publish");
        }
        let (fm, _) = parse("---\npublished: \"true\"\n---\n").unwrap();
        assert!(fm.published);
    }

    #[test]
    fn test_no_header_returns_whole_body() {
        let (fm, body) = parse("# Just markdown\n\ntext").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "# Just markdown\n\ntext");
    }

    #[test]
    fn test_unclosed_header_is_error() {
        assert_eq!(
            parse("---\ntitle: Broken\nbody without close\n"),
            Err(FrontMatterError::MissingClose)
        );
    }

    #[test]
    fn test_crlf_input() {
        let (fm, body) = parse("---\r\ntitle: Win\r\npublished: true\r\n---\r\nline\r\n").unwrap();
        assert_eq!(fm.title, "Win");
        assert!(fm.published);
        assert_eq!(body, "line\n");
    }

    #[test]
    fn test_empty_tag_list() {
        let (fm, _) = parse("---\ntags: []\n---\n").unwrap();
        assert!(fm.tags.is_empty());
    }
}
