//! Built-in content used whenever the content directory can't supply its own.
//!
//! Every list here is non-empty; the provider relies on that to guarantee the
//! viewer always has something to show.

use chrono::NaiveDate;

use super::{Post, Project, StaticPages};

const MISSING_CONTENT_NOTE: &str = "_This is a built-in copy of the post. Put markdown files under \
`content/blog` to publish your own._";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn post(id: &str, title: &str, summary: &str, body: &str, day: NaiveDate, tags: &[&str]) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        body: format!("{body}\n\n{MISSING_CONTENT_NOTE}\n"),
        date: day,
        published: true,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        read_time: String::new(),
        author: String::new(),
        path: None,
    }
}

/// Posts shown when the blog directory is missing, unreadable or has nothing published.
pub fn posts() -> Vec<Post> {
    vec![
        post(
            "terminal-uis-in-rust",
            "Building Terminal UIs in Rust",
            "How an immediate-mode renderer and a small reducer keep a TUI predictable.",
            r#"# Building Terminal UIs in Rust

Terminal interfaces are having a moment. A full-screen TUI starts instantly,
works over any SSH connection and never asks for a browser.

## The moving parts

- **A state struct** holding everything the screen depends on
- **Actions** describing what happened (a key, a resize, a timer)
- **A reducer** that applies one action to the state
- **A draw function** that turns state into a frame

## Why a reducer

Because the reducer is a plain function, every interaction can be tested
without a terminal:

```rust
let effect = update(&mut session, Action::MoveRight);
assert_eq!(session.page, Page::Projects);
```

Drawing is immediate-mode: every frame is rebuilt from state, so there is no
retained widget tree to keep in sync."#,
            date(2024, 1, 15),
            &["rust", "tui"],
        ),
        post(
            "serving-tuis-over-ssh",
            "Serving a TUI over SSH",
            "One process, many viewers: giving every connection its own independent session.",
            r#"# Serving a TUI over SSH

`ssh portfolio.example.com` is a delightful way to hand someone a résumé.

## Sessions are independent

Each connection gets its own state machine, its own viewport and its own
timer. Nothing mutable is shared between viewers; the only shared data is the
read-only content loaded at startup.

## Geometry comes from the client

The client reports its terminal size in the pty request and again on every
window change. Until the first report arrives the session only draws a
placeholder.

## Cleanup

When a client disconnects, the session task's input channel closes and the
task exits, dropping its timer along with it."#,
            date(2024, 1, 10),
            &["ssh", "networking"],
        ),
        post(
            "scrollable-viewports",
            "Notes on Scrollable Viewports",
            "Offsets, clamping and the small invariants that keep scrolling honest.",
            r#"# Notes on Scrollable Viewports

A viewport is three numbers: the total line count, the visible height and the
offset of the top line.

## The one invariant

    0 <= offset <= max(0, total - height)

Every operation that changes any of the three numbers re-clamps the offset.

## Jumps

1. **Line** moves shift by one
2. **Half-page** moves shift by a fixed jump
3. **Top/bottom** set the offset directly

Setting new content keeps the offset unless the caller asks for a reset."#,
            date(2024, 1, 5),
            &["rust", "design"],
        ),
    ]
}

fn project(
    name: &str,
    description: &str,
    technologies: &[&str],
    features: &[&str],
    status: &str,
    url: &str,
) -> Project {
    Project {
        name: name.to_string(),
        description: description.to_string(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        features: features.iter().map(|f| f.to_string()).collect(),
        status: status.to_string(),
        url: (!url.is_empty()).then(|| url.to_string()),
    }
}

/// Featured projects shown when no `projects.toml` is available.
pub fn projects() -> Vec<Project> {
    vec![
        project(
            "termfolio",
            "A keyboard-driven portfolio that runs in the terminal, locally or over SSH",
            &["Rust", "ratatui", "crossterm", "russh"],
            &[
                "Vim-style navigation",
                "Markdown rendering",
                "Per-connection sessions",
                "Responsive layout",
            ],
            "Active",
            "https://github.com/termfolio/termfolio",
        ),
        project(
            "Log Shipper",
            "A small agent that tails log files and forwards batches over HTTP",
            &["Rust", "tokio", "serde"],
            &["Back-pressure aware batching", "At-least-once delivery"],
            "Maintained",
            "",
        ),
        project(
            "Static Site Toolkit",
            "Markdown-to-HTML pipeline with frontmatter and live reload",
            &["Rust", "pulldown-cmark", "notify"],
            &["Incremental rebuilds", "Syntax highlighting", "RSS feed"],
            "Active",
            "",
        ),
        project(
            "Open Source Contributions",
            "Bug fixes, features and documentation across the ecosystem",
            &["Rust", "Go", "Python"],
            &[],
            "Ongoing",
            "",
        ),
    ]
}

pub const HOME: &str = r#"# Welcome to termfolio!

Hi there! This is a **terminal portfolio**: projects, writing and contact
details, all browsable from the keyboard.

## What you'll find here

- Projects and open source work
- Blog posts and technical notes
- A little about the author
- Ways to get in touch

## Quick navigation tips

- Use **← →** (or **h l**) to switch between sections
- Use **↑ ↓** (or **k j**) to scroll, or to pick a post on the Blog page
- Press **Enter** to open a post and **Backspace** to go back
- **ctrl+u / ctrl+d** jump half a page, **gg** goes to the top, **G** to the bottom
- Press **q** or **ctrl+c** to quit

---

**Happy exploring!**"#;

pub const ABOUT: &str = r#"# About

I build tools for people who live in the terminal: command-line utilities,
network services and the occasional full-screen interface.

## Background

- **Systems programming** in Rust and Go
- **Backend services**: APIs, queues, storage engines
- **Developer tooling**: CLIs, build pipelines, editors

## Technical interests

### Languages
- **Rust** for anything that has to be fast and correct
- **Go** for network plumbing
- **Python** for glue and data work

### Infrastructure
- **Linux**, containers and plain old SSH
- **PostgreSQL** and **SQLite**
- **CI/CD** that finishes before the coffee does

## Approach

Small, well-tested pieces with clear seams. Code that reads top to bottom.
Interfaces that work without a mouse.

---

**Let's build something together.**"#;

pub const CONTACT: &str = r#"# Get In Touch

Always happy to talk about terminals, Rust, or anything in between.

## Find me online

### GitHub
**[https://github.com/termfolio](https://github.com/termfolio)**
- Repositories, issues and pull requests

### Email
**hello@termfolio.example**
- Best for longer conversations

---

## Open to

- Open source collaboration
- Code review and pairing sessions
- Talks about terminal tooling

---

**Looking forward to hearing from you!**"#;

pub fn pages() -> StaticPages {
    StaticPages {
        home: HOME.to_string(),
        about: ABOUT.to_string(),
        contact: CONTACT.to_string(),
    }
}
