//! # TUI Components
//!
//! Stateless, props-based components shared by the local terminal and every
//! remote session.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── nav_bar.rs       (page tabs, 3 rows)
//! ├── content_view.rs  (visible window of the viewport)
//! └── status_bar.rs    (key hints, scroll position + clock, 1 row)
//! ```

mod content_view;
mod nav_bar;
mod status_bar;

pub use content_view::ContentView;
pub use nav_bar::NavBar;
pub use status_bar::{StatusBar, scroll_label, status_text};
