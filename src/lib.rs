//! termfolio: a terminal portfolio and blog, browsed locally or over SSH.

pub mod content;
pub mod core;
pub mod render;
pub mod serve;
pub mod tui;

#[cfg(test)]
pub mod test_support;
