//! # Core Navigation Engine
//!
//! Per-session state and the reducer that drives it.
//! It knows nothing about terminals or SSH.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No terminal.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │   SERVE    │
//!           │  (local    │              │  (one task │
//!           │  terminal) │              │  per SSH   │
//!           │            │              │  session)  │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`page`]: The five top-level pages and their fixed order
//! - [`viewport`]: Scrollable window over rendered content
//! - [`state`]: The `Session` struct, everything one viewer sees
//! - [`action`]: The `Action` enum and `update()`
//! - [`resolve`]: What text the current view shows
//! - [`config`]: Settings file, env vars and CLI overrides

pub mod action;
pub mod config;
pub mod page;
pub mod resolve;
pub mod state;
pub mod viewport;
