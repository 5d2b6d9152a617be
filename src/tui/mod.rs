//! # TUI Adapter
//!
//! The ratatui-specific layer: keymap, byte decoding, components and the
//! View step. The local runtime lives here too; the SSH runtime in
//! `serve` reuses everything but the terminal setup.
//!
//! ## Redraw Strategy
//!
//! The local loop only draws when the reducer returns `Effect::Redraw`.
//! Between key presses it sleeps until the next one-second tick, which
//! redraws only when the clock is shown.

mod component;
mod components;
mod event;
pub mod input;
pub mod keymap;
mod theme;
pub mod ui;

use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use log::info;
use ratatui::DefaultTerminal;

use crate::content::Library;
use crate::core::action::{Action, Effect, update};
use crate::core::state::Session;
use crate::tui::event::{poll_action, poll_action_immediate};
use crate::tui::ui::ViewOptions;

/// Interval between heartbeat ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Run one session on the controlling terminal until the user quits.
pub fn run(library: Arc<Library>, options: ViewOptions) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| {
        let mut session = Session::new(library);
        let size = terminal.size()?;
        update(
            &mut session,
            Action::Resize {
                width: size.width,
                height: size.height,
            },
        );
        update(&mut session, Action::Tick(Local::now()));
        event_loop(&mut terminal, &mut session, &options)
    });
    ratatui::restore();
    info!("Local session ended");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    session: &mut Session,
    options: &ViewOptions,
) -> std::io::Result<()> {
    let mut last_tick = Instant::now();
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw(f, session, options))?;
            needs_redraw = false;
        }

        let timeout = TICK_INTERVAL.saturating_sub(last_tick.elapsed());
        let mut pending = poll_action(timeout)?;
        while let Some(action) = pending {
            match update(session, action) {
                Effect::Quit => return Ok(()),
                Effect::Redraw => needs_redraw = true,
                Effect::None => {}
            }
            pending = poll_action_immediate()?;
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            last_tick = Instant::now();
            let effect = update(session, Action::Tick(Local::now()));
            if effect == Effect::Redraw && options.show_clock {
                needs_redraw = true;
            }
        }
    }
}
