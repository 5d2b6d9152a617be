//! One remote viewer: an engine `Session` drawn into an SSH channel.
//!
//! The russh handler turns channel traffic into [`SessionEvent`]s; this task
//! owns everything else. It decodes input bytes, runs the reducer, ticks the
//! clock every second and draws frames through a [`ChannelWriter`] onto the
//! frame channel.
//!
//! The task ends when the viewer quits (the caller then closes the channel)
//! or when the event sender is dropped because the client went away.

use std::io;
use std::sync::Arc;

use chrono::Local;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::{debug, info};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::{Terminal, TerminalOptions, Viewport};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::content::Library;
use crate::core::action::{Action, Effect, update};
use crate::core::state::Session;
use crate::serve::writer::ChannelWriter;
use crate::tui::TICK_INTERVAL;
use crate::tui::input::InputDecoder;
use crate::tui::keymap;
use crate::tui::ui::{self, ViewOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Raw bytes typed by the viewer.
    Input(Vec<u8>),
    /// The client's window changed size.
    Resize { width: u16, height: u16 },
}

type RemoteTerminal = Terminal<CrosstermBackend<ChannelWriter>>;

/// A terminal drawing into a fixed `width`×`height` area.
///
/// The crossterm backend's cursor and size queries talk to the server's own
/// tty, never the viewer's. Only `draw`, cursor visibility and raw escape
/// sequences are used on these terminals; `clear()` and `resize()` are not.
fn fixed_terminal(writer: ChannelWriter, width: u16, height: u16) -> io::Result<RemoteTerminal> {
    Terminal::with_options(
        CrosstermBackend::new(writer),
        TerminalOptions {
            viewport: Viewport::Fixed(Rect::new(0, 0, width.max(1), height.max(1))),
        },
    )
}

struct RemoteSession {
    id: Uuid,
    session: Session,
    terminal: RemoteTerminal,
    /// Kept to open a fresh writer when the window size changes.
    frames: UnboundedSender<Vec<u8>>,
    decoder: InputDecoder,
    options: ViewOptions,
}

impl RemoteSession {
    fn new(
        id: Uuid,
        library: Arc<Library>,
        options: ViewOptions,
        (width, height): (u16, u16),
        frames: UnboundedSender<Vec<u8>>,
    ) -> io::Result<Self> {
        let terminal = fixed_terminal(ChannelWriter::new(frames.clone()), width, height)?;

        let mut session = Session::new(library);
        update(&mut session, Action::Resize { width, height });
        update(&mut session, Action::Tick(Local::now()));

        Ok(Self {
            id,
            session,
            terminal,
            frames,
            decoder: InputDecoder::new(),
            options,
        })
    }

    fn enter(&mut self) -> io::Result<()> {
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            Clear(ClearType::All)
        )?;
        self.terminal.hide_cursor()?;
        self.draw()
    }

    fn leave(&mut self) -> io::Result<()> {
        self.terminal.show_cursor()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
    }

    /// Start over with a terminal of the new size; the next draw repaints
    /// every cell.
    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        let terminal = fixed_terminal(ChannelWriter::new(self.frames.clone()), width, height)?;
        drop(std::mem::replace(&mut self.terminal, terminal));
        execute!(self.terminal.backend_mut(), Clear(ClearType::All))
    }

    fn draw(&mut self) -> io::Result<()> {
        let (session, options) = (&self.session, &self.options);
        self.terminal.draw(|f| ui::draw(f, session, options))?;
        Ok(())
    }

    fn handle(&mut self, event: SessionEvent) -> io::Result<Effect> {
        match event {
            SessionEvent::Input(bytes) => {
                let mut effect = Effect::None;
                for key in self.decoder.feed(&bytes) {
                    let Some(action) = keymap::action_for(&key) else {
                        continue;
                    };
                    match update(&mut self.session, action) {
                        Effect::Quit => return Ok(Effect::Quit),
                        Effect::Redraw => effect = Effect::Redraw,
                        Effect::None => {}
                    }
                }
                Ok(effect)
            }
            SessionEvent::Resize { width, height } => {
                debug!("[{}] Window resized to {}x{}", self.id, width, height);
                self.resize(width, height)?;
                Ok(update(&mut self.session, Action::Resize { width, height }))
            }
        }
    }
}

/// Drive one remote session until the viewer quits or disconnects.
pub async fn run(
    id: Uuid,
    library: Arc<Library>,
    options: ViewOptions,
    size: (u16, u16),
    frames: UnboundedSender<Vec<u8>>,
    mut events: UnboundedReceiver<SessionEvent>,
) -> io::Result<()> {
    let show_clock = options.show_clock;
    let mut remote = RemoteSession::new(id, library, options, size, frames)?;
    remote.enter()?;

    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let effect = tokio::select! {
            event = events.recv() => match event {
                Some(event) => remote.handle(event)?,
                None => {
                    debug!("[{}] Input closed", id);
                    return Ok(());
                }
            },
            _ = ticker.tick() => {
                let effect = update(&mut remote.session, Action::Tick(Local::now()));
                if show_clock { effect } else { Effect::None }
            }
        };

        match effect {
            Effect::Quit => {
                info!("[{}] Viewer quit", id);
                break;
            }
            Effect::Redraw => remote.draw()?,
            Effect::None => {}
        }
    }
    remote.leave()
}
