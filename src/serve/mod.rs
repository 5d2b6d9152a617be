//! # Remote Sessions over SSH
//!
//! Each SSH connection gets its own engine session, running in its own tokio
//! task. Sessions share nothing but the read-only [`Library`].
//!
//! ```text
//! ssh client ──► russh ──► SessionHandler ──(SessionEvent)──► session::run
//!                              ▲                                  │
//!                              └──── forwarder ◄──(frame bytes)───┘
//! ```
//!
//! Any user name and any credentials are accepted. A channel that asks for
//! a shell without first requesting a pty gets a short message and is closed.

pub mod session;
pub mod writer;

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use russh::server::{self, Auth, Msg, Server as _};
use russh::{Channel, ChannelId, CryptoVec, Pty};
use russh_keys::key::{KeyPair, PublicKey};
use tokio::sync::mpsc::{self, UnboundedSender};
use uuid::Uuid;

use crate::content::Library;
use crate::core::config::ResolvedConfig;
use crate::serve::session::SessionEvent;
use crate::tui::ui::ViewOptions;

pub const NO_PTY_MESSAGE: &str =
    "termfolio needs an interactive terminal. Connect with `ssh -t`.\r\n";

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ServeError {
    Io(std::io::Error),
    Ssh(russh::Error),
    HostKey(russh_keys::Error),
    /// No key given and generating one failed.
    KeyGeneration,
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::Io(e) => write!(f, "server I/O error: {e}"),
            ServeError::Ssh(e) => write!(f, "SSH error: {e}"),
            ServeError::HostKey(e) => write!(f, "host key error: {e}"),
            ServeError::KeyGeneration => write!(f, "could not generate an ephemeral host key"),
        }
    }
}

impl std::error::Error for ServeError {}

impl From<std::io::Error> for ServeError {
    fn from(e: std::io::Error) -> Self {
        ServeError::Io(e)
    }
}

impl From<russh::Error> for ServeError {
    fn from(e: russh::Error) -> Self {
        ServeError::Ssh(e)
    }
}

// ============================================================================
// Server
// ============================================================================

/// Loads the configured host key, or generates an ephemeral ed25519 key.
pub fn load_host_key(path: Option<&Path>) -> Result<KeyPair, ServeError> {
    match path {
        Some(path) => {
            let key = russh_keys::load_secret_key(path, None).map_err(ServeError::HostKey)?;
            info!("Loaded host key from {}", path.display());
            Ok(key)
        }
        None => {
            warn!("No host key configured, generating an ephemeral ed25519 key");
            KeyPair::generate_ed25519().ok_or(ServeError::KeyGeneration)
        }
    }
}

#[derive(Clone)]
pub struct PortfolioServer {
    library: Arc<Library>,
    options: ViewOptions,
}

impl PortfolioServer {
    pub fn new(library: Arc<Library>, options: ViewOptions) -> Self {
        Self { library, options }
    }
}

impl server::Server for PortfolioServer {
    type Handler = SessionHandler;

    fn new_client(&mut self, peer: Option<SocketAddr>) -> SessionHandler {
        let handler = SessionHandler::new(self.library.clone(), self.options.clone());
        info!("[{}] Connection from {:?}", handler.id, peer);
        handler
    }
}

/// Listen on the configured address until ctrl-c.
pub async fn run(
    config: &ResolvedConfig,
    library: Arc<Library>,
    options: ViewOptions,
) -> Result<(), ServeError> {
    let key = load_host_key(config.host_key.as_deref())?;
    let ssh_config = Arc::new(server::Config {
        inactivity_timeout: Some(config.idle_timeout),
        auth_rejection_time: Duration::from_secs(1),
        auth_rejection_time_initial: Some(Duration::ZERO),
        keys: vec![key],
        ..Default::default()
    });

    let mut server = PortfolioServer::new(library, options);
    info!("Listening on {}:{}", config.host, config.port);

    tokio::select! {
        result = server.run_on_address(ssh_config, (config.host.as_str(), config.port)) => {
            result.map_err(ServeError::Io)
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            Ok(())
        }
    }
}

// ============================================================================
// Per-connection handler
// ============================================================================

pub struct SessionHandler {
    id: Uuid,
    library: Arc<Library>,
    options: ViewOptions,
    channel: Option<ChannelId>,
    size: Option<(u16, u16)>,
    events: Option<UnboundedSender<SessionEvent>>,
}

impl SessionHandler {
    fn new(library: Arc<Library>, options: ViewOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            library,
            options,
            channel: None,
            size: None,
            events: None,
        }
    }

    fn send(&mut self, event: SessionEvent) {
        if let Some(events) = &self.events
            && events.send(event).is_err()
        {
            self.events = None;
        }
    }

    /// Spawn the session task and the forwarder that carries its frames
    /// into the channel. The forwarder closes the channel once the session
    /// task drops its frame senders.
    fn start(&mut self, channel: ChannelId, size: (u16, u16), handle: server::Handle) {
        let (frame_tx, mut frame_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        self.events = Some(event_tx);

        let id = self.id;
        tokio::spawn(async move {
            while let Some(bytes) = frame_rx.recv().await {
                if handle.data(channel, CryptoVec::from_slice(&bytes)).await.is_err() {
                    break;
                }
            }
            let _ = handle.close(channel).await;
        });

        let library = self.library.clone();
        let options = self.options.clone();
        tokio::spawn(async move {
            match session::run(id, library, options, size, frame_tx, event_rx).await {
                Ok(()) => info!("[{}] Session finished", id),
                Err(e) => warn!("[{}] Session failed: {}", id, e),
            }
        });
    }
}

fn clamp_dimension(value: u32) -> u16 {
    value.clamp(1, u16::MAX as u32) as u16
}

#[async_trait]
impl server::Handler for SessionHandler {
    type Error = russh::Error;

    async fn auth_none(&mut self, user: &str) -> Result<Auth, Self::Error> {
        info!("[{}] Accepting user {:?}", self.id, user);
        Ok(Auth::Accept)
    }

    async fn auth_password(&mut self, user: &str, _password: &str) -> Result<Auth, Self::Error> {
        info!("[{}] Accepting user {:?} (password)", self.id, user);
        Ok(Auth::Accept)
    }

    async fn auth_publickey(
        &mut self,
        user: &str,
        _public_key: &PublicKey,
    ) -> Result<Auth, Self::Error> {
        info!("[{}] Accepting user {:?} (public key)", self.id, user);
        Ok(Auth::Accept)
    }

    async fn channel_open_session(
        &mut self,
        channel: Channel<Msg>,
        _session: &mut server::Session,
    ) -> Result<bool, Self::Error> {
        if self.channel.is_some() {
            warn!("[{}] Refusing a second session channel", self.id);
            return Ok(false);
        }
        self.channel = Some(channel.id());
        Ok(true)
    }

    #[allow(clippy::too_many_arguments)]
    async fn pty_request(
        &mut self,
        channel: ChannelId,
        term: &str,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _modes: &[(Pty, u32)],
        session: &mut server::Session,
    ) -> Result<(), Self::Error> {
        let size = (clamp_dimension(col_width), clamp_dimension(row_height));
        info!("[{}] pty {} {}x{}", self.id, term, size.0, size.1);
        self.size = Some(size);
        session.channel_success(channel);
        Ok(())
    }

    async fn shell_request(
        &mut self,
        channel: ChannelId,
        session: &mut server::Session,
    ) -> Result<(), Self::Error> {
        let Some(size) = self.size else {
            warn!("[{}] Shell requested without a pty, closing", self.id);
            session.data(channel, CryptoVec::from_slice(NO_PTY_MESSAGE.as_bytes()));
            session.close(channel);
            return Ok(());
        };
        session.channel_success(channel);
        self.start(channel, size, session.handle());
        Ok(())
    }

    async fn window_change_request(
        &mut self,
        _channel: ChannelId,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _session: &mut server::Session,
    ) -> Result<(), Self::Error> {
        let (width, height) = (clamp_dimension(col_width), clamp_dimension(row_height));
        self.size = Some((width, height));
        self.send(SessionEvent::Resize { width, height });
        Ok(())
    }

    async fn data(
        &mut self,
        _channel: ChannelId,
        data: &[u8],
        _session: &mut server::Session,
    ) -> Result<(), Self::Error> {
        self.send(SessionEvent::Input(data.to_vec()));
        Ok(())
    }
}

impl Drop for SessionHandler {
    fn drop(&mut self) {
        info!("[{}] Disconnected", self.id);
    }
}
