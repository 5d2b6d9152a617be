//! `io::Write` sink that ships frames to an SSH channel.
//!
//! ratatui's crossterm backend writes escape sequences synchronously. The
//! SSH handle is async, so writes are buffered and each `flush` hands the
//! whole buffer to a forwarding task over an unbounded channel.

use std::io::{self, Write};

use tokio::sync::mpsc::UnboundedSender;

pub struct ChannelWriter {
    buffer: Vec<u8>,
    sender: UnboundedSender<Vec<u8>>,
}

impl ChannelWriter {
    pub fn new(sender: UnboundedSender<Vec<u8>>) -> Self {
        Self {
            buffer: Vec::new(),
            sender,
        }
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let bytes = std::mem::take(&mut self.buffer);
        self.sender
            .send(bytes)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "session channel closed"))
    }
}
