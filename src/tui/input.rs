//! Raw terminal bytes → crossterm key events.
//!
//! A remote session only sees the byte stream the client's terminal sends.
//! `InputDecoder` turns it into the same `KeyEvent`s the local crossterm
//! backend produces, so both runtimes share one keymap.
//!
//! Incomplete UTF-8 and escape sequences that have started but not finished
//! are held until the next chunk. A lone ESC at the end of a chunk is taken
//! as the Esc key. Unknown escape sequences are dropped.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const ESC: u8 = 0x1b;
/// Longest CSI sequence we wait for before giving up on it.
const MAX_SEQUENCE: usize = 16;

enum Decoded {
    Key(KeyEvent, usize),
    Skip(usize),
    Incomplete,
}

#[derive(Debug, Default)]
pub struct InputDecoder {
    pending: Vec<u8>,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Vec<KeyEvent> {
        self.pending.extend_from_slice(bytes);

        let mut events = Vec::new();
        let mut pos = 0;
        while pos < self.pending.len() {
            match decode(&self.pending[pos..]) {
                Decoded::Key(key, used) => {
                    events.push(key);
                    pos += used;
                }
                Decoded::Skip(used) => pos += used,
                Decoded::Incomplete => break,
            }
        }
        self.pending.drain(..pos);
        events
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn decode(buf: &[u8]) -> Decoded {
    let Some(&first) = buf.first() else {
        return Decoded::Incomplete;
    };

    match first {
        ESC => decode_escape(buf),
        b'\r' | b'\n' => Decoded::Key(key(KeyCode::Enter), 1),
        0x7f | 0x08 => Decoded::Key(key(KeyCode::Backspace), 1),
        b'\t' => Decoded::Key(key(KeyCode::Tab), 1),
        0x01..=0x1a => {
            let letter = char::from(b'a' + first - 1);
            Decoded::Key(
                KeyEvent::new(KeyCode::Char(letter), KeyModifiers::CONTROL),
                1,
            )
        }
        0x00..=0x1f => Decoded::Skip(1),
        _ => decode_utf8(buf),
    }
}

fn decode_escape(buf: &[u8]) -> Decoded {
    match buf.get(1) {
        None => Decoded::Key(key(KeyCode::Esc), 1),
        Some(b'[') => decode_csi(buf),
        Some(b'O') => match buf.get(2) {
            None => Decoded::Incomplete,
            Some(&b) => match cursor_key(b) {
                Some(code) => Decoded::Key(key(code), 3),
                None => Decoded::Skip(3),
            },
        },
        // Alt+key
        Some(_) => Decoded::Skip(2),
    }
}

fn decode_csi(buf: &[u8]) -> Decoded {
    let Some(end) = buf
        .iter()
        .skip(2)
        .position(|b| (0x40..=0x7e).contains(b))
        .map(|i| i + 2)
    else {
        return if buf.len() >= MAX_SEQUENCE {
            Decoded::Skip(buf.len())
        } else {
            Decoded::Incomplete
        };
    };

    let params = &buf[2..end];
    let code = match buf[end] {
        b'~' => match params {
            b"5" => Some(KeyCode::PageUp),
            b"6" => Some(KeyCode::PageDown),
            b"3" => Some(KeyCode::Delete),
            b"1" | b"7" => Some(KeyCode::Home),
            b"4" | b"8" => Some(KeyCode::End),
            _ => None,
        },
        // Modified arrows (`ESC [ 1 ; 5 A`) decode as plain arrows
        b => cursor_key(b),
    };
    match code {
        Some(code) => Decoded::Key(key(code), end + 1),
        None => Decoded::Skip(end + 1),
    }
}

fn cursor_key(final_byte: u8) -> Option<KeyCode> {
    match final_byte {
        b'A' => Some(KeyCode::Up),
        b'B' => Some(KeyCode::Down),
        b'C' => Some(KeyCode::Right),
        b'D' => Some(KeyCode::Left),
        b'H' => Some(KeyCode::Home),
        b'F' => Some(KeyCode::End),
        _ => None,
    }
}

fn decode_utf8(buf: &[u8]) -> Decoded {
    let len = match buf[0] {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Decoded::Skip(1),
    };
    if buf.len() < len {
        return Decoded::Incomplete;
    }
    match std::str::from_utf8(&buf[..len])
        .ok()
        .and_then(|s| s.chars().next())
    {
        Some(ch) => Decoded::Key(key(KeyCode::Char(ch)), len),
        None => Decoded::Skip(1),
    }
}
