/// Terminal key source.
///
/// crossterm hands us decoded key events; the engine's input loop wants
/// the raw byte stream a VT terminal sends. Each key press is re-encoded
/// (arrows become `ESC [ A..D`, Ctrl+C becomes 0x03) and queued, and
/// `next_key` pops one byte at a time.
///
/// Release events are ignored, so terminals with keyboard enhancement
/// behave the same as those without.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::input::{KeySource, CTRL_C, ESC};

#[derive(Default)]
pub struct TerminalKeys {
    pending: VecDeque<u8>,
}

impl TerminalKeys {
    pub fn new() -> Self {
        TerminalKeys { pending: VecDeque::with_capacity(8) }
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        if let Some(b) = self.pending.pop_front() {
            return Ok(Some(b));
        }
        if !event::poll(timeout)? {
            return Ok(None);
        }
        if let Event::Key(key) = event::read()? {
            self.pending.extend(encode(&key));
        }
        Ok(self.pending.pop_front())
    }
}

/// VT bytes for one key event; empty for releases and keys the game
/// has no use for.
pub fn encode(key: &KeyEvent) -> Vec<u8> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    let arrow = |c: u8| vec![ESC, b'[', c];
    match key.code {
        KeyCode::Up => arrow(b'A'),
        KeyCode::Down => arrow(b'B'),
        KeyCode::Right => arrow(b'C'),
        KeyCode::Left => arrow(b'D'),
        KeyCode::Esc => vec![ESC],
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) && c.eq_ignore_ascii_case(&'c') => {
            vec![CTRL_C]
        }
        KeyCode::Char(c) if c.is_ascii() => vec![c as u8],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent { code, modifiers, kind, state: KeyEventState::NONE }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn arrows_become_escape_sequences() {
        assert_eq!(encode(&press(KeyCode::Up)), b"\x1b[A");
        assert_eq!(encode(&press(KeyCode::Down)), b"\x1b[B");
        assert_eq!(encode(&press(KeyCode::Right)), b"\x1b[C");
        assert_eq!(encode(&press(KeyCode::Left)), b"\x1b[D");
    }

    #[test]
    fn ctrl_c_and_plain_chars() {
        let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(encode(&ctrl_c), vec![CTRL_C]);
        assert_eq!(encode(&press(KeyCode::Char('`'))), b"`");
        assert_eq!(encode(&press(KeyCode::Char('c'))), b"c");
        assert_eq!(encode(&press(KeyCode::Esc)), vec![ESC]);
    }

    #[test]
    fn repeats_count_releases_do_not() {
        let repeat = key(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Repeat);
        let release = key(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(encode(&repeat), b"\x1b[D");
        assert!(encode(&release).is_empty());
        assert!(encode(&press(KeyCode::F(1))).is_empty());
        assert!(encode(&press(KeyCode::Char('é'))).is_empty());
    }

    #[test]
    fn queued_bytes_come_out_in_order() {
        let mut keys = TerminalKeys::new();
        keys.pending.extend(encode(&press(KeyCode::Right)));
        let mut out = vec![];
        for _ in 0..3 {
            out.push(keys.next_key(Duration::ZERO).unwrap().unwrap());
        }
        assert_eq!(out, b"\x1b[C");
    }
}
