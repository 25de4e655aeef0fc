/// Input loop: turns the keyboard byte stream into requested directions.
///
/// Arrow keys arrive as the three-byte sequence `ESC [ A..D`. Anything
/// that breaks the sequence resets the decoder. The quit key (and
/// Ctrl+C) raise the quit flag and end the loop; otherwise the loop runs
/// until the game is over, waking at least every `POLL` to look at the
/// shared flags.

use std::io;
use std::time::Duration;

use tracing::{info, trace, warn};

use crate::domain::direction::Dir;
use super::shared::SharedState;

pub const ESC: u8 = 0x1b;
pub const CTRL_C: u8 = 0x03;

const POLL: Duration = Duration::from_millis(50);

pub trait KeySource {
    /// Wait up to `timeout` for the next input byte.
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
enum DecodeState {
    #[default]
    Ground,
    Escape,
    Bracket,
}

#[derive(Clone, Copy, Default, Debug)]
pub struct EscapeDecoder {
    state: DecodeState,
}

impl EscapeDecoder {
    /// No sequence is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == DecodeState::Ground
    }

    pub fn feed(&mut self, byte: u8) -> Option<Dir> {
        if byte == ESC {
            self.state = DecodeState::Escape;
            return None;
        }
        let (next, dir) = match (self.state, byte) {
            (DecodeState::Escape, b'[') => (DecodeState::Bracket, None),
            (DecodeState::Bracket, b'A') => (DecodeState::Ground, Some(Dir::Up)),
            (DecodeState::Bracket, b'B') => (DecodeState::Ground, Some(Dir::Down)),
            (DecodeState::Bracket, b'C') => (DecodeState::Ground, Some(Dir::Right)),
            (DecodeState::Bracket, b'D') => (DecodeState::Ground, Some(Dir::Left)),
            _ => (DecodeState::Ground, None),
        };
        self.state = next;
        dir
    }
}

pub fn run_input<K: KeySource + ?Sized>(shared: &SharedState, keys: &mut K, quit_key: u8) {
    let mut decoder = EscapeDecoder::default();

    while !shared.is_over() {
        match keys.next_key(POLL) {
            // the quit key only counts outside an arrow sequence
            Ok(Some(byte)) if byte == CTRL_C || (byte == quit_key && decoder.is_idle()) => {
                info!("quit requested");
                shared.raise_quit();
                break;
            }
            Ok(Some(byte)) => {
                if let Some(dir) = decoder.feed(byte) {
                    trace!(?dir, "direction requested");
                    shared.request(dir);
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "keyboard read failed");
                shared.raise_loss();
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::sim::shared::GameOutcome;

    struct ScriptedKeys {
        bytes: VecDeque<u8>,
        fail_when_empty: bool,
        polls: usize,
    }

    impl ScriptedKeys {
        fn new(bytes: &[u8]) -> Self {
            ScriptedKeys { bytes: bytes.iter().copied().collect(), fail_when_empty: false, polls: 0 }
        }
    }

    impl KeySource for ScriptedKeys {
        fn next_key(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
            self.polls += 1;
            match self.bytes.pop_front() {
                Some(b) => Ok(Some(b)),
                None if self.fail_when_empty => Err(io::Error::other("stdin closed")),
                None => Ok(None),
            }
        }
    }

    fn decode(bytes: &[u8]) -> Vec<Dir> {
        let mut d = EscapeDecoder::default();
        bytes.iter().filter_map(|b| d.feed(*b)).collect()
    }

    #[test]
    fn arrow_sequences() {
        assert_eq!(
            decode(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![Dir::Up, Dir::Down, Dir::Right, Dir::Left]
        );
    }

    #[test]
    fn broken_sequence_resets() {
        assert_eq!(decode(b"\x1bx[A"), vec![]);
        assert_eq!(decode(b"\x1b[xA\x1b[C"), vec![Dir::Right]);
        assert_eq!(decode(b"[A"), vec![]);
    }

    #[test]
    fn escape_restarts_a_sequence() {
        assert_eq!(decode(b"\x1b\x1b[A"), vec![Dir::Up]);
        assert_eq!(decode(b"\x1b[\x1b[D"), vec![Dir::Left]);
    }

    #[test]
    fn last_arrow_wins_then_quit() {
        let shared = SharedState::new();
        let mut keys = ScriptedKeys::new(b"\x1b[A\x1b[Dzz`\x1b[B");
        run_input(&shared, &mut keys, b'`');
        assert_eq!(shared.requested(), Dir::Left);
        assert_eq!(shared.outcome(), GameOutcome::Quit);
        // nothing after the quit key is read
        assert_eq!(keys.bytes.len(), 3);
    }

    #[test]
    fn ctrl_c_quits() {
        let shared = SharedState::new();
        let mut keys = ScriptedKeys::new(&[CTRL_C]);
        run_input(&shared, &mut keys, b'q');
        assert_eq!(shared.outcome(), GameOutcome::Quit);
    }

    #[test]
    fn exits_once_game_is_over() {
        let shared = SharedState::new();
        shared.declare_winner();
        let mut keys = ScriptedKeys::new(b"\x1b[A");
        run_input(&shared, &mut keys, b'`');
        assert_eq!(keys.polls, 0);
        assert_eq!(shared.requested(), Dir::Stop);
    }

    #[test]
    fn quit_key_inside_arrow_sequence_is_a_direction() {
        let shared = SharedState::new();
        let mut keys = ScriptedKeys::new(b"\x1b[A\x1b[B");
        keys.fail_when_empty = true;
        run_input(&shared, &mut keys, b'A');
        assert_eq!(shared.requested(), Dir::Down);
        // the script ran dry without a quit
        assert_eq!(shared.outcome(), GameOutcome::Lost);

        let shared = SharedState::new();
        let mut keys = ScriptedKeys::new(b"\x1b[CA");
        run_input(&shared, &mut keys, b'A');
        assert_eq!(shared.requested(), Dir::Right);
        assert_eq!(shared.outcome(), GameOutcome::Quit);
    }

    #[test]
    fn decoder_idle_only_between_sequences() {
        let mut d = EscapeDecoder::default();
        assert!(d.is_idle());
        d.feed(ESC);
        assert!(!d.is_idle());
        d.feed(b'[');
        assert!(!d.is_idle());
        d.feed(b'D');
        assert!(d.is_idle());
    }

    #[test]
    fn read_error_ends_the_game() {
        let shared = SharedState::new();
        let mut keys = ScriptedKeys::new(b"\x1b[C");
        keys.fail_when_empty = true;
        run_input(&shared, &mut keys, b'`');
        assert_eq!(shared.requested(), Dir::Right);
        assert_eq!(shared.outcome(), GameOutcome::Lost);
    }
}
