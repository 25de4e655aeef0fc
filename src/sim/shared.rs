/// State shared between the clock-tick loop and the input loop.
///
/// Only two things cross the thread boundary:
///   - the requested direction, behind a mutex (overwrite-latest)
///   - a one-shot end word: running → quit | loss | won, first writer wins
///
/// The end word only ever moves away from running, so it is read
/// without the lock. Winning is a write like any other, so a quit
/// raised at the same moment either beats it or is ignored.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::direction::Dir;

const RUNNING: u8 = 0;
const QUIT: u8 = 1;
const LOSS: u8 = 2;
const WON: u8 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StopReason {
    Quit,
    Loss,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameOutcome {
    Won,
    Lost,
    Quit,
}

impl GameOutcome {
    pub fn message(self) -> &'static str {
        match self {
            GameOutcome::Won => "You win the game! CONGRATULATIONS!",
            GameOutcome::Quit => "Quitter!",
            GameOutcome::Lost => "Sorry, you lose...",
        }
    }
}

#[derive(Debug)]
pub struct SharedState {
    requested: Mutex<Dir>,
    end: AtomicU8,
}

impl SharedState {
    pub fn new() -> Self {
        SharedState {
            requested: Mutex::new(Dir::Stop),
            end: AtomicU8::new(RUNNING),
        }
    }

    /// Overwrite the requested direction.
    pub fn request(&self, dir: Dir) {
        // a poisoned lock still holds a plain Copy value
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner) = dir;
    }

    pub fn requested(&self) -> Dir {
        *self.requested.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn raise_quit(&self) {
        self.raise(QUIT);
    }

    pub fn raise_loss(&self) {
        self.raise(LOSS);
    }

    fn raise(&self, reason: u8) {
        let _ = self.end.compare_exchange(RUNNING, reason, Ordering::AcqRel, Ordering::Acquire);
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self.end.load(Ordering::Acquire) {
            QUIT => Some(StopReason::Quit),
            LOSS => Some(StopReason::Loss),
            _ => None,
        }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.end.load(Ordering::Acquire), QUIT | LOSS)
    }

    /// Set by the clock loop after the last level, unless stopped.
    pub fn declare_winner(&self) {
        self.raise(WON);
    }

    pub fn is_winner(&self) -> bool {
        self.end.load(Ordering::Acquire) == WON
    }

    /// Either loop should wind down.
    pub fn is_over(&self) -> bool {
        self.end.load(Ordering::Acquire) != RUNNING
    }

    pub fn outcome(&self) -> GameOutcome {
        if self.is_winner() {
            GameOutcome::Won
        } else if self.stop_reason() == Some(StopReason::Quit) {
            GameOutcome::Quit
        } else {
            GameOutcome::Lost
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        SharedState::new()
    }
}
