/// Game runner: starts the clock-tick and input threads, waits for both
/// and derives the outcome from the shared flags.

use std::thread;

use tracing::{error, info};

use crate::domain::display::Display;
use crate::domain::maze::Maze;
use super::clock::{run_clock, ClockSettings, TickSource};
use super::input::{run_input, KeySource};
use super::shared::{GameOutcome, SharedState};

pub fn run<M, D, T, K>(
    maze: &mut M,
    display: &mut D,
    timer: &mut T,
    keys: &mut K,
    settings: &ClockSettings,
    quit_key: u8,
) -> GameOutcome
where
    M: Maze + Send,
    D: Display + Send + ?Sized,
    T: TickSource + Send + ?Sized,
    K: KeySource + Send + ?Sized,
{
    let shared = SharedState::new();
    let state = &shared;

    thread::scope(|s| {
        let clock = thread::Builder::new()
            .name("clock".into())
            .spawn_scoped(s, move || run_clock(state, maze, display, timer, settings));
        let clock = match clock {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!(error = %e, "could not start clock thread");
                state.raise_loss();
                None
            }
        };

        let input = thread::Builder::new()
            .name("input".into())
            .spawn_scoped(s, move || run_input(state, keys, quit_key));
        let input = match input {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!(error = %e, "could not start input thread");
                state.raise_loss();
                None
            }
        };

        if let Some(handle) = clock {
            match handle.join() {
                Ok(stats) => info!(
                    levels = stats.levels_cleared,
                    steps = stats.steps,
                    late = stats.late,
                    "clock loop finished"
                ),
                Err(_) => {
                    error!("clock thread panicked");
                    state.raise_loss();
                }
            }
        }
        if let Some(handle) = input {
            if handle.join().is_err() {
                error!("input thread panicked");
                state.raise_loss();
            }
        }
    });

    shared.outcome()
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::time::Duration;

    use super::*;
    use crate::domain::geometry::Geometry;
    use crate::sim::testutil::{DiagramMaze, RecordingDisplay};

    struct SteadyTimer;

    impl TickSource for SteadyTimer {
        fn set_interval(&mut self, _interval: Duration) {}

        fn next_tick(&mut self) -> io::Result<u32> {
            std::thread::sleep(Duration::from_millis(1));
            Ok(1)
        }
    }

    struct Keys(Vec<u8>);

    impl KeySource for Keys {
        fn next_key(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
            std::thread::sleep(Duration::from_millis(1));
            Ok(self.0.pop())
        }
    }

    fn dead_end() -> DiagramMaze {
        DiagramMaze::from_rows(&["####", "#  #", "####"])
    }

    #[test]
    fn quit_key_ends_both_loops() {
        let mut maze = dead_end();
        let mut display = RecordingDisplay::default();
        let outcome = run(
            &mut maze,
            &mut display,
            &mut SteadyTimer,
            &mut Keys(vec![b'`']),
            &ClockSettings::new(Geometry::vga()),
            b'`',
        );
        assert_eq!(outcome, GameOutcome::Quit);
    }

    #[test]
    fn maze_failure_stops_input_loop_too() {
        let mut maze = dead_end();
        maze.fail_build = true;
        let mut display = RecordingDisplay::default();
        let outcome = run(
            &mut maze,
            &mut display,
            &mut SteadyTimer,
            &mut Keys(vec![]),
            &ClockSettings::new(Geometry::vga()),
            b'`',
        );
        assert_eq!(outcome, GameOutcome::Lost);
    }
}
