/// Clock-tick loop: the real-time half of the game.
///
/// Blocks on the tick source, replays each elapsed tick through `step`
/// (at most `max_catch_up` per wake-up), then repaints the HUD and
/// presents the frame. The shared lock is only taken inside
/// `SharedState::requested`, never across a draw or a tick wait.
///
/// The stop flag is polled at the top of every level and every tick, so
/// a quit takes effect within one tick interval.

use std::io;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::domain::block::{palette, Block};
use crate::domain::direction::Dir;
use crate::domain::display::Display;
use crate::domain::geometry::Geometry;
use crate::domain::hud::{self, Hud};
use crate::domain::level::{LevelParameters, MAX_LEVEL};
use crate::domain::maze::{Maze, MazeError};
use super::event::GameEvent;
use super::reveal;
use super::shared::SharedState;
use super::step::step;
use super::world::LevelState;

/// Periodic timer abstraction.
pub trait TickSource {
    /// Reprogram the period. The next deadline is one period from now.
    fn set_interval(&mut self, interval: Duration);

    /// Block until the next tick; returns how many periods have elapsed
    /// since the previous call (at least 1).
    fn next_tick(&mut self) -> io::Result<u32>;
}

#[derive(Clone, Debug)]
pub struct ClockSettings {
    pub geom: Geometry,
    pub max_catch_up: u32,
    pub fruit_label: Duration,
    pub last_level: u32,
}

impl ClockSettings {
    pub fn new(geom: Geometry) -> Self {
        ClockSettings {
            geom,
            max_catch_up: 8,
            fruit_label: Duration::from_millis(1500),
            last_level: MAX_LEVEL,
        }
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct ClockStats {
    pub levels_cleared: u32,
    /// Wake-ups that reported exactly one tick.
    pub on_time: u64,
    /// Wake-ups that reported more than one.
    pub late: u64,
    pub steps: u64,
    pub elapsed: Duration,
}

enum LevelEnd {
    Cleared,
    Stopped,
    Failed,
}

pub fn run_clock<M, D, T>(
    shared: &SharedState,
    maze: &mut M,
    display: &mut D,
    timer: &mut T,
    settings: &ClockSettings,
) -> ClockStats
where
    M: Maze,
    D: Display + ?Sized,
    T: TickSource + ?Sized,
{
    let mut stats = ClockStats::default();
    let mut hud = Hud::new(settings.fruit_label);

    for number in 1..=settings.last_level {
        if shared.is_stopped() {
            break;
        }
        let params = LevelParameters::for_level(number);
        info!(
            level = number,
            width = params.maze_width,
            height = params.maze_height,
            fruit = params.fruit_count,
            tick_usec = params.tick_usec,
            "level start"
        );

        let mut level = match prepare_level(params, shared, maze, display, settings.geom) {
            Ok(level) => level,
            Err(e) => {
                error!(level = number, error = %e, "maze construction failed");
                shared.raise_loss();
                return stats;
            }
        };
        timer.set_interval(params.tick_interval());
        hud.clear();

        match play_level(&mut level, shared, maze, display, timer, settings, &mut hud, &mut stats) {
            LevelEnd::Cleared => {
                stats.levels_cleared += 1;
                let elapsed_ms = u64::try_from(stats.elapsed.as_millis()).unwrap_or(u64::MAX);
                info!(level = number, elapsed_ms, "level cleared");
            }
            LevelEnd::Stopped => break,
            LevelEnd::Failed => {
                shared.raise_loss();
                return stats;
            }
        }
    }

    debug!(on_time = stats.on_time, late = stats.late, "tick statistics");
    shared.declare_winner();
    stats
}

/// Build the maze, reset per-level state and paint the opening screen.
fn prepare_level<M, D>(
    params: LevelParameters,
    shared: &SharedState,
    maze: &mut M,
    display: &mut D,
    geom: Geometry,
) -> Result<LevelState, MazeError>
where
    M: Maze,
    D: Display + ?Sized,
{
    maze.build(params.maze_width, params.maze_height, params.fruit_count)?;
    shared.request(Dir::Stop);

    let level = LevelState::new(params, geom);
    let (r, g, b) = hud::wall_color(params.number);
    display.set_palette_entry(palette::WALL, r, g, b);
    level.viewport.redraw_all(display, &*maze);

    let (tx, ty) = level.player.tile(&geom);
    let mut opening = Vec::new();
    reveal::unveil_around(tx, ty, maze, display, &geom, &mut opening);
    draw_player(&level, display);
    Ok(level)
}

#[allow(clippy::too_many_arguments)]
fn play_level<M, D, T>(
    level: &mut LevelState,
    shared: &SharedState,
    maze: &mut M,
    display: &mut D,
    timer: &mut T,
    settings: &ClockSettings,
    hud: &mut Hud,
    stats: &mut ClockStats,
) -> LevelEnd
where
    M: Maze,
    D: Display + ?Sized,
    T: TickSource + ?Sized,
{
    let number = level.params.number;
    let (fg, bg) = hud::status_colors(number);
    let mut status = hud.text(number, maze.fruit_remaining(), stats.elapsed);
    display.draw_status_bar(&status, fg, bg);
    if let Err(e) = display.present_frame() {
        error!(error = %e, "present failed");
        return LevelEnd::Failed;
    }

    loop {
        if shared.is_stopped() {
            return LevelEnd::Stopped;
        }

        if let Some((r, g, b)) = hud::player_color(stats.elapsed) {
            display.set_palette_entry(palette::PLAYER, r, g, b);
        }

        let ticks = match timer.next_tick() {
            Ok(n) => n,
            Err(e) => {
                error!(error = %e, "tick source failed");
                return LevelEnd::Failed;
            }
        };
        stats.elapsed += level.params.tick_interval() * ticks;
        if ticks > 1 {
            stats.late += 1;
        } else {
            stats.on_time += 1;
        }

        let mut moved = false;
        for _ in 0..ticks.min(settings.max_catch_up) {
            if shared.is_stopped() {
                return LevelEnd::Stopped;
            }
            let requested = shared.requested();
            stats.steps += 1;
            for event in step(level, requested, maze, display) {
                match event {
                    GameEvent::Moved => moved = true,
                    GameEvent::FruitEaten { fruit, x, y } => {
                        debug!(?fruit, x, y, left = maze.fruit_remaining(), "fruit eaten");
                        hud.show_fruit(fruit, stats.elapsed);
                        moved = true;
                    }
                    GameEvent::ExitOpened { x, y } => debug!(x, y, "exit open"),
                    GameEvent::Panned | GameEvent::LevelCleared => {}
                }
            }
            if level.cleared {
                break;
            }
        }

        let text = hud.text(number, maze.fruit_remaining(), stats.elapsed);
        if moved || text != status {
            status = text;
            display.draw_status_bar(&status, fg, bg);
            if let Err(e) = display.present_frame() {
                error!(error = %e, "present failed");
                return LevelEnd::Failed;
            }
        }

        if level.cleared {
            return LevelEnd::Cleared;
        }
    }
}

fn draw_player<D: Display + ?Sized>(level: &LevelState, display: &mut D) {
    let p = &level.player;
    display.draw_block(p.x, p.y, &Block::composited_player(p.facing, &level.geom));
}
