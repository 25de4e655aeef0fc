/// Entry point: configuration, logging, terminal setup, then hand over to
/// the two-thread game runner.

mod config;
mod domain;
mod sim;
mod ui;

use std::fs::File;
use std::process::ExitCode;
use std::sync::Mutex;

use crossterm::terminal;
use tracing::{error, info, warn, Level};

use config::{GameConfig, LogConfig};
use domain::level::{LevelParameters, MAX_LEVEL};
use sim::clock::ClockSettings;
use sim::maze::GridMaze;
use ui::input::TerminalKeys;
use ui::renderer::TerminalDisplay;
use ui::timer::IntervalTimer;
use ui::SetupError;

fn main() -> ExitCode {
    let config = GameConfig::load();
    init_logging(&config.log);
    for w in &config.warnings {
        warn!("{w}");
    }

    if let Err(e) = terminal::enable_raw_mode() {
        return setup_failed(SetupError::RawMode(e));
    }

    let d = &config.display;
    let mut display = match TerminalDisplay::open(d.tile_width, d.tile_height, d.pan_border) {
        Ok(display) => display,
        Err(e) => {
            let _ = terminal::disable_raw_mode();
            return setup_failed(e);
        }
    };

    let geom = display.geometry();
    let settings = ClockSettings {
        geom,
        max_catch_up: config.timing.max_catch_up,
        fruit_label: config.timing.fruit_label,
        last_level: MAX_LEVEL,
    };
    info!(
        view_w = geom.view_w,
        view_h = geom.view_h,
        tile_w = geom.tile_w,
        tile_h = geom.tile_h,
        pan_border = geom.pan_border,
        seed = ?config.seed,
        "game start"
    );

    let mut maze = GridMaze::new(config.seed);
    let mut timer = IntervalTimer::new(LevelParameters::for_level(1).tick_interval());
    let mut keys = TerminalKeys::new();
    let outcome = sim::game::run(&mut maze, &mut display, &mut timer, &mut keys, &settings, config.quit_key);
    info!(?outcome, "game over");

    if let Err(e) = display.close() {
        warn!(error = %e, "terminal cleanup failed");
    }
    if let Err(e) = terminal::disable_raw_mode() {
        warn!(error = %e, "could not restore terminal mode");
    }

    println!("{}", outcome.message());
    ExitCode::SUCCESS
}

fn setup_failed(e: SetupError) -> ExitCode {
    error!(error = %e, "setup failed");
    eprintln!("{e}");
    ExitCode::from(e.exit_code())
}

/// Log to a file; the terminal belongs to the game. If the file cannot be
/// opened the game runs without logging.
fn init_logging(log: &LogConfig) {
    let file = match File::create(&log.file) {
        Ok(f) => f,
        Err(_) => return,
    };
    let level = log.level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .with_thread_names(true)
        .init();
}
