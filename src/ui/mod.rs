use std::io;

use thiserror::Error;

pub mod input;
pub mod renderer;
pub mod timer;

/// Fatal problems while taking over the terminal, before any game thread
/// starts.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("could not switch the terminal to raw mode: {0}")]
    RawMode(#[source] io::Error),
    #[error("could not initialise the display: {0}")]
    Display(#[source] io::Error),
    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TooSmall { cols: u16, rows: u16, min_cols: u16, min_rows: u16 },
}

impl SetupError {
    pub fn exit_code(&self) -> u8 {
        match self {
            SetupError::RawMode(_) => 1,
            SetupError::Display(_) | SetupError::TooSmall { .. } => 3,
        }
    }
}
