pub mod clock;
pub mod event;
pub mod game;
pub mod input;
pub mod maze;
pub mod reveal;
pub mod shared;
pub mod step;
pub mod world;

#[cfg(test)]
pub mod testutil;
