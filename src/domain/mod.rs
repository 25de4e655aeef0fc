pub mod block;
pub mod direction;
pub mod display;
pub mod geometry;
pub mod hud;
pub mod level;
pub mod maze;
pub mod motion;
pub mod viewport;
