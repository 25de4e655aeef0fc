/// Per-level difficulty parameters.
///
/// Every value is a linear function of the level offset `L - 1`,
/// clamped to a bound it can never pass:
///
///   maze width       MAZE_MIN_W + 2k   ≤ MAZE_MAX_W
///   maze height      MAZE_MIN_H + 2k   ≤ MAZE_MAX_H
///   fruit            1 + k/2           ≤ 6
///   first fruit      300 - 30k         ≥ 120
///   between fruits   300 - 60k         ≥ 60
///   tick interval    20000 - 1750k µs  ≥ 5000 µs

use std::time::Duration;

pub const MAX_LEVEL: u32 = 10;

pub const MAZE_MIN_W: u32 = 10;
pub const MAZE_MAX_W: u32 = 50;
pub const MAZE_MIN_H: u32 = 10;
pub const MAZE_MAX_H: u32 = 30;

const MAX_FRUIT: u32 = 6;
const FIRST_FRUIT_FLOOR: u32 = 120;
const BETWEEN_FRUITS_FLOOR: u32 = 60;
const TICK_USEC_START: u32 = 20_000;
const TICK_USEC_STEP: u32 = 1_750;
const TICK_USEC_FLOOR: u32 = 5_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LevelParameters {
    pub number: u32,
    pub maze_width: u32,
    pub maze_height: u32,
    pub fruit_count: u32,
    pub time_to_first_fruit: u32,
    pub time_between_fruits: u32,
    pub tick_usec: u32,
}

impl LevelParameters {
    /// Parameters for level `number` (1-based). Levels past MAX_LEVEL
    /// simply sit on the clamps.
    pub fn for_level(number: u32) -> Self {
        let k = number.max(1) - 1;
        LevelParameters {
            number,
            maze_width: (MAZE_MIN_W + 2 * k).min(MAZE_MAX_W),
            maze_height: (MAZE_MIN_H + 2 * k).min(MAZE_MAX_H),
            fruit_count: (1 + k / 2).min(MAX_FRUIT),
            time_to_first_fruit: 300u32.saturating_sub(30 * k).max(FIRST_FRUIT_FLOOR),
            time_between_fruits: 300u32.saturating_sub(60 * k).max(BETWEEN_FRUITS_FLOOR),
            tick_usec: TICK_USEC_START
                .saturating_sub(TICK_USEC_STEP * k)
                .max(TICK_USEC_FLOOR),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_micros(u64::from(self.tick_usec))
    }
}
