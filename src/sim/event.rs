/// Events emitted during a simulation step.
/// The clock loop consumes these for the HUD and the log.

use crate::domain::maze::Fruit;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    FruitEaten { fruit: Fruit, x: i32, y: i32 },
    ExitOpened { x: i32, y: i32 },
    Moved,
    Panned,
    LevelCleared,
}
