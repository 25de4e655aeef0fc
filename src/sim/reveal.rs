/// Reveal / win evaluation at a tile boundary.
///
/// Eats any fruit under the player, unveils the neighbourhood
///
///         . . X . .
///         . X X X .
///         X X P X X
///         . X X X .
///         . . X . .
///
/// (the 3x3 block plus the four tiles two steps out along each axis),
/// redraws whatever changed, and reports whether the player stands on
/// an open exit. Unveiling an already visible tile draws nothing.

use crate::domain::block::Block;
use crate::domain::display::Display;
use crate::domain::geometry::Geometry;
use crate::domain::maze::Maze;
use super::event::GameEvent;

const NEIGHBOURHOOD: [(i32, i32); 13] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (0, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
    (0, -2), (2, 0), (0, 2), (-2, 0),
];

/// Returns true if (tx, ty) is an open exit.
pub fn unveil_around<M, D>(
    tx: i32,
    ty: i32,
    maze: &mut M,
    display: &mut D,
    geom: &Geometry,
    events: &mut Vec<GameEvent>,
) -> bool
where
    M: Maze + ?Sized,
    D: Display + ?Sized,
{
    if let Some(fruit) = maze.take_fruit(tx, ty) {
        events.push(GameEvent::FruitEaten { fruit, x: tx, y: ty });
        draw_tile(tx, ty, maze, display, geom);
        if maze.fruit_remaining() == 0 {
            let (ex, ey) = maze.exit_position();
            events.push(GameEvent::ExitOpened { x: ex, y: ey });
            draw_tile(ex, ey, maze, display, geom);
        }
    }

    for (dx, dy) in NEIGHBOURHOOD {
        let (x, y) = (tx + dx, ty + dy);
        if maze.unveil(x, y) {
            draw_tile(x, y, maze, display, geom);
        }
    }

    maze.is_exit(tx, ty)
}

fn draw_tile<M, D>(x: i32, y: i32, maze: &M, display: &mut D, geom: &Geometry)
where
    M: Maze + ?Sized,
    D: Display + ?Sized,
{
    let block = Block::tile(maze.tile_at(x, y), geom);
    display.draw_block(x * geom.tile_w, y * geom.tile_h, &block);
}
