/// The step function: advances a level by one tick.
///
/// Processing order:
///   1. Immediate reversal (mid-tile)
///   2. At a tile boundary: reveal / eat / win check, then pick the
///      direction for the next tile from the open set
///   3. One pixel of motion, viewport pan, sprite redraw

use crate::domain::block::Block;
use crate::domain::direction::Dir;
use crate::domain::display::Display;
use crate::domain::maze::Maze;
use super::event::GameEvent;
use super::reveal;
use super::world::LevelState;

pub fn step<M, D>(level: &mut LevelState, requested: Dir, maze: &mut M, display: &mut D) -> Vec<GameEvent>
where
    M: Maze,
    D: Display + ?Sized,
{
    if level.cleared {
        return vec![];
    }

    let mut events = Vec::new();
    let geom = level.geom;
    let p = &mut level.player;

    p.apply_reversal(requested, &geom);

    if p.at_boundary() {
        let (tx, ty) = p.tile(&geom);
        if reveal::unveil_around(tx, ty, maze, display, &geom, &mut events) {
            level.cleared = true;
            events.push(GameEvent::LevelCleared);
            return events;
        }
        p.choose_at_boundary(requested, maze.open_directions(tx, ty), &geom);
    }

    if let Some(dir) = p.advance() {
        if level.viewport.on_player_moved(dir, p.x, p.y, display, &*maze) {
            events.push(GameEvent::Panned);
        }
        display.draw_block(p.x, p.y, &Block::composited_player(p.facing, &geom));
        events.push(GameEvent::Moved);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Geometry;
    use crate::domain::level::LevelParameters;
    use crate::sim::testutil::{DiagramMaze, RecordingDisplay};

    fn level() -> LevelState {
        LevelState::new(LevelParameters::for_level(1), Geometry::vga())
    }

    fn corridor() -> DiagramMaze {
        DiagramMaze::from_rows(&[
            "######",
            "#   E#",
            "# ####",
            "######",
        ])
    }

    #[test]
    fn one_tile_right_lands_aligned() {
        let mut lv = level();
        let mut m = corridor();
        let mut d = RecordingDisplay::default();
        for _ in 0..12 {
            step(&mut lv, Dir::Right, &mut m, &mut d);
        }
        assert_eq!(lv.player.tile(&lv.geom), (2, 1));
        assert_eq!((lv.player.x, lv.player.y), (24, 12));
        assert_eq!(lv.player.remaining, 0);
        assert_eq!(d.blocks.last(), Some(&(24, 12)));
    }

    #[test]
    fn stopped_player_does_not_redraw() {
        let mut lv = level();
        let mut m = corridor();
        let mut d = RecordingDisplay::default();
        let events = step(&mut lv, Dir::Up, &mut m, &mut d);
        assert!(!events.contains(&GameEvent::Moved));
        assert_eq!(lv.player.dir, Dir::Stop);
    }

    #[test]
    fn turn_down_only_where_open() {
        let mut lv = level();
        let mut m = corridor();
        let mut d = RecordingDisplay::default();
        // (1,1) has an opening below; request it right away
        step(&mut lv, Dir::Down, &mut m, &mut d);
        assert_eq!(lv.player.dir, Dir::Down);

        let mut lv = level();
        step(&mut lv, Dir::Right, &mut m, &mut d);
        for _ in 0..11 {
            step(&mut lv, Dir::Down, &mut m, &mut d);
        }
        // at (2,1) down is a wall, so keep heading right
        step(&mut lv, Dir::Down, &mut m, &mut d);
        assert_eq!(lv.player.dir, Dir::Right);
    }

    #[test]
    fn exit_clears_level_exactly_once() {
        let mut lv = level();
        let mut m = corridor();
        let mut d = RecordingDisplay::default();
        let mut cleared = 0;
        for _ in 0..60 {
            let events = step(&mut lv, Dir::Right, &mut m, &mut d);
            cleared += events.iter().filter(|e| **e == GameEvent::LevelCleared).count();
        }
        assert_eq!(cleared, 1);
        assert!(lv.cleared);
        assert_eq!(lv.player.tile(&lv.geom), (4, 1));
        assert!(step(&mut lv, Dir::Left, &mut m, &mut d).is_empty());
    }

    #[test]
    fn reverse_mid_tile_moves_that_tick() {
        let mut lv = level();
        let mut m = corridor();
        let mut d = RecordingDisplay::default();
        for _ in 0..4 {
            step(&mut lv, Dir::Right, &mut m, &mut d);
        }
        assert_eq!(lv.player.x, 16);
        let events = step(&mut lv, Dir::Left, &mut m, &mut d);
        assert!(events.contains(&GameEvent::Moved));
        assert_eq!(lv.player.x, 15);
        assert_eq!(lv.player.dir, Dir::Left);
        assert_eq!(lv.player.remaining, 3);
    }

    #[test]
    fn fruit_is_reported_when_entered() {
        let mut lv = level();
        let mut m = DiagramMaze::from_rows(&[
            "#####",
            "# 3E#",
            "#####",
        ]);
        let mut d = RecordingDisplay::default();
        let mut eaten = vec![];
        for _ in 0..30 {
            for e in step(&mut lv, Dir::Right, &mut m, &mut d) {
                if let GameEvent::FruitEaten { fruit, x, y } = e {
                    eaten.push((fruit, x, y));
                }
            }
        }
        assert_eq!(eaten.len(), 1);
        assert_eq!((eaten[0].1, eaten[0].2), (2, 1));
        assert!(lv.cleared);
    }
}
