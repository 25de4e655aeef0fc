/// Player motion state machine.
///
/// The player travels one pixel per tick and always finishes a tile it
/// has started, with one exception: the exact reverse of the current
/// direction takes effect immediately, mid-tile, by flipping the
/// remaining pixel count. Any other requested turn waits for the next
/// tile boundary and is only taken if that direction is open there.
///
/// `remaining` counts pixels to the next tile boundary. Between ticks it
/// lies in `[0, tile)` and is 0 exactly when the player is tile-aligned.

use super::direction::{Axis, Dir, OpenDirs};
use super::geometry::Geometry;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PlayerMotion {
    pub x: i32,
    pub y: i32,
    pub dir: Dir,
    /// Last non-stopped direction, used for the sprite.
    pub facing: Dir,
    pub remaining: i32,
}

impl PlayerMotion {
    /// Stopped and facing up at tile (tx, ty).
    pub fn at_tile(tx: i32, ty: i32, geom: &Geometry) -> Self {
        PlayerMotion {
            x: tx * geom.tile_w,
            y: ty * geom.tile_h,
            dir: Dir::Stop,
            facing: Dir::Up,
            remaining: 0,
        }
    }

    pub fn at_boundary(&self) -> bool {
        self.remaining == 0
    }

    pub fn tile(&self, geom: &Geometry) -> (i32, i32) {
        geom.tile_of(self.x, self.y)
    }

    /// First phase of a tick: apply an immediate reversal.
    pub fn apply_reversal(&mut self, requested: Dir, geom: &Geometry) {
        if requested == self.dir || !requested.is_reverse_of(self.dir) {
            return;
        }
        if self.remaining > 0 {
            self.remaining = tile_len(self.dir, geom) - self.remaining;
        }
        self.dir = requested;
    }

    /// Tile-boundary phase: take the requested turn if it is open, stop
    /// against a wall, otherwise start a fresh tile.
    pub fn choose_at_boundary(&mut self, requested: Dir, open: OpenDirs, geom: &Geometry) {
        debug_assert!(self.at_boundary());
        if open.contains(requested) {
            self.dir = requested;
        }
        if self.dir == Dir::Stop {
            return;
        }
        if open.contains(self.dir) {
            self.remaining = tile_len(self.dir, geom);
        } else {
            self.dir = Dir::Stop;
        }
    }

    /// Final phase: move one pixel. Returns the direction moved, if any.
    pub fn advance(&mut self) -> Option<Dir> {
        if self.dir == Dir::Stop || self.remaining == 0 {
            return None;
        }
        let (dx, dy) = self.dir.delta();
        self.facing = self.dir;
        self.remaining -= 1;
        self.x += dx;
        self.y += dy;
        Some(self.dir)
    }
}

fn tile_len(dir: Dir, geom: &Geometry) -> i32 {
    match dir.axis() {
        Some(Axis::Y) => geom.tile_h,
        Some(Axis::X) => geom.tile_w,
        None => 0,
    }
}
