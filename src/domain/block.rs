/// Tile-sized pixel blocks: maze tiles, the player sprite and its mask.
///
/// A block is a `w x h` grid of palette indices. The player is drawn as
/// `composite(sprite, mask, floor)` so the sprite's transparent one-pixel
/// border is filled with floor and erases the trailing edge of the
/// previous draw when the player moves by one pixel.

use super::direction::Dir;
use super::geometry::Geometry;
use super::maze::TileKind;

/// Palette slots used by the game. 0..16 hold the classic EGA colours
/// (used by the status bar); game colours live from 32 up.
pub mod palette {
    pub const HIDDEN: u8 = 0;
    pub const PLAYER: u8 = 32;
    pub const FLOOR: u8 = 33;
    pub const WALL: u8 = 34;
    pub const EXIT: u8 = 35;
    pub const EXIT_CLOSED: u8 = 36;
    pub const PLAYER_EYE: u8 = 37;
    pub const FRUIT_BASE: u8 = 40;
    pub const SIZE: usize = 64;
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Block {
    pub width: i32,
    pub height: i32,
    pub pixels: Vec<u8>,
}

impl Block {
    pub fn filled(width: i32, height: i32, color: u8) -> Self {
        Block { width, height, pixels: vec![color; (width * height) as usize] }
    }

    pub fn get(&self, x: i32, y: i32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }

    fn set(&mut self, x: i32, y: i32, color: u8) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Block for a maze tile.
    pub fn tile(kind: TileKind, geom: &Geometry) -> Self {
        let mut b = Block::filled(geom.tile_w, geom.tile_h, palette::HIDDEN);
        for y in 0..geom.tile_h {
            for x in 0..geom.tile_w {
                b.set(x, y, tile_pixel(kind, x, y, geom.tile_w, geom.tile_h));
            }
        }
        b
    }

    /// Player sprite facing `dir`, with its mask.
    pub fn player(dir: Dir, geom: &Geometry) -> (Block, Vec<bool>) {
        let (w, h) = (geom.tile_w, geom.tile_h);
        let mut sprite = Block::filled(w, h, palette::FLOOR);
        let mut mask = vec![false; (w * h) as usize];
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let corner = w > 4 && h > 4 && (x == 1 || x == w - 2) && (y == 1 || y == h - 2);
                if !corner {
                    sprite.set(x, y, palette::PLAYER);
                    mask[(y * w + x) as usize] = true;
                }
            }
        }
        if let Some((ex, ey)) = eye(dir, w, h) {
            sprite.set(ex, ey, palette::PLAYER_EYE);
        }
        (sprite, mask)
    }

    /// Masked pixels from `top`, the rest from `under`.
    pub fn composite(top: &Block, mask: &[bool], under: &Block) -> Block {
        let pixels = top
            .pixels
            .iter()
            .zip(&under.pixels)
            .zip(mask)
            .map(|((&t, &u), &m)| if m { t } else { u })
            .collect();
        Block { width: top.width, height: top.height, pixels }
    }

    pub fn composited_player(dir: Dir, geom: &Geometry) -> Block {
        let (sprite, mask) = Block::player(dir, geom);
        let floor = Block::filled(geom.tile_w, geom.tile_h, palette::FLOOR);
        Block::composite(&sprite, &mask, &floor)
    }
}

/// Colour of pixel (x, y) inside a `w x h` tile of the given kind.
pub fn tile_pixel(kind: TileKind, x: i32, y: i32, w: i32, h: i32) -> u8 {
    let inner = x >= w / 4 && x < w - w / 4 && y >= h / 4 && y < h - h / 4;
    match kind {
        TileKind::Hidden => palette::HIDDEN,
        TileKind::Wall => palette::WALL,
        TileKind::Floor => palette::FLOOR,
        TileKind::Fruit(f) if inner => palette::FRUIT_BASE + f.index(),
        TileKind::Fruit(_) => palette::FLOOR,
        TileKind::Exit { open: true } if (x + y) % 2 == 0 => palette::EXIT,
        TileKind::Exit { open: true } => palette::FLOOR,
        TileKind::Exit { open: false } if inner => palette::EXIT_CLOSED,
        TileKind::Exit { open: false } => palette::FLOOR,
    }
}

fn eye(dir: Dir, w: i32, h: i32) -> Option<(i32, i32)> {
    if w < 3 || h < 3 {
        return None;
    }
    match dir {
        Dir::Up => Some((w / 2, 1)),
        Dir::Down => Some((w / 2, h - 2)),
        Dir::Left => Some((1, h / 2)),
        Dir::Right => Some((w - 2, h / 2)),
        Dir::Stop => None,
    }
}
