/// Maze collaborator interface and the tile/fruit vocabulary shared with
/// the renderer.
///
/// Tile coordinates are lattice coordinates: for a maze of `w x h` cells
/// the lattice is `(2w+1) x (2h+1)` tiles, cells sit at odd/odd tiles and
/// the tiles between them are walls or passages.

use thiserror::Error;

use super::direction::OpenDirs;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Fruit {
    Apple,
    Grapes,
    WhitePeach,
    Strawberry,
    Banana,
    Watermelon,
    Dew,
}

impl Fruit {
    pub const ALL: [Fruit; 7] = [
        Fruit::Apple,
        Fruit::Grapes,
        Fruit::WhitePeach,
        Fruit::Strawberry,
        Fruit::Banana,
        Fruit::Watermelon,
        Fruit::Dew,
    ];

    /// Fixed-width (12 column) name shown on the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Fruit::Apple => "   Apple    ",
            Fruit::Grapes => "   Grapes   ",
            Fruit::WhitePeach => "White peach ",
            Fruit::Strawberry => " Strawberry ",
            Fruit::Banana => "   Banana   ",
            Fruit::Watermelon => " Watermelon ",
            Fruit::Dew => "    Dew     ",
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// What a tile looks like right now.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileKind {
    Hidden,
    Wall,
    Floor,
    Fruit(Fruit),
    /// `open` once every fruit has been eaten.
    Exit { open: bool },
}

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze size {width}x{height} outside {min_w}..={max_w} x {min_h}..={max_h}")]
    BadSize {
        width: u32,
        height: u32,
        min_w: u32,
        max_w: u32,
        min_h: u32,
        max_h: u32,
    },
    #[error("cannot place {fruit} fruit in a maze of {cells} cells")]
    TooMuchFruit { fruit: u32, cells: u32 },
}

pub trait Maze {
    /// Replace the current maze with a fresh one. All tiles start hidden.
    fn build(&mut self, width: u32, height: u32, fruit_count: u32) -> Result<(), MazeError>;

    fn open_directions(&self, x: i32, y: i32) -> OpenDirs;

    /// Remove and return the fruit at (x, y), if any.
    fn take_fruit(&mut self, x: i32, y: i32) -> Option<Fruit>;

    /// Is (x, y) an exit the player may leave through? The exit only
    /// opens once all fruit is gone.
    fn is_exit(&self, x: i32, y: i32) -> bool;

    fn fruit_remaining(&self) -> u32;

    fn exit_position(&self) -> (i32, i32);

    /// Make (x, y) visible. Returns true only if it was hidden before;
    /// out-of-range tiles are ignored.
    fn unveil(&mut self, x: i32, y: i32) -> bool;

    fn tile_at(&self, x: i32, y: i32) -> TileKind;
}
