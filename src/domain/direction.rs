/// Directions of travel and the set of directions open at a maze tile.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
    #[default]
    Stop,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    X,
    Y,
}

impl Dir {
    pub const MOVES: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    /// The opposite direction. `Stop` has none.
    pub fn reverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
            Dir::Stop => Dir::Stop,
        }
    }

    pub fn is_reverse_of(self, other: Dir) -> bool {
        self != Dir::Stop && self.reverse() == other
    }

    pub fn axis(self) -> Option<Axis> {
        match self {
            Dir::Up | Dir::Down => Some(Axis::Y),
            Dir::Left | Dir::Right => Some(Axis::X),
            Dir::Stop => None,
        }
    }

    /// Unit step in tile (or pixel) coordinates.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Right => (1, 0),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Stop => (0, 0),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Dir::Up => 1,
            Dir::Right => 2,
            Dir::Down => 4,
            Dir::Left => 8,
            Dir::Stop => 0,
        }
    }
}

/// Directions open to motion from one tile. `Stop` is never open.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct OpenDirs(u8);

impl OpenDirs {
    pub const NONE: OpenDirs = OpenDirs(0);

    pub fn with(self, dir: Dir) -> OpenDirs {
        OpenDirs(self.0 | dir.bit())
    }

    pub fn contains(self, dir: Dir) -> bool {
        dir != Dir::Stop && self.0 & dir.bit() != 0
    }
}

impl FromIterator<Dir> for OpenDirs {
    fn from_iter<I: IntoIterator<Item = Dir>>(iter: I) -> Self {
        iter.into_iter().fold(OpenDirs::NONE, OpenDirs::with)
    }
}
