//! Test doubles for the maze and display collaborators.

use crate::domain::block::Block;
use crate::domain::direction::{Dir, OpenDirs};
use crate::domain::display::{Display, Strip};
use crate::domain::maze::{Fruit, Maze, MazeError, TileKind};

/// Maze built from a string diagram.
/// Legend: '#'=wall  ' '=floor  '1'..'7'=fruit  'E'=exit
#[derive(Clone, Debug)]
pub struct DiagramMaze {
    base: Vec<Vec<u8>>,
    cells: Vec<Vec<u8>>,
    visible: Vec<bool>,
    width: i32,
    height: i32,
    pub fail_build: bool,
    pub builds: u32,
}

impl DiagramMaze {
    pub fn from_rows(rows: &[&str]) -> Self {
        let base: Vec<Vec<u8>> = rows.iter().map(|r| r.as_bytes().to_vec()).collect();
        let height = base.len() as i32;
        let width = base[0].len() as i32;
        DiagramMaze {
            cells: base.clone(),
            visible: vec![false; (width * height) as usize],
            base,
            width,
            height,
            fail_build: false,
            builds: 0,
        }
    }

    /// All-floor maze of `w x h` tiles.
    pub fn open(w: usize, h: usize) -> Self {
        let row = " ".repeat(w);
        let rows: Vec<&str> = (0..h).map(|_| row.as_str()).collect();
        DiagramMaze::from_rows(&rows)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.visible[(y * self.width + x) as usize]
    }

    pub fn visibility(&self) -> &[bool] {
        &self.visible
    }

    fn cell(&self, x: i32, y: i32) -> u8 {
        if self.in_bounds(x, y) { self.cells[y as usize][x as usize] } else { b'#' }
    }
}

fn fruit_of(c: u8) -> Option<Fruit> {
    match c {
        b'1'..=b'7' => Some(Fruit::ALL[(c - b'1') as usize]),
        _ => None,
    }
}

impl Maze for DiagramMaze {
    fn build(&mut self, width: u32, height: u32, _fruit_count: u32) -> Result<(), MazeError> {
        self.builds += 1;
        if self.fail_build {
            return Err(MazeError::BadSize {
                width, height, min_w: 0, max_w: 0, min_h: 0, max_h: 0,
            });
        }
        self.cells = self.base.clone();
        self.visible.fill(false);
        Ok(())
    }

    fn open_directions(&self, x: i32, y: i32) -> OpenDirs {
        Dir::MOVES
            .into_iter()
            .filter(|d| {
                let (dx, dy) = d.delta();
                self.in_bounds(x + dx, y + dy) && self.cell(x + dx, y + dy) != b'#'
            })
            .collect()
    }

    fn take_fruit(&mut self, x: i32, y: i32) -> Option<Fruit> {
        let fruit = fruit_of(self.cell(x, y))?;
        self.cells[y as usize][x as usize] = b' ';
        Some(fruit)
    }

    fn is_exit(&self, x: i32, y: i32) -> bool {
        self.cell(x, y) == b'E' && self.fruit_remaining() == 0
    }

    fn fruit_remaining(&self) -> u32 {
        self.cells.iter().flatten().filter(|c| fruit_of(**c).is_some()).count() as u32
    }

    fn exit_position(&self) -> (i32, i32) {
        for (y, row) in self.cells.iter().enumerate() {
            if let Some(x) = row.iter().position(|c| *c == b'E') {
                return (x as i32, y as i32);
            }
        }
        (0, 0)
    }

    fn unveil(&mut self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) || self.is_visible(x, y) {
            return false;
        }
        self.visible[(y * self.width + x) as usize] = true;
        true
    }

    fn tile_at(&self, x: i32, y: i32) -> TileKind {
        if !self.is_visible(x, y) {
            return TileKind::Hidden;
        }
        match self.cell(x, y) {
            b'#' => TileKind::Wall,
            b'E' => TileKind::Exit { open: self.fruit_remaining() == 0 },
            c => fruit_of(c).map_or(TileKind::Floor, TileKind::Fruit),
        }
    }
}

/// Display that records every call.
#[derive(Default, Debug)]
pub struct RecordingDisplay {
    pub viewports: Vec<(i32, i32)>,
    pub strips: Vec<Strip>,
    pub blocks: Vec<(i32, i32)>,
    pub status: Vec<String>,
    pub palette: Vec<(u8, u8, u8, u8)>,
    pub presents: u32,
    pub fail_present: bool,
}

impl Display for RecordingDisplay {
    fn set_viewport(&mut self, origin_x: i32, origin_y: i32) {
        self.viewports.push((origin_x, origin_y));
    }

    fn redraw_strip(&mut self, _maze: &dyn Maze, strip: Strip) {
        self.strips.push(strip);
    }

    fn draw_block(&mut self, pixel_x: i32, pixel_y: i32, _block: &Block) {
        self.blocks.push((pixel_x, pixel_y));
    }

    fn draw_status_bar(&mut self, text: &str, _fg: u8, _bg: u8) {
        self.status.push(text.to_string());
    }

    fn set_palette_entry(&mut self, index: u8, r: u8, g: u8, b: u8) {
        self.palette.push((index, r, g, b));
    }

    fn present_frame(&mut self) -> std::io::Result<()> {
        if self.fail_present {
            return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        }
        self.presents += 1;
        Ok(())
    }
}
