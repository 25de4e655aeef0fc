/// Presentation layer: a pixel framebuffer shown through a double-buffered,
/// diff-based terminal renderer.
///
/// How it works:
///   1. The engine draws palette indices into a viewport-sized pixel buffer.
///      Moving the viewport scrolls the buffer and leaves one stale strip,
///      which the engine repaints with `redraw_strip`.
///   2. `present_frame` turns each pair of pixel rows into one row of `▀`
///      cells (top pixel = foreground, bottom pixel = background) and adds
///      the status row underneath, building the `front` buffer.
///   3. Each cell is compared with the `back` buffer (previous frame) and
///      only changed cells are emitted, batched with `queue!` and flushed
///      once.
///   4. Swap front/back.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::block::{palette, tile_pixel, Block};
use crate::domain::display::{Display, Strip};
use crate::domain::geometry::Geometry;
use crate::domain::maze::{Fruit, Maze};
use super::SetupError;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const HALF: char = '▀';

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Color::Black };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y), padding the rest of the row with blanks
    /// in the background colour.
    fn put_line(&mut self, y: usize, s: &str, fg: Color, bg: Color) {
        let mut chars = s.chars();
        for x in 0..self.width {
            let ch = chars.next().unwrap_or(' ');
            self.set(x, y, Cell { ch, fg, bg });
        }
    }
}

// ── Palette ──

type Rgb6 = (u8, u8, u8);

/// Classic EGA colours in 6-bit components.
const EGA: [Rgb6; 16] = [
    (0, 0, 0), (0, 0, 42), (0, 42, 0), (0, 42, 42),
    (42, 0, 0), (42, 0, 42), (42, 21, 0), (42, 42, 42),
    (21, 21, 21), (21, 21, 63), (21, 63, 21), (21, 63, 63),
    (63, 21, 21), (63, 21, 63), (63, 63, 21), (63, 63, 63),
];

fn fruit_rgb(fruit: Fruit) -> Rgb6 {
    match fruit {
        Fruit::Apple => (63, 0, 0),
        Fruit::Grapes => (40, 0, 50),
        Fruit::WhitePeach => (63, 52, 46),
        Fruit::Strawberry => (63, 10, 20),
        Fruit::Banana => (63, 63, 10),
        Fruit::Watermelon => (10, 50, 10),
        Fruit::Dew => (30, 63, 40),
    }
}

fn default_palette() -> [Rgb6; palette::SIZE] {
    let mut p = [(0, 0, 0); palette::SIZE];
    p[..EGA.len()].copy_from_slice(&EGA);
    p[palette::PLAYER as usize] = (63, 63, 0);
    p[palette::FLOOR as usize] = (6, 6, 9);
    p[palette::WALL as usize] = (20, 10, 6);
    p[palette::EXIT as usize] = (0, 63, 0);
    p[palette::EXIT_CLOSED as usize] = (32, 16, 0);
    p[palette::PLAYER_EYE as usize] = (0, 0, 0);
    for fruit in Fruit::ALL {
        p[(palette::FRUIT_BASE + fruit.index()) as usize] = fruit_rgb(fruit);
    }
    p
}

/// 6-bit DAC component to 8-bit.
fn widen(v: u8) -> u8 {
    let v = v & 0x3f;
    (v << 2) | (v >> 4)
}

// ── TerminalDisplay ──

pub struct TerminalDisplay<W: Write = BufWriter<io::Stdout>> {
    writer: W,
    geom: Geometry,
    origin: (i32, i32),
    pixels: Vec<u8>,
    status: (String, u8, u8),
    palette: [Rgb6; palette::SIZE],
    front: FrameBuffer,
    back: FrameBuffer,
}

impl TerminalDisplay {
    /// Enter the alternate screen and size the viewport to the terminal:
    /// every column is one pixel wide, every row but the last holds two
    /// pixel rows, and the last row is the status bar.
    pub fn open(tile_w: i32, tile_h: i32, pan_border: i32) -> Result<Self, SetupError> {
        let (cols, rows) = terminal::size().map_err(SetupError::Display)?;
        let min_cols = (3 * tile_w.max(2)) as u16;
        let min_rows = ((3 * tile_h.max(2) + 1) / 2 + 1) as u16;
        if cols < min_cols || rows < min_rows {
            return Err(SetupError::TooSmall { cols, rows, min_cols, min_rows });
        }

        let geom = Geometry::fit(tile_w, tile_h, cols as i32, 2 * (rows as i32 - 1), pan_border);
        let mut display = TerminalDisplay::with_writer(BufWriter::with_capacity(16384, io::stdout()), geom);
        execute!(
            display.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Color::Black),
            Clear(ClearType::All)
        )
        .map_err(SetupError::Display)?;
        Ok(display)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn with_writer(writer: W, geom: Geometry) -> Self {
        let (w, h) = (geom.view_w.max(0) as usize, geom.view_h.max(0) as usize);
        let rows = h / 2 + 1;
        let mut back = FrameBuffer::new(w, rows);
        // Force full repaint on first frame: back ≠ front for every cell.
        back.cells.fill(Cell::INVALID);
        TerminalDisplay {
            writer,
            geom,
            origin: (0, 0),
            pixels: vec![palette::HIDDEN; w * h],
            status: (String::new(), 15, 0),
            palette: default_palette(),
            front: FrameBuffer::new(w, rows),
            back,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geom
    }

    pub fn close(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)
    }

    fn in_view(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.geom.view_w && y < self.geom.view_h
    }

    fn pixel(&self, x: i32, y: i32) -> u8 {
        self.pixels[(y * self.geom.view_w + x) as usize]
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: u8) {
        if self.in_view(x, y) {
            let i = (y * self.geom.view_w + x) as usize;
            self.pixels[i] = color;
        }
    }

    /// Colour of screen pixel (sx, sy) read from the maze.
    fn maze_pixel(&self, maze: &dyn Maze, sx: i32, sy: i32) -> u8 {
        let g = &self.geom;
        let (px, py) = (self.origin.0 + sx, self.origin.1 + sy);
        let (tx, ty) = g.tile_of(px, py);
        let kind = maze.tile_at(tx, ty);
        tile_pixel(kind, px - tx * g.tile_w, py - ty * g.tile_h, g.tile_w, g.tile_h)
    }

    fn color(&self, index: u8) -> Color {
        let (r, g, b) = self.palette[index as usize % palette::SIZE];
        Color::Rgb { r: widen(r), g: widen(g), b: widen(b) }
    }

    fn compose(&mut self) {
        let w = self.geom.view_w;
        for row in 0..self.geom.view_h / 2 {
            for x in 0..w {
                let cell = Cell {
                    ch: Cell::HALF,
                    fg: self.color(self.pixel(x, 2 * row)),
                    bg: self.color(self.pixel(x, 2 * row + 1)),
                };
                self.front.set(x as usize, row as usize, cell);
            }
        }
        let (fg, bg) = (self.color(self.status.1), self.color(self.status.2));
        let status_row = self.front.height - 1;
        let text = std::mem::take(&mut self.status.0);
        self.front.put_line(status_row, &text, fg, bg);
        self.status.0 = text;
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Color::Black;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn set_viewport(&mut self, origin_x: i32, origin_y: i32) {
        let (dx, dy) = (origin_x - self.origin.0, origin_y - self.origin.1);
        self.origin = (origin_x, origin_y);
        if (dx, dy) == (0, 0) || dx.abs() >= self.geom.view_w || dy.abs() >= self.geom.view_h {
            return;
        }
        // Scroll: screen pixel (x, y) now shows what (x+dx, y+dy) showed.
        let mut scrolled = self.pixels.clone();
        for y in 0..self.geom.view_h {
            for x in 0..self.geom.view_w {
                if self.in_view(x + dx, y + dy) {
                    scrolled[(y * self.geom.view_w + x) as usize] = self.pixel(x + dx, y + dy);
                }
            }
        }
        self.pixels = scrolled;
    }

    fn redraw_strip(&mut self, maze: &dyn Maze, strip: Strip) {
        match strip {
            Strip::Row(y) if y >= 0 && y < self.geom.view_h => {
                for x in 0..self.geom.view_w {
                    let c = self.maze_pixel(maze, x, y);
                    self.put_pixel(x, y, c);
                }
            }
            Strip::Column(x) if x >= 0 && x < self.geom.view_w => {
                for y in 0..self.geom.view_h {
                    let c = self.maze_pixel(maze, x, y);
                    self.put_pixel(x, y, c);
                }
            }
            _ => {}
        }
    }

    fn draw_block(&mut self, pixel_x: i32, pixel_y: i32, block: &Block) {
        let (sx, sy) = (pixel_x - self.origin.0, pixel_y - self.origin.1);
        for y in 0..block.height {
            for x in 0..block.width {
                self.put_pixel(sx + x, sy + y, block.get(x, y));
            }
        }
    }

    fn draw_status_bar(&mut self, text: &str, fg: u8, bg: u8) {
        self.status.0.clear();
        self.status.0.push_str(text);
        self.status.1 = fg;
        self.status.2 = bg;
    }

    fn set_palette_entry(&mut self, index: u8, r: u8, g: u8, b: u8) {
        if let Some(slot) = self.palette.get_mut(index as usize) {
            *slot = (r & 0x3f, g & 0x3f, b & 0x3f);
        }
    }

    fn present_frame(&mut self) -> io::Result<()> {
        self.compose();
        self.flush_diff()?;
        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }
}
