/// Drawing collaborator interface.
///
/// All positions passed to the display are maze pixel coordinates; the
/// display subtracts the viewport origin itself.

use std::io;

use super::block::Block;
use super::maze::Maze;

/// One screen-edge strip, indexed in screen pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Strip {
    Row(i32),
    Column(i32),
}

pub trait Display {
    /// Move the logical viewport. A one-pixel move scrolls the existing
    /// image and leaves exactly one stale strip to be redrawn.
    fn set_viewport(&mut self, origin_x: i32, origin_y: i32);

    fn redraw_strip(&mut self, maze: &dyn Maze, strip: Strip);

    fn draw_block(&mut self, pixel_x: i32, pixel_y: i32, block: &Block);

    /// `fg`/`bg` are palette indices.
    fn draw_status_bar(&mut self, text: &str, fg: u8, bg: u8);

    /// Components are 6-bit (0..=63).
    fn set_palette_entry(&mut self, index: u8, r: u8, g: u8, b: u8);

    fn present_frame(&mut self) -> io::Result<()>;
}
