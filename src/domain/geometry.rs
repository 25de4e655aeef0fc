/// Screen geometry: tile size, visible window size and pan margin, all
/// in pixels except `pan_border` (tiles).

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Geometry {
    pub tile_w: i32,
    pub tile_h: i32,
    pub view_w: i32,
    pub view_h: i32,
    pub pan_border: i32,
}

impl Geometry {
    /// Classic mode-X layout: 12x12 tiles in a 320x182 window
    /// (200 lines minus an 18-line status bar).
    pub const fn vga() -> Self {
        Geometry { tile_w: 12, tile_h: 12, view_w: 320, view_h: 182, pan_border: 5 }
    }

    /// Geometry for a terminal window. Shrinks the pan border until both
    /// borders plus the player's own tile fit in the window.
    pub fn fit(tile_w: i32, tile_h: i32, view_w: i32, view_h: i32, pan_border: i32) -> Self {
        let tile_w = tile_w.max(2);
        let tile_h = tile_h.max(2);
        let mut pan_border = pan_border.max(0);
        while pan_border > 0
            && (tile_w * (2 * pan_border + 1) > view_w || tile_h * (2 * pan_border + 1) > view_h)
        {
            pan_border -= 1;
        }
        Geometry { tile_w, tile_h, view_w, view_h, pan_border }
    }

    /// Pixels of the outer wall that stay off-screen on each side.
    pub fn show_min_x(&self) -> i32 {
        self.tile_w / 2
    }

    pub fn show_min_y(&self) -> i32 {
        self.tile_h / 2
    }

    /// Pixel width of a maze `cells` cells wide (cells plus walls).
    pub fn maze_px_w(&self, cells: u32) -> i32 {
        (2 * cells as i32 + 1) * self.tile_w
    }

    pub fn maze_px_h(&self, cells: u32) -> i32 {
        (2 * cells as i32 + 1) * self.tile_h
    }

    pub fn tile_of(&self, px: i32, py: i32) -> (i32, i32) {
        (px.div_euclid(self.tile_w), py.div_euclid(self.tile_h))
    }
}
