/// Viewport panning.
///
/// The viewport origin follows the player one pixel at a time: when the
/// player moves inside `pan_border` tiles of the trailing edge, the origin
/// shifts one pixel toward the player and only the single newly exposed
/// strip on the opposite side is redrawn. The origin never leaves
/// `[show_min, maze_px - show_min - view]` once it is inside that range.

use super::direction::Dir;
use super::display::{Display, Strip};
use super::geometry::Geometry;
use super::level::LevelParameters;
use super::maze::Maze;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Viewport {
    pub map_x: i32,
    pub map_y: i32,
    geom: Geometry,
    maze_px_w: i32,
    maze_px_h: i32,
}

impl Viewport {
    pub fn new(geom: Geometry, params: &LevelParameters) -> Self {
        Viewport {
            map_x: geom.show_min_x(),
            map_y: geom.show_min_y(),
            geom,
            maze_px_w: geom.maze_px_w(params.maze_width),
            maze_px_h: geom.maze_px_h(params.maze_height),
        }
    }

    /// Push the origin to the display and repaint every row.
    pub fn redraw_all<D: Display + ?Sized>(&self, display: &mut D, maze: &dyn Maze) {
        display.set_viewport(self.map_x, self.map_y);
        for row in 0..self.geom.view_h {
            display.redraw_strip(maze, Strip::Row(row));
        }
    }

    /// Called after the player has moved one pixel in `dir` to
    /// (`px`, `py`). Returns true if the viewport panned.
    pub fn on_player_moved<D: Display + ?Sized>(
        &mut self,
        dir: Dir,
        px: i32,
        py: i32,
        display: &mut D,
        maze: &dyn Maze,
    ) -> bool {
        let g = self.geom;
        let strip = match dir {
            Dir::Up => {
                if py < self.map_y + g.tile_h * g.pan_border && self.map_y > g.show_min_y() {
                    self.map_y -= 1;
                    Strip::Row(0)
                } else {
                    return false;
                }
            }
            Dir::Down => {
                if py > self.map_y + g.view_h - g.tile_h * (g.pan_border + 1)
                    && self.map_y + g.view_h < self.maze_px_h - g.show_min_y()
                {
                    self.map_y += 1;
                    Strip::Row(g.view_h - 1)
                } else {
                    return false;
                }
            }
            Dir::Left => {
                if px < self.map_x + g.tile_w * g.pan_border && self.map_x > g.show_min_x() {
                    self.map_x -= 1;
                    Strip::Column(0)
                } else {
                    return false;
                }
            }
            Dir::Right => {
                if px > self.map_x + g.view_w - g.tile_w * (g.pan_border + 1)
                    && self.map_x + g.view_w < self.maze_px_w - g.show_min_x()
                {
                    self.map_x += 1;
                    Strip::Column(g.view_w - 1)
                } else {
                    return false;
                }
            }
            Dir::Stop => return false,
        };
        display.set_viewport(self.map_x, self.map_y);
        display.redraw_strip(maze, strip);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testutil::{DiagramMaze, RecordingDisplay};

    fn big_level() -> LevelParameters {
        // 28x28 cells: 57 * 12 = 684 px, wider and taller than the window
        LevelParameters::for_level(10)
    }

    #[test]
    fn starts_at_show_min() {
        let v = Viewport::new(Geometry::vga(), &big_level());
        assert_eq!((v.map_x, v.map_y), (6, 6));
    }

    #[test]
    fn no_pan_inside_border() {
        let maze = DiagramMaze::open(3, 3);
        let mut d = RecordingDisplay::default();
        let mut v = Viewport::new(Geometry::vga(), &big_level());
        assert!(!v.on_player_moved(Dir::Right, 100, 100, &mut d, &maze));
        assert!(d.strips.is_empty());
    }

    #[test]
    fn pans_right_one_pixel_and_redraws_last_column() {
        let g = Geometry::vga();
        let maze = DiagramMaze::open(3, 3);
        let mut d = RecordingDisplay::default();
        let mut v = Viewport::new(g, &big_level());
        // threshold: map_x + 320 - 72 = 254
        assert!(v.on_player_moved(Dir::Right, 255, 100, &mut d, &maze));
        assert_eq!(v.map_x, 7);
        assert_eq!(d.viewports.last(), Some(&(7, 6)));
        assert_eq!(d.strips, vec![Strip::Column(g.view_w - 1)]);
    }

    #[test]
    fn pans_up_one_pixel_and_redraws_top_row() {
        let maze = DiagramMaze::open(3, 3);
        let mut d = RecordingDisplay::default();
        let mut v = Viewport::new(Geometry::vga(), &big_level());
        v.map_y = 50;
        // threshold: map_y + 60 = 110
        assert!(!v.on_player_moved(Dir::Up, 100, 110, &mut d, &maze));
        assert!(v.on_player_moved(Dir::Up, 100, 109, &mut d, &maze));
        assert_eq!(v.map_y, 49);
        assert_eq!(d.viewports, vec![(6, 49)]);
        assert_eq!(d.strips, vec![Strip::Row(0)]);
    }

    #[test]
    fn pans_down_one_pixel_and_redraws_bottom_row() {
        let g = Geometry::vga();
        let maze = DiagramMaze::open(3, 3);
        let mut d = RecordingDisplay::default();
        let mut v = Viewport::new(g, &big_level());
        // threshold: map_y + 182 - 72 = 116
        assert!(!v.on_player_moved(Dir::Down, 100, 116, &mut d, &maze));
        assert!(v.on_player_moved(Dir::Down, 100, 117, &mut d, &maze));
        assert_eq!(v.map_y, 7);
        assert_eq!(d.viewports, vec![(6, 7)]);
        assert_eq!(d.strips, vec![Strip::Row(g.view_h - 1)]);
    }

    #[test]
    fn pans_left_one_pixel_and_redraws_first_column() {
        let maze = DiagramMaze::open(3, 3);
        let mut d = RecordingDisplay::default();
        let mut v = Viewport::new(Geometry::vga(), &big_level());
        v.map_x = 50;
        // threshold: map_x + 60 = 110
        assert!(!v.on_player_moved(Dir::Left, 110, 100, &mut d, &maze));
        assert!(v.on_player_moved(Dir::Left, 109, 100, &mut d, &maze));
        assert_eq!(v.map_x, 49);
        assert_eq!(d.viewports, vec![(49, 6)]);
        assert_eq!(d.strips, vec![Strip::Column(0)]);
    }

    #[test]
    fn never_pans_past_show_min() {
        let maze = DiagramMaze::open(3, 3);
        let mut d = RecordingDisplay::default();
        let mut v = Viewport::new(Geometry::vga(), &big_level());
        assert!(!v.on_player_moved(Dir::Up, 12, 12, &mut d, &maze));
        assert!(!v.on_player_moved(Dir::Left, 12, 12, &mut d, &maze));
        assert_eq!((v.map_x, v.map_y), (6, 6));
    }

    #[test]
    fn stops_at_far_edge() {
        let g = Geometry::vga();
        let params = big_level();
        let maze = DiagramMaze::open(3, 3);
        let mut d = RecordingDisplay::default();
        let mut v = Viewport::new(g, &params);
        let limit = g.maze_px_w(params.maze_width) - g.show_min_x() - g.view_w;
        let mut px = 260;
        for _ in 0..2000 {
            px += 1;
            v.on_player_moved(Dir::Right, px, 100, &mut d, &maze);
            assert!(v.map_x <= limit);
        }
        assert_eq!(v.map_x, limit);
    }

    #[test]
    fn small_maze_never_pans() {
        let maze = DiagramMaze::open(3, 3);
        let mut d = RecordingDisplay::default();
        let mut v = Viewport::new(Geometry::vga(), &LevelParameters::for_level(1));
        // level 1 maze is 252 px wide, narrower than the 320 px window
        assert!(!v.on_player_moved(Dir::Right, 250, 12, &mut d, &maze));
    }
}
