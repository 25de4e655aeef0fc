/// Generated maze: a perfect maze carved by randomized depth-first search.
///
/// ## Lattice
///
/// A `w x h` cell maze is stored as a `(2w+1) x (2h+1)` tile lattice.
/// Cells are the odd/odd tiles; the tile between two neighbouring cells
/// is a passage if the carver joined them, otherwise a wall. Even/even
/// tiles are always wall. The player starts on cell (0, 0), tile (1, 1).
///
/// ## Fruit and exit
///
/// The exit is the cell farthest (by path length) from the start. Fruit
/// is scattered over the remaining cells. The exit opens once all fruit
/// is eaten.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::direction::{Dir, OpenDirs};
use crate::domain::level::{MAZE_MAX_H, MAZE_MAX_W, MAZE_MIN_H, MAZE_MIN_W};
use crate::domain::maze::{Fruit, Maze, MazeError, TileKind};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Cell {
    Wall,
    Open,
    Fruit(Fruit),
}

pub struct GridMaze {
    rng: StdRng,
    width: i32,
    height: i32,
    tiles: Vec<Cell>,
    visible: Vec<bool>,
    exit: (i32, i32),
    fruit_left: u32,
}

impl GridMaze {
    pub fn new(seed: Option<u64>) -> Self {
        GridMaze {
            rng: seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64),
            width: 0,
            height: 0,
            tiles: vec![],
            visible: vec![],
            exit: (1, 1),
            fruit_left: 0,
        }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    fn cell(&self, x: i32, y: i32) -> Cell {
        if self.in_bounds(x, y) { self.tiles[self.index(x, y)] } else { Cell::Wall }
    }

    fn set(&mut self, x: i32, y: i32, cell: Cell) {
        let i = self.index(x, y);
        self.tiles[i] = cell;
    }

    fn carve(&mut self, cells_w: i32, cells_h: i32) {
        let mut visited = vec![false; (cells_w * cells_h) as usize];
        let mut stack = vec![(0, 0)];
        visited[0] = true;
        self.set(1, 1, Cell::Open);

        while let Some(&(cx, cy)) = stack.last() {
            let choices: Vec<(i32, i32)> = Dir::MOVES
                .iter()
                .map(|d| d.delta())
                .filter(|(dx, dy)| {
                    let (nx, ny) = (cx + dx, cy + dy);
                    nx >= 0 && ny >= 0 && nx < cells_w && ny < cells_h
                        && !visited[(ny * cells_w + nx) as usize]
                })
                .collect();
            if choices.is_empty() {
                stack.pop();
                continue;
            }
            let (dx, dy) = choices[self.rng.random_range(0..choices.len())];
            let (nx, ny) = (cx + dx, cy + dy);
            visited[(ny * cells_w + nx) as usize] = true;
            self.set(2 * cx + 1 + dx, 2 * cy + 1 + dy, Cell::Open);
            self.set(2 * nx + 1, 2 * ny + 1, Cell::Open);
            stack.push((nx, ny));
        }
    }

    /// Breadth-first distances in tiles from (1, 1); -1 where unreachable.
    fn distances(&self) -> Vec<i32> {
        let mut dist = vec![-1; self.tiles.len()];
        let mut queue = VecDeque::from([(1, 1)]);
        dist[self.index(1, 1)] = 0;
        while let Some((x, y)) = queue.pop_front() {
            let d = dist[self.index(x, y)];
            for dir in Dir::MOVES {
                let (dx, dy) = dir.delta();
                let (nx, ny) = (x + dx, y + dy);
                if self.cell(nx, ny) != Cell::Wall && dist[self.index(nx, ny)] < 0 {
                    dist[self.index(nx, ny)] = d + 1;
                    queue.push_back((nx, ny));
                }
            }
        }
        dist
    }
}

impl Maze for GridMaze {
    fn build(&mut self, width: u32, height: u32, fruit_count: u32) -> Result<(), MazeError> {
        if !(MAZE_MIN_W..=MAZE_MAX_W).contains(&width) || !(MAZE_MIN_H..=MAZE_MAX_H).contains(&height) {
            return Err(MazeError::BadSize {
                width,
                height,
                min_w: MAZE_MIN_W,
                max_w: MAZE_MAX_W,
                min_h: MAZE_MIN_H,
                max_h: MAZE_MAX_H,
            });
        }
        let cells = width * height;
        // start and exit never carry fruit
        if fruit_count + 2 > cells {
            return Err(MazeError::TooMuchFruit { fruit: fruit_count, cells });
        }

        let (cw, ch) = (width as i32, height as i32);
        self.width = 2 * cw + 1;
        self.height = 2 * ch + 1;
        self.tiles = vec![Cell::Wall; (self.width * self.height) as usize];
        self.visible = vec![false; self.tiles.len()];
        self.carve(cw, ch);

        let dist = self.distances();
        let mut free = Vec::with_capacity(cells as usize);
        let mut far = ((1, 1), 0);
        for cy in 0..ch {
            for cx in 0..cw {
                let (x, y) = (2 * cx + 1, 2 * cy + 1);
                let d = dist[self.index(x, y)];
                if d > far.1 {
                    far = ((x, y), d);
                }
                if (x, y) != (1, 1) {
                    free.push((x, y));
                }
            }
        }
        self.exit = far.0;
        free.retain(|p| *p != self.exit);
        free.shuffle(&mut self.rng);
        for &(x, y) in free.iter().take(fruit_count as usize) {
            let fruit = Fruit::ALL[self.rng.random_range(0..Fruit::ALL.len())];
            self.set(x, y, Cell::Fruit(fruit));
        }
        self.fruit_left = fruit_count;
        Ok(())
    }

    fn open_directions(&self, x: i32, y: i32) -> OpenDirs {
        Dir::MOVES
            .into_iter()
            .filter(|d| {
                let (dx, dy) = d.delta();
                self.cell(x + dx, y + dy) != Cell::Wall
            })
            .collect()
    }

    fn take_fruit(&mut self, x: i32, y: i32) -> Option<Fruit> {
        match self.cell(x, y) {
            Cell::Fruit(f) => {
                self.set(x, y, Cell::Open);
                self.fruit_left -= 1;
                Some(f)
            }
            _ => None,
        }
    }

    fn is_exit(&self, x: i32, y: i32) -> bool {
        self.fruit_left == 0 && (x, y) == self.exit
    }

    fn fruit_remaining(&self) -> u32 {
        self.fruit_left
    }

    fn exit_position(&self) -> (i32, i32) {
        self.exit
    }

    fn unveil(&mut self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let i = self.index(x, y);
        !std::mem::replace(&mut self.visible[i], true)
    }

    fn tile_at(&self, x: i32, y: i32) -> TileKind {
        if !self.in_bounds(x, y) || !self.visible[self.index(x, y)] {
            return TileKind::Hidden;
        }
        if (x, y) == self.exit {
            return TileKind::Exit { open: self.fruit_left == 0 };
        }
        match self.cell(x, y) {
            Cell::Wall => TileKind::Wall,
            Cell::Open => TileKind::Floor,
            Cell::Fruit(f) => TileKind::Fruit(f),
        }
    }
}
