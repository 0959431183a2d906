//! The board: a fixed rectangle of cells ringed by walls.
//!
//! `x` runs over `0..rows` and is drawn horizontally, `y` runs over
//! `0..cols` and is drawn vertically. Cells live in one flat buffer indexed
//! by `x * cols + y`.

use crate::error::{GameError, Result};

/// A cell coordinate. Signed so a head that steps off the board can still be
/// represented and rejected by [`Grid::query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Chebyshev (king-move) distance between two cells.
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub wall: bool,
    pub head: bool,
    pub body: bool,
    pub fruit: bool,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        !(self.wall || self.head || self.body || self.fruit)
    }

    pub fn is_snake(self) -> bool {
        self.head || self.body
    }
}

/// One of the four occupancy flags of a [`Cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Wall,
    Head,
    Body,
    Fruit,
}

#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a `rows` x `cols` board with the outer ring walled off.
    pub fn new(rows: usize, cols: usize) -> Result<Grid> {
        if rows < 3 || cols < 3 {
            return Err(GameError::invariant(format!(
                "grid must be at least 3x3 to have an interior, got {}x{}",
                rows, cols
            )));
        }
        let mut grid = Grid {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        };
        grid.reset();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.rows && (pos.y as usize) < self.cols
    }

    fn index(&self, pos: Position) -> Result<usize> {
        if !self.contains(pos) {
            return Err(GameError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(pos.x as usize * self.cols + pos.y as usize)
    }

    pub fn query(&self, pos: Position) -> Result<Cell> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx])
    }

    /// Set a single flag. Other flags on the cell are left alone; callers
    /// clear the old occupant themselves.
    pub fn set_flag(&mut self, pos: Position, flag: Flag, value: bool) -> Result<()> {
        let idx = self.index(pos)?;
        let cell = &mut self.cells[idx];
        match flag {
            Flag::Wall => cell.wall = value,
            Flag::Head => cell.head = value,
            Flag::Body => cell.body = value,
            Flag::Fruit => cell.fruit = value,
        }
        Ok(())
    }

    /// Empty every cell and re-apply the wall ring.
    pub fn reset(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            let (x, y) = (idx / cols, idx % cols);
            *cell = Cell {
                wall: x == 0 || y == 0 || x == rows - 1 || y == cols - 1,
                ..Cell::default()
            };
        }
    }

    /// Every cell with its coordinate, for drawing.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            (
                Position::new((idx / cols) as i32, (idx % cols) as i32),
                *cell,
            )
        })
    }
}
