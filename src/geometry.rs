//! Where the board sits on the host's drawing surface.

use crate::error::{GameError, Result};
use crate::grid::Position;

/// A board of fixed surface size split into equally sized cells, centred in
/// whatever surface the host currently has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub cell_width: u16,
    pub cell_height: u16,
}

/// Surface rectangle of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl BoardLayout {
    /// `width` is split across the `rows` (x) axis and `height` across the
    /// `cols` (y) axis; both must divide evenly.
    pub fn new(width: u16, height: u16, rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::invariant("board needs at least one cell"));
        }
        if usize::from(width) % rows != 0 || usize::from(height) % cols != 0 {
            return Err(GameError::invariant(format!(
                "board {}x{} is not evenly divisible into {}x{} cells",
                width, height, rows, cols
            )));
        }
        let cell_width = (usize::from(width) / rows) as u16;
        let cell_height = (usize::from(height) / cols) as u16;
        if cell_width == 0 || cell_height == 0 {
            return Err(GameError::invariant("board is smaller than its cell count"));
        }
        Ok(BoardLayout {
            left: 0,
            top: 0,
            width,
            height,
            cell_width,
            cell_height,
        })
    }

    /// Layout with the given cell size.
    pub fn with_cell_size(
        cell_width: u16,
        cell_height: u16,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        let width = u16::try_from(usize::from(cell_width) * rows)
            .map_err(|_| GameError::invariant("board too wide for the surface"))?;
        let height = u16::try_from(usize::from(cell_height) * cols)
            .map_err(|_| GameError::invariant("board too tall for the surface"))?;
        BoardLayout::new(width, height, rows, cols)
    }

    /// Re-centre on a surface of the given size, keeping `header` lines free
    /// at the top. Surfaces smaller than the board pin it to the corner.
    pub fn centred(self, surface_width: u16, surface_height: u16, header: u16) -> Self {
        let free_height = surface_height.saturating_sub(header);
        BoardLayout {
            left: surface_width.saturating_sub(self.width) / 2,
            top: header + free_height.saturating_sub(self.height) / 2,
            ..self
        }
    }

    pub fn fits(&self, surface_width: u16, surface_height: u16) -> bool {
        self.left + self.width <= surface_width && self.top + self.height <= surface_height
    }

    pub fn cell_rect(&self, pos: Position) -> CellRect {
        CellRect {
            left: self.left + pos.x as u16 * self.cell_width,
            top: self.top + pos.y as u16 * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}
