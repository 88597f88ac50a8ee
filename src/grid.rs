//! Playing field storage
//!
//! A fixed `width x height` store of cell values. Row 0 is the bottom of the
//! field and y increases upward, so gravity moves pieces toward lower rows.

use thiserror::Error;

/// Cell value: `EMPTY` or the value of the piece that locked there
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// Default field dimensions
pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 20;

/// Grid access outside the field. Always a logic fault in the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell ({x}, {y}) is outside the {width}x{height} field")]
pub struct GridError {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat storage, index is `y * width + x`
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Grid {
    /// Create an empty field
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether (x, y) lies inside the field
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if !self.contains(x, y) {
            return Err(GridError {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width + x as usize)
    }

    /// Read the cell at (x, y)
    pub fn get(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Store a value at (x, y)
    pub fn set(&mut self, x: i32, y: i32, value: Cell) -> Result<(), GridError> {
        let idx = self.index(x, y)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Whether every cell in row `y` is occupied
    pub fn is_row_full(&self, y: i32) -> Result<bool, GridError> {
        let start = self.index(0, y)?;
        Ok(self.cells[start..start + self.width]
            .iter()
            .all(|&cell| cell != EMPTY))
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }
}
