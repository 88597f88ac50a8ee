//! Active falling piece

use crate::collision::{Anchor, collides};
use crate::grid::{Cell, Grid, GridError};
use crate::tetromino::{Mask, TetrominoType};

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Index into the kind's rotation cycle
    pub rotation: usize,
    /// Bottom-left corner of the 4x4 mask
    pub anchor: Anchor,
    /// Value written into the grid on lock
    pub cell: Cell,
}

impl Piece {
    /// Place a piece at its spawn anchor: centred, mask flush with the top row
    pub fn spawn(piece_type: TetrominoType, grid: &Grid) -> Self {
        let x = (grid.width() as i32 - 4) / 2;
        let y = grid.height() as i32 - 4;
        Self {
            piece_type,
            rotation: 0,
            anchor: Anchor::new(x, y),
            cell: piece_type.cell_value(),
        }
    }

    pub fn mask(&self) -> &'static Mask {
        self.piece_type.mask(self.rotation)
    }

    /// Absolute (x, y) of all 4 blocks
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.mask()
            .cells()
            .map(move |(dx, dy)| (self.anchor.x + dx, self.anchor.y + dy))
    }

    pub fn collides(&self, grid: &Grid) -> bool {
        collides(grid, self.mask(), self.anchor)
    }

    /// Copy of this piece moved by (dx, dy)
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            anchor: self.anchor.offset(dx, dy),
            ..*self
        }
    }

    /// Copy of this piece advanced one step clockwise
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % self.piece_type.rotation_count(),
            ..*self
        }
    }

    /// Try to move by (dx, dy), returns true if successful
    pub fn try_shift(&mut self, dx: i32, dy: i32, grid: &Grid) -> bool {
        let candidate = self.shifted(dx, dy);
        if candidate.collides(grid) {
            return false;
        }
        *self = candidate;
        true
    }

    /// Try to rotate clockwise in place, no kicks
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let candidate = self.rotated();
        if candidate.collides(grid) {
            return false;
        }
        *self = candidate;
        true
    }

    /// Anchor row the piece would lock at if dropped straight down
    pub fn landing_row(&self, grid: &Grid) -> i32 {
        let mut probe = *self;
        while !probe.shifted(0, -1).collides(grid) {
            probe = probe.shifted(0, -1);
        }
        probe.anchor.y
    }

    /// Write the piece's cells into the grid
    pub fn lock(&self, grid: &mut Grid) -> Result<(), GridError> {
        for (x, y) in self.cells() {
            grid.set(x, y, self.cell)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        let grid = Grid::new(10, 20);
        let piece = Piece::spawn(TetrominoType::T, &grid);
        assert_eq!(piece.anchor, Anchor::new(3, 16));
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.cell, TetrominoType::T.cell_value());
    }

    #[test]
    fn test_spawn_never_collides_on_empty_field() {
        for (w, h) in [(10, 20), (4, 4), (7, 9), (12, 30)] {
            let grid = Grid::new(w, h);
            for kind in TetrominoType::all() {
                assert!(!Piece::spawn(kind, &grid).collides(&grid), "{:?} on {}x{}", kind, w, h);
            }
        }
    }

    #[test]
    fn test_shift_blocked_by_wall() {
        let grid = Grid::new(10, 20);
        let mut piece = Piece::spawn(TetrominoType::O, &grid);
        let mut moves = 0;
        while piece.try_shift(-1, 0, &grid) {
            moves += 1;
        }
        // O occupies mask columns 1..3, so the anchor stops at x = -1
        assert_eq!(moves, 4);
        assert_eq!(piece.anchor.x, -1);
    }

    #[test]
    fn test_rotate_cycles_back() {
        let grid = Grid::new(10, 20);
        let mut piece = Piece::spawn(TetrominoType::L, &grid);
        for expected in [1, 2, 3, 0] {
            assert!(piece.try_rotate(&grid));
            assert_eq!(piece.rotation, expected);
        }
        let mut square = Piece::spawn(TetrominoType::O, &grid);
        assert!(square.try_rotate(&grid));
        assert_eq!(square.rotation, 0);
    }

    #[test]
    fn test_rotate_rejected_under_collision() {
        let mut grid = Grid::new(10, 20);
        let mut piece = Piece::spawn(TetrominoType::I, &grid);
        piece.anchor = Anchor::new(3, 5);
        // vertical I uses column 2 of the mask across rows 0..4
        grid.set(5, 5, 1).unwrap();
        let before = piece;
        assert!(!piece.try_rotate(&grid));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_landing_row() {
        let mut grid = Grid::new(10, 20);
        let piece = Piece::spawn(TetrominoType::O, &grid);
        // O's lowest cells are mask row 1
        assert_eq!(piece.landing_row(&grid), -1);
        grid.set(4, 3, 1).unwrap();
        assert_eq!(piece.landing_row(&grid), 3);
    }

    #[test]
    fn test_lock_writes_only_mask_cells() {
        let mut grid = Grid::new(10, 20);
        let piece = Piece::spawn(TetrominoType::S, &grid).shifted(0, -10);
        piece.lock(&mut grid).unwrap();
        assert_eq!(grid.filled_count(), 4);
        for (x, y) in piece.cells() {
            assert_eq!(grid.get(x, y), Ok(piece.cell));
        }
    }
}
