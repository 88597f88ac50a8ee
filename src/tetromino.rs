//! Tetromino definitions and shapes
//!
//! All 7 tetrominoes with their clockwise rotation cycles. Each rotation
//! state is a 4x4 mask written top row first; mask coordinates handed out to
//! the rest of the game use (x, y) with y increasing upward, matching the grid.

use crate::grid::{Cell, EMPTY};
use ratatui::style::Color;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

/// One 4x4 rotation state, rows stored top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask([[u8; 4]; 4]);

impl Mask {
    pub const fn new(rows: [[u8; 4]; 4]) -> Self {
        Self(rows)
    }

    /// Whether the mask cell at (x, y) is occupied, y counted from the bottom row
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.0[3 - y][x] != 0
    }

    /// Offsets (x, y) of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..4usize).flat_map(move |y| {
            (0..4usize)
                .filter(move |&x| self.is_filled(x, y))
                .map(move |x| (x as i32, y as i32))
        })
    }
}

/// A piece kind and its rotation cycle
#[derive(Debug)]
pub struct PieceDef {
    pub kind: TetrominoType,
    pub rotations: &'static [Mask],
}

const I_ROTATIONS: [Mask; 2] = [
    Mask::new([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
];

const O_ROTATIONS: [Mask; 1] = [Mask::new([
    [0, 0, 0, 0],
    [0, 1, 1, 0],
    [0, 1, 1, 0],
    [0, 0, 0, 0],
])];

const T_ROTATIONS: [Mask; 4] = [
    Mask::new([[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
];

// S: .SS    .S
//    SS.    .SS
//           ..S
const S_ROTATIONS: [Mask; 2] = [
    Mask::new([[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]]),
];

// Z: ZZ.    ..Z
//    .ZZ    .ZZ
//           .Z.
const Z_ROTATIONS: [Mask; 2] = [
    Mask::new([[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
];

const J_ROTATIONS: [Mask; 4] = [
    Mask::new([[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
];

const L_ROTATIONS: [Mask; 4] = [
    Mask::new([[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
    Mask::new([[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new([[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
];

/// Process-wide piece table, indexed by `TetrominoType::index`
pub static CATALOG: [PieceDef; 7] = [
    PieceDef { kind: TetrominoType::I, rotations: &I_ROTATIONS },
    PieceDef { kind: TetrominoType::O, rotations: &O_ROTATIONS },
    PieceDef { kind: TetrominoType::T, rotations: &T_ROTATIONS },
    PieceDef { kind: TetrominoType::S, rotations: &S_ROTATIONS },
    PieceDef { kind: TetrominoType::Z, rotations: &Z_ROTATIONS },
    PieceDef { kind: TetrominoType::J, rotations: &J_ROTATIONS },
    PieceDef { kind: TetrominoType::L, rotations: &L_ROTATIONS },
];

impl TetrominoType {
    /// Get all tetromino types in catalog order
    pub fn all() -> [TetrominoType; 7] {
        std::array::from_fn(|i| CATALOG[i].kind)
    }

    /// Position in `CATALOG`
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn def(self) -> &'static PieceDef {
        &CATALOG[self.index()]
    }

    pub fn rotation_count(self) -> usize {
        self.def().rotations.len()
    }

    /// Mask for a rotation index, wrapping past the end of the cycle
    pub fn mask(self, rotation: usize) -> &'static Mask {
        let rotations = self.def().rotations;
        &rotations[rotation % rotations.len()]
    }

    /// Value written into the grid when this kind locks
    pub fn cell_value(self) -> Cell {
        self.index() as Cell + 1
    }

    /// Reverse of `cell_value`
    pub fn from_cell(cell: Cell) -> Option<TetrominoType> {
        if cell == EMPTY {
            return None;
        }
        Self::all().get(cell as usize - 1).copied()
    }

    /// Get the color for this tetromino
    pub fn color(self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Magenta,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
        }
    }
}
