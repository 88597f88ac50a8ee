//! Collision detection between a piece mask and the field

use crate::grid::{EMPTY, Grid};
use crate::tetromino::Mask;

/// Grid coordinate of a mask's bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Whether `mask` placed at `anchor` leaves the field or overlaps a filled cell
pub fn collides(grid: &Grid, mask: &Mask, anchor: Anchor) -> bool {
    mask.cells().any(|(dx, dy)| {
        grid.get(anchor.x + dx, anchor.y + dy)
            .map_or(true, |cell| cell != EMPTY)
    })
}
