//! Spawn and drop control for the falling piece
//!
//! Owns the active and next pieces. The active piece is `None` between a lock
//! and the following spawn, and stays `None` for good once a spawn is blocked.

use crate::grid::{Grid, GridError};
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::tetromino::TetrominoType;

/// Outcome of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The piece moved down one row
    Fell,
    /// The piece could not move and was written into the field
    Locked(Piece),
}

/// Outcome of a spawn attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    Spawned(TetrominoType),
    /// The spawn anchor was already occupied
    Blocked,
}

#[derive(Debug, Clone)]
pub struct DropController {
    active: Option<Piece>,
    next: TetrominoType,
    randomizer: Randomizer,
    blocked: bool,
}

impl DropController {
    /// Controller with the first piece pre-selected but not yet spawned
    pub fn new(mut randomizer: Randomizer) -> Self {
        let next = randomizer.next();
        Self {
            active: None,
            next,
            randomizer,
            blocked: false,
        }
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> TetrominoType {
        self.next
    }

    /// Bring the pre-selected next kind into play at the spawn anchor
    pub fn spawn(&mut self, grid: &Grid) -> Spawn {
        if self.blocked {
            return Spawn::Blocked;
        }

        let kind = self.next;
        let piece = Piece::spawn(kind, grid);
        if piece.collides(grid) {
            tracing::debug!(?kind, anchor = ?piece.anchor, "spawn blocked");
            self.active = None;
            self.blocked = true;
            return Spawn::Blocked;
        }

        self.active = Some(piece);
        self.next = self.randomizer.next();
        tracing::debug!(?kind, next = ?self.next, "spawned");
        Spawn::Spawned(kind)
    }

    /// Move the active piece down one row, locking it if it cannot move.
    /// Returns `None` when there is no active piece.
    pub fn step(&mut self, grid: &mut Grid) -> Result<Option<Step>, GridError> {
        let Some(piece) = &mut self.active else {
            return Ok(None);
        };

        if piece.try_shift(0, -1, grid) {
            return Ok(Some(Step::Fell));
        }

        let piece = *piece;
        piece.lock(grid)?;
        self.active = None;
        tracing::debug!(kind = ?piece.piece_type, anchor = ?piece.anchor, "locked");
        Ok(Some(Step::Locked(piece)))
    }

    /// Move the active piece sideways by `dx`, returns true if it moved
    pub fn shift(&mut self, dx: i32, grid: &Grid) -> bool {
        match &mut self.active {
            Some(piece) => piece.try_shift(dx, 0, grid),
            None => false,
        }
    }

    /// Rotate the active piece clockwise, returns true if it rotated
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        match &mut self.active {
            Some(piece) => piece.try_rotate(grid),
            None => false,
        }
    }
}
