//! Core game state and logic

use crate::controller::{DropController, Spawn, Step};
use crate::grid::{Cell, DEFAULT_HEIGHT, DEFAULT_WIDTH, Grid, GridError};
use crate::line_clear;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::Score;
use crate::tetromino::TetrominoType;
use crate::timer::GravityTimer;
use std::time::{Duration, Instant};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver,
}

/// Input commands the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    HardDrop,
}

/// Session parameters
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Gravity interval on level 1
    pub base_gravity: Duration,
    /// Fixed seed for a reproducible piece sequence
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            base_gravity: Duration::from_millis(1000),
            seed: None,
        }
    }
}

/// Read-only projection of the session for the renderer
#[derive(Debug, Clone)]
pub struct GameView<'a> {
    pub field: &'a Grid,
    pub active: Option<ActiveView>,
    pub next: TetrominoType,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub pieces: u32,
    pub game_over: bool,
    pub last_action: Option<&'a str>,
}

/// The falling piece as the renderer sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveView {
    /// Cell value, which selects the colour
    pub cell: Cell,
    /// Absolute (x, y) of the piece's blocks
    pub cells: Vec<(i32, i32)>,
    /// Where the blocks would land on a hard drop
    pub ghost: Vec<(i32, i32)>,
}

impl ActiveView {
    fn new(piece: &Piece, field: &Grid) -> Self {
        let drop = piece.landing_row(field) - piece.anchor.y;
        Self {
            cell: piece.cell,
            cells: piece.cells().collect(),
            ghost: piece.shifted(0, drop).cells().collect(),
        }
    }
}

/// The main game struct
pub struct Game {
    /// The playing field
    field: Grid,
    /// Active and next piece
    controller: DropController,
    /// Score tracking
    pub score: Score,
    /// Current game state
    pub state: GameState,
    /// Pending gravity tick
    timer: GravityTimer,
    base_gravity: Duration,
    /// Last clear or level-up text to display
    pub last_action: Option<String>,
}

impl Game {
    /// Create a game, spawn the first piece and arm gravity from `now`
    pub fn new(config: &GameConfig, now: Instant) -> Self {
        let randomizer = match config.seed {
            Some(seed) => Randomizer::with_seed(seed),
            None => Randomizer::new(),
        };

        let mut game = Self {
            field: Grid::new(config.width, config.height),
            controller: DropController::new(randomizer),
            score: Score::new(),
            state: GameState::Running,
            timer: GravityTimer::new(),
            base_gravity: config.base_gravity,
            last_action: None,
        };
        tracing::info!(
            width = config.width,
            height = config.height,
            seed = ?config.seed,
            "new game"
        );
        game.spawn_next();
        game.rearm(now);
        game
    }

    pub fn field(&self) -> &Grid {
        &self.field
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.controller.active()
    }

    pub fn next_piece(&self) -> TetrominoType {
        self.controller.next()
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Gravity interval for the current level
    pub fn fall_interval(&self) -> Duration {
        self.score.fall_interval(self.base_gravity)
    }

    /// When the host should next call `update`, `None` once the game is over
    pub fn next_tick(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Time left before the pending gravity tick
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    /// Apply a player command. Returns true if the session changed.
    ///
    /// Commands are ignored once the game is over. Any successful command
    /// restarts the gravity timer from `now`.
    pub fn handle_input(&mut self, command: Command, now: Instant) -> Result<bool, GridError> {
        if self.is_over() {
            return Ok(false);
        }

        let changed = match command {
            Command::MoveLeft => self.controller.shift(-1, &self.field),
            Command::MoveRight => self.controller.shift(1, &self.field),
            Command::Rotate => self.controller.rotate(&self.field),
            Command::HardDrop => self.hard_drop()?,
        };

        if changed {
            self.rearm(now);
        }
        Ok(changed)
    }

    /// Run the gravity tick if it is due at `now`, then schedule the next one.
    /// Returns true if a tick ran.
    pub fn update(&mut self, now: Instant) -> Result<bool, GridError> {
        if !self.timer.fire(now) {
            return Ok(false);
        }
        self.advance()?;
        self.rearm(now);
        Ok(true)
    }

    /// One gravity step: fall a row, or lock, clear and spawn the next piece
    pub fn advance(&mut self) -> Result<(), GridError> {
        if self.is_over() {
            return Ok(());
        }
        if let Some(Step::Locked(piece)) = self.controller.step(&mut self.field)? {
            self.settle(&piece)?;
        }
        Ok(())
    }

    /// Drop the active piece until it locks. Exactly one piece is placed.
    fn hard_drop(&mut self) -> Result<bool, GridError> {
        loop {
            match self.controller.step(&mut self.field)? {
                Some(Step::Fell) => continue,
                Some(Step::Locked(piece)) => {
                    self.settle(&piece)?;
                    return Ok(true);
                }
                None => return Ok(false),
            }
        }
    }

    /// Post-lock bookkeeping: clear rows, score, spawn the next piece
    fn settle(&mut self, piece: &Piece) -> Result<(), GridError> {
        let rows = line_clear::clear_full_rows(&mut self.field)?;
        let award = self.score.add_clear(rows.len());

        if rows.is_empty() {
            self.last_action = None;
        } else {
            tracing::info!(
                kind = ?piece.piece_type,
                rows = ?rows,
                points = award.points,
                total = self.score.points,
                "cleared lines"
            );
            self.last_action = Some(clear_name(rows.len()).to_string());
        }

        if award.levels_gained > 0 {
            tracing::info!(
                level = self.score.level,
                interval_ms = self.fall_interval().as_millis() as u64,
                "level up"
            );
            self.last_action = Some(format!("Level {}!", self.score.level));
        }

        self.spawn_next();
        Ok(())
    }

    fn spawn_next(&mut self) {
        if let Spawn::Blocked = self.controller.spawn(&self.field) {
            self.state = GameState::GameOver;
            self.timer.cancel();
            tracing::info!(
                score = self.score.points,
                level = self.score.level,
                lines = self.score.lines,
                pieces = self.score.pieces,
                filled = self.field.filled_count(),
                "game over"
            );
        }
    }

    /// Replace the pending gravity tick; nothing is scheduled after game over
    fn rearm(&mut self, now: Instant) {
        if self.is_over() {
            self.timer.cancel();
        } else {
            self.timer.arm(now, self.fall_interval());
        }
    }

    /// Snapshot for rendering
    pub fn view(&self) -> GameView<'_> {
        GameView {
            field: &self.field,
            active: self
                .active_piece()
                .map(|piece| ActiveView::new(piece, &self.field)),
            next: self.next_piece(),
            score: self.score.points,
            level: self.score.level,
            lines: self.score.lines,
            pieces: self.score.pieces,
            game_over: self.is_over(),
            last_action: self.last_action.as_deref(),
        }
    }
}

fn clear_name(rows: usize) -> &'static str {
    match rows {
        1 => "Single",
        2 => "Double",
        3 => "Triple",
        _ => "Tetris",
    }
}
