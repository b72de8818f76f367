#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap,
    // Allow more than 3 bools in structs for game states where bools represent distinct flags
    clippy::struct_excessive_bools
)]

use bevy_ecs::prelude::*;
use std::time::Duration;

use crate::game::{
    BASE_DROP_INTERVAL_MS, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_COLUMN, STARTING_LEVEL,
    drop_interval_for_level, level_for_lines, points_for_lines,
};

/// Display colour of a piece, as plain RGB so the engine stays renderer-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PieceColor {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::S,
        TetrominoType::Z,
        TetrominoType::J,
        TetrominoType::L,
    ];

    /// Offsets of the four cells in the canonical (North) orientation.
    #[must_use]
    pub fn get_blocks(self) -> [(i32, i32); 4] {
        match self {
            TetrominoType::I => [(0, 0), (0, 1), (0, 2), (0, 3)],
            TetrominoType::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
            TetrominoType::T => [(0, 1), (1, 0), (1, 1), (1, 2)],
            TetrominoType::S => [(0, 1), (0, 2), (1, 0), (1, 1)],
            TetrominoType::Z => [(0, 0), (0, 1), (1, 1), (1, 2)],
            TetrominoType::J => [(0, 0), (1, 0), (1, 1), (1, 2)],
            TetrominoType::L => [(0, 2), (1, 0), (1, 1), (1, 2)],
        }
    }

    #[must_use]
    pub fn get_color(self) -> PieceColor {
        match self {
            TetrominoType::I => PieceColor::rgb(0, 255, 255),
            TetrominoType::O => PieceColor::rgb(255, 255, 0),
            TetrominoType::T => PieceColor::rgb(128, 0, 128),
            TetrominoType::S => PieceColor::rgb(0, 255, 0),
            TetrominoType::Z => PieceColor::rgb(255, 0, 0),
            TetrominoType::J => PieceColor::rgb(0, 0, 255),
            TetrominoType::L => PieceColor::rgb(255, 165, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Next orientation in the fixed cycle North -> East -> South -> West -> North.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Number of quarter turns away from North.
    #[must_use]
    pub fn quarter_turns(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub tetromino_type: TetrominoType,
    pub rotation: Rotation,
}

impl Tetromino {
    #[must_use]
    pub fn new(tetromino_type: TetrominoType) -> Self {
        Self {
            tetromino_type,
            rotation: Rotation::North,
        }
    }

    /// Cell offsets for the current rotation. Each quarter turn maps (x, y) to (-y, x).
    #[must_use]
    pub fn get_blocks(self) -> [(i32, i32); 4] {
        let mut blocks = self.tetromino_type.get_blocks();
        for _ in 0..self.rotation.quarter_turns() {
            for block in &mut blocks {
                *block = (-block.1, block.0);
            }
        }
        blocks
    }

    #[must_use]
    pub fn rotated(self) -> Self {
        Self {
            rotation: self.rotation.next(),
            ..self
        }
    }
}

/// Occupancy grid, indexed `cells[row][column]` with row 0 at the top.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<bool>>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![false; width]; height],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(false);
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cell_index(x, y)
            .is_some_and(|(column, row)| self.cells[row][column])
    }

    /// Marks a cell; returns false when the coordinate is off the board.
    pub fn set(&mut self, x: i32, y: i32, occupied: bool) -> bool {
        match self.cell_index(x, y) {
            Some((column, row)) => {
                self.cells[row][column] = occupied;
                true
            }
            None => false,
        }
    }

    fn cell_index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Whether any cell of `tetromino` anchored at `position` leaves the side walls,
    /// reaches past the floor, or overlaps an occupied cell. Cells above the top
    /// row only have to respect the side walls.
    #[must_use]
    pub fn collides(&self, position: Position, tetromino: &Tetromino) -> bool {
        tetromino.get_blocks().iter().any(|&(block_x, block_y)| {
            let x = position.x + block_x;
            let y = position.y + block_y;

            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return true;
            }

            y >= 0 && self.cells[y as usize][x as usize]
        })
    }

    #[must_use]
    pub fn is_valid_position(&self, position: Position, tetromino: &Tetromino) -> bool {
        !self.collides(position, tetromino)
    }

    /// Writes the piece's cells into the grid, skipping any that fall off the board.
    /// Returns how many cells were written.
    pub fn lock_tetromino(&mut self, position: Position, tetromino: &Tetromino) -> usize {
        tetromino
            .get_blocks()
            .iter()
            .filter(|&&(block_x, block_y)| {
                self.set(position.x + block_x, position.y + block_y, true)
            })
            .count()
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells
            .get(y)
            .is_some_and(|row| row.iter().all(|&cell| cell))
    }

    /// Removes every full row, scanning from the bottom up. After a removal the
    /// same index is examined again because the row above has shifted into it.
    /// Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut y = self.height;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.cells.remove(row);
                self.cells.insert(0, vec![false; self.width]);
                lines_cleared += 1;
            } else {
                y -= 1;
            }
        }

        lines_cleared
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

/// Result of scoring one lock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClear {
    pub lines: usize,
    pub points: u32,
    /// Set when the clear pushed the game into a new level.
    pub new_level: Option<u32>,
}

#[derive(Debug, Resource, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
    pub paused: bool,
    pub started: bool,
    pub drop_interval: Duration,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            level: STARTING_LEVEL,
            lines_cleared: 0,
            game_over: false,
            paused: false,
            started: false,
            drop_interval: Duration::from_millis(BASE_DROP_INTERVAL_MS),
        }
    }
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Movement and rotation are only honoured while this holds.
    #[must_use]
    pub fn accepts_moves(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Scores `lines` rows cleared by a single lock. Points use the level in
    /// effect before the clear; the level is recomputed afterwards.
    pub fn award_lines(&mut self, lines: usize) -> LineClear {
        if lines == 0 {
            return LineClear::default();
        }

        let points = points_for_lines(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines_cleared = self
            .lines_cleared
            .saturating_add(u32::try_from(lines).unwrap_or(u32::MAX));

        LineClear {
            lines,
            points,
            new_level: self.update_level(),
        }
    }

    /// Raises the level to match the line total. Never lowers it.
    pub fn update_level(&mut self) -> Option<u32> {
        let level = level_for_lines(self.lines_cleared);
        if level <= self.level {
            return None;
        }

        self.level = level;
        self.drop_interval = drop_interval_for_level(level);
        Some(level)
    }
}

/// The falling piece. Only present while a game is running.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub tetromino: Tetromino,
    pub position: Position,
    pub color: PieceColor,
}

impl ActivePiece {
    #[must_use]
    pub fn spawn(tetromino_type: TetrominoType) -> Self {
        Self {
            tetromino: Tetromino::new(tetromino_type),
            position: Position {
                x: SPAWN_COLUMN,
                y: 0,
            },
            color: tetromino_type.get_color(),
        }
    }

    /// Absolute board coordinates of the piece's cells.
    #[must_use]
    pub fn cells(&self) -> [Position; 4] {
        self.tetromino
            .get_blocks()
            .map(|(dx, dy)| self.position.offset(dx, dy))
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPiece {
    pub tetromino_type: TetrominoType,
    pub color: PieceColor,
}

impl NextPiece {
    #[must_use]
    pub fn new(tetromino_type: TetrominoType) -> Self {
        Self {
            tetromino_type,
            color: tetromino_type.get_color(),
        }
    }
}

/// Source of piece kinds: uniform over all seven, drawn with replacement.
#[derive(Resource, Debug, Clone)]
pub struct Randomizer {
    rng: fastrand::Rng,
}

impl Randomizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn next_type(&mut self) -> TetrominoType {
        TetrominoType::ALL[self.rng.usize(..TetrominoType::ALL.len())]
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}
