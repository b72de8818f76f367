#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// New pieces enter with their anchor at this column, on row 0
pub const SPAWN_COLUMN: i32 = (BOARD_WIDTH / 2) as i32 - 1;

// Automatic drop timing (milliseconds)
pub const BASE_DROP_INTERVAL_MS: u64 = 1000;
pub const DROP_INTERVAL_STEP_MS: u64 = 100;
pub const MIN_DROP_INTERVAL_MS: u64 = 100;

// Line clear scoring, indexed by rows cleared in one lock and multiplied by level
pub const LINE_CLEAR_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

// Level progression
pub const LINES_PER_LEVEL: u32 = 10;
pub const STARTING_LEVEL: u32 = 1;

/// Points awarded for clearing `lines` rows at once while at `level`.
#[must_use]
pub fn points_for_lines(lines: usize, level: u32) -> u32 {
    LINE_CLEAR_POINTS
        .get(lines)
        .map_or(0, |points| points.saturating_mul(level))
}

#[must_use]
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + STARTING_LEVEL
}

/// Time between automatic drops at `level`, never faster than the floor.
#[must_use]
pub fn drop_interval_for_level(level: u32) -> Duration {
    let speedup = u64::from(level.saturating_sub(STARTING_LEVEL)) * DROP_INTERVAL_STEP_MS;
    let millis = BASE_DROP_INTERVAL_MS
        .saturating_sub(speedup)
        .max(MIN_DROP_INTERVAL_MS);
    Duration::from_millis(millis)
}
