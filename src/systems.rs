use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::{
    ActivePiece, Board, GameState, LineClear, NextPiece, Position, Randomizer,
};
use crate::events::{self, GameEvent};

/// What a lock did beyond writing cells, so the caller can adjust the drop timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockOutcome {
    pub line_clear: LineClear,
    /// The piece spawned after the lock had nowhere to go.
    pub game_over: bool,
}

/// Inserts every resource the game systems rely on.
pub fn setup_world(world: &mut World, mut randomizer: Randomizer) {
    let next = NextPiece::new(randomizer.next_type());

    world.insert_resource(Board::default());
    world.insert_resource(GameState::default());
    world.insert_resource(next);
    world.insert_resource(randomizer);
    world.init_resource::<Events<GameEvent>>();
}

/// Clears the board and counters, drops the active piece and rolls a new next piece.
pub fn reset_world(world: &mut World) {
    world.resource_mut::<Board>().clear();
    world.resource_mut::<GameState>().reset();
    world.remove_resource::<ActivePiece>();
    roll_next_piece(world);

    let (score, level, lines) = {
        let game_state = world.resource::<GameState>();
        (game_state.score, game_state.level, game_state.lines_cleared)
    };
    events::emit(world, GameEvent::ScoreChanged(score));
    events::emit(world, GameEvent::LevelChanged(level));
    events::emit(world, GameEvent::LinesChanged(lines));
}

fn roll_next_piece(world: &mut World) {
    let tetromino_type = world.resource_mut::<Randomizer>().next_type();
    world.insert_resource(NextPiece::new(tetromino_type));
}

/// Promotes the next piece to the active one at the spawn anchor and rolls a new
/// next piece. Returns false, and ends the game, when the spawned piece collides.
pub fn spawn_tetromino(world: &mut World) -> bool {
    let next = *world.resource::<NextPiece>();
    let piece = ActivePiece::spawn(next.tetromino_type);
    world.insert_resource(piece);
    roll_next_piece(world);

    debug!(
        "Spawned {:?} at ({}, {})",
        next.tetromino_type, piece.position.x, piece.position.y
    );
    events::emit(world, GameEvent::PieceChanged);

    let blocked = world
        .resource::<Board>()
        .collides(piece.position, &piece.tetromino);

    if blocked {
        info!("Spawn blocked, game over");
        world.resource_mut::<GameState>().game_over = true;
        events::emit(world, GameEvent::GameOver);
        return false;
    }

    true
}

// The active piece, if the game currently accepts movement
fn movable_piece(world: &World) -> Option<ActivePiece> {
    if !world.resource::<GameState>().accepts_moves() {
        return None;
    }
    world.get_resource::<ActivePiece>().copied()
}

fn commit_piece(world: &mut World, piece: ActivePiece) {
    world.insert_resource(piece);
    events::emit(world, GameEvent::BoardChanged);
}

/// Shifts the active piece one column. Returns whether the move was committed.
pub fn move_tetromino(world: &mut World, dx: i32) -> bool {
    let Some(piece) = movable_piece(world) else {
        return false;
    };

    let new_position = piece.position.offset(dx, 0);
    if !world
        .resource::<Board>()
        .is_valid_position(new_position, &piece.tetromino)
    {
        return false;
    }

    commit_piece(
        world,
        ActivePiece {
            position: new_position,
            ..piece
        },
    );
    true
}

/// Moves the active piece down one row, or locks it where it is when the row
/// below is blocked. Returns the lock outcome when a lock happened.
pub fn soft_drop(world: &mut World) -> Option<LockOutcome> {
    let piece = movable_piece(world)?;

    let new_position = piece.position.offset(0, 1);
    if world
        .resource::<Board>()
        .is_valid_position(new_position, &piece.tetromino)
    {
        commit_piece(
            world,
            ActivePiece {
                position: new_position,
                ..piece
            },
        );
        return None;
    }

    Some(lock_tetromino(world))
}

/// Advances the orientation at the unchanged anchor. A placement that doesn't
/// fit is rejected outright.
pub fn rotate_tetromino(world: &mut World) -> bool {
    let Some(piece) = movable_piece(world) else {
        return false;
    };

    let rotated = piece.tetromino.rotated();
    if !world
        .resource::<Board>()
        .is_valid_position(piece.position, &rotated)
    {
        return false;
    }

    commit_piece(
        world,
        ActivePiece {
            tetromino: rotated,
            ..piece
        },
    );
    true
}

/// Drops the active piece as far as it goes and locks it immediately.
pub fn hard_drop(world: &mut World) -> Option<LockOutcome> {
    let mut piece = movable_piece(world)?;

    {
        let board = world.resource::<Board>();
        while board.is_valid_position(piece.position, &piece.tetromino) {
            piece.position.y += 1;
        }
        piece.position.y -= 1;
    }

    world.insert_resource(piece);
    Some(lock_tetromino(world))
}

/// Anchor the active piece would come to rest at if hard-dropped now.
#[must_use]
pub fn shadow_position(world: &World) -> Option<Position> {
    let piece = world.get_resource::<ActivePiece>()?;
    let board = world.resource::<Board>();

    let mut position = piece.position;
    while board.is_valid_position(position.offset(0, 1), &piece.tetromino) {
        position.y += 1;
    }
    Some(position)
}

/// Writes the active piece into the board, clears full rows and spawns the
/// next piece.
pub fn lock_tetromino(world: &mut World) -> LockOutcome {
    let Some(piece) = world.get_resource::<ActivePiece>().copied() else {
        return LockOutcome::default();
    };

    let written = world
        .resource_mut::<Board>()
        .lock_tetromino(piece.position, &piece.tetromino);
    info!(
        "Locked {:?} at ({}, {}), {written} cells on the board",
        piece.tetromino.tetromino_type, piece.position.x, piece.position.y
    );

    let line_clear = clear_lines(world);
    let game_over = !spawn_tetromino(world);
    events::emit(world, GameEvent::BoardChanged);

    LockOutcome {
        line_clear,
        game_over,
    }
}

/// Removes full rows and scores them.
pub fn clear_lines(world: &mut World) -> LineClear {
    let lines = world.resource_mut::<Board>().clear_lines();
    if lines == 0 {
        return LineClear::default();
    }

    let (line_clear, score, total_lines) = {
        let mut game_state = world.resource_mut::<GameState>();
        let line_clear = game_state.award_lines(lines);
        (line_clear, game_state.score, game_state.lines_cleared)
    };

    info!(
        "Cleared {lines} lines for {} points (total lines: {total_lines})",
        line_clear.points
    );

    if let Some(level) = line_clear.new_level {
        info!("Level up: {level}");
        events::emit(world, GameEvent::LevelChanged(level));
    }
    events::emit(world, GameEvent::ScoreChanged(score));
    events::emit(world, GameEvent::LinesChanged(total_lines));

    line_clear
}
