use bevy_ecs::prelude::*;

use crate::components::{ActivePiece, Board, NextPiece, Position, Randomizer, TetrominoType};
use crate::engine::Engine;
use crate::systems::setup_world;
use crate::timer::ManualTimer;

// Helper function to create a world with every game resource in place
#[must_use]
pub fn create_test_world() -> World {
    let mut world = World::new();
    setup_world(&mut world, Randomizer::with_seed(7));
    world
}

// Started engine whose falling piece has been swapped for `tetromino_type`
#[must_use]
pub fn started_engine_with(tetromino_type: TetrominoType) -> Engine<ManualTimer> {
    let mut engine = Engine::with_seed(ManualTimer::new(), 42);
    engine.start();
    engine
        .world
        .insert_resource(ActivePiece::spawn(tetromino_type));
    engine.drain_events();
    engine
}

pub fn set_next_piece(world: &mut World, tetromino_type: TetrominoType) {
    world.insert_resource(NextPiece::new(tetromino_type));
}

pub fn place_piece(world: &mut World, tetromino_type: TetrominoType, x: i32, y: i32) {
    let mut piece = ActivePiece::spawn(tetromino_type);
    piece.position = Position { x, y };
    world.insert_resource(piece);
}

// Fill row `y` completely except for the listed columns
pub fn fill_row_except(board: &mut Board, y: i32, gaps: &[i32]) {
    for x in 0..board.width as i32 {
        if !gaps.contains(&x) {
            board.set(x, y, true);
        }
    }
}

#[must_use]
pub fn occupied_count(board: &Board) -> usize {
    board
        .rows()
        .iter()
        .map(|row| row.iter().filter(|&&cell| cell).count())
        .sum()
}
