//! Game engine: owns all game state and the drop timer.
//!
//! The host sends commands (`start`, `move_left`, `hard_drop`, ...) and timer
//! ticks, reads state back through the query methods, and drains
//! [`GameEvent`]s after each call to learn what changed.

use bevy_ecs::prelude::*;
use log::{debug, info};
use std::time::Duration;

use crate::components::{
    ActivePiece, Board, GameState, NextPiece, PieceColor, Position, Randomizer, Tetromino,
};
use crate::events::{self, GameEvent};
use crate::systems::{self, LockOutcome};
use crate::timer::DropTimer;

pub struct Engine<T: DropTimer> {
    pub(crate) world: World,
    timer: T,
}

impl<T: DropTimer> Engine<T> {
    pub fn new(timer: T) -> Self {
        Self::with_randomizer(timer, Randomizer::new())
    }

    /// Engine whose piece sequence is fixed by `seed`.
    pub fn with_seed(timer: T, seed: u64) -> Self {
        Self::with_randomizer(timer, Randomizer::with_seed(seed))
    }

    fn with_randomizer(timer: T, randomizer: Randomizer) -> Self {
        let mut world = World::new();
        systems::setup_world(&mut world, randomizer);
        Self { world, timer }
    }

    // Commands

    /// Resets everything, spawns the first piece and starts automatic drops.
    pub fn start(&mut self) {
        info!("Starting game");
        self.reset();
        self.world.resource_mut::<GameState>().started = true;

        if systems::spawn_tetromino(&mut self.world) {
            let interval = self.drop_interval();
            self.timer.start(interval);
        } else {
            self.timer.stop();
        }
    }

    pub fn pause(&mut self) {
        {
            let mut game_state = self.world.resource_mut::<GameState>();
            if !game_state.started || game_state.game_over || game_state.paused {
                return;
            }
            game_state.paused = true;
        }
        debug!("Paused");
        self.timer.stop();
    }

    pub fn resume(&mut self) {
        {
            let mut game_state = self.world.resource_mut::<GameState>();
            if !game_state.started || game_state.game_over || !game_state.paused {
                return;
            }
            game_state.paused = false;
        }
        debug!("Resumed");
        let interval = self.drop_interval();
        self.timer.start(interval);
    }

    /// Clears board and counters and stops automatic drops. Does not spawn.
    pub fn reset(&mut self) {
        self.timer.stop();
        systems::reset_world(&mut self.world);
    }

    pub fn move_left(&mut self) {
        systems::move_tetromino(&mut self.world, -1);
    }

    pub fn move_right(&mut self) {
        systems::move_tetromino(&mut self.world, 1);
    }

    pub fn move_down(&mut self) {
        if let Some(outcome) = systems::soft_drop(&mut self.world) {
            self.apply_lock(outcome);
        }
    }

    pub fn rotate(&mut self) {
        systems::rotate_tetromino(&mut self.world);
    }

    pub fn hard_drop(&mut self) {
        if let Some(outcome) = systems::hard_drop(&mut self.world) {
            self.apply_lock(outcome);
        }
    }

    /// One automatic drop step. Ignored unless the timer is running.
    pub fn tick(&mut self) {
        if !self.timer.is_running() {
            return;
        }
        log::trace!("Drop tick");
        self.move_down();
    }

    fn apply_lock(&mut self, outcome: LockOutcome) {
        if outcome.game_over {
            info!("Game over with score {}", self.score());
            self.timer.stop();
            return;
        }

        if outcome.line_clear.new_level.is_some() {
            let interval = self.drop_interval();
            debug!("Drop interval now {interval:?}");
            self.timer.set_interval(interval);
        }
    }

    /// Takes every notification raised since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        events::drain(&mut self.world)
    }

    // Queries

    #[must_use]
    pub fn board(&self) -> &Board {
        self.world.resource::<Board>()
    }

    /// The falling piece, absent before the game starts and once it is over.
    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        if self.is_game_over() {
            return None;
        }
        self.world.get_resource::<ActivePiece>()
    }

    /// Absolute cells of the falling piece.
    #[must_use]
    pub fn current_piece_cells(&self) -> Option<[Position; 4]> {
        self.active_piece().map(ActivePiece::cells)
    }

    #[must_use]
    pub fn current_piece_color(&self) -> Option<PieceColor> {
        self.active_piece().map(|piece| piece.color)
    }

    #[must_use]
    pub fn current_position(&self) -> Option<Position> {
        self.active_piece().map(|piece| piece.position)
    }

    #[must_use]
    pub fn next_piece(&self) -> &NextPiece {
        self.world.resource::<NextPiece>()
    }

    /// Offsets of the next piece in its spawn orientation.
    #[must_use]
    pub fn next_piece_blocks(&self) -> [(i32, i32); 4] {
        Tetromino::new(self.next_piece().tetromino_type).get_blocks()
    }

    #[must_use]
    pub fn next_piece_color(&self) -> PieceColor {
        self.next_piece().color
    }

    /// Anchor a hard drop would reach right now.
    #[must_use]
    pub fn shadow_position(&self) -> Option<Position> {
        if self.is_game_over() {
            return None;
        }
        systems::shadow_position(&self.world)
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        self.world.resource::<GameState>()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.game_state().score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.game_state().level
    }

    #[must_use]
    pub fn lines(&self) -> u32 {
        self.game_state().lines_cleared
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_state().game_over
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.game_state().paused
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.game_state().started
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.game_state().drop_interval
    }

    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

impl<T: DropTimer + Default> Default for Engine<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
