#![warn(clippy::all, clippy::pedantic)]

use crossterm::event::KeyEvent;
use log::debug;

use crate::config::Config;
use crate::engine::Engine;
use crate::events::GameEvent;
use crate::game::STARTING_LEVEL;
use crate::input::{Command, KeyMap};
use crate::timer::IntervalTimer;

pub type AppResult<T> = anyhow::Result<T>;

/// Counters shown in the side panel, kept in step with the engine's notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Playing,
    Paused,
    Resumed,
    Reset,
    GameOver { final_score: u32 },
}

impl Status {
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Status::Ready => "Ready. Press Ctrl+S to start".to_string(),
            Status::Playing => "Game in progress".to_string(),
            Status::Paused => "Paused".to_string(),
            Status::Resumed => "Game resumed".to_string(),
            Status::Reset => "Game reset".to_string(),
            Status::GameOver { final_score } => {
                format!("Game over! Final score: {final_score}. Enter to play again")
            }
        }
    }
}

pub struct App {
    pub engine: Engine<IntervalTimer>,
    pub config: Config,
    pub keymap: KeyMap,
    pub hud: Hud,
    pub status: Status,
    pub should_quit: bool,
    pub needs_redraw: bool,
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_engine(config, Engine::new(IntervalTimer::new()))
    }

    /// App whose piece sequence is fixed by `seed`.
    #[must_use]
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_engine(config, Engine::with_seed(IntervalTimer::new(), seed))
    }

    fn with_engine(config: Config, engine: Engine<IntervalTimer>) -> Self {
        let keymap = KeyMap::new(&config.controls);
        Self {
            engine,
            config,
            keymap,
            hud: Hud::default(),
            status: Status::Ready,
            should_quit: false,
            needs_redraw: true,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(command) = self.keymap.map(key) {
            self.handle_command(command);
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        if command.is_piece_control() && !self.engine.is_started() {
            return;
        }

        debug!("Command: {command:?}");
        match command {
            Command::MoveLeft => self.engine.move_left(),
            Command::MoveRight => self.engine.move_right(),
            Command::MoveDown => self.engine.move_down(),
            Command::Rotate => self.engine.rotate(),
            Command::HardDrop => self.engine.hard_drop(),
            Command::Start => self.start_game(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => {
                self.engine.reset();
                self.status = Status::Reset;
            }
            Command::Restart => {
                if self.engine.is_game_over() {
                    self.engine.reset();
                    self.start_game();
                }
            }
            Command::Quit => self.should_quit = true,
        }

        self.sync_events();
    }

    fn start_game(&mut self) {
        if self.engine.is_paused() {
            self.engine.resume();
            self.status = Status::Resumed;
        } else {
            self.engine.start();
            self.status = Status::Playing;
        }
        self.needs_redraw = true;
    }

    fn toggle_pause(&mut self) {
        if !self.engine.is_started() || self.engine.is_game_over() {
            return;
        }

        if self.engine.is_paused() {
            self.engine.resume();
            self.status = Status::Resumed;
        } else {
            self.engine.pause();
            self.status = Status::Paused;
        }
        self.needs_redraw = true;
    }

    /// Fires an automatic drop when the timer is due.
    pub fn on_tick(&mut self) {
        if self.engine.timer_mut().poll() {
            self.engine.tick();
            self.sync_events();
        }
    }

    // Update the panel and status line from the engine's notifications
    pub fn sync_events(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                GameEvent::BoardChanged | GameEvent::PieceChanged => self.needs_redraw = true,
                GameEvent::ScoreChanged(score) => self.hud.score = score,
                GameEvent::LevelChanged(level) => self.hud.level = level,
                GameEvent::LinesChanged(lines) => self.hud.lines = lines,
                GameEvent::GameOver => {
                    self.status = Status::GameOver {
                        final_score: self.engine.score(),
                    };
                    self.needs_redraw = true;
                }
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
