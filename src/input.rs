use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::ControlsConfig;

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    HardDrop,
    /// Start a new game, or resume a paused one.
    Start,
    TogglePause,
    Reset,
    /// Answer "play again" after a game over.
    Restart,
    Quit,
}

impl Command {
    /// Commands that act on the falling piece. These are ignored until a game
    /// has been started.
    #[must_use]
    pub fn is_piece_control(self) -> bool {
        matches!(
            self,
            Command::MoveLeft
                | Command::MoveRight
                | Command::MoveDown
                | Command::Rotate
                | Command::HardDrop
        )
    }
}

#[derive(Debug, Clone)]
pub struct KeyMap {
    vim_keys: bool,
}

impl KeyMap {
    #[must_use]
    pub fn new(controls: &ControlsConfig) -> Self {
        Self {
            vim_keys: controls.vim_keys,
        }
    }

    #[must_use]
    pub fn map(&self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => Some(Command::Start),
                KeyCode::Char('p') => Some(Command::TogglePause),
                KeyCode::Char('r') => Some(Command::Reset),
                KeyCode::Char('q' | 'c') => Some(Command::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Left => Some(Command::MoveLeft),
            KeyCode::Right => Some(Command::MoveRight),
            KeyCode::Down => Some(Command::MoveDown),
            KeyCode::Up => Some(Command::Rotate),
            KeyCode::Char(' ') => Some(Command::HardDrop),
            KeyCode::Char('h') if self.vim_keys => Some(Command::MoveLeft),
            KeyCode::Char('l') if self.vim_keys => Some(Command::MoveRight),
            KeyCode::Char('j') if self.vim_keys => Some(Command::MoveDown),
            KeyCode::Char('k') if self.vim_keys => Some(Command::Rotate),
            KeyCode::Enter => Some(Command::Restart),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(&ControlsConfig::default())
    }
}
