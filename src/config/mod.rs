pub mod loader;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub controls: ControlsConfig,
}

// How the board is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_grid: bool,
    pub show_ghost: bool,
    pub frame_rate_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_grid: false,
            show_ghost: true,
            frame_rate_ms: 33, // ~30 FPS
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    // h/j/k/l alongside the arrow keys
    pub vim_keys: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self { vim_keys: true }
    }
}
