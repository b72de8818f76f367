//! blockfall: a falling-block puzzle game for the terminal.
//!
//! [`engine::Engine`] owns the game rules and state; everything else in the
//! crate is the terminal host that feeds it key presses and timer ticks and
//! draws what it reports.

pub mod app;
pub mod components;
pub mod config;
pub mod engine;
pub mod events;
pub mod game;
pub mod input;
pub mod systems;
pub mod timer;
pub mod ui;

#[cfg(test)]
mod tests;
