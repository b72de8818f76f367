#![warn(clippy::all, clippy::pedantic)]

pub mod systems_tests;

// Import test utilities
pub mod test_utils;
