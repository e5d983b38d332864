pub mod cli;
pub mod config;
pub mod core;
pub mod game;
pub mod logging;

// Re-export for convenience
pub use crate::game::{Color, Guess, GuessEngine, GuessResult, Outcome, Rules, SecretCode};
