use thiserror::Error;

use super::color::Color;

/// Errors reported by [`GuessEngine`](super::engine::GuessEngine). None of them
/// change the game state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid guess: {0}")]
    InvalidGuess(#[from] InvalidGuess),

    /// The game already ended; only a new game is accepted.
    #[error("no game in progress")]
    InactiveGame,

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidGuess {
    #[error("expected {expected} colors, got {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("{0} is not in the palette")]
    OutsidePalette(Color),
}
