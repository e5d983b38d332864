//! The UI-independent game core. Nothing in here touches the terminal.

pub mod code;
pub mod color;
pub mod engine;
pub mod error;
pub mod rules;
pub mod scoring;
pub mod timer;

pub use code::{Feedback, Guess, SecretCode};
pub use color::{parse_colors, Color, ParseColorError};
pub use engine::{GameState, GuessEngine, GuessResult, Outcome, TickResult};
pub use error::{EngineError, InvalidGuess};
pub use rules::Rules;
