use serde::{Deserialize, Serialize};

use super::color::Color;

pub const DEFAULT_CODE_LENGTH: usize = 4;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_STARTING_POINTS: i32 = 100;
pub const DEFAULT_TIMER_MAX: u32 = 10;

pub const MAX_CODE_LENGTH: usize = 16;
/// One hour at the default tick length.
pub const MAX_TIMER_MAX: u32 = 3600;

/// Tunable constants for a game. Every field falls back to its default when
/// missing from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub code_length: usize,
    pub max_attempts: u32,
    pub starting_points: i32,
    /// Ticks per turn before it is forfeited.
    pub timer_max: u32,
    pub palette: Vec<Color>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            starting_points: DEFAULT_STARTING_POINTS,
            timer_max: DEFAULT_TIMER_MAX,
            palette: Color::ALL.to_vec(),
        }
    }
}
