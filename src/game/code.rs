use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::color::Color;

/// The hidden sequence the player has to crack. Only the engine owns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretCode(Vec<Color>);

impl SecretCode {
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    /// Draws `len` colours independently from `palette`, duplicates allowed.
    /// `palette` must not be empty.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, palette: &[Color], len: usize) -> Self {
        let colors = (0..len)
            .map(|_| palette[rng.random_range(0..palette.len())])
            .collect();
        Self(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.0.contains(&color)
    }
}

impl fmt::Display for SecretCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|c| c.name()).collect();
        f.write_str(&names.join(" "))
    }
}

/// One attempt at the code, as submitted by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess(Vec<Color>);

impl Guess {
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Color>> for Guess {
    fn from(colors: Vec<Color>) -> Self {
        Self(colors)
    }
}

impl<const N: usize> From<[Color; N]> for Guess {
    fn from(colors: [Color; N]) -> Self {
        Self(colors.to_vec())
    }
}

/// Outcome for a single position of a guess.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Right colour in the right position.
    Correct,
    /// Colour occurs somewhere in the code, but not here.
    Present,
    Absent,
}

impl Feedback {
    /// Points deducted for this position.
    pub fn penalty(self) -> i32 {
        match self {
            Feedback::Correct => 0,
            Feedback::Present => 1,
            Feedback::Absent => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_code_draws_only_from_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        let palette = [Color::Green, Color::Blue];
        for _ in 0..50 {
            let code = SecretCode::random(&mut rng, &palette, 4);
            assert_eq!(code.len(), 4);
            assert!(code.colors().iter().all(|c| palette.contains(c)));
        }
    }

    #[test]
    fn single_color_palette_repeats_that_color() {
        let mut rng = StdRng::seed_from_u64(1);
        let code = SecretCode::random(&mut rng, &[Color::Red], 4);
        assert_eq!(code.colors(), &[Color::Red; 4]);
    }

    #[test]
    fn same_seed_gives_same_code() {
        let a = SecretCode::random(&mut StdRng::seed_from_u64(42), &Color::ALL, 4);
        let b = SecretCode::random(&mut StdRng::seed_from_u64(42), &Color::ALL, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn displays_names_space_separated() {
        let code = SecretCode::new(vec![Color::Red, Color::Blue, Color::Green, Color::White]);
        assert_eq!(code.to_string(), "red blue green white");
    }
}
