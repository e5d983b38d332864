use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::code::{Feedback, Guess, SecretCode};
use super::color::Color;
use super::error::{EngineError, InvalidGuess};
use super::rules::{Rules, MAX_CODE_LENGTH, MAX_TIMER_MAX};
use super::scoring;
use super::timer::TurnTimer;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
    /// Ended early by the player.
    Aborted,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Snapshot of the live game, cheap to copy out for rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub attempts: u32,
    pub max_attempts: u32,
    /// May drop below zero.
    pub points: i32,
    pub outcome: Outcome,
}

/// Everything a caller needs to show one scored turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuessResult {
    pub guess: Guess,
    pub feedback: Vec<Feedback>,
    pub correct_count: usize,
    /// Points deducted by this turn alone.
    pub penalty: i32,
    pub points: i32,
    pub attempts: u32,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TickResult {
    /// Ticks left in the current turn; 0 on the tick that forfeits it.
    pub remaining: u32,
    /// The turn ran out and was counted as an attempt.
    pub turn_expired: bool,
    pub attempts: u32,
    pub outcome: Outcome,
}

/// Owns the secret code and all mutable state of a single game.
///
/// A game is always live: construction starts the first one and
/// [`new_game`](Self::new_game) discards the previous one entirely.
#[derive(Debug)]
pub struct GuessEngine<R = StdRng> {
    rules: Rules,
    rng: R,
    palette: Vec<Color>,
    secret: SecretCode,
    state: GameState,
    timer: TurnTimer,
}

impl GuessEngine<StdRng> {
    pub fn from_os_rng(rules: Rules) -> Result<Self, EngineError> {
        Self::with_rng(rules, StdRng::from_os_rng())
    }

    pub fn seeded(rules: Rules, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(rules, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GuessEngine<R> {
    /// Builds an engine and starts a game using the palette and code length
    /// from `rules`.
    pub fn with_rng(rules: Rules, rng: R) -> Result<Self, EngineError> {
        if rules.max_attempts == 0 {
            return Err(EngineError::InvalidRules("max_attempts must be at least 1"));
        }
        if rules.timer_max > MAX_TIMER_MAX {
            return Err(EngineError::InvalidRules("timer_max is too large"));
        }
        let mut engine = Self {
            palette: Vec::new(),
            secret: SecretCode::new(Vec::new()),
            state: GameState {
                attempts: 0,
                max_attempts: rules.max_attempts,
                points: rules.starting_points,
                outcome: Outcome::InProgress,
            },
            timer: TurnTimer::new(rules.timer_max),
            rules,
            rng,
        };
        engine.restart()?;
        Ok(engine)
    }

    /// Starts a fresh game with the configured palette and code length.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        let palette = self.rules.palette.clone();
        let code_length = self.rules.code_length;
        self.new_game(&palette, code_length)
    }

    /// Draws a new secret from `palette` and resets attempts, points, outcome
    /// and the turn timer.
    pub fn new_game(&mut self, palette: &[Color], code_length: usize) -> Result<(), EngineError> {
        Self::check_setup(palette, code_length)?;
        let secret = SecretCode::random(&mut self.rng, palette, code_length);
        self.install(palette, secret);
        Ok(())
    }

    /// Like [`new_game`](Self::new_game) but with a chosen secret instead of a
    /// random one. Every colour of `secret` must come from `palette`.
    pub fn new_game_with_code(
        &mut self,
        palette: &[Color],
        secret: SecretCode,
    ) -> Result<(), EngineError> {
        Self::check_setup(palette, secret.len())?;
        if let Some(&stray) = secret.colors().iter().find(|c| !palette.contains(c)) {
            return Err(InvalidGuess::OutsidePalette(stray).into());
        }
        self.install(palette, secret);
        Ok(())
    }

    fn check_setup(palette: &[Color], code_length: usize) -> Result<(), EngineError> {
        if palette.is_empty() {
            return Err(EngineError::EmptyPalette);
        }
        if code_length == 0 {
            return Err(EngineError::InvalidRules("code length must be at least 1"));
        }
        if code_length > MAX_CODE_LENGTH {
            return Err(EngineError::InvalidRules("code length is too large"));
        }
        Ok(())
    }

    fn install(&mut self, palette: &[Color], secret: SecretCode) {
        self.palette = palette.to_vec();
        self.secret = secret;
        self.state = GameState {
            attempts: 0,
            max_attempts: self.rules.max_attempts,
            points: self.rules.starting_points,
            outcome: Outcome::InProgress,
        };
        self.timer.restart();
        debug!(code = %self.secret, "generated color code");
        info!(
            code_length = self.secret.len(),
            palette = self.palette.len(),
            "new game started"
        );
    }

    /// Scores one guess and advances the game by one attempt.
    ///
    /// Rejected guesses (wrong length, colour outside the palette) and guesses
    /// against a finished game leave the state untouched.
    pub fn submit_guess(&mut self, guess: &Guess) -> Result<GuessResult, EngineError> {
        if self.state.outcome.is_terminal() {
            return Err(EngineError::InactiveGame);
        }
        self.validate(guess)?;

        self.state.attempts += 1;
        let eval = scoring::evaluate(&self.secret, guess);
        self.state.points -= eval.penalty;

        if eval.correct_count == self.secret.len() {
            self.finish(Outcome::Won);
        } else if self.state.attempts >= self.state.max_attempts {
            self.finish(Outcome::Lost);
        } else {
            self.timer.restart();
        }

        debug!(
            attempt = self.state.attempts,
            correct = eval.correct_count,
            penalty = eval.penalty,
            points = self.state.points,
            "guess scored"
        );

        Ok(GuessResult {
            guess: guess.clone(),
            feedback: eval.feedback,
            correct_count: eval.correct_count,
            penalty: eval.penalty,
            points: self.state.points,
            attempts: self.state.attempts,
            outcome: self.state.outcome,
        })
    }

    fn validate(&self, guess: &Guess) -> Result<(), InvalidGuess> {
        if guess.len() != self.secret.len() {
            return Err(InvalidGuess::WrongLength {
                expected: self.secret.len(),
                found: guess.len(),
            });
        }
        match guess.colors().iter().find(|c| !self.palette.contains(c)) {
            Some(&stray) => Err(InvalidGuess::OutsidePalette(stray)),
            None => Ok(()),
        }
    }

    /// Advances the turn timer by one tick. When the turn runs out it costs an
    /// attempt (but no points) and the countdown starts over, unless that was
    /// the last attempt.
    pub fn tick_timer(&mut self) -> Result<TickResult, EngineError> {
        if self.state.outcome.is_terminal() {
            return Err(EngineError::InactiveGame);
        }

        let turn_expired = self.timer.advance();
        let remaining = self.timer.remaining();

        if turn_expired {
            self.state.attempts += 1;
            debug!(attempt = self.state.attempts, "turn timed out");
            if self.state.attempts >= self.state.max_attempts {
                self.finish(Outcome::Lost);
            } else {
                self.timer.restart();
            }
        }

        Ok(TickResult {
            remaining,
            turn_expired,
            attempts: self.state.attempts,
            outcome: self.state.outcome,
        })
    }

    /// Abandons the running game. Points and attempts stay as they are.
    pub fn end_game(&mut self) -> Result<(), EngineError> {
        if self.state.outcome.is_terminal() {
            return Err(EngineError::InactiveGame);
        }
        self.finish(Outcome::Aborted);
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state.outcome = outcome;
        self.timer.stop();
        info!(
            ?outcome,
            attempts = self.state.attempts,
            points = self.state.points,
            "game over"
        );
    }
}

impl<R> GuessEngine<R> {
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.state.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.state.max_attempts
    }

    pub fn points(&self) -> i32 {
        self.state.points
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn code_length(&self) -> usize {
        self.secret.len()
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Ticks left in the current turn, or `None` once the game is over.
    pub fn remaining_ticks(&self) -> Option<u32> {
        self.timer.is_running().then(|| self.timer.remaining())
    }

    /// The secret, but only after the game has ended.
    pub fn revealed_code(&self) -> Option<&SecretCode> {
        self.state.outcome.is_terminal().then_some(&self.secret)
    }

    #[cfg(debug_assertions)]
    pub fn debug_secret(&self) -> &SecretCode {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::color::Color::*;

    fn engine_with(secret: [Color; 4]) -> GuessEngine {
        let mut engine = GuessEngine::seeded(Rules::default(), 0).unwrap();
        engine
            .new_game_with_code(&Color::ALL, SecretCode::new(secret.to_vec()))
            .unwrap();
        engine
    }

    #[test]
    fn starts_fresh_game() {
        let engine = GuessEngine::seeded(Rules::default(), 3).unwrap();
        assert_eq!(engine.attempts(), 0);
        assert_eq!(engine.points(), 100);
        assert_eq!(engine.outcome(), Outcome::InProgress);
        assert_eq!(engine.code_length(), 4);
        assert_eq!(engine.remaining_ticks(), Some(10));
        assert!(engine.revealed_code().is_none());
    }

    #[test]
    fn scoring_deducts_points_and_counts_attempt() {
        let mut engine = engine_with([Red, Blue, Green, White]);
        let result = engine.submit_guess(&Guess::from([Red, Green, Blue, Yellow])).unwrap();
        assert_eq!(
            result.feedback,
            vec![Feedback::Correct, Feedback::Present, Feedback::Present, Feedback::Absent]
        );
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.penalty, 4);
        assert_eq!(result.points, 96);
        assert_eq!(result.attempts, 1);
        assert_eq!(result.outcome, Outcome::InProgress);
    }

    #[test]
    fn exact_guess_wins_and_reveals() {
        let mut engine = engine_with([Yellow, Yellow, Blue, Orange]);
        let result = engine.submit_guess(&Guess::from([Yellow, Yellow, Blue, Orange])).unwrap();
        assert_eq!(result.outcome, Outcome::Won);
        assert_eq!(result.correct_count, 4);
        assert_eq!(
            engine.revealed_code().map(|c| c.colors().to_vec()),
            Some(vec![Yellow, Yellow, Blue, Orange])
        );
        assert_eq!(engine.remaining_ticks(), None);
    }

    #[test]
    fn rejected_guess_leaves_state_alone() {
        let mut engine = engine_with([Red, Red, Red, Red]);
        let before = engine.state();

        let err = engine.submit_guess(&Guess::from([Red, Red, Red])).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidGuess(InvalidGuess::WrongLength { expected: 4, found: 3 })
        );
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn colors_outside_palette_are_rejected() {
        let mut engine = GuessEngine::seeded(Rules::default(), 9).unwrap();
        engine.new_game(&[Red, Blue], 4).unwrap();
        let err = engine.submit_guess(&Guess::from([Red, Blue, Green, Red])).unwrap_err();
        assert_eq!(err, EngineError::InvalidGuess(InvalidGuess::OutsidePalette(Green)));
        assert_eq!(engine.attempts(), 0);
    }

    #[test]
    fn finished_game_rejects_everything_but_new_game() {
        let mut engine = engine_with([Red, Blue, Green, White]);
        engine.submit_guess(&Guess::from([Red, Blue, Green, White])).unwrap();

        let guess = Guess::from([Red, Red, Red, Red]);
        assert_eq!(engine.submit_guess(&guess), Err(EngineError::InactiveGame));
        assert_eq!(engine.tick_timer(), Err(EngineError::InactiveGame));
        assert_eq!(engine.end_game(), Err(EngineError::InactiveGame));
        assert_eq!(engine.attempts(), 1);

        engine.restart().unwrap();
        assert_eq!(engine.outcome(), Outcome::InProgress);
        assert_eq!(engine.attempts(), 0);
        assert_eq!(engine.points(), 100);
    }

    #[test]
    fn points_can_go_negative() {
        let mut engine = engine_with([Red, Red, Red, Red]);
        let miss = Guess::from([Blue, Blue, Blue, Blue]);
        for _ in 0..10 {
            engine.submit_guess(&miss).unwrap();
        }
        assert_eq!(engine.points(), 100 - 10 * 8);
        assert_eq!(engine.outcome(), Outcome::Lost);

        let rules = Rules {
            starting_points: 5,
            ..Rules::default()
        };
        let mut engine = GuessEngine::seeded(rules, 1).unwrap();
        engine
            .new_game_with_code(&Color::ALL, SecretCode::new(vec![Red; 4]))
            .unwrap();
        engine.submit_guess(&miss).unwrap();
        assert_eq!(engine.points(), -3);
    }

    #[test]
    fn timer_expiry_costs_attempt_not_points() {
        let mut engine = engine_with([Red, Blue, Green, White]);
        for remaining in (1..10).rev() {
            let tick = engine.tick_timer().unwrap();
            assert_eq!(tick.remaining, remaining);
            assert!(!tick.turn_expired);
        }
        let tick = engine.tick_timer().unwrap();
        assert!(tick.turn_expired);
        assert_eq!(tick.remaining, 0);
        assert_eq!(tick.attempts, 1);
        assert_eq!(engine.points(), 100);
        assert_eq!(engine.remaining_ticks(), Some(10));
    }

    #[test]
    fn guess_restarts_the_countdown() {
        let mut engine = engine_with([Red, Blue, Green, White]);
        for _ in 0..5 {
            engine.tick_timer().unwrap();
        }
        assert_eq!(engine.remaining_ticks(), Some(5));
        engine.submit_guess(&Guess::from([White, White, White, White])).unwrap();
        assert_eq!(engine.remaining_ticks(), Some(10));
    }

    #[test]
    fn end_game_aborts_without_touching_score() {
        let mut engine = engine_with([Red, Blue, Green, White]);
        engine.submit_guess(&Guess::from([Orange, Orange, Orange, Orange])).unwrap();
        engine.end_game().unwrap();
        assert_eq!(engine.outcome(), Outcome::Aborted);
        assert_eq!(engine.points(), 92);
        assert_eq!(engine.attempts(), 1);
        assert!(engine.revealed_code().is_some());
        assert_eq!(engine.remaining_ticks(), None);
    }

    #[test]
    fn setup_errors() {
        let mut engine = GuessEngine::seeded(Rules::default(), 0).unwrap();
        assert_eq!(engine.new_game(&[], 4), Err(EngineError::EmptyPalette));
        assert!(matches!(
            engine.new_game(&Color::ALL, 0),
            Err(EngineError::InvalidRules(_))
        ));
        assert_eq!(
            engine.new_game_with_code(&[Red], SecretCode::new(vec![Red, Blue, Red, Red])),
            Err(EngineError::InvalidGuess(InvalidGuess::OutsidePalette(Blue)))
        );

        let rules = Rules {
            max_attempts: 0,
            ..Rules::default()
        };
        assert!(GuessEngine::seeded(rules, 0).is_err());
    }

    #[test]
    fn oversized_rules_are_rejected() {
        let rules = Rules {
            timer_max: u32::MAX,
            ..Rules::default()
        };
        assert_eq!(
            GuessEngine::seeded(rules, 0).unwrap_err(),
            EngineError::InvalidRules("timer_max is too large")
        );

        let rules = Rules {
            code_length: usize::MAX,
            ..Rules::default()
        };
        assert_eq!(
            GuessEngine::seeded(rules, 0).unwrap_err(),
            EngineError::InvalidRules("code length is too large")
        );

        let mut engine = GuessEngine::seeded(Rules::default(), 0).unwrap();
        assert!(engine.new_game(&Color::ALL, MAX_CODE_LENGTH + 1).is_err());
        assert_eq!(engine.code_length(), 4);
        engine.new_game(&Color::ALL, MAX_CODE_LENGTH).unwrap();
        assert_eq!(engine.code_length(), MAX_CODE_LENGTH);
    }

    #[test]
    fn largest_allowed_timer_counts_down() {
        let rules = Rules {
            timer_max: MAX_TIMER_MAX,
            ..Rules::default()
        };
        let mut engine = GuessEngine::seeded(rules, 0).unwrap();
        assert_eq!(engine.remaining_ticks(), Some(MAX_TIMER_MAX));
        let tick = engine.tick_timer().unwrap();
        assert_eq!(tick.remaining, MAX_TIMER_MAX - 1);
        assert!(!tick.turn_expired);
    }

    #[test]
    fn new_game_supports_other_code_lengths() {
        let mut engine = GuessEngine::seeded(Rules::default(), 11).unwrap();
        engine.new_game(&[Green], 6).unwrap();
        assert_eq!(engine.code_length(), 6);
        let result = engine.submit_guess(&Guess::from([Green; 6])).unwrap();
        assert_eq!(result.outcome, Outcome::Won);
    }
}
