use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::board::{Board, HistoryEntry};
use crate::core::renderer;
use crate::game::{EngineError, GameState, GuessEngine, Outcome, SecretCode};

/// What the loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// A turn finished or a game started, so the wall-clock countdown
    /// starts over.
    TurnEnded,
    Quit,
}

/// One terminal session: the engine plus the board the player composes
/// guesses on.
#[derive(Debug)]
pub struct Session {
    engine: GuessEngine,
    board: Board,
    player_name: String,
    reset_each_turn: bool,
    message: String,
    #[cfg(debug_assertions)]
    show_secret: bool,
}

impl Session {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let rules = config.rules.clone();
        let engine = match config.seed {
            Some(seed) => GuessEngine::seeded(rules, seed),
            None => GuessEngine::from_os_rng(rules),
        }
        .context("invalid rules")?;
        Ok(Self::with_engine(engine, config))
    }

    pub fn with_engine(engine: GuessEngine, config: &AppConfig) -> Self {
        Self {
            board: Board::new(engine.code_length()),
            engine,
            player_name: config.player_name.clone(),
            reset_each_turn: config.reset_selection_each_turn,
            message: format!("Good luck, {}!", config.player_name),
            #[cfg(debug_assertions)]
            show_secret: false,
        }
    }

    pub fn engine(&self) -> &GuessEngine {
        &self.engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The code when the game is over, or while the debug peek is on.
    pub fn visible_secret(&self) -> Option<&SecretCode> {
        self.engine.revealed_code().or_else(|| self.peeked_secret())
    }

    #[cfg(debug_assertions)]
    fn peeked_secret(&self) -> Option<&SecretCode> {
        self.show_secret.then(|| self.engine.debug_secret())
    }

    #[cfg(not(debug_assertions))]
    fn peeked_secret(&self) -> Option<&SecretCode> {
        None
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        if self.engine.outcome().is_terminal() {
            return match key.code {
                KeyCode::Char('n') | KeyCode::Char('N') => self.new_game(),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Control::Quit,
                _ => Control::Continue,
            };
        }

        match key.code {
            KeyCode::Char(d) if d.is_ascii_digit() => {
                let picked = d
                    .to_digit(10)
                    .and_then(|n| (n as usize).checked_sub(1))
                    .and_then(|i| self.engine.palette().get(i).copied());
                if let Some(color) = picked {
                    self.board.place(color);
                }
            }
            KeyCode::Left => self.board.move_left(),
            KeyCode::Right => self.board.move_right(),
            KeyCode::Up => self.board.cycle(self.engine.palette(), true),
            KeyCode::Down => self.board.cycle(self.engine.palette(), false),
            KeyCode::Backspace | KeyCode::Delete => self.board.clear_slot(),
            KeyCode::Enter => return self.submit(),
            KeyCode::Esc => self.give_up(),
            #[cfg(debug_assertions)]
            KeyCode::F(12) => self.show_secret = !self.show_secret,
            _ => {}
        }
        Control::Continue
    }

    /// Sends the composed pegs to the engine. While a slot is still empty
    /// nothing is submitted and no attempt is used up; only a complete guess
    /// counts toward the attempt limit.
    fn submit(&mut self) -> Control {
        let Some(guess) = self.board.guess() else {
            self.message = "Some pegs are still empty.".into();
            return Control::Continue;
        };

        match self.engine.submit_guess(&guess) {
            Ok(result) => {
                self.message = match result.outcome {
                    Outcome::Won => format!(
                        "Code cracked in {} attempts with {} points! [N] to play again.",
                        result.attempts, result.points
                    ),
                    Outcome::InProgress => format!(
                        "{} right, -{} points.",
                        result.correct_count, result.penalty
                    ),
                    _ => self.reveal_message("Out of attempts!"),
                };
                self.board.record(HistoryEntry::Scored(result));
                if self.reset_each_turn && !self.engine.outcome().is_terminal() {
                    self.board.clear_selection();
                }
                Control::TurnEnded
            }
            Err(e) => {
                warn!(error = %e, "guess rejected");
                self.message = e.to_string();
                Control::Continue
            }
        }
    }

    fn give_up(&mut self) {
        if self.engine.end_game().is_ok() {
            self.message = self.reveal_message("Game abandoned.");
        }
    }

    fn new_game(&mut self) -> Control {
        match self.engine.restart() {
            Ok(()) => {
                self.board.reset(self.engine.code_length());
                self.message = format!("New code, {}. Good luck!", self.player_name);
                Control::TurnEnded
            }
            Err(e) => {
                self.message = e.to_string();
                Control::Continue
            }
        }
    }

    fn reveal_message(&self, lead: &str) -> String {
        match self.engine.revealed_code() {
            Some(code) => format!("{lead} The code was {code}. [N] new game, [Q] quit."),
            None => lead.to_string(),
        }
    }

    /// One wall-clock tick of the turn countdown.
    pub fn on_tick(&mut self) {
        match self.engine.tick_timer() {
            Ok(tick) if tick.turn_expired => {
                self.board.record(HistoryEntry::TimedOut {
                    attempt: tick.attempts,
                });
                self.message = match tick.outcome {
                    Outcome::Lost => self.reveal_message("Time's up on your last attempt!"),
                    _ => "Too slow! That attempt is gone.".into(),
                };
            }
            Ok(_) | Err(EngineError::InactiveGame) => {}
            Err(e) => warn!(error = %e, "timer tick failed"),
        }
    }

    async fn run(&mut self, terminal: &mut DefaultTerminal, tick: Duration) -> Result<()> {
        let mut events = EventStream::new();
        let mut countdown = time::interval_at(Instant::now() + tick, tick);
        countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            terminal.draw(|f| renderer::render(f, self))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match self.handle_key(key) {
                            Control::Quit => break,
                            Control::TurnEnded => countdown.reset(),
                            Control::Continue => {}
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("failed to read terminal event"),
                    None => break,
                },

                _ = countdown.tick() => self.on_tick(),
            }
        }
        Ok(())
    }
}

/// Plays until the player quits and returns the state of the last game.
pub async fn run(config: &AppConfig) -> Result<GameState> {
    let mut session = Session::new(config)?;
    info!(player = %config.player_name, tick_ms = config.tick_ms, "session started");

    let mut terminal = ratatui::init();
    let result = session
        .run(&mut terminal, Duration::from_millis(config.tick_ms.max(1)))
        .await;
    ratatui::restore();

    result.map(|()| session.engine.state())
}
