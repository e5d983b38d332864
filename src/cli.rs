use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::core::runner;
use crate::game::{parse_colors, scoring, Guess, InvalidGuess, Outcome, SecretCode};
use crate::logging;

#[derive(Parser)]
#[command(name = "mastermind")]
#[command(about = "🎯 Crack the color code before the clock runs out")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Used when no subcommand is given
    #[command(flatten)]
    pub play: PlayArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play in the terminal (the default; its flags also work without `play`)
    Play(PlayArgs),
    /// Score one guess against a known code, e.g. `score red,blue,green,white red,green,blue,yellow`
    Score {
        /// The secret code, comma separated
        secret: String,
        /// The guess, comma separated
        guess: String,
    },
    /// Print the effective rules as JSON
    Rules {
        /// JSON config file to read
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// JSON config file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Player name shown in the title bar
    #[arg(short, long)]
    pub name: Option<String>,

    /// Seed for a reproducible code
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds per timer tick
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Attempts before the game is lost
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Ticks per turn
    #[arg(long)]
    pub timer: Option<u32>,

    /// Keep the pegs from the previous turn
    #[arg(long)]
    pub no_reset: bool,

    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Ignored when RUST_LOG is set
    #[arg(long)]
    pub log_level: Option<String>,
}

impl PlayArgs {
    /// Defaults, then the config file, then these flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(name) = &self.name {
            config.player_name = name.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(attempts) = self.attempts {
            config.rules.max_attempts = attempts;
        }
        if let Some(timer) = self.timer {
            config.rules.timer_max = timer;
        }
        if self.no_reset {
            config.reset_selection_each_turn = false;
        }
        if let Some(path) = &self.log_file {
            config.log_file = path.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Play(cli.play)) {
        Commands::Play(args) => {
            let config = args.resolve()?;
            logging::init(&config)?;

            let last = runner::run(&config).await?;
            let verdict = match last.outcome {
                Outcome::Won => "won",
                Outcome::Lost => "lost",
                Outcome::Aborted => "gave up",
                Outcome::InProgress => "left mid-game",
            };
            println!(
                "👋 {} {} after {} attempts with {} points.",
                config.player_name, verdict, last.attempts, last.points
            );
        }

        Commands::Score { secret, guess } => {
            print!("{}", score_report(&secret, &guess)?);
        }

        Commands::Rules { config } => {
            let config = AppConfig::load(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config.rules)?);
        }
    }

    Ok(())
}

/// Scores `guess` against `secret` outside of any game and formats the result
/// one position per line.
pub fn score_report(secret: &str, guess: &str) -> Result<String> {
    let secret = SecretCode::new(parse_colors(secret).context("bad secret")?);
    let guess = Guess::new(parse_colors(guess).context("bad guess")?);
    if secret.is_empty() {
        bail!("secret must contain at least one color");
    }
    if guess.len() != secret.len() {
        bail!(InvalidGuess::WrongLength {
            expected: secret.len(),
            found: guess.len(),
        });
    }

    let eval = scoring::evaluate(&secret, &guess);
    let mut out = String::new();
    for (i, (color, verdict)) in guess.colors().iter().zip(&eval.feedback).enumerate() {
        writeln!(out, "{}: {:<7} {:?}", i + 1, color.name(), verdict)?;
    }
    writeln!(
        out,
        "correct: {}/{}  penalty: {}",
        eval.correct_count,
        secret.len(),
        eval.penalty
    )?;
    Ok(out)
}
