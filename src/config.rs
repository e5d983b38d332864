use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::game::Rules;

/// Settings for a terminal session: the game rules plus everything the
/// front end needs. Missing keys in a config file keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rules: Rules,
    pub player_name: String,
    /// Wall-clock length of one timer tick.
    pub tick_ms: u64,
    pub seed: Option<u64>,
    /// Clear the pegs after every scored turn.
    pub reset_selection_each_turn: bool,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            player_name: "Player".into(),
            tick_ms: 1000,
            seed: None,
            reset_selection_each_turn: true,
            log_file: PathBuf::from("mastermind.log"),
            log_level: "info".into(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("malformed config")
    }

    /// Reads a JSON config, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("in {}", path.display()))
    }
}
