//! Game configuration.
//!
//! Defaults, then the JSON file named by `BEING_LUCKY_CONFIG`, then the
//! individual `BEING_LUCKY_*` variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::BotLevel;
use crate::rules::{Rules, DICE_PER_TURN, FINAL_ROUND_POINTS, MAX_PLAYERS, MINIMUM_STARTING_SCORE};

pub const CONFIG_VAR: &str = "BEING_LUCKY_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid {var}: {value:?}")]
    Env { var: &'static str, value: String },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub minimum_starting_score: u32,
    pub final_round_points: u32,
    pub dice_per_turn: usize,
    /// Fixed dice seed; entropy when absent.
    pub seed: Option<u64>,
    /// Pause around bust messages, in milliseconds.
    pub pacing_ms: u64,
    pub clear_screen: bool,
    /// Number of trailing seats played by bots.
    pub bot_seats: usize,
    pub bot_level: BotLevel,
    /// NDJSON event log destination.
    pub event_log: Option<PathBuf>,
    /// File of pre-written rolls to play instead of random dice.
    pub dice_script: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            minimum_starting_score: MINIMUM_STARTING_SCORE,
            final_round_points: FINAL_ROUND_POINTS,
            dice_per_turn: DICE_PER_TURN,
            seed: None,
            pacing_ms: 2000,
            clear_screen: true,
            bot_seats: 0,
            bot_level: BotLevel::Amateur,
            event_log: None,
            dice_script: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|k| std::env::var(k).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = match var(CONFIG_VAR) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(v) = var("BEING_LUCKY_SEED") {
            cfg.seed = Some(parse_var("BEING_LUCKY_SEED", v)?);
        }
        if let Some(v) = var("BEING_LUCKY_PACING_MS") {
            cfg.pacing_ms = parse_var("BEING_LUCKY_PACING_MS", v)?;
        }
        if let Some(v) = var("BEING_LUCKY_BOTS") {
            cfg.bot_seats = parse_var("BEING_LUCKY_BOTS", v)?;
        }
        if let Some(v) = var("BEING_LUCKY_EVENT_LOG") {
            cfg.event_log = Some(PathBuf::from(v));
        }
        if let Some(v) = var("BEING_LUCKY_DICE_SCRIPT") {
            cfg.dice_script = Some(PathBuf::from(v));
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules().check().map_err(ConfigError::Invalid)?;
        if self.bot_seats > MAX_PLAYERS {
            return Err(ConfigError::Invalid(format!("bot_seats must be at most {}", MAX_PLAYERS)));
        }
        Ok(())
    }

    pub fn rules(&self) -> Rules {
        Rules {
            minimum_starting_score: self.minimum_starting_score,
            final_round_points: self.final_round_points,
            dice_per_turn: self.dice_per_turn,
        }
    }

    pub fn pacing(&self) -> Duration { Duration::from_millis(self.pacing_ms) }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env { var, value })
}
