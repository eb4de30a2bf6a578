//! # Game Configuration
//!
//! Tunables for the tournament, scouting and minigame layers. Every field
//! has a serde default so a partial JSON file only overrides what it names.
//!
//! ## Usage
//! ```rust
//! use kb_core::config::GameConfig;
//!
//! let config = GameConfig::default();
//! assert_eq!(config.tournament.champion_prestige_bonus, 15);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

/// Environment variable pointing at a JSON config file.
pub const CONFIG_PATH_ENV: &str = "KB_CONFIG_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GameConfig {
    #[serde(default)]
    pub tournament: TournamentConfig,
    #[serde(default)]
    pub scouting: ScoutingConfig,
    #[serde(default)]
    pub minigame: MinigameConfig,
}

// ========== Tournament ==========

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TournamentConfig {
    /// Prestige awarded to the user's school for winning a tournament
    #[serde(default = "default_champion_prestige_bonus")]
    pub champion_prestige_bonus: u32,
    /// NPC schools sampled when no participant list is supplied
    #[serde(default = "default_fallback_field_size")]
    pub fallback_field_size: usize,
    /// Invitational cut line (top N by prestige)
    #[serde(default = "default_invitational_field_size")]
    pub invitational_field_size: usize,
    /// Clutch pitch difficulty in round 1
    #[serde(default = "default_leverage_base_difficulty")]
    pub leverage_base_difficulty: f64,
    /// Extra clutch pitch difficulty per later round
    #[serde(default = "default_leverage_difficulty_step")]
    pub leverage_difficulty_step: f64,
}

fn default_champion_prestige_bonus() -> u32 {
    15
}
fn default_fallback_field_size() -> usize {
    15
}
fn default_invitational_field_size() -> usize {
    32
}
fn default_leverage_base_difficulty() -> f64 {
    0.35
}
fn default_leverage_difficulty_step() -> f64 {
    0.08
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            champion_prestige_bonus: default_champion_prestige_bonus(),
            fallback_field_size: default_fallback_field_size(),
            invitational_field_size: default_invitational_field_size(),
            leverage_base_difficulty: default_leverage_base_difficulty(),
            leverage_difficulty_step: default_leverage_difficulty_step(),
        }
    }
}

// ========== Scouting ==========

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoutingConfig {
    /// Rivalry score at which scouting intel degrades by one level
    #[serde(default = "default_rivalry_penalty_threshold")]
    pub rivalry_penalty_threshold: i32,
    /// Roster rows shown with masked names (level 2)
    #[serde(default = "default_masked_roster_limit")]
    pub masked_roster_limit: usize,
    /// Roster rows shown with full intel (level 3)
    #[serde(default = "default_full_roster_limit")]
    pub full_roster_limit: usize,
    /// Composite rating used when a player group is empty
    #[serde(default = "default_baseline_rating")]
    pub baseline_rating: i32,
    /// Cost of the first scouting purchase; later levels scale linearly
    #[serde(default = "default_base_scout_cost")]
    pub base_scout_cost: i64,
}

fn default_rivalry_penalty_threshold() -> i32 {
    80
}
fn default_masked_roster_limit() -> usize {
    9
}
fn default_full_roster_limit() -> usize {
    18
}
fn default_baseline_rating() -> i32 {
    40
}
fn default_base_scout_cost() -> i64 {
    50_000
}

impl Default for ScoutingConfig {
    fn default() -> Self {
        Self {
            rivalry_penalty_threshold: default_rivalry_penalty_threshold(),
            masked_roster_limit: default_masked_roster_limit(),
            full_roster_limit: default_full_roster_limit(),
            baseline_rating: default_baseline_rating(),
            base_scout_cost: default_base_scout_cost(),
        }
    }
}

// ========== Minigame ==========

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinigameConfig {
    /// Upper bound (seconds) of the random reaction time used by auto-resolve
    #[serde(default = "default_auto_elapsed_max")]
    pub auto_elapsed_max: f64,
}

fn default_auto_elapsed_max() -> f64 {
    1.2
}

impl Default for MinigameConfig {
    fn default() -> Self {
        Self { auto_elapsed_max: default_auto_elapsed_max() }
    }
}

impl GameConfig {
    /// Load GameConfig from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse GameConfig from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `KB_CONFIG_PATH` when set, defaults otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };
        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }
        log::info!("Loading game config from {CONFIG_PATH_ENV}='{path}'");
        Self::load(path)
    }

    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tournament;
        if t.invitational_field_size < 2 {
            return Err(ConfigError::Validation(format!(
                "invitational_field_size must be >= 2, got {}",
                t.invitational_field_size
            )));
        }
        if !(0.0..=1.0).contains(&t.leverage_base_difficulty) {
            return Err(ConfigError::Validation(format!(
                "leverage_base_difficulty must be 0.0-1.0, got {}",
                t.leverage_base_difficulty
            )));
        }
        if !(0.0..=0.5).contains(&t.leverage_difficulty_step) {
            return Err(ConfigError::Validation(format!(
                "leverage_difficulty_step must be 0.0-0.5, got {}",
                t.leverage_difficulty_step
            )));
        }

        let s = &self.scouting;
        if s.masked_roster_limit > 12 {
            return Err(ConfigError::Validation(format!(
                "masked_roster_limit must be <= 12, got {}",
                s.masked_roster_limit
            )));
        }
        if !(0..=100).contains(&s.baseline_rating) {
            return Err(ConfigError::Validation(format!(
                "baseline_rating must be 0-100, got {}",
                s.baseline_rating
            )));
        }
        if s.base_scout_cost < 0 {
            return Err(ConfigError::Validation(format!(
                "base_scout_cost must be >= 0, got {}",
                s.base_scout_cost
            )));
        }

        let m = &self.minigame;
        if !(m.auto_elapsed_max > 0.0 && m.auto_elapsed_max.is_finite()) {
            return Err(ConfigError::Validation(format!(
                "auto_elapsed_max must be a positive number of seconds, got {}",
                m.auto_elapsed_max
            )));
        }
        Ok(())
    }
}
