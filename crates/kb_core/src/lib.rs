//! # kb_core - High School Baseball Gameplay Resolution
//!
//! The rules engine behind a turn-based high school baseball management
//! game: tournament brackets, the clutch pitch timing minigame, and scouting
//! fog of war over opponent rosters.
//!
//! ## Features
//! - Single-elimination brackets (summer open field, spring invitational)
//! - Pitch timing minigame as a pure, deterministic function of reaction time
//! - Tiered scouting reports with a rivalry visibility penalty
//! - Seedable randomness everywhere (same seed = same tournament)
//! - JSON API for embedding front-ends
//!
//! League data is never owned here: callers pass a store implementing
//! [`store::TeamRepository`] / [`store::ScoutingLedger`] into each call.

pub mod api;
pub mod config;
pub mod effects;
pub mod error;
pub mod minigame;
pub mod models;
pub mod scouting;
pub mod store;
pub mod tournament;

// Re-export main API functions
pub use api::{apply_effects_json, resolve_pitch_json, run_tournament_json, scouting_report_json};
pub use config::GameConfig;
pub use error::{ConfigError, EffectError, ResolveError, Result, StoreError, TournamentError};

// Re-export gameplay entry points
pub use minigame::{resolve_pitch, PitchMinigameContext, PitchMinigameResult, TimingSource};
pub use scouting::{build_report, build_scouting_report, KnowledgeLevel, ScoutingReport};
pub use tournament::{
    BracketOrchestrator, MatchResolver, QuickSimResolver, TournamentObserver, TournamentOutcome,
    UserResult,
};

// Re-export data model
pub use models::{Era, Player, PlayerAttributes, Position, Relationship, Team, TeamId};
pub use store::{InMemoryLeague, ScoutingLedger, TeamRepository};
