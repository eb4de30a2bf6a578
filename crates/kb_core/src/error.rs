use crate::models::TeamId;
use thiserror::Error;

/// Failures surfaced by the bracket orchestrator.
#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("Not enough teams to run a bracket: need at least 2, found {found}")]
    NotEnoughTeams { found: usize },

    #[error("User team not found: {0}")]
    UserTeamNotFound(TeamId),

    #[error("Match resolver failed: {0}")]
    Resolver(#[from] ResolveError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Failures reported by a match resolver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("{0}")]
    Failed(String),

    #[error("Winner {winner} is neither side of {home} vs {away}")]
    UndecidedWinner { home: TeamId, away: TeamId, winner: TeamId },
}

/// Failures from the persistence collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("League parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Validation(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    #[error("Unknown effect key: {0}")]
    UnknownKey(String),
}

pub type Result<T> = std::result::Result<T, TournamentError>;
