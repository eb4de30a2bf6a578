//! # Tournament Bracket
//!
//! Single-elimination brackets for the summer tournament and the spring
//! invitational.
//!
//! - `bracket` - trimming, adjacent pairing and round bookkeeping
//! - `resolver` - the match resolver contract and the quick simulator
//! - `orchestrator` - the round loop, clutch pitches and the champion bonus

pub mod bracket;
pub mod orchestrator;
pub mod resolver;

pub use bracket::{pair_adjacent, rounds_for, trim_entrants, BracketState};
pub use orchestrator::{
    BracketOrchestrator, SilentObserver, TeamRef, TournamentObserver, TournamentOutcome,
    UserResult, SPRING_TITLE, SUMMER_TITLE,
};
pub use resolver::{team_strength, MatchFixture, MatchOutcome, MatchResolver, QuickSimResolver};
