//! # Scouting Fog of War
//!
//! Opponent intel is disclosed in four tiers (blackout, basic, masked, full)
//! depending on how much scouting the user has bought. An intense rivalry
//! costs one tier.
//!
//! - `grade` - letter grades, grade ranges and name masking
//! - `ratings` - composite team ratings and matchup notes
//! - `report` - the tiered report builder
//! - `actions` - spending budget to raise knowledge

pub mod actions;
pub mod grade;
pub mod ratings;
pub mod report;

pub use actions::{perform_scout_action, scout_cost, ScoutStatus, ScoutingActionResult};
pub use grade::{grade_range, mask_name, Grade};
pub use ratings::{RatingDimension, TeamRatings, Tendencies};
pub use report::{
    build_ledger_report, build_report, build_scouting_report, AttributeRange, KnowledgeLevel,
    MaskedPlayer, RatingEstimate, RatingRange, ScoutedPlayer, ScoutingReport, ScoutingView,
    TeamHeader,
};
