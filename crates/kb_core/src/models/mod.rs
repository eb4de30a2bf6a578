pub mod player;
pub mod relationship;
pub mod scouting_record;
pub mod team;

pub use player::{AttributeKey, Player, PlayerAttributes, PlayerId, Position};
pub use relationship::Relationship;
pub use scouting_record::{ScoutingRecord, MAX_KNOWLEDGE_LEVEL};
pub use team::{Era, Team, TeamId};
