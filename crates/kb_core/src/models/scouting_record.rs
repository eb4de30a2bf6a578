use super::TeamId;
use serde::{Deserialize, Serialize};

/// Highest scouting knowledge level a record can reach.
pub const MAX_KNOWLEDGE_LEVEL: u8 = 3;

/// What the user's school knows about one opponent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoutingRecord {
    pub team_id: TeamId,
    #[serde(default)]
    pub knowledge_level: u8,
    #[serde(default)]
    pub rivalry_score: i32,
}

impl ScoutingRecord {
    /// Fresh record: nothing known, no rivalry.
    pub fn unknown(team_id: TeamId) -> Self {
        Self { team_id, knowledge_level: 0, rivalry_score: 0 }
    }
}
