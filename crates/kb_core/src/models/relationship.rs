use super::PlayerId;
use serde::{Deserialize, Serialize};

pub const REL_MIN: i32 = 0;
pub const REL_MAX: i32 = 100;

/// Per-player bond values with key teammates and the coach.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relationship {
    pub player_id: PlayerId,
    #[serde(default)]
    pub captain_id: Option<PlayerId>,
    #[serde(default = "default_bond")]
    pub captain_rel: i32,
    #[serde(default)]
    pub battery_partner_id: Option<PlayerId>,
    #[serde(default = "default_bond")]
    pub battery_rel: i32,
    #[serde(default)]
    pub rival_id: Option<PlayerId>,
    #[serde(default = "default_rivalry")]
    pub rivalry_score: i32,
    #[serde(default = "default_bond")]
    pub coach_trust: i32,
    #[serde(default = "default_bond")]
    pub friendship: i32,
}

fn default_bond() -> i32 {
    50
}

fn default_rivalry() -> i32 {
    45
}

impl Relationship {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            captain_id: None,
            captain_rel: default_bond(),
            battery_partner_id: None,
            battery_rel: default_bond(),
            rival_id: None,
            rivalry_score: default_rivalry(),
            coach_trust: default_bond(),
            friendship: default_bond(),
        }
    }
}

pub(crate) fn clamp_bond(value: i32) -> i32 {
    value.clamp(REL_MIN, REL_MAX)
}
