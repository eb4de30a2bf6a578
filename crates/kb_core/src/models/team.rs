use super::Player;
use serde::{Deserialize, Serialize};

/// Stable team identifier assigned by the persistence layer.
pub type TeamId = u32;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Persists across tournaments; only ever incremented by the core.
    #[serde(default)]
    pub prestige: u32,
    #[serde(default)]
    pub era: Era,
    #[serde(default)]
    pub prefecture: Option<String>,
    #[serde(default)]
    pub philosophy: Option<String>,
    /// Club budget in yen.
    #[serde(default)]
    pub budget: i64,
    #[serde(default)]
    pub players: Vec<Player>,
}

/// Narrative state of a program.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Era {
    Dynasty,
    Ascending,
    Stable,
    #[default]
    Rebuilding,
    Retooling,
    DarkHorse,
    SleepingLion,
}

impl Team {
    pub fn pitchers(&self) -> impl DoubleEndedIterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_pitcher())
    }

    pub fn position_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_pitcher())
    }

    /// Roster ordered by jersey number, unnumbered players last.
    pub fn roster_by_jersey(&self) -> Vec<&Player> {
        let mut roster: Vec<&Player> = self.players.iter().collect();
        roster.sort_by_key(|p| (p.jersey_number.is_none(), p.jersey_number));
        roster
    }

    /// Brass band / cheering section tier (0-3).
    ///
    /// Anything billed as Koshien fills the stands regardless of the school.
    pub fn support_tier(&self, tournament_name: Option<&str>) -> u8 {
        if tournament_name.is_some_and(|name| name.to_lowercase().contains("koshien")) {
            return 3;
        }
        let mut tier: u8 = match self.prestige {
            p if p >= 75 => 3,
            p if p >= 45 => 2,
            p if p >= 20 => 1,
            _ => 0,
        };
        match self.era {
            Era::DarkHorse => tier = (tier + 1).min(3),
            Era::SleepingLion => tier = tier.saturating_sub(1).max(1),
            _ => {}
        }
        tier
    }

    /// Average (fatigue, stamina) over the roster, `None` for an empty roster.
    pub fn fatigue_snapshot(&self) -> Option<(f32, f32)> {
        if self.players.is_empty() {
            return None;
        }
        let count = self.players.len() as f32;
        let fatigue: i32 = self.players.iter().map(|p| p.fatigue.max(0)).sum();
        let stamina: i32 = self.players.iter().map(|p| p.attributes.stamina.max(0)).sum();
        Some((fatigue as f32 / count, stamina as f32 / count))
    }
}
