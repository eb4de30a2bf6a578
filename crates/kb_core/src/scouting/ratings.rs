//! Composite team ratings and the matchup notes derived from them.

use super::grade::Grade;
use crate::models::{Player, Team};
use serde::{Deserialize, Serialize};

const STRENGTH_LINE: i32 = 70;
const WEAKNESS_LINE: i32 = 55;
const APPROACH_LINE: i32 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingDimension {
    Offense,
    Pitching,
    Defense,
    Speed,
    Coach,
}

impl RatingDimension {
    pub const ALL: [RatingDimension; 5] = [
        RatingDimension::Offense,
        RatingDimension::Pitching,
        RatingDimension::Defense,
        RatingDimension::Speed,
        RatingDimension::Coach,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RatingDimension::Offense => "Offense",
            RatingDimension::Pitching => "Pitching",
            RatingDimension::Defense => "Defense",
            RatingDimension::Speed => "Speed",
            RatingDimension::Coach => "Coaching IQ",
        }
    }
}

/// Aggregated 0-100 scores for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRatings {
    pub offense: i32,
    pub pitching: i32,
    pub defense: i32,
    pub speed: i32,
    pub coach: i32,
}

fn clamp_attr(value: i32) -> f64 {
    f64::from(value.clamp(0, 100))
}

/// Truncated mean, or `baseline` for an empty group.
fn mean_or(values: impl Iterator<Item = f64>, baseline: i32) -> i32 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        baseline
    } else {
        (sum / f64::from(count)) as i32
    }
}

impl TeamRatings {
    /// Attributes are clamped to 0-100 before averaging.
    pub fn compute(team: &Team, baseline: i32) -> Self {
        let hitting =
            |p: &Player| (clamp_attr(p.attributes.contact) + clamp_attr(p.attributes.power)) / 2.0;
        let arm =
            |p: &Player| (clamp_attr(p.attributes.velocity) + clamp_attr(p.attributes.control)) / 2.0;

        Self {
            offense: mean_or(team.position_players().map(hitting), baseline),
            pitching: mean_or(team.pitchers().map(arm), baseline),
            defense: mean_or(
                team.players.iter().map(|p| clamp_attr(p.attributes.fielding)),
                baseline,
            ),
            speed: mean_or(team.players.iter().map(|p| clamp_attr(p.attributes.speed)), baseline),
            coach: team.prestige.min(100) as i32,
        }
    }

    pub fn get(&self, dimension: RatingDimension) -> i32 {
        match dimension {
            RatingDimension::Offense => self.offense,
            RatingDimension::Pitching => self.pitching,
            RatingDimension::Defense => self.defense,
            RatingDimension::Speed => self.speed,
            RatingDimension::Coach => self.coach,
        }
    }

    pub fn grade(&self, dimension: RatingDimension) -> Grade {
        Grade::from_value(self.get(dimension))
    }
}

/// Narrative notes a scout attaches to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tendencies {
    pub strengths: Vec<&'static str>,
    pub weaknesses: Vec<&'static str>,
    pub offense_approach: &'static str,
    pub pitching_approach: &'static str,
}

impl Tendencies {
    pub fn from_ratings(ratings: &TeamRatings) -> Self {
        let mut strengths = Vec::new();
        if ratings.offense >= STRENGTH_LINE {
            strengths.push("Lineup can trade blows with anyone.");
        }
        if ratings.pitching >= STRENGTH_LINE {
            strengths.push("Rotation features legitimate front-line stuff.");
        }

        let mut weaknesses = Vec::new();
        if ratings.defense < WEAKNESS_LINE {
            weaknesses.push("Glove work is suspect; apply pressure on balls in play.");
        }
        if ratings.speed < WEAKNESS_LINE {
            weaknesses.push("Running game lacks punch; outfield can shade deep.");
        }

        Self {
            strengths,
            weaknesses,
            offense_approach: if ratings.offense >= APPROACH_LINE {
                "Aggressive on first pitch"
            } else {
                "Prefers to work counts"
            },
            pitching_approach: if ratings.pitching >= APPROACH_LINE {
                "Leans on velocity more than finesse"
            } else {
                "Crafty staff built on command"
            },
        }
    }

    /// Hints shown on a partial report: approach lines plus any threshold hits.
    pub fn hints(&self) -> Vec<&'static str> {
        let mut hints = vec![self.offense_approach, self.pitching_approach];
        hints.extend(self.strengths.iter().copied());
        hints.extend(self.weaknesses.iter().copied());
        hints
    }

    /// Strengths, with a fallback line when nothing stands out.
    pub fn strength_notes(&self) -> Vec<&'static str> {
        if self.strengths.is_empty() {
            vec!["Balanced roster; no glaring elite trait."]
        } else {
            self.strengths.clone()
        }
    }

    pub fn weakness_notes(&self) -> Vec<&'static str> {
        if self.weaknesses.is_empty() {
            vec!["Scouting reports show no major weakness."]
        } else {
            self.weaknesses.clone()
        }
    }
}
