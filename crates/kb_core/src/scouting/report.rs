//! Tiered scouting reports.
//!
//! A report is pure data. Rendering it (bars, colours, boxes) is the
//! front-end's business.

use super::grade::{grade_range, mask_name};
use super::ratings::{RatingDimension, TeamRatings, Tendencies};
use crate::config::ScoutingConfig;
use crate::error::StoreError;
use crate::models::{AttributeKey, PlayerAttributes, Team, TeamId, MAX_KNOWLEDGE_LEVEL};
use crate::store::{ScoutingLedger, TeamRepository};
use serde::Serialize;

/// How much of an opponent is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KnowledgeLevel {
    Blackout = 0,
    Basic = 1,
    Masked = 2,
    Full = 3,
}

impl KnowledgeLevel {
    /// Any integer maps into 0..=3.
    pub fn from_raw(raw: i32) -> Self {
        match raw.clamp(0, i32::from(MAX_KNOWLEDGE_LEVEL)) {
            0 => KnowledgeLevel::Blackout,
            1 => KnowledgeLevel::Basic,
            2 => KnowledgeLevel::Masked,
            _ => KnowledgeLevel::Full,
        }
    }

    /// Clamp, then drop one level for an intense rivalry.
    pub fn effective(raw: i32, rivalry_score: i32, penalty_threshold: i32) -> Self {
        let level = Self::from_raw(raw);
        if rivalry_score >= penalty_threshold {
            level.downgraded()
        } else {
            level
        }
    }

    pub fn downgraded(self) -> Self {
        match self {
            KnowledgeLevel::Blackout | KnowledgeLevel::Basic => KnowledgeLevel::Blackout,
            KnowledgeLevel::Masked => KnowledgeLevel::Basic,
            KnowledgeLevel::Full => KnowledgeLevel::Masked,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            KnowledgeLevel::Blackout => "BLACKOUT",
            KnowledgeLevel::Basic => "BASIC",
            KnowledgeLevel::Masked => "MASKED",
            KnowledgeLevel::Full => "FULL",
        }
    }
}

// ============================================================================
// View payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingEstimate {
    pub dimension: RatingDimension,
    /// e.g. `~B?`
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingRange {
    pub dimension: RatingDimension,
    /// e.g. `C–B`
    pub range: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeRange {
    pub attribute: AttributeKey,
    pub range: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskedPlayer {
    pub jersey_number: Option<u8>,
    pub position: &'static str,
    pub masked_name: String,
    pub attributes: Vec<AttributeRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutedPlayer {
    pub jersey_number: Option<u8>,
    pub position: &'static str,
    pub name: String,
    pub attributes: PlayerAttributes,
}

/// What the scout can show at each knowledge level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "fog", rename_all = "snake_case")]
pub enum ScoutingView {
    Blackout,
    Basic {
        ratings: Vec<RatingEstimate>,
    },
    Partial {
        ratings: Vec<RatingRange>,
        roster: Vec<MaskedPlayer>,
        tendencies: Vec<&'static str>,
    },
    Full {
        ratings: TeamRatings,
        roster: Vec<ScoutedPlayer>,
        strengths: Vec<&'static str>,
        weaknesses: Vec<&'static str>,
    },
}

impl ScoutingView {
    pub fn exposes_roster(&self) -> bool {
        match self {
            ScoutingView::Partial { roster, .. } => !roster.is_empty(),
            ScoutingView::Full { roster, .. } => !roster.is_empty(),
            ScoutingView::Blackout | ScoutingView::Basic { .. } => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamHeader {
    pub team_id: TeamId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub philosophy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prestige: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutingReport {
    pub header: TeamHeader,
    /// Level after clamping, before any rivalry penalty.
    pub purchased_level: KnowledgeLevel,
    pub level: KnowledgeLevel,
    pub fog_label: &'static str,
    pub view: ScoutingView,
}

impl ScoutingReport {
    pub fn rivalry_penalty_applied(&self) -> bool {
        self.level < self.purchased_level
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Build the report for `team` at the given (raw) knowledge level.
pub fn build_report(
    team: &Team,
    knowledge_level: i32,
    rivalry_score: i32,
    config: &ScoutingConfig,
) -> ScoutingReport {
    let purchased_level = KnowledgeLevel::from_raw(knowledge_level);
    let level =
        KnowledgeLevel::effective(knowledge_level, rivalry_score, config.rivalry_penalty_threshold);
    if level < purchased_level {
        log::debug!(
            "Rivalry {rivalry_score} with {} degrades scouting {} -> {}",
            team.name,
            purchased_level.label(),
            level.label()
        );
    }

    let header = TeamHeader {
        team_id: team.id,
        name: team.name.clone(),
        prefecture: None,
        philosophy: None,
        prestige: None,
    };
    let header = if level >= KnowledgeLevel::Basic {
        TeamHeader {
            prefecture: team.prefecture.clone(),
            philosophy: team.philosophy.clone(),
            prestige: Some(team.prestige),
            ..header
        }
    } else {
        header
    };

    ScoutingReport {
        header,
        purchased_level,
        level,
        fog_label: level.label(),
        view: build_view(team, level, config),
    }
}

fn build_view(team: &Team, level: KnowledgeLevel, config: &ScoutingConfig) -> ScoutingView {
    let ratings = TeamRatings::compute(team, config.baseline_rating);

    match level {
        KnowledgeLevel::Blackout => ScoutingView::Blackout,
        KnowledgeLevel::Basic => ScoutingView::Basic {
            ratings: RatingDimension::ALL
                .iter()
                .map(|&dimension| RatingEstimate {
                    dimension,
                    grade: ratings.grade(dimension).estimate(),
                })
                .collect(),
        },
        KnowledgeLevel::Masked => ScoutingView::Partial {
            ratings: RatingDimension::ALL
                .iter()
                .map(|&dimension| RatingRange {
                    dimension,
                    range: grade_range(Some(ratings.get(dimension))),
                })
                .collect(),
            roster: masked_roster(team, config.masked_roster_limit.min(12)),
            tendencies: Tendencies::from_ratings(&ratings).hints(),
        },
        KnowledgeLevel::Full => {
            let tendencies = Tendencies::from_ratings(&ratings);
            ScoutingView::Full {
                ratings,
                roster: full_roster(team, config.full_roster_limit),
                strengths: tendencies.strength_notes(),
                weaknesses: tendencies.weakness_notes(),
            }
        }
    }
}

fn masked_roster(team: &Team, limit: usize) -> Vec<MaskedPlayer> {
    team.roster_by_jersey()
        .into_iter()
        .take(limit)
        .map(|p| MaskedPlayer {
            jersey_number: p.jersey_number,
            position: p.position.code(),
            masked_name: mask_name(Some(&p.name)),
            attributes: p
                .position
                .key_attributes()
                .iter()
                .map(|&attribute| AttributeRange {
                    attribute,
                    range: grade_range(Some(p.attributes.get(attribute))),
                })
                .collect(),
        })
        .collect()
}

fn full_roster(team: &Team, limit: usize) -> Vec<ScoutedPlayer> {
    team.roster_by_jersey()
        .into_iter()
        .take(limit)
        .map(|p| ScoutedPlayer {
            jersey_number: p.jersey_number,
            position: p.position.code(),
            name: p.name.clone(),
            attributes: p.attributes,
        })
        .collect()
}

/// Look the team up in the store and build its report.
pub fn build_scouting_report<S: TeamRepository + ?Sized>(
    store: &S,
    team_id: TeamId,
    knowledge_level: i32,
    rivalry_score: i32,
    config: &ScoutingConfig,
) -> Result<ScoutingReport, StoreError> {
    let team = store.team(team_id).ok_or(StoreError::TeamNotFound(team_id))?;
    Ok(build_report(&team, knowledge_level, rivalry_score, config))
}

/// Report at whatever level the ledger says has been bought.
pub fn build_ledger_report<S: TeamRepository + ScoutingLedger + ?Sized>(
    store: &S,
    team_id: TeamId,
    config: &ScoutingConfig,
) -> Result<ScoutingReport, StoreError> {
    let record = store.scouting_record(team_id);
    build_scouting_report(
        store,
        team_id,
        i32::from(record.knowledge_level),
        record.rivalry_score,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Era, Player, Position, ScoutingRecord};
    use crate::store::InMemoryLeague;
    use proptest::prelude::*;

    fn player(id: u32, name: &str, position: Position, jersey: Option<u8>) -> Player {
        Player {
            id,
            name: name.into(),
            position,
            jersey_number: jersey,
            overall: 60,
            attributes: PlayerAttributes {
                velocity: 85,
                control: 72,
                contact: 64,
                power: 51,
                speed: 45,
                ..Default::default()
            },
            fatigue: 0,
            morale: 60,
        }
    }

    fn team(roster_size: u32) -> Team {
        let players = (1..=roster_size)
            .map(|i| {
                let position = if i == 1 { Position::Pitcher } else { Position::Shortstop };
                player(i, &format!("Taro Yamada{i}"), position, Some(i as u8))
            })
            .collect();
        Team {
            id: 7,
            name: "Yokohama".into(),
            prestige: 68,
            era: Era::Dynasty,
            prefecture: Some("Kanagawa".into()),
            philosophy: Some("Small ball".into()),
            budget: 0,
            players,
        }
    }

    #[test]
    fn test_blackout_exposes_nothing() {
        let report = build_report(&team(20), 0, 0, &ScoutingConfig::default());
        assert_eq!(report.level, KnowledgeLevel::Blackout);
        assert_eq!(report.view, ScoutingView::Blackout);
        assert!(!report.view.exposes_roster());
        assert_eq!(report.header.name, "Yokohama");
        assert_eq!(report.header.prefecture, None);
        assert_eq!(report.header.prestige, None);
        assert_eq!(report.fog_label, "BLACKOUT");
    }

    #[test]
    fn test_basic_shows_estimates_only() {
        let report = build_report(&team(20), 1, 0, &ScoutingConfig::default());
        let ScoutingView::Basic { ratings } = &report.view else {
            panic!("expected basic view, got {:?}", report.view);
        };
        assert_eq!(ratings.len(), 5);
        assert!(ratings.iter().all(|r| r.grade.starts_with('~') && r.grade.ends_with('?')));
        assert!(!report.view.exposes_roster());
        assert_eq!(report.header.prefecture.as_deref(), Some("Kanagawa"));
        assert_eq!(report.header.prestige, Some(68));
    }

    #[test]
    fn test_full_intel_exposes_exact_ratings() {
        let t = team(20);
        let report = build_report(&t, 3, 79, &ScoutingConfig::default());
        assert_eq!(report.level, KnowledgeLevel::Full);
        assert!(!report.rivalry_penalty_applied());
        let ScoutingView::Full { ratings, roster, strengths, weaknesses } = &report.view else {
            panic!("expected full view");
        };
        assert_eq!(*ratings, TeamRatings::compute(&t, 40));
        assert_eq!(roster.len(), 18);
        assert_eq!(roster[0].name, "Taro Yamada1");
        assert_eq!(roster[0].attributes.velocity, 85);
        assert!(!strengths.is_empty() && !weaknesses.is_empty());
    }

    #[test]
    fn test_rivalry_drops_full_to_masked() {
        let report = build_report(&team(20), 3, 80, &ScoutingConfig::default());
        assert_eq!(report.purchased_level, KnowledgeLevel::Full);
        assert_eq!(report.level, KnowledgeLevel::Masked);
        assert!(report.rivalry_penalty_applied());
        let ScoutingView::Partial { ratings, roster, tendencies } = &report.view else {
            panic!("expected partial view");
        };
        assert_eq!(ratings.len(), 5);
        assert_eq!(roster.len(), 9);
        assert_eq!(roster[0].masked_name, "T.Y.");
        assert_eq!(roster[0].position, "P");
        assert_eq!(roster[0].attributes[0].attribute, AttributeKey::Velocity);
        assert_eq!(roster[0].attributes[0].range, "A?");
        assert_eq!(roster[1].attributes[0].attribute, AttributeKey::Contact);
        assert_eq!(roster[1].attributes[0].range, "C–B");
        assert!(tendencies.len() >= 2);
        assert_eq!(report.fog_label, "MASKED");
    }

    #[test]
    fn test_rivalry_cannot_go_below_blackout() {
        let report = build_report(&team(3), 0, 100, &ScoutingConfig::default());
        assert_eq!(report.level, KnowledgeLevel::Blackout);
        let report = build_report(&team(3), 1, 100, &ScoutingConfig::default());
        assert_eq!(report.level, KnowledgeLevel::Blackout);
    }

    #[test]
    fn test_out_of_range_levels_clamp() {
        assert_eq!(KnowledgeLevel::from_raw(-4), KnowledgeLevel::Blackout);
        assert_eq!(KnowledgeLevel::from_raw(99), KnowledgeLevel::Full);
        let report = build_report(&team(3), 7, 0, &ScoutingConfig::default());
        assert_eq!(report.level, KnowledgeLevel::Full);
    }

    #[test]
    fn test_short_roster_fits_under_limits() {
        let report = build_report(&team(4), 2, 0, &ScoutingConfig::default());
        let ScoutingView::Partial { roster, .. } = &report.view else {
            panic!("expected partial view");
        };
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_store_lookups() {
        let mut league = InMemoryLeague::new(vec![team(12)]);
        let err = build_scouting_report(&league, 99, 3, 0, &ScoutingConfig::default()).unwrap_err();
        assert!(matches!(err, StoreError::TeamNotFound(99)));

        let report = build_ledger_report(&league, 7, &ScoutingConfig::default()).unwrap();
        assert_eq!(report.level, KnowledgeLevel::Blackout);

        league.put_scouting_record(ScoutingRecord { team_id: 7, knowledge_level: 3, rivalry_score: 85 });
        let report = build_ledger_report(&league, 7, &ScoutingConfig::default()).unwrap();
        assert_eq!(report.level, KnowledgeLevel::Masked);
    }

    #[test]
    fn test_report_serializes_with_fog_tag() {
        let report = build_report(&team(3), 2, 0, &ScoutingConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["view"]["fog"], "partial");
        assert_eq!(json["level"], "MASKED");
        assert_eq!(json["view"]["roster"][0]["masked_name"], "T.Y.");
    }

    proptest! {
        /// Any raw level and rivalry score lands in 0..=3, never above the purchase
        #[test]
        fn prop_effective_level_bounded(raw in any::<i32>(), rivalry in any::<i32>()) {
            let level = KnowledgeLevel::effective(raw, rivalry, 80);
            prop_assert!(level.value() <= 3);
            prop_assert!(level <= KnowledgeLevel::from_raw(raw));
        }

        /// Blackout never leaks ratings or roster whatever the rivalry
        #[test]
        fn prop_blackout_never_leaks(raw in -5i32..=0, rivalry in 0i32..200) {
            let report = build_report(&team(12), raw, rivalry, &ScoutingConfig::default());
            prop_assert_eq!(report.view, ScoutingView::Blackout);
        }
    }
}
