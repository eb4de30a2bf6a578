use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::config_env::game_config_from_env;
use crate::effects::{apply_effects, AppliedEffect, EffectTarget};
use crate::minigame::{resolve_pitch, AutoTiming, FixedTiming, PitchMinigameContext, TimingSource};
use crate::models::{Player, Relationship, TeamId};
use crate::scouting::{build_ledger_report, build_scouting_report};
use crate::store::{InMemoryLeague, TeamRepository};
use crate::tournament::{BracketOrchestrator, QuickSimResolver, TournamentOutcome};

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
    pub const UNSUPPORTED_SCHEMA: &str = "UNSUPPORTED_SCHEMA";
    pub const TEAM_NOT_FOUND: &str = "TEAM_NOT_FOUND";
    pub const TOURNAMENT_FAILED: &str = "TOURNAMENT_FAILED";
    pub const UNKNOWN_EFFECT: &str = "UNKNOWN_EFFECT";
    pub const SERIALIZE_FAILED: &str = "SERIALIZE_FAILED";
}

pub const SCHEMA_VERSION: u8 = 1;

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

fn parse_request<'de, T: Deserialize<'de>>(json: &'de str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| err_code(error_codes::INVALID_REQUEST, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| err_code(error_codes::SERIALIZE_FAILED, e))
}

fn check_schema(version: u8) -> Result<(), String> {
    if version == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(err_code(
            error_codes::UNSUPPORTED_SCHEMA,
            format!("expected schema_version {SCHEMA_VERSION}, got {version}"),
        ))
    }
}

fn default_schema_version() -> u8 {
    SCHEMA_VERSION
}

// ============================================================================
// Pitch minigame
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PitchRequest {
    pub control: f64,
    pub fatigue: f64,
    pub difficulty: f64,
    #[serde(default)]
    pub context: Option<PitchMinigameContext>,
    /// Pre-measured reaction time. Omit to auto-resolve from `seed`.
    #[serde(default)]
    pub elapsed: Option<f64>,
    #[serde(default)]
    pub seed: u64,
}

/// Resolve one pitch attempt. Returns a serialized `PitchMinigameResult`.
pub fn resolve_pitch_json(request_json: &str) -> Result<String, String> {
    let request: PitchRequest = parse_request(request_json)?;
    let config = game_config_from_env()?;

    let mut timing: Box<dyn TimingSource> = match request.elapsed {
        Some(elapsed) => Box::new(FixedTiming::new(elapsed)),
        None => Box::new(AutoTiming::new(
            ChaCha8Rng::seed_from_u64(request.seed),
            config.minigame.auto_elapsed_max,
        )),
    };
    let result = resolve_pitch(
        request.control,
        request.fatigue,
        request.difficulty,
        request.context.unwrap_or_default(),
        &mut *timing,
    );
    to_json(&result)
}

// ============================================================================
// Scouting
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ScoutingReportRequest {
    pub league: InMemoryLeague,
    pub team_id: TeamId,
    /// Overrides the ledger's purchased level when present.
    #[serde(default)]
    pub knowledge_level: Option<i32>,
    #[serde(default)]
    pub rivalry_score: Option<i32>,
}

/// Build a scouting report from a league snapshot.
pub fn scouting_report_json(request_json: &str) -> Result<String, String> {
    let request: ScoutingReportRequest = parse_request(request_json)?;
    let config = game_config_from_env()?;

    let report = match request.knowledge_level {
        Some(level) => {
            let rivalry = request.rivalry_score.unwrap_or(0);
            build_scouting_report(&request.league, request.team_id, level, rivalry, &config.scouting)
        }
        None => build_ledger_report(&request.league, request.team_id, &config.scouting),
    }
    .map_err(|e| err_code(error_codes::TEAM_NOT_FOUND, e))?;
    to_json(&report)
}

// ============================================================================
// Tournament
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentMode {
    #[default]
    Summer,
    Spring,
}

#[derive(Debug, Deserialize)]
pub struct TournamentRequest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    pub seed: u64,
    pub league: InMemoryLeague,
    pub user_team_id: TeamId,
    #[serde(default)]
    pub mode: TournamentMode,
    /// Summer only: explicit entrant ids. Omit for a random field.
    #[serde(default)]
    pub participants: Option<Vec<TeamId>>,
}

#[derive(Debug, Serialize)]
pub struct TournamentResponse {
    pub outcome: TournamentOutcome,
    /// League after the run (prestige bonus applied).
    pub league: InMemoryLeague,
}

/// Run a full bracket with the quick simulator and auto-resolved clutch pitches.
pub fn run_tournament_json(request_json: &str) -> Result<String, String> {
    let request: TournamentRequest = parse_request(request_json)?;
    check_schema(request.schema_version)?;
    let config = game_config_from_env()?;

    let mut league = request.league;
    let participants = match request.participants {
        Some(ids) => Some(
            ids.iter()
                .map(|&id| league.team(id).ok_or_else(|| err_code(error_codes::TEAM_NOT_FOUND, id)))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let sim_rng = ChaCha8Rng::seed_from_u64(request.seed.wrapping_add(1));
    let mut resolver = QuickSimResolver::new(sim_rng);
    let outcome = {
        let mut orchestrator =
            BracketOrchestrator::new(&mut league, &mut resolver, &mut rng).with_config(config);
        match request.mode {
            TournamentMode::Summer => {
                orchestrator.run_summer_tournament(request.user_team_id, participants)
            }
            TournamentMode::Spring => orchestrator.run_spring_invitational(request.user_team_id),
        }
    }
    .map_err(|e| err_code(error_codes::TOURNAMENT_FAILED, e))?;

    to_json(&TournamentResponse { outcome, league })
}

// ============================================================================
// Effects
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum EffectRecord {
    Player(Player),
    Relationship(Relationship),
}

#[derive(Debug, Deserialize)]
pub struct EffectEntry {
    pub key: String,
    pub delta: i32,
}

#[derive(Debug, Deserialize)]
pub struct EffectsRequest {
    pub target: EffectRecord,
    pub effects: Vec<EffectEntry>,
}

#[derive(Debug, Serialize)]
pub struct EffectsResponse {
    pub target: EffectRecord,
    pub applied: Vec<AppliedEffect>,
    /// e.g. "Morale +5"
    pub summary: Vec<String>,
}

/// Apply named effects to a player or relationship record.
pub fn apply_effects_json(request_json: &str) -> Result<String, String> {
    let request: EffectsRequest = parse_request(request_json)?;
    let effects: Vec<(String, i32)> =
        request.effects.into_iter().map(|e| (e.key, e.delta)).collect();

    let mut record = request.target;
    let applied = {
        let mut target = match &mut record {
            EffectRecord::Player(p) => EffectTarget::Player(p),
            EffectRecord::Relationship(r) => EffectTarget::Relationship(r),
        };
        apply_effects(&mut target, &effects).map_err(|e| err_code(error_codes::UNKNOWN_EFFECT, e))?
    };

    let summary = applied.iter().map(ToString::to_string).collect();
    to_json(&EffectsResponse { target: record, applied, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn league_json(n: u32) -> Value {
        let teams: Vec<Value> = (1..=n)
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("School {id}"),
                    "prestige": id * 2,
                    "prefecture": "Osaka",
                    "players": [
                        {"id": id * 10, "name": "Taro Yamada", "position": "Pitcher",
                         "jersey_number": 1, "overall": 50 + id,
                         "attributes": {"velocity": 80, "control": 70, "movement": 50, "stamina": 60,
                                        "contact": 40, "power": 40, "speed": 50, "fielding": 50,
                                        "throwing": 50}},
                        {"id": id * 10 + 1, "name": "Jiro Suzuki", "position": "Shortstop",
                         "jersey_number": 6, "overall": 50 + id}
                    ]
                })
            })
            .collect();
        json!({ "teams": teams })
    }

    #[test]
    fn test_resolve_pitch_fixture() {
        let out = resolve_pitch_json(
            r#"{"control": 80, "fatigue": 10, "difficulty": 0.5, "elapsed": 0.5}"#,
        )
        .unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["quality"], 0.15);
        assert_eq!(v["target_window"], 0.186);
        assert_eq!(v["feedback"], "Meatball served up.");
    }

    #[test]
    fn test_resolve_pitch_auto_is_seeded() {
        let req = r#"{"control": 65, "fatigue": 30, "difficulty": 0.4, "seed": 9}"#;
        assert_eq!(resolve_pitch_json(req).unwrap(), resolve_pitch_json(req).unwrap());
    }

    #[test]
    fn test_bad_request_is_coded() {
        let err = resolve_pitch_json("{}").unwrap_err();
        assert!(err.starts_with("INVALID_REQUEST:"), "{err}");
    }

    #[test]
    fn test_scouting_report_levels() {
        let req = json!({"league": league_json(2), "team_id": 2, "knowledge_level": 2});
        let v: Value =
            serde_json::from_str(&scouting_report_json(&req.to_string()).unwrap()).unwrap();
        assert_eq!(v["fog_label"], "MASKED");
        assert_eq!(v["view"]["roster"][0]["masked_name"], "T.Y.");

        // no level given: ledger has nothing, so blackout
        let req = json!({"league": league_json(2), "team_id": 2});
        let v: Value =
            serde_json::from_str(&scouting_report_json(&req.to_string()).unwrap()).unwrap();
        assert_eq!(v["view"]["fog"], "blackout");

        let req = json!({"league": league_json(2), "team_id": 5, "knowledge_level": 1});
        let err = scouting_report_json(&req.to_string()).unwrap_err();
        assert!(err.starts_with("TEAM_NOT_FOUND:"));
    }

    #[test]
    fn test_run_tournament_is_deterministic() {
        let req = json!({"seed": 42, "league": league_json(20), "user_team_id": 3}).to_string();
        let first = run_tournament_json(&req).unwrap();
        assert_eq!(first, run_tournament_json(&req).unwrap());

        let v: Value = serde_json::from_str(&first).unwrap();
        assert_eq!(v["outcome"]["title"], "SUMMER KOSHIEN");
        let status = v["outcome"]["user_result"]["status"].as_str().unwrap();
        assert!(status == "champion" || status == "eliminated", "{status}");
    }

    #[test]
    fn test_run_tournament_rejects_unknown_participant_and_schema() {
        let req = json!({"seed": 1, "league": league_json(4), "user_team_id": 1,
                         "participants": [1, 2, 99]});
        let err = run_tournament_json(&req.to_string()).unwrap_err();
        assert!(err.starts_with("TEAM_NOT_FOUND:"));

        let req = json!({"schema_version": 7, "seed": 1, "league": league_json(4), "user_team_id": 1});
        let err = run_tournament_json(&req.to_string()).unwrap_err();
        assert!(err.starts_with("UNSUPPORTED_SCHEMA:"));

        let req = json!({"seed": 1, "league": league_json(4), "user_team_id": 50});
        let err = run_tournament_json(&req.to_string()).unwrap_err();
        assert!(err.starts_with("TOURNAMENT_FAILED:"));
    }

    #[test]
    fn test_spring_mode_reports_missed_cut() {
        // 40 teams, user has the lowest prestige
        let req = json!({"seed": 3, "league": league_json(40), "user_team_id": 1, "mode": "spring"});
        let v: Value =
            serde_json::from_str(&run_tournament_json(&req.to_string()).unwrap()).unwrap();
        assert_eq!(v["outcome"]["user_result"]["status"], "not_qualified");
        assert_eq!(v["outcome"]["rounds_completed"], 5);
    }

    #[test]
    fn test_apply_effects() {
        let req = json!({
            "target": {"relationship": {"player_id": 4, "coach_trust": 95}},
            "effects": [{"key": "coach_trust", "delta": 10}, {"key": "morale", "delta": 3}]
        });
        let v: Value =
            serde_json::from_str(&apply_effects_json(&req.to_string()).unwrap()).unwrap();
        assert_eq!(v["target"]["relationship"]["coach_trust"], 100);
        assert_eq!(v["applied"].as_array().unwrap().len(), 1);
        assert_eq!(v["summary"][0], "Coach Trust +5");

        let req = json!({
            "target": {"relationship": {"player_id": 4}},
            "effects": [{"key": "aura", "delta": 1}]
        });
        let err = apply_effects_json(&req.to_string()).unwrap_err();
        assert!(err.starts_with("UNKNOWN_EFFECT:"));
    }
}
