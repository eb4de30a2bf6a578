//! High-leverage moments during user matches.
//!
//! Before a user match the bracket rolls a late-game scenario. If it is
//! high leverage and the user's school is in the field, the pitch minigame
//! runs and its result travels to the match resolver as a [`ClutchPitch`].

use super::pitch_timing::{Half, PitchMinigameContext, PitchMinigameResult};
use crate::models::{Team, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const INNINGS: [u8; 4] = [6, 7, 8, 9];
const RUNNERS: [u8; 4] = [0, 1, 2, 3];
const SCORE_DIFFS: [i32; 2] = [0, 1];
const COUNTS: [&str; 3] = ["3-2", "2-2", "1-2"];

/// Control/fatigue assumed when a roster has no pitcher.
const FALLBACK_CONTROL: f64 = 60.0;
const FALLBACK_FATIGUE: f64 = 20.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

/// Late-game situation rolled before a user match.
#[derive(Debug, Clone, PartialEq)]
pub struct LeverageScenario {
    pub inning: u8,
    pub half: Half,
    pub runners_on: u8,
    pub score_diff: i32,
    pub count: &'static str,
}

impl LeverageScenario {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let half = if rng.gen_bool(0.5) { Half::Top } else { Half::Bottom };
        Self {
            inning: *INNINGS.choose(rng).unwrap_or(&9),
            half,
            runners_on: *RUNNERS.choose(rng).unwrap_or(&0),
            score_diff: *SCORE_DIFFS.choose(rng).unwrap_or(&0),
            count: COUNTS.choose(rng).copied().unwrap_or("3-2"),
        }
    }

    /// Late and close, traffic on the bases, or sudden death.
    pub fn is_high_leverage(&self) -> bool {
        let late = self.inning >= 7;
        let close = self.score_diff.abs() <= 1;
        let traffic = self.runners_on >= 2;
        let sudden_death = self.inning >= 9 && self.score_diff.abs() <= 2;
        (late && close) || traffic || sudden_death
    }

    /// Home pitches the top half, away pitches the bottom.
    pub fn pitching_side(&self) -> TeamSide {
        match self.half {
            Half::Top => TeamSide::Home,
            Half::Bottom => TeamSide::Away,
        }
    }

    pub fn into_context(self, label: String) -> PitchMinigameContext {
        PitchMinigameContext {
            inning: self.inning,
            half: self.half,
            count: self.count.to_string(),
            runners_on: self.runners_on,
            score_diff: self.score_diff,
            label,
        }
    }
}

/// Minigame difficulty for a given bracket round (1-based).
pub fn clutch_difficulty(round: u32, base: f64, step: f64) -> f64 {
    (base + f64::from(round.saturating_sub(1)) * step).clamp(0.2, 1.0)
}

/// (control, fatigue) of the staff ace: best control + stamina among pitchers.
/// Ties go to the pitcher listed first.
pub fn ace_profile(team: &Team) -> (f64, f64) {
    team.pitchers()
        .rev()
        .max_by_key(|p| p.attributes.control + p.attributes.stamina)
        .map(|ace| (f64::from(ace.attributes.control), f64::from(ace.fatigue)))
        .unwrap_or((FALLBACK_CONTROL, FALLBACK_FATIGUE))
}

/// Outcome the resolver must honour for an exceptional clutch pitch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ForcedResult {
    Strikeout,
    Strike,
}

/// Minigame outcome packaged for the match resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClutchPitch {
    pub team_id: TeamId,
    pub team_name: String,
    pub team_side: TeamSide,
    pub quality: f64,
    pub feedback: String,
    pub deviation: f64,
    pub difficulty: f64,
    pub target_window: f64,
    pub context: PitchMinigameContext,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub force_result: Option<ForcedResult>,
}

impl ClutchPitch {
    pub fn from_result(result: PitchMinigameResult, team: &Team, side: TeamSide) -> Self {
        let (force_result, quality) = if result.quality >= 0.9 {
            (Some(ForcedResult::Strikeout), result.quality.max(0.98))
        } else if result.quality >= 0.8 {
            (Some(ForcedResult::Strike), result.quality.max(0.93))
        } else {
            (None, result.quality)
        };
        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            team_side: side,
            quality: (quality * 1000.0).round() / 1000.0,
            feedback: result.feedback,
            deviation: result.deviation,
            difficulty: result.difficulty,
            target_window: result.target_window,
            context: result.context,
            force_result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigame::resolve_with_elapsed;
    use crate::models::{Era, Player, PlayerAttributes, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn scenario(inning: u8, runners_on: u8, score_diff: i32) -> LeverageScenario {
        LeverageScenario { inning, half: Half::Top, runners_on, score_diff, count: "3-2" }
    }

    fn pitcher(id: u32, control: i32, stamina: i32, fatigue: i32) -> Player {
        Player {
            id,
            name: format!("P{id}"),
            position: Position::Pitcher,
            jersey_number: Some(id as u8),
            overall: 60,
            attributes: PlayerAttributes { control, stamina, ..Default::default() },
            fatigue,
            morale: 60,
        }
    }

    fn team(players: Vec<Player>) -> Team {
        Team {
            id: 3,
            name: "Meitoku".into(),
            prestige: 50,
            era: Era::Stable,
            prefecture: None,
            philosophy: None,
            budget: 0,
            players,
        }
    }

    #[test]
    fn test_high_leverage_rules() {
        assert!(scenario(7, 0, 1).is_high_leverage()); // late and close
        assert!(!scenario(6, 0, 1).is_high_leverage());
        assert!(scenario(6, 2, 0).is_high_leverage()); // traffic
        assert!(scenario(9, 0, 2).is_high_leverage()); // sudden death
        assert!(!scenario(8, 1, 2).is_high_leverage());
    }

    #[test]
    fn test_pitching_side_by_half() {
        assert_eq!(scenario(9, 0, 0).pitching_side(), TeamSide::Home);
        let bottom = LeverageScenario { half: Half::Bottom, ..scenario(9, 0, 0) };
        assert_eq!(bottom.pitching_side(), TeamSide::Away);
    }

    #[test]
    fn test_rolled_scenarios_use_known_values() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let s = LeverageScenario::roll(&mut rng);
            assert!(INNINGS.contains(&s.inning));
            assert!(RUNNERS.contains(&s.runners_on));
            assert!(SCORE_DIFFS.contains(&s.score_diff));
            assert!(COUNTS.contains(&s.count));
        }
    }

    #[test]
    fn test_clutch_difficulty_ramps_and_clamps() {
        assert!((clutch_difficulty(1, 0.35, 0.08) - 0.35).abs() < 1e-12);
        assert!((clutch_difficulty(3, 0.35, 0.08) - 0.51).abs() < 1e-12);
        assert_eq!(clutch_difficulty(20, 0.35, 0.08), 1.0);
        assert_eq!(clutch_difficulty(1, 0.0, 0.08), 0.2);
    }

    #[test]
    fn test_ace_profile_picks_best_arm() {
        let t = team(vec![pitcher(1, 70, 60, 5), pitcher(2, 80, 70, 12), pitcher(3, 40, 40, 0)]);
        assert_eq!(ace_profile(&t), (80.0, 12.0));
        assert_eq!(ace_profile(&team(vec![])), (60.0, 20.0));
    }

    #[test]
    fn test_ace_profile_tie_goes_to_first_listed() {
        let t = team(vec![pitcher(1, 75, 65, 3), pitcher(2, 65, 75, 30), pitcher(3, 70, 70, 9)]);
        assert_eq!(ace_profile(&t), (75.0, 3.0));
    }

    #[test]
    fn test_payload_forces_strikeout_on_elite_quality() {
        let t = team(vec![]);
        let mut result = resolve_with_elapsed(80.0, 10.0, 0.5, 0.5, PitchMinigameContext::default());
        result.quality = 0.91;
        let payload = ClutchPitch::from_result(result.clone(), &t, TeamSide::Home);
        assert_eq!(payload.force_result, Some(ForcedResult::Strikeout));
        assert_eq!(payload.quality, 0.98);

        result.quality = 0.85;
        let payload = ClutchPitch::from_result(result.clone(), &t, TeamSide::Away);
        assert_eq!(payload.force_result, Some(ForcedResult::Strike));
        assert_eq!(payload.quality, 0.93);
        assert_eq!(payload.team_side, TeamSide::Away);

        result.quality = 0.4;
        let payload = ClutchPitch::from_result(result, &t, TeamSide::Home);
        assert_eq!(payload.force_result, None);
        assert_eq!(payload.quality, 0.4);
    }
}
