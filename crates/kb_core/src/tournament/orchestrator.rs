use super::bracket::{pair_adjacent, rounds_for, trim_entrants, BracketState};
use super::resolver::{MatchFixture, MatchOutcome, MatchResolver};
use crate::config::GameConfig;
use crate::error::{ResolveError, Result, TournamentError};
use crate::minigame::clutch::{ace_profile, clutch_difficulty};
use crate::minigame::{
    auto_elapsed, resolve_pitch, resolve_with_elapsed, ClutchPitch, LeverageScenario, TeamSide,
    TimingSource,
};
use crate::models::{Team, TeamId};
use crate::store::TeamRepository;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SUMMER_TITLE: &str = "SUMMER KOSHIEN";
pub const SPRING_TITLE: &str = "SPRING SENBATSU";

const FATIGUE_WARNING_MIN: f32 = 65.0;
const STAMINA_WARNING_MAX: f32 = 55.0;

// ============================================================================
// Narration hooks
// ============================================================================

/// Callbacks fired as a tournament progresses. All default to no-ops.
///
/// Front-ends render these; interactive ones may block inside a callback
/// (e.g. "Press Enter to continue").
pub trait TournamentObserver {
    fn tournament_started(&mut self, _title: &str, _entrants: &[Team]) {}
    fn invitation_decided(&mut self, _team: &Team, _qualified: bool) {}
    fn round_started(&mut self, _round: u32, _teams: &[Team]) {}
    fn match_resolved(&mut self, _fixture: &MatchFixture<'_>, _outcome: &MatchOutcome) {}
    fn clutch_pitch(&mut self, _pitch: &ClutchPitch) {}
    fn fatigue_warning(&mut self, _team: &Team, _avg_fatigue: f32, _avg_stamina: f32) {}
    fn eliminated(&mut self, _team: &Team, _round: u32) {}
    fn champion_crowned(&mut self, _title: &str, _champion: &Team, _user_won: bool) {}
}

impl<T: TournamentObserver + ?Sized> TournamentObserver for &mut T {
    fn tournament_started(&mut self, title: &str, entrants: &[Team]) {
        (**self).tournament_started(title, entrants)
    }
    fn invitation_decided(&mut self, team: &Team, qualified: bool) {
        (**self).invitation_decided(team, qualified)
    }
    fn round_started(&mut self, round: u32, teams: &[Team]) {
        (**self).round_started(round, teams)
    }
    fn match_resolved(&mut self, fixture: &MatchFixture<'_>, outcome: &MatchOutcome) {
        (**self).match_resolved(fixture, outcome)
    }
    fn clutch_pitch(&mut self, pitch: &ClutchPitch) {
        (**self).clutch_pitch(pitch)
    }
    fn fatigue_warning(&mut self, team: &Team, avg_fatigue: f32, avg_stamina: f32) {
        (**self).fatigue_warning(team, avg_fatigue, avg_stamina)
    }
    fn eliminated(&mut self, team: &Team, round: u32) {
        (**self).eliminated(team, round)
    }
    fn champion_crowned(&mut self, title: &str, champion: &Team, user_won: bool) {
        (**self).champion_crowned(title, champion, user_won)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl TournamentObserver for SilentObserver {}

// ============================================================================
// Outcome
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
}

impl From<&Team> for TeamRef {
    fn from(team: &Team) -> Self {
        Self { id: team.id, name: team.name.clone() }
    }
}

/// How the tournament went for the user's school.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UserResult {
    Champion,
    /// Lost (or was dropped as an odd trailing entrant) in `round`.
    Eliminated { round: u32, in_final: bool },
    /// Invitational only: missed the prestige cut.
    NotQualified,
    /// Not part of the trimmed field.
    Spectator,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentOutcome {
    pub title: String,
    /// `None` when the run stopped at the user's elimination.
    pub champion: Option<TeamRef>,
    pub user_result: UserResult,
    pub rounds_completed: u32,
    pub prestige_after: u32,
}

impl TournamentOutcome {
    pub fn won(&self) -> bool {
        self.user_result == UserResult::Champion
    }

    pub fn reached_final(&self) -> bool {
        match self.user_result {
            UserResult::Champion => true,
            UserResult::Eliminated { in_final, .. } => in_final,
            UserResult::NotQualified | UserResult::Spectator => false,
        }
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Runs single-elimination brackets against an injected store and resolver.
///
/// Bracket state lives only inside one `run_*` call. The only persisted
/// mutation is the champion prestige bonus for the user's school.
pub struct BracketOrchestrator<'a, S, M, R>
where
    S: TeamRepository + ?Sized,
    M: MatchResolver + ?Sized,
    R: Rng + ?Sized,
{
    store: &'a mut S,
    resolver: &'a mut M,
    rng: &'a mut R,
    config: GameConfig,
    timing: Option<Box<dyn TimingSource + 'a>>,
    observer: Box<dyn TournamentObserver + 'a>,
}

impl<'a, S, M, R> BracketOrchestrator<'a, S, M, R>
where
    S: TeamRepository + ?Sized,
    M: MatchResolver + ?Sized,
    R: Rng + ?Sized,
{
    pub fn new(store: &'a mut S, resolver: &'a mut M, rng: &'a mut R) -> Self {
        Self {
            store,
            resolver,
            rng,
            config: GameConfig::default(),
            timing: None,
            observer: Box::new(SilentObserver),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Reaction-time source for clutch pitches. Without one, elapsed time is
    /// drawn from the orchestrator's rng.
    pub fn with_timing(mut self, timing: impl TimingSource + 'a) -> Self {
        self.timing = Some(Box::new(timing));
        self
    }

    pub fn with_observer(mut self, observer: impl TournamentObserver + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Open tournament. Without a participant list, a random sample of NPC
    /// schools plus the user's school enters.
    pub fn run_summer_tournament(
        &mut self,
        user_id: TeamId,
        participants: Option<Vec<Team>>,
    ) -> Result<TournamentOutcome> {
        let user_team = self.store.team(user_id).ok_or(TournamentError::UserTeamNotFound(user_id))?;
        let entrants = match participants {
            Some(list) if !list.is_empty() => list,
            _ => self.sample_field(&user_team),
        };
        self.run_bracket(SUMMER_TITLE, &user_team, entrants)
    }

    /// Invitational: the top schools by prestige are invited. The bracket is
    /// played either way; an uninvited user just watches.
    pub fn run_spring_invitational(&mut self, user_id: TeamId) -> Result<TournamentOutcome> {
        let user_team = self.store.team(user_id).ok_or(TournamentError::UserTeamNotFound(user_id))?;
        let field = self.store.top_by_prestige(self.config.tournament.invitational_field_size);
        let qualified = field.iter().any(|t| t.id == user_id);
        if qualified {
            log::info!("{} invited to {SPRING_TITLE}", user_team.name);
        } else {
            log::info!(
                "{} not invited to {SPRING_TITLE} (prestige {})",
                user_team.name,
                user_team.prestige
            );
        }
        self.observer.invitation_decided(&user_team, qualified);

        let mut outcome = self.run_bracket(SPRING_TITLE, &user_team, field)?;
        if !qualified {
            outcome.user_result = UserResult::NotQualified;
        }
        Ok(outcome)
    }

    fn sample_field(&mut self, user_team: &Team) -> Vec<Team> {
        let npcs: Vec<Team> =
            self.store.teams().into_iter().filter(|t| t.id != user_team.id).collect();
        let wanted = self.config.tournament.fallback_field_size;
        if npcs.len() < wanted {
            log::warn!("Only {} NPC schools available, wanted {wanted}", npcs.len());
        }
        let mut field: Vec<Team> =
            npcs.choose_multiple(&mut *self.rng, wanted.min(npcs.len())).cloned().collect();
        field.push(user_team.clone());
        field
    }

    /// Shared bracket loop: shuffle, trim, then play rounds until one team remains.
    pub fn run_bracket(
        &mut self,
        title: &str,
        user_team: &Team,
        mut entrants: Vec<Team>,
    ) -> Result<TournamentOutcome> {
        let user_id = user_team.id;
        entrants.shuffle(&mut *self.rng);
        trim_entrants(&mut entrants);
        if entrants.len() < 2 {
            return Err(TournamentError::NotEnoughTeams { found: entrants.len() });
        }

        log::info!(
            "{title} begins: {} teams, {} rounds",
            entrants.len(),
            rounds_for(entrants.len())
        );
        self.observer.tournament_started(title, &entrants);

        let mut dropped_in: Option<u32> = None;
        let mut bracket = BracketState::new(entrants);

        while bracket.len() > 1 {
            let round = bracket.round();
            let label = format!("{title} Round {round}");
            self.observer.round_started(round, bracket.teams());

            let (pairs, leftover) = pair_adjacent(bracket.teams());
            if let Some(odd) = leftover {
                log::warn!("{label}: {} has no opponent and is dropped", odd.name);
                if odd.id == user_id {
                    dropped_in = Some(round);
                }
            }
            let in_final = pairs.len() == 1;

            let mut winners = Vec::with_capacity(pairs.len());
            for (home, away) in pairs {
                let is_user_match = home.id == user_id || away.id == user_id;
                let clutch = if is_user_match {
                    self.maybe_clutch_pitch(home, away, user_id, round, &label)
                } else {
                    None
                };
                let fixture = MatchFixture {
                    home,
                    away,
                    label: label.clone(),
                    silent: !is_user_match,
                    clutch,
                };

                let outcome = self.resolver.resolve(&fixture)?;
                let winner = if outcome.winner == home.id {
                    home
                } else if outcome.winner == away.id {
                    away
                } else {
                    return Err(ResolveError::UndecidedWinner {
                        home: home.id,
                        away: away.id,
                        winner: outcome.winner,
                    }
                    .into());
                };
                log::debug!(
                    "{label}: {} vs {} -> {} ({})",
                    home.name,
                    away.name,
                    winner.name,
                    outcome.score
                );
                self.observer.match_resolved(&fixture, &outcome);

                if is_user_match && winner.id != user_id {
                    log::info!("{} eliminated in {label}", user_team.name);
                    self.observer.eliminated(user_team, round);
                    return Ok(TournamentOutcome {
                        title: title.to_string(),
                        champion: None,
                        user_result: UserResult::Eliminated { round, in_final },
                        rounds_completed: round - 1,
                        prestige_after: user_team.prestige,
                    });
                }
                winners.push(winner.clone());
            }

            bracket.advance(winners);
            if bracket.len() > 1 && bracket.contains(user_id) {
                self.check_fatigue(user_id);
            }
        }

        let Some(champion) = bracket.champion().cloned() else {
            return Err(TournamentError::NotEnoughTeams { found: bracket.len() });
        };
        let rounds_completed = bracket.round() - 1;
        let user_won = champion.id == user_id;

        let prestige_after = if user_won {
            let bonus = self.config.tournament.champion_prestige_bonus;
            let updated = self.store.add_prestige(user_id, bonus)?;
            log::info!(
                "{} won {title}; prestige {} -> {updated}",
                champion.name,
                user_team.prestige
            );
            updated
        } else {
            log::info!("{title} champion: {}", champion.name);
            user_team.prestige
        };
        self.observer.champion_crowned(title, &champion, user_won);

        // a user who played every match either won or returned early above
        let user_result = match (user_won, dropped_in) {
            (true, _) => UserResult::Champion,
            (false, Some(round)) => UserResult::Eliminated { round, in_final: false },
            (false, None) => UserResult::Spectator,
        };

        Ok(TournamentOutcome {
            title: title.to_string(),
            champion: Some(TeamRef::from(&champion)),
            user_result,
            rounds_completed,
            prestige_after,
        })
    }

    /// Roll a late-game scenario; when it is high leverage and the user's
    /// school is pitching, run the pitch minigame with the staff ace.
    fn maybe_clutch_pitch(
        &mut self,
        home: &Team,
        away: &Team,
        user_id: TeamId,
        round: u32,
        label: &str,
    ) -> Option<ClutchPitch> {
        let scenario = LeverageScenario::roll(&mut *self.rng);
        if !scenario.is_high_leverage() {
            return None;
        }
        let side = scenario.pitching_side();
        let pitching = match side {
            TeamSide::Home => home,
            TeamSide::Away => away,
        };
        if pitching.id != user_id {
            return None;
        }

        let t = &self.config.tournament;
        let difficulty =
            clutch_difficulty(round, t.leverage_base_difficulty, t.leverage_difficulty_step);
        let (control, fatigue) = ace_profile(pitching);
        let context = scenario.into_context(label.to_string());
        let result = match self.timing.as_mut() {
            Some(timing) => resolve_pitch(control, fatigue, difficulty, context, &mut **timing),
            None => {
                let elapsed = auto_elapsed(&mut *self.rng, self.config.minigame.auto_elapsed_max);
                resolve_with_elapsed(control, fatigue, difficulty, elapsed, context)
            }
        };
        log::debug!(
            "{label}: clutch pitch quality {:.3} ({})",
            result.quality,
            result.feedback
        );

        let pitch = ClutchPitch::from_result(result, pitching, side);
        self.observer.clutch_pitch(&pitch);
        Some(pitch)
    }

    fn check_fatigue(&mut self, user_id: TeamId) {
        let Some(team) = self.store.team(user_id) else {
            return;
        };
        let Some((avg_fatigue, avg_stamina)) = team.fatigue_snapshot() else {
            return;
        };
        if avg_fatigue >= FATIGUE_WARNING_MIN && avg_stamina <= STAMINA_WARNING_MAX {
            log::info!(
                "{} is gassed: avg fatigue {avg_fatigue:.1}, avg stamina {avg_stamina:.1}",
                team.name
            );
            self.observer.fatigue_warning(&team, avg_fatigue, avg_stamina);
        }
    }
}
