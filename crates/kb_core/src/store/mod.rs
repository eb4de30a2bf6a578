//! # Persistence Collaborator
//!
//! The gameplay core never owns league data. It reads teams and scouting
//! records through these traits and commits the few mutations it makes
//! (prestige, scouting knowledge, budget) back through them. The handle is
//! passed in per call; there is no process-wide session.
//!
//! - `memory` - `InMemoryLeague`, a JSON-backed implementation

pub mod memory;

pub use memory::InMemoryLeague;

use crate::error::StoreError;
use crate::models::{ScoutingRecord, Team, TeamId};

/// Read access to teams plus the prestige commit.
pub trait TeamRepository {
    fn team(&self, id: TeamId) -> Option<Team>;

    fn teams(&self) -> Vec<Team>;

    /// Top `n` teams by prestige, highest first. Ties keep store order.
    fn top_by_prestige(&self, n: usize) -> Vec<Team> {
        let mut teams = self.teams();
        teams.sort_by(|a, b| b.prestige.cmp(&a.prestige));
        teams.truncate(n);
        teams
    }

    /// Add `delta` prestige and return the new value.
    fn add_prestige(&mut self, id: TeamId, delta: u32) -> Result<u32, StoreError>;
}

/// Scouting knowledge and the budget it is paid from.
pub trait ScoutingLedger {
    /// Missing records read as "nothing known".
    fn scouting_record(&self, team_id: TeamId) -> ScoutingRecord;

    fn put_scouting_record(&mut self, record: ScoutingRecord);

    /// Add `delta` (may be negative) to a team budget and return the new value.
    fn adjust_budget(&mut self, team_id: TeamId, delta: i64) -> Result<i64, StoreError>;
}
