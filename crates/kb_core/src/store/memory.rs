use super::{ScoutingLedger, TeamRepository};
use crate::error::StoreError;
use crate::models::{ScoutingRecord, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::fs::{rename, File};
use std::io::Write;
use std::path::Path;

/// Whole league held in memory, loadable from / savable to a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InMemoryLeague {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub scouting: Vec<ScoutingRecord>,
}

impl InMemoryLeague {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams, ..Default::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let league = Self::from_json(&content)?;
        log::debug!(
            "Loaded league with {} teams from {:?}",
            league.teams.len(),
            path.as_ref()
        );
        Ok(league)
    }

    /// Atomic save: write to a temp file, then rename over the target.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let data = self.to_json()?;
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(data.as_bytes())?;
            file.sync_all()?;
        }
        rename(&temp_path, path)?;
        log::debug!("Saved league ({} bytes) to {:?}", data.len(), path);
        Ok(())
    }

    fn team_mut(&mut self, id: TeamId) -> Result<&mut Team, StoreError> {
        self.teams.iter_mut().find(|t| t.id == id).ok_or(StoreError::TeamNotFound(id))
    }
}

impl TeamRepository for InMemoryLeague {
    fn team(&self, id: TeamId) -> Option<Team> {
        self.teams.iter().find(|t| t.id == id).cloned()
    }

    fn teams(&self) -> Vec<Team> {
        self.teams.clone()
    }

    fn add_prestige(&mut self, id: TeamId, delta: u32) -> Result<u32, StoreError> {
        let team = self.team_mut(id)?;
        team.prestige = team.prestige.saturating_add(delta);
        Ok(team.prestige)
    }
}

impl ScoutingLedger for InMemoryLeague {
    fn scouting_record(&self, team_id: TeamId) -> ScoutingRecord {
        self.scouting
            .iter()
            .find(|r| r.team_id == team_id)
            .copied()
            .unwrap_or_else(|| ScoutingRecord::unknown(team_id))
    }

    fn put_scouting_record(&mut self, record: ScoutingRecord) {
        match self.scouting.iter_mut().find(|r| r.team_id == record.team_id) {
            Some(existing) => *existing = record,
            None => self.scouting.push(record),
        }
    }

    fn adjust_budget(&mut self, team_id: TeamId, delta: i64) -> Result<i64, StoreError> {
        let team = self.team_mut(team_id)?;
        team.budget = team.budget.saturating_add(delta);
        Ok(team.budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Era;

    fn team(id: TeamId, prestige: u32) -> Team {
        Team {
            id,
            name: format!("School {id}"),
            prestige,
            era: Era::Stable,
            prefecture: Some("Hyogo".into()),
            philosophy: None,
            budget: 100_000,
            players: vec![],
        }
    }

    #[test]
    fn test_top_by_prestige_orders_and_keeps_ties_stable() {
        let league = InMemoryLeague::new(vec![team(1, 40), team(2, 80), team(3, 40), team(4, 90)]);
        let ids: Vec<TeamId> = league.top_by_prestige(3).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 2, 1]);
    }

    #[test]
    fn test_add_prestige_and_missing_team() {
        let mut league = InMemoryLeague::new(vec![team(1, 40)]);
        assert_eq!(league.add_prestige(1, 15).unwrap(), 55);
        assert_eq!(league.team(1).unwrap().prestige, 55);
        assert!(matches!(league.add_prestige(9, 15), Err(StoreError::TeamNotFound(9))));
    }

    #[test]
    fn test_scouting_records_default_and_upsert() {
        let mut league = InMemoryLeague::new(vec![team(1, 40)]);
        assert_eq!(league.scouting_record(5), ScoutingRecord::unknown(5));
        league.put_scouting_record(ScoutingRecord { team_id: 5, knowledge_level: 2, rivalry_score: 10 });
        league.put_scouting_record(ScoutingRecord { team_id: 5, knowledge_level: 3, rivalry_score: 10 });
        assert_eq!(league.scouting.len(), 1);
        assert_eq!(league.scouting_record(5).knowledge_level, 3);
    }

    #[test]
    fn test_save_and_load_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.json");
        let mut league = InMemoryLeague::new(vec![team(1, 40), team(2, 60)]);
        league.adjust_budget(2, -50_000).unwrap();
        league.save(&path).unwrap();

        let loaded = InMemoryLeague::load(&path).unwrap();
        assert_eq!(loaded, league);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_minimal_league_json() {
        let league = InMemoryLeague::from_json(r#"{"teams": [{"id": 1, "name": "Yokohama"}]}"#).unwrap();
        let t = league.team(1).unwrap();
        assert_eq!(t.prestige, 0);
        assert_eq!(t.era, Era::Rebuilding);
        assert!(league.scouting.is_empty());
    }
}
