//! Buying scouting knowledge with club budget.

use crate::error::StoreError;
use crate::models::{ScoutingRecord, TeamId, MAX_KNOWLEDGE_LEVEL};
use crate::store::{ScoutingLedger, TeamRepository};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoutStatus {
    Success,
    InvalidSelection,
    InsufficientFunds,
    MaxKnowledge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoutingActionResult {
    pub status: ScoutStatus,
    pub target_team_id: TeamId,
    pub cost: i64,
    pub knowledge_before: Option<u8>,
    pub knowledge_after: Option<u8>,
    pub budget_before: Option<i64>,
    pub budget_after: Option<i64>,
}

impl ScoutingActionResult {
    pub fn success(&self) -> bool {
        self.status == ScoutStatus::Success
    }
}

/// Price of the next scouting level when `current_level` is already known.
pub fn scout_cost(current_level: u8, base_cost: i64) -> i64 {
    base_cost.saturating_mul(i64::from(current_level) + 1)
}

/// Spend `cost` from the user's budget to learn one more level about `target_id`.
///
/// Checks run in order: both teams exist, the budget covers the cost, the
/// target is not already fully scouted. Nothing is written unless all pass.
pub fn perform_scout_action<S>(
    store: &mut S,
    user_id: TeamId,
    target_id: TeamId,
    cost: i64,
) -> Result<ScoutingActionResult, StoreError>
where
    S: TeamRepository + ScoutingLedger + ?Sized,
{
    let user = store.team(user_id);
    let budget_before = user.as_ref().map(|t| t.budget);
    let rejected = |status, knowledge: Option<u8>| ScoutingActionResult {
        status,
        target_team_id: target_id,
        cost,
        knowledge_before: knowledge,
        knowledge_after: knowledge,
        budget_before,
        budget_after: budget_before,
    };

    let (Some(user), true) = (user, store.team(target_id).is_some()) else {
        return Ok(rejected(ScoutStatus::InvalidSelection, None));
    };

    let record = store.scouting_record(target_id);
    let knowledge_before = record.knowledge_level;
    if user.budget < cost {
        return Ok(rejected(ScoutStatus::InsufficientFunds, Some(knowledge_before)));
    }
    if knowledge_before >= MAX_KNOWLEDGE_LEVEL {
        return Ok(rejected(ScoutStatus::MaxKnowledge, Some(knowledge_before)));
    }

    let budget_after = store.adjust_budget(user_id, -cost)?;
    let knowledge_after = knowledge_before + 1;
    store.put_scouting_record(ScoutingRecord { knowledge_level: knowledge_after, ..record });
    log::info!(
        "{} scouted team {target_id}: level {knowledge_before} -> {knowledge_after}, budget {} -> {budget_after}",
        user.name,
        user.budget
    );

    Ok(ScoutingActionResult {
        status: ScoutStatus::Success,
        target_team_id: target_id,
        cost,
        knowledge_before: Some(knowledge_before),
        knowledge_after: Some(knowledge_after),
        budget_before: Some(user.budget),
        budget_after: Some(budget_after),
    })
}
