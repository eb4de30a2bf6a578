//! Named stat effects (dialogue choices, events) applied to players and
//! relationship records.
//!
//! The set of keys is closed: each key knows which record it belongs to and
//! which field it touches. Unknown keys are rejected up front.

use crate::error::EffectError;
use crate::models::relationship::clamp_bond;
use crate::models::{AttributeKey, Player, Relationship};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKey {
    Morale,
    Fatigue,
    Attribute(AttributeKey),
    CaptainRel,
    BatteryRel,
    RivalryScore,
    CoachTrust,
    Friendship,
}

impl EffectKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKey::Morale => "morale",
            EffectKey::Fatigue => "fatigue",
            EffectKey::Attribute(AttributeKey::Velocity) => "velocity",
            EffectKey::Attribute(AttributeKey::Control) => "control",
            EffectKey::Attribute(AttributeKey::Movement) => "movement",
            EffectKey::Attribute(AttributeKey::Stamina) => "stamina",
            EffectKey::Attribute(AttributeKey::Contact) => "contact",
            EffectKey::Attribute(AttributeKey::Power) => "power",
            EffectKey::Attribute(AttributeKey::Speed) => "speed",
            EffectKey::Attribute(AttributeKey::Fielding) => "fielding",
            EffectKey::Attribute(AttributeKey::Throwing) => "throwing",
            EffectKey::CaptainRel => "captain_rel",
            EffectKey::BatteryRel => "battery_rel",
            EffectKey::RivalryScore => "rivalry_score",
            EffectKey::CoachTrust => "coach_trust",
            EffectKey::Friendship => "friendship",
        }
    }

    /// Human label for summaries, e.g. "Coach Trust".
    pub fn label(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn targets_player(&self) -> bool {
        matches!(self, EffectKey::Morale | EffectKey::Fatigue | EffectKey::Attribute(_))
    }
}

impl FromStr for EffectKey {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim() {
            "morale" => EffectKey::Morale,
            "fatigue" => EffectKey::Fatigue,
            "velocity" => EffectKey::Attribute(AttributeKey::Velocity),
            "control" => EffectKey::Attribute(AttributeKey::Control),
            "movement" => EffectKey::Attribute(AttributeKey::Movement),
            "stamina" => EffectKey::Attribute(AttributeKey::Stamina),
            "contact" => EffectKey::Attribute(AttributeKey::Contact),
            "power" => EffectKey::Attribute(AttributeKey::Power),
            "speed" => EffectKey::Attribute(AttributeKey::Speed),
            "fielding" => EffectKey::Attribute(AttributeKey::Fielding),
            "throwing" => EffectKey::Attribute(AttributeKey::Throwing),
            "captain_rel" => EffectKey::CaptainRel,
            "battery_rel" => EffectKey::BatteryRel,
            "rivalry_score" => EffectKey::RivalryScore,
            "coach_trust" => EffectKey::CoachTrust,
            "friendship" => EffectKey::Friendship,
            other => return Err(EffectError::UnknownKey(other.to_string())),
        };
        Ok(key)
    }
}

impl fmt::Display for EffectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The record an effect is applied to.
#[derive(Debug)]
pub enum EffectTarget<'a> {
    Player(&'a mut Player),
    Relationship(&'a mut Relationship),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEffect {
    pub key: String,
    pub before: i32,
    pub after: i32,
}

impl AppliedEffect {
    pub fn delta(&self) -> i32 {
        self.after - self.before
    }
}

impl fmt::Display for AppliedEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.key.parse::<EffectKey>() {
            Ok(key) => key.label(),
            Err(_) => self.key.clone(),
        };
        write!(f, "{label} {:+}", self.delta())
    }
}

fn slot<'t>(target: &'t mut EffectTarget<'_>, key: EffectKey) -> Option<&'t mut i32> {
    match (target, key) {
        (EffectTarget::Player(p), EffectKey::Morale) => Some(&mut p.morale),
        (EffectTarget::Player(p), EffectKey::Fatigue) => Some(&mut p.fatigue),
        (EffectTarget::Player(p), EffectKey::Attribute(attr)) => Some(p.attributes.get_mut(attr)),
        (EffectTarget::Relationship(r), EffectKey::CaptainRel) => Some(&mut r.captain_rel),
        (EffectTarget::Relationship(r), EffectKey::BatteryRel) => Some(&mut r.battery_rel),
        (EffectTarget::Relationship(r), EffectKey::RivalryScore) => Some(&mut r.rivalry_score),
        (EffectTarget::Relationship(r), EffectKey::CoachTrust) => Some(&mut r.coach_trust),
        (EffectTarget::Relationship(r), EffectKey::Friendship) => Some(&mut r.friendship),
        _ => None,
    }
}

/// Apply one effect. Returns `None` when `key` does not belong to the target.
///
/// Relationship values stay within 0..=100; player values are not clamped.
pub fn apply_effect(
    target: &mut EffectTarget<'_>,
    key: EffectKey,
    delta: i32,
) -> Option<AppliedEffect> {
    let clamp = matches!(target, EffectTarget::Relationship(_));
    let value = slot(target, key)?;
    let before = *value;
    let raw = before.saturating_add(delta);
    *value = if clamp { clamp_bond(raw) } else { raw };
    Some(AppliedEffect { key: key.as_str().to_string(), before, after: *value })
}

/// Parse every key first, then apply in order. An unknown key aborts before
/// anything is touched; keys for the other record type are skipped.
pub fn apply_effects(
    target: &mut EffectTarget<'_>,
    effects: &[(String, i32)],
) -> Result<Vec<AppliedEffect>, EffectError> {
    let parsed = effects
        .iter()
        .map(|(name, delta)| name.parse::<EffectKey>().map(|key| (key, *delta)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parsed
        .into_iter()
        .filter_map(|(key, delta)| apply_effect(target, key, delta))
        .collect())
}
