use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable player identifier assigned by the persistence layer.
pub type PlayerId = u32;

/// Roster player as stored by the league.
///
/// # Boundary Contract
/// - Skill attributes are conventionally 0..=100 but are NOT clamped at rest;
///   growth events and hand-edited league files can push them outside.
/// - Every consumer (pitch engine, scouting ratings) clamps on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub jersey_number: Option<u8>,
    /// Scouting-style overall rating, used by the quick simulator.
    #[serde(default)]
    pub overall: i32,
    #[serde(default)]
    pub attributes: PlayerAttributes,
    /// Accumulated fatigue (0 = fresh). Can exceed 100 after a long week.
    #[serde(default)]
    pub fatigue: i32,
    #[serde(default = "default_morale")]
    pub morale: i32,
}

fn default_morale() -> i32 {
    60
}

impl Player {
    pub fn is_pitcher(&self) -> bool {
        self.position == Position::Pitcher
    }
}

/// The nine skill attributes tracked for every player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAttributes {
    // Pitching
    pub velocity: i32,
    pub control: i32,
    pub movement: i32,
    pub stamina: i32,
    // Batting / fielding
    pub contact: i32,
    pub power: i32,
    pub speed: i32,
    pub fielding: i32,
    pub throwing: i32,
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self {
            velocity: 50,
            control: 50,
            movement: 50,
            stamina: 50,
            contact: 50,
            power: 50,
            speed: 50,
            fielding: 50,
            throwing: 50,
        }
    }
}

impl PlayerAttributes {
    /// Read an attribute by key.
    pub fn get(&self, key: AttributeKey) -> i32 {
        match key {
            AttributeKey::Velocity => self.velocity,
            AttributeKey::Control => self.control,
            AttributeKey::Movement => self.movement,
            AttributeKey::Stamina => self.stamina,
            AttributeKey::Contact => self.contact,
            AttributeKey::Power => self.power,
            AttributeKey::Speed => self.speed,
            AttributeKey::Fielding => self.fielding,
            AttributeKey::Throwing => self.throwing,
        }
    }

    pub fn get_mut(&mut self, key: AttributeKey) -> &mut i32 {
        match key {
            AttributeKey::Velocity => &mut self.velocity,
            AttributeKey::Control => &mut self.control,
            AttributeKey::Movement => &mut self.movement,
            AttributeKey::Stamina => &mut self.stamina,
            AttributeKey::Contact => &mut self.contact,
            AttributeKey::Power => &mut self.power,
            AttributeKey::Speed => &mut self.speed,
            AttributeKey::Fielding => &mut self.fielding,
            AttributeKey::Throwing => &mut self.throwing,
        }
    }
}

/// Named handle for one of the nine skill attributes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    Velocity,
    Control,
    Movement,
    Stamina,
    Contact,
    Power,
    Speed,
    Fielding,
    Throwing,
}

impl AttributeKey {
    pub const ALL: [AttributeKey; 9] = [
        AttributeKey::Velocity,
        AttributeKey::Control,
        AttributeKey::Movement,
        AttributeKey::Stamina,
        AttributeKey::Contact,
        AttributeKey::Power,
        AttributeKey::Speed,
        AttributeKey::Fielding,
        AttributeKey::Throwing,
    ];

    /// Three-letter abbreviation used on scouting cards.
    pub fn abbrev(&self) -> &'static str {
        match self {
            AttributeKey::Velocity => "VEL",
            AttributeKey::Control => "CTL",
            AttributeKey::Movement => "MOV",
            AttributeKey::Stamina => "STA",
            AttributeKey::Contact => "CON",
            AttributeKey::Power => "POW",
            AttributeKey::Speed => "SPD",
            AttributeKey::Fielding => "FLD",
            AttributeKey::Throwing => "THR",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Position {
    Pitcher,
    Catcher,
    #[serde(rename = "First Base")]
    FirstBase,
    #[serde(rename = "Second Base")]
    SecondBase,
    #[serde(rename = "Third Base")]
    ThirdBase,
    Shortstop,
    #[serde(rename = "Left Field")]
    LeftField,
    #[serde(rename = "Center Field")]
    CenterField,
    #[serde(rename = "Right Field")]
    RightField,
    Utility,
}

impl Position {
    /// Short code for roster tables.
    pub fn code(&self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
            Position::Utility => "UT",
        }
    }

    /// The three attributes that matter most for a player at this position.
    pub fn key_attributes(&self) -> [AttributeKey; 3] {
        match self {
            Position::Pitcher => {
                [AttributeKey::Velocity, AttributeKey::Control, AttributeKey::Stamina]
            }
            _ => [AttributeKey::Contact, AttributeKey::Power, AttributeKey::Speed],
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
