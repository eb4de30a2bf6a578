//! Letter grades and name masking used by the fog-of-war views.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity-graded letter for a 0-100 composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
}

/// (minimum value, grade), best first.
const GRADE_BUCKETS: [(i32, Grade); 6] = [
    (92, Grade::S),
    (82, Grade::A),
    (70, Grade::B),
    (60, Grade::C),
    (50, Grade::D),
    (40, Grade::E),
];

impl Grade {
    pub fn from_value(value: i32) -> Self {
        GRADE_BUCKETS
            .iter()
            .find(|(threshold, _)| value >= *threshold)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }

    /// Approximate grade shown at basic scouting, e.g. `~B?`.
    pub fn estimate(&self) -> String {
        format!("~{}?", self.letter())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Grade band shown instead of an exact value. `None` reads as unknown.
pub fn grade_range(value: Option<i32>) -> &'static str {
    match value {
        None => "??",
        Some(v) if v >= 82 => "A?",
        Some(v) if v >= 70 => "B–A?",
        Some(v) if v >= 60 => "C–B",
        Some(v) if v >= 50 => "D–C",
        Some(_) => "E–D",
    }
}

/// Placeholder for a name that cannot be masked.
pub const UNKNOWN_NAME: &str = "??";

/// Initials joined by periods: "Taro Yamada" becomes "T.Y.".
pub fn mask_name(full_name: Option<&str>) -> String {
    let initials: Vec<String> = full_name
        .unwrap_or_default()
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .map(String::from)
        .collect();
    if initials.is_empty() {
        return UNKNOWN_NAME.to_string();
    }
    format!("{}.", initials.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grade_buckets() {
        assert_eq!(Grade::from_value(100), Grade::S);
        assert_eq!(Grade::from_value(92), Grade::S);
        assert_eq!(Grade::from_value(91), Grade::A);
        assert_eq!(Grade::from_value(70), Grade::B);
        assert_eq!(Grade::from_value(60), Grade::C);
        assert_eq!(Grade::from_value(50), Grade::D);
        assert_eq!(Grade::from_value(40), Grade::E);
        assert_eq!(Grade::from_value(39), Grade::F);
        assert_eq!(Grade::from_value(-5), Grade::F);
        assert_eq!(Grade::B.estimate(), "~B?");
    }

    #[test]
    fn test_grade_ranges() {
        assert_eq!(grade_range(None), "??");
        assert_eq!(grade_range(Some(90)), "A?");
        assert_eq!(grade_range(Some(75)), "B–A?");
        assert_eq!(grade_range(Some(60)), "C–B");
        assert_eq!(grade_range(Some(55)), "D–C");
        assert_eq!(grade_range(Some(12)), "E–D");
    }

    #[test]
    fn test_mask_name() {
        assert_eq!(mask_name(Some("Taro Yamada")), "T.Y.");
        assert_eq!(mask_name(Some("Ichiro")), "I.");
        assert_eq!(mask_name(Some("  Shohei   Ohtani ")), "S.O.");
        assert_eq!(mask_name(Some("")), UNKNOWN_NAME);
        assert_eq!(mask_name(Some("   ")), UNKNOWN_NAME);
        assert_eq!(mask_name(None), UNKNOWN_NAME);
    }

    proptest! {
        /// Masked names never leak more than one character per token
        #[test]
        fn prop_mask_name_shape(name in "[A-Za-z ]{0,40}") {
            let masked = mask_name(Some(&name));
            let tokens = name.split_whitespace().count();
            if tokens == 0 {
                prop_assert_eq!(masked, UNKNOWN_NAME);
            } else {
                prop_assert_eq!(masked.len(), tokens * 2);
                prop_assert!(masked.ends_with('.'));
            }
        }
    }
}
