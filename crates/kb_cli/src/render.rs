//! Plain-text scouting cards.

use kb_core::models::AttributeKey;
use kb_core::scouting::{RatingDimension, ScoutingReport, ScoutingView};
use std::fmt::Write;

const LABEL_WIDTH: usize = 12;

/// Render a report the way the scout would hand it over.
pub fn scouting_card(report: &ScoutingReport) -> String {
    let mut card = String::new();
    let header = &report.header;
    let _ = write!(card, "{}", header.name);
    if let Some(prefecture) = &header.prefecture {
        let _ = write!(card, " ({prefecture})");
    }
    let _ = writeln!(card, "  [intel: {}]", report.fog_label);
    if report.rivalry_penalty_applied() {
        let _ = writeln!(
            card,
            "  rivalry clouds the scouting: bought {}, seeing {}",
            report.purchased_level.label(),
            report.level.label()
        );
    }
    if let Some(prestige) = header.prestige {
        let _ = write!(card, "  prestige {prestige}");
        if let Some(philosophy) = &header.philosophy {
            let _ = write!(card, " | {philosophy}");
        }
        let _ = writeln!(card);
    }

    match &report.view {
        ScoutingView::Blackout => {
            let _ = writeln!(card, "  No intel on this school.");
        }
        ScoutingView::Basic { ratings } => {
            for r in ratings {
                rating_line(&mut card, r.dimension, &r.grade);
            }
        }
        ScoutingView::Partial { ratings, roster, tendencies } => {
            for r in ratings {
                rating_line(&mut card, r.dimension, r.range);
            }
            let _ = writeln!(card, "  Roster");
            for p in roster {
                let number = jersey(p.jersey_number);
                let _ = write!(card, "   {number} {:<3} {:<8}", p.position, p.masked_name);
                for a in &p.attributes {
                    let _ = write!(card, " {} {:<5}", a.attribute.abbrev(), a.range);
                }
                let _ = writeln!(card);
            }
            notes(&mut card, "Tendencies", tendencies);
        }
        ScoutingView::Full { ratings, roster, strengths, weaknesses } => {
            for dimension in RatingDimension::ALL {
                let value = format!("{} ({})", ratings.get(dimension), ratings.grade(dimension));
                rating_line(&mut card, dimension, &value);
            }
            let _ = writeln!(card, "  Roster");
            for p in roster {
                let number = jersey(p.jersey_number);
                let _ = write!(card, "   {number} {:<3} {:<18}", p.position, p.name);
                for key in AttributeKey::ALL {
                    let _ = write!(card, " {} {:>3}", key.abbrev(), p.attributes.get(key));
                }
                let _ = writeln!(card);
            }
            notes(&mut card, "Strengths", strengths);
            notes(&mut card, "Weaknesses", weaknesses);
        }
    }
    card
}

fn rating_line(card: &mut String, dimension: RatingDimension, value: &str) {
    let _ = writeln!(card, "  {:<width$} {value}", dimension.label(), width = LABEL_WIDTH);
}

fn jersey(number: Option<u8>) -> String {
    match number {
        Some(n) => format!("#{n:<2}"),
        None => "#- ".to_string(),
    }
}

fn notes(card: &mut String, title: &str, lines: &[&str]) {
    if lines.is_empty() {
        return;
    }
    let _ = writeln!(card, "  {title}");
    for line in lines {
        let _ = writeln!(card, "   - {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::config::ScoutingConfig;
    use kb_core::models::{Era, Player, PlayerAttributes, Position, Team};
    use kb_core::scouting::build_report;

    fn team() -> Team {
        let player = |id: u32, name: &str, position| Player {
            id,
            name: name.into(),
            position,
            jersey_number: Some(id as u8),
            overall: 70,
            attributes: PlayerAttributes { velocity: 88, ..Default::default() },
            fatigue: 0,
            morale: 60,
        };
        Team {
            id: 7,
            name: "Seido".into(),
            prestige: 62,
            era: Era::Ascending,
            prefecture: Some("Tokyo".into()),
            philosophy: Some("Small ball".into()),
            budget: 0,
            players: vec![
                player(1, "Eijun Sawamura", Position::Pitcher),
                player(2, "Kazuya Miyuki", Position::Catcher),
            ],
        }
    }

    #[test]
    fn test_blackout_card_hides_everything() {
        let card = scouting_card(&build_report(&team(), 0, 0, &ScoutingConfig::default()));
        assert!(card.starts_with("Seido  [intel: BLACKOUT]"));
        assert!(card.contains("No intel"));
        assert!(!card.contains("Tokyo"));
    }

    #[test]
    fn test_masked_card_uses_initials_and_abbreviations() {
        let card = scouting_card(&build_report(&team(), 2, 0, &ScoutingConfig::default()));
        assert!(card.contains("Seido (Tokyo)  [intel: MASKED]"));
        assert!(card.contains("prestige 62 | Small ball"));
        assert!(card.contains("Coaching IQ"));
        assert!(card.contains("E.S."));
        assert!(card.contains("VEL"));
        assert!(!card.contains("Sawamura"));
    }

    #[test]
    fn test_full_card_lists_exact_attributes() {
        let card = scouting_card(&build_report(&team(), 3, 0, &ScoutingConfig::default()));
        assert!(card.contains("Kazuya Miyuki"));
        assert!(card.contains("VEL  88"));
        assert!(card.contains("THR  50"));
        assert!(card.contains("Strengths"));
    }

    #[test]
    fn test_rivalry_penalty_is_called_out() {
        let card = scouting_card(&build_report(&team(), 3, 95, &ScoutingConfig::default()));
        assert!(card.contains("bought FULL, seeing MASKED"));
    }
}
