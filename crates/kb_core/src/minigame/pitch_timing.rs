//! # Pitch Timing Engine
//!
//! Reflex slider challenge used on high-leverage pitches. A cursor sweeps
//! 0 → 1 → 0 at a constant rate (triangular wave); the player stops it and
//! the distance from dead-centre, relative to a control-dependent target
//! window, becomes a quality score in [0, 1].
//!
//! The engine is a total function: every input is clamped, nothing fails.
//! Blocking for a key press is the caller's business; the engine only ever
//! sees the elapsed reaction time.

use serde::{Deserialize, Serialize};

pub const MIN_TARGET_WINDOW: f64 = 0.05;
pub const MAX_TARGET_WINDOW: f64 = 0.28;
pub const MAX_CONTROL: f64 = 100.0;
pub const MAX_FATIGUE: f64 = 120.0;
const MIN_PERIOD: f64 = 0.4;

/// Which half of the inning the pitch is thrown in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Half {
    #[default]
    Top,
    #[serde(rename = "Bot")]
    Bottom,
}

/// Narrative framing for one reflex challenge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitchMinigameContext {
    pub inning: u8,
    pub half: Half,
    pub count: String,
    pub runners_on: u8,
    pub score_diff: i32,
    pub label: String,
}

impl Default for PitchMinigameContext {
    fn default() -> Self {
        Self {
            inning: 9,
            half: Half::Top,
            count: "3-2".to_string(),
            runners_on: 2,
            score_diff: 0,
            label: "Elimination Pitch".to_string(),
        }
    }
}

/// Quality band of a resolved pitch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PitchFeedback {
    Perfect,
    Filthy,
    Competitive,
    MissedSpot,
    Meatball,
}

impl PitchFeedback {
    pub fn from_quality(quality: f64) -> Self {
        if quality >= 0.9 {
            PitchFeedback::Perfect
        } else if quality >= 0.75 {
            PitchFeedback::Filthy
        } else if quality >= 0.5 {
            PitchFeedback::Competitive
        } else if quality >= 0.25 {
            PitchFeedback::MissedSpot
        } else {
            PitchFeedback::Meatball
        }
    }

    /// Short band name.
    pub fn label(&self) -> &'static str {
        match self {
            PitchFeedback::Perfect => "Perfect",
            PitchFeedback::Filthy => "Filthy",
            PitchFeedback::Competitive => "Competitive",
            PitchFeedback::MissedSpot => "Missed spot",
            PitchFeedback::Meatball => "Meatball",
        }
    }

    /// Line shown to the player after the pitch.
    pub fn message(&self) -> &'static str {
        match self {
            PitchFeedback::Perfect => "Perfect paint!",
            PitchFeedback::Filthy => "Filthy black dot.",
            PitchFeedback::Competitive => "Competitive strike.",
            PitchFeedback::MissedSpot => "Missed spot, danger zone.",
            PitchFeedback::Meatball => "Meatball served up.",
        }
    }
}

/// Outcome payload of one reflex challenge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitchMinigameResult {
    /// 0.0..=1.0, rounded to 3 decimals
    pub quality: f64,
    /// Distance of the cursor from dead-centre, 0.0..=0.5
    pub deviation: f64,
    pub cursor_position: f64,
    /// Clamped difficulty, rounded to 2 decimals
    pub difficulty: f64,
    pub feedback: String,
    pub band: PitchFeedback,
    pub context: PitchMinigameContext,
    /// 0.05..=0.28, rounded to 3 decimals
    pub target_window: f64,
}

/// Clamp that maps NaN to the lower bound.
fn clamp(value: f64, low: f64, high: f64) -> f64 {
    if value.is_nan() {
        low
    } else {
        value.clamp(low, high)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Acceptance window: control widens it, difficulty narrows it.
pub fn target_window(control: f64, difficulty: f64) -> f64 {
    let control = clamp(control, 0.0, MAX_CONTROL);
    let difficulty = clamp(difficulty, 0.0, 1.0);
    clamp(
        0.18 + (control - 50.0) / 650.0 - difficulty * 0.08,
        MIN_TARGET_WINDOW,
        MAX_TARGET_WINDOW,
    )
}

/// Sweep rate of the cursor (full sweeps per 1.6s).
pub fn cursor_speed(fatigue: f64, difficulty: f64) -> f64 {
    let fatigue = clamp(fatigue, 0.0, MAX_FATIGUE);
    let difficulty = clamp(difficulty, 0.0, 1.0);
    1.2 + difficulty * 0.6 + fatigue / 200.0
}

/// Triangular-wave cursor position after `elapsed` seconds.
pub fn cursor_position(elapsed: f64, speed: f64) -> f64 {
    let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
    let period = (1.6 / speed).max(MIN_PERIOD);
    let cycle = (elapsed % period) / period;
    let double_cycle = cycle * 2.0;
    if double_cycle <= 1.0 {
        double_cycle
    } else {
        2.0 - double_cycle
    }
}

/// Resolve a pitch from an already-measured reaction time.
pub fn resolve_with_elapsed(
    control: f64,
    fatigue: f64,
    difficulty: f64,
    elapsed: f64,
    context: PitchMinigameContext,
) -> PitchMinigameResult {
    let control = clamp(control, 0.0, MAX_CONTROL);
    let fatigue = clamp(fatigue, 0.0, MAX_FATIGUE);
    let difficulty = clamp(difficulty, 0.0, 1.0);

    let window = target_window(control, difficulty);
    let speed = cursor_speed(fatigue, difficulty);
    let position = cursor_position(elapsed, speed);
    let deviation = (0.5 - position).abs();
    let normalized = clamp(1.0 - deviation / window, 0.0, 1.0);
    let fatigue_penalty = fatigue / 160.0;
    let quality = clamp(normalized * (1.0 - fatigue_penalty) + (control - 50.0) / 200.0, 0.0, 1.0);
    let band = PitchFeedback::from_quality(quality);

    log::debug!(
        "pitch resolved: elapsed={:.3}s pos={:.3} window={:.3} quality={:.3} ({})",
        elapsed,
        position,
        window,
        quality,
        band.label()
    );

    PitchMinigameResult {
        quality: round_to(quality, 3),
        deviation: round_to(deviation, 3),
        cursor_position: round_to(position, 3),
        difficulty: round_to(difficulty, 2),
        feedback: band.message().to_string(),
        band,
        context,
        target_window: round_to(window, 3),
    }
}
