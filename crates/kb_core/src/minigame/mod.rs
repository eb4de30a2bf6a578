//! # Pitch Minigame
//!
//! - `pitch_timing` - the pure timing → quality engine
//! - `timing` - reaction-time sources (auto, scripted, interactive)
//! - `clutch` - high-leverage detection and the payload handed to the match resolver

pub mod clutch;
pub mod pitch_timing;
pub mod timing;

pub use clutch::{ClutchPitch, ForcedResult, LeverageScenario, TeamSide};
pub use pitch_timing::{
    cursor_position, cursor_speed, resolve_with_elapsed, target_window, Half, PitchFeedback,
    PitchMinigameContext, PitchMinigameResult,
};
pub use timing::{auto_elapsed, AutoTiming, FixedTiming, TimingSource};

/// Run one pitch challenge, asking `timing` for the reaction time.
///
/// The target window is computed up front so an interactive source can
/// show it before the player commits.
pub fn resolve_pitch(
    control: f64,
    fatigue: f64,
    difficulty: f64,
    context: PitchMinigameContext,
    timing: &mut dyn TimingSource,
) -> PitchMinigameResult {
    let window = target_window(control, difficulty);
    let elapsed = timing.reaction_elapsed(&context, window);
    resolve_with_elapsed(control, fatigue, difficulty, elapsed, context)
}
