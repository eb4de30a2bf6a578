//! Reaction-time sources for the pitch minigame.
//!
//! Live play blocks on a human; simulation and tests supply the number
//! directly. Both sit behind [`TimingSource`] so the engine never waits.

use super::pitch_timing::PitchMinigameContext;
use rand::Rng;

/// Supplies the elapsed seconds between the start signal and the snap.
pub trait TimingSource {
    /// `target_window` is passed so interactive front-ends can draw it.
    fn reaction_elapsed(&mut self, context: &PitchMinigameContext, target_window: f64) -> f64;
}

impl<T: TimingSource + ?Sized> TimingSource for &mut T {
    fn reaction_elapsed(&mut self, context: &PitchMinigameContext, target_window: f64) -> f64 {
        (**self).reaction_elapsed(context, target_window)
    }
}

/// Random reaction time in `[0, max_elapsed)`.
pub fn auto_elapsed<R: Rng + ?Sized>(rng: &mut R, max_elapsed: f64) -> f64 {
    rng.gen::<f64>() * max_elapsed
}

/// [`auto_elapsed`] as a timing source, for non-interactive resolution.
#[derive(Debug)]
pub struct AutoTiming<R: Rng> {
    rng: R,
    max_elapsed: f64,
}

impl<R: Rng> AutoTiming<R> {
    pub fn new(rng: R, max_elapsed: f64) -> Self {
        Self { rng, max_elapsed }
    }
}

impl<R: Rng> TimingSource for AutoTiming<R> {
    fn reaction_elapsed(&mut self, _context: &PitchMinigameContext, _target_window: f64) -> f64 {
        auto_elapsed(&mut self.rng, self.max_elapsed)
    }
}

/// Replays a fixed script of reaction times, repeating the last one.
#[derive(Debug, Clone)]
pub struct FixedTiming {
    script: Vec<f64>,
    cursor: usize,
}

impl FixedTiming {
    pub fn new(elapsed: f64) -> Self {
        Self { script: vec![elapsed], cursor: 0 }
    }

    pub fn scripted(script: Vec<f64>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl TimingSource for FixedTiming {
    fn reaction_elapsed(&mut self, _context: &PitchMinigameContext, _target_window: f64) -> f64 {
        let Some(last) = self.script.last().copied() else {
            return 0.0;
        };
        let value = self.script.get(self.cursor).copied().unwrap_or(last);
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_auto_timing_range_and_determinism() {
        let ctx = PitchMinigameContext::default();
        let mut a = AutoTiming::new(ChaCha8Rng::seed_from_u64(7), 1.2);
        let mut b = AutoTiming::new(ChaCha8Rng::seed_from_u64(7), 1.2);
        for _ in 0..100 {
            let x = a.reaction_elapsed(&ctx, 0.2);
            assert!((0.0..1.2).contains(&x));
            assert_eq!(x, b.reaction_elapsed(&ctx, 0.2));
        }
    }

    #[test]
    fn test_auto_timing_matches_shared_draw() {
        let ctx = PitchMinigameContext::default();
        let mut timing = AutoTiming::new(ChaCha8Rng::seed_from_u64(42), 1.2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(timing.reaction_elapsed(&ctx, 0.2), auto_elapsed(&mut rng, 1.2));
        }
    }

    #[test]
    fn test_scripted_timing_repeats_last() {
        let ctx = PitchMinigameContext::default();
        let mut t = FixedTiming::scripted(vec![0.1, 0.2]);
        assert_eq!(t.reaction_elapsed(&ctx, 0.2), 0.1);
        assert_eq!(t.reaction_elapsed(&ctx, 0.2), 0.2);
        assert_eq!(t.reaction_elapsed(&ctx, 0.2), 0.2);
        assert_eq!(FixedTiming::scripted(vec![]).reaction_elapsed(&ctx, 0.2), 0.0);
    }
}
