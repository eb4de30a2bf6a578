//! Terminal I/O for the `kb` front-end: live reaction timing and bracket
//! narration. Both are generic over the reader/writer so tests can script
//! the input.
//!
//! Stdin can only be locked once per thread, so the timing source and the
//! narrator read through one [`SharedInput`].

use kb_core::minigame::{ClutchPitch, PitchMinigameContext, TimingSource};
use kb_core::models::Team;
use kb_core::tournament::{MatchFixture, MatchOutcome, TournamentObserver};
use std::cell::RefCell;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::rc::Rc;
use std::time::Instant;

/// Line reader handed to several collaborators on the same thread.
pub struct SharedInput<R>(Rc<RefCell<R>>);

impl<R> Clone for SharedInput<R> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl SharedInput<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> SharedInput<R> {
    pub fn new(reader: R) -> Self {
        Self(Rc::new(RefCell::new(reader)))
    }

    fn read_line(&self, buf: &mut String) -> io::Result<usize> {
        self.0.borrow_mut().read_line(buf)
    }
}

/// What the user typed at a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Confirm {
    Go,
    Auto,
    Closed,
}

/// Reads lines until one is recognized. Anything else reprompts; end of
/// input counts as [`Confirm::Closed`].
fn confirm<R: BufRead, W: Write>(input: &SharedInput<R>, out: &mut W, prompt: &str) -> Confirm {
    loop {
        let _ = write!(out, "{prompt} ");
        let _ = out.flush();
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return Confirm::Closed,
            Ok(_) => {}
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "y" | "go" => return Confirm::Go,
            "a" | "auto" => return Confirm::Auto,
            other => {
                let _ = writeln!(out, "  '{other}' not recognized. Enter to go, 'a' for auto.");
            }
        }
    }
}

// ============================================================================
// Timing
// ============================================================================

/// Measures the time between two Enter presses.
pub struct StdinTiming<R, W> {
    input: SharedInput<R>,
    out: W,
}

impl StdinTiming<StdinLock<'static>, Stdout> {
    pub fn stdout(input: SharedInput<StdinLock<'static>>) -> Self {
        Self::new(input, io::stdout())
    }
}

impl<R: BufRead, W: Write> StdinTiming<R, W> {
    pub fn new(input: SharedInput<R>, out: W) -> Self {
        Self { input, out }
    }
}

impl<R: BufRead, W: Write> TimingSource for StdinTiming<R, W> {
    fn reaction_elapsed(&mut self, context: &PitchMinigameContext, target_window: f64) -> f64 {
        let _ = writeln!(
            self.out,
            "\n{} | inning {} {:?}, count {}, {} on, diff {:+}",
            context.label,
            context.inning,
            context.half,
            context.count,
            context.runners_on,
            context.score_diff
        );
        let _ = writeln!(
            self.out,
            "Target window: 0.5 ± {target_window:.3}. The cursor sweeps 0 → 1 → 0."
        );
        if confirm(&self.input, &mut self.out, "Enter to start the cursor >") == Confirm::Closed {
            return 0.0;
        }

        let start = Instant::now();
        let _ = write!(self.out, "...Enter to snap! ");
        let _ = self.out.flush();
        let mut line = String::new();
        let _ = self.input.read_line(&mut line);
        start.elapsed().as_secs_f64()
    }
}

// ============================================================================
// Narration
// ============================================================================

/// Prints bracket progress. In interactive mode it pauses before each round
/// until the user confirms; answering `a` stops the pauses.
pub struct ConsoleObserver<R, W> {
    input: Option<SharedInput<R>>,
    out: W,
}

impl ConsoleObserver<StdinLock<'static>, Stdout> {
    /// Without input the narration never pauses.
    pub fn stdout(input: Option<SharedInput<StdinLock<'static>>>) -> Self {
        Self::new(input, io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleObserver<R, W> {
    pub fn new(input: Option<SharedInput<R>>, out: W) -> Self {
        Self { input, out }
    }

    fn line(&mut self, text: String) {
        let _ = writeln!(self.out, "{text}");
    }
}

impl<R: BufRead, W: Write> TournamentObserver for ConsoleObserver<R, W> {
    fn tournament_started(&mut self, title: &str, entrants: &[Team]) {
        self.line(format!("\n=== {title} === {} schools", entrants.len()));
    }

    fn invitation_decided(&mut self, team: &Team, qualified: bool) {
        if qualified {
            self.line(format!("{} received an invitation!", team.name));
        } else {
            self.line(format!("{} was not invited (prestige {}).", team.name, team.prestige));
        }
    }

    fn round_started(&mut self, round: u32, teams: &[Team]) {
        self.line(format!("\n--- Round {round} ({} schools) ---", teams.len()));
        if let Some(input) = &self.input {
            match confirm(input, &mut self.out, "Enter to play the round, 'a' to auto-run >") {
                Confirm::Go => {}
                Confirm::Auto | Confirm::Closed => self.input = None,
            }
        }
    }

    fn match_resolved(&mut self, fixture: &MatchFixture<'_>, outcome: &MatchOutcome) {
        if fixture.silent {
            return;
        }
        let winner = if outcome.winner == fixture.home.id { fixture.home } else { fixture.away };
        let upset = if outcome.upset { " (upset!)" } else { "" };
        self.line(format!(
            "{}: {} @ {}  {}  -> {}{upset}",
            fixture.label, fixture.away.name, fixture.home.name, outcome.score, winner.name
        ));
    }

    fn clutch_pitch(&mut self, pitch: &ClutchPitch) {
        let forced = match pitch.force_result {
            Some(result) => format!(" [{result:?}]"),
            None => String::new(),
        };
        self.line(format!(
            "  Clutch pitch for {}: quality {:.3} - {}{forced}",
            pitch.team_name, pitch.quality, pitch.feedback
        ));
    }

    fn fatigue_warning(&mut self, team: &Team, avg_fatigue: f32, avg_stamina: f32) {
        self.line(format!(
            "  ! {} is wearing down: fatigue {avg_fatigue:.0}, stamina {avg_stamina:.0}",
            team.name
        ));
    }

    fn eliminated(&mut self, team: &Team, round: u32) {
        self.line(format!("{} is eliminated in round {round}.", team.name));
    }

    fn champion_crowned(&mut self, title: &str, champion: &Team, user_won: bool) {
        if user_won {
            self.line(format!("\n*** {} WIN THE {title}! ***", champion.name));
        } else {
            self.line(format!("\n{title} champion: {}", champion.name));
        }
    }
}
