//! kb - command line front-end for the kb_core gameplay engine
//!
//! Plays the interactive side of the engine: live reaction timing for the
//! pitch minigame, bracket narration, and scouting reports off a league file.

mod interactive;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use interactive::{ConsoleObserver, SharedInput, StdinTiming};
use kb_core::minigame::{resolve_pitch, AutoTiming, FixedTiming, PitchMinigameContext};
use kb_core::models::TeamId;
use kb_core::scouting::{build_scouting_report, perform_scout_action, scout_cost};
use kb_core::store::{InMemoryLeague, ScoutingLedger, TeamRepository};
use kb_core::tournament::{BracketOrchestrator, QuickSimResolver};
use kb_core::GameConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kb")]
#[command(about = "High school baseball tournaments, clutch pitches and scouting")]
#[command(long_about = None)]
struct Cli {
    /// Game config JSON (falls back to KB_CONFIG_PATH, then defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one clutch pitch
    Pitch {
        /// Pitcher control (0-100)
        #[arg(long)]
        control: f64,

        /// Pitcher fatigue (0-120)
        #[arg(long, default_value_t = 0.0)]
        fatigue: f64,

        /// Situation difficulty (0.0-1.0)
        #[arg(long, default_value_t = 0.5)]
        difficulty: f64,

        /// Reaction time in seconds, skipping the live prompt
        #[arg(long, conflicts_with = "interactive")]
        elapsed: Option<f64>,

        /// Time the pitch with two Enter presses
        #[arg(long)]
        interactive: bool,

        /// Seed for an auto-resolved reaction time
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show a scouting report, optionally buying one more level first
    Scout {
        /// League JSON file
        #[arg(long)]
        league: PathBuf,

        /// Team to scout
        #[arg(long)]
        team: TeamId,

        /// Knowledge level 0-3 (defaults to what has been bought)
        #[arg(long)]
        level: Option<i32>,

        /// Rivalry score override
        #[arg(long)]
        rivalry: Option<i32>,

        /// Buy the next level with this school's budget
        #[arg(long)]
        buy_as: Option<TeamId>,

        /// Write the league back after a purchase
        #[arg(long)]
        save: Option<PathBuf>,

        /// Print the report as JSON instead of a scouting card
        #[arg(long)]
        json: bool,
    },

    /// Run a tournament bracket
    Tournament {
        /// League JSON file
        #[arg(long)]
        league: PathBuf,

        /// The user's school
        #[arg(long)]
        user: TeamId,

        #[arg(long, value_enum, default_value_t = Mode::Summer)]
        mode: Mode,

        /// RNG seed (same seed = same bracket)
        #[arg(long)]
        seed: Option<u64>,

        /// Pause between rounds and time clutch pitches live
        #[arg(long)]
        interactive: bool,

        /// Write the league (with updated prestige) here
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Summer,
    Spring,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::from_env().context("failed to load config from KB_CONFIG_PATH")?,
    };

    match cli.command {
        Commands::Pitch { control, fatigue, difficulty, elapsed, interactive, seed } => {
            run_pitch(&config, control, fatigue, difficulty, elapsed, interactive, seed)
        }
        Commands::Scout { league, team, level, rivalry, buy_as, save, json } => {
            let league = load_league(&league)?;
            let request = ScoutRequest { team, level, rivalry, buy_as, json };
            run_scout(&config, league, request, save.as_deref())
        }
        Commands::Tournament { league, user, mode, seed, interactive, save } => {
            run_tournament(&config, &league, user, mode, seed, interactive, save.as_deref())
        }
    }
}

fn load_league(path: &Path) -> Result<InMemoryLeague> {
    InMemoryLeague::load(path).with_context(|| format!("failed to load league {}", path.display()))
}

fn save_league(league: &InMemoryLeague, path: &Path) -> Result<()> {
    league.save(path).with_context(|| format!("failed to save league {}", path.display()))?;
    println!("League saved to {}", path.display());
    Ok(())
}

fn seeded(seed: Option<u64>) -> (u64, ChaCha8Rng) {
    let seed = seed.unwrap_or_else(rand::random);
    (seed, ChaCha8Rng::seed_from_u64(seed))
}

fn run_pitch(
    config: &GameConfig,
    control: f64,
    fatigue: f64,
    difficulty: f64,
    elapsed: Option<f64>,
    interactive: bool,
    seed: Option<u64>,
) -> Result<()> {
    let context = PitchMinigameContext::default();
    let result = if interactive {
        let mut timing = StdinTiming::stdout(SharedInput::stdin());
        resolve_pitch(control, fatigue, difficulty, context, &mut timing)
    } else if let Some(elapsed) = elapsed {
        resolve_pitch(control, fatigue, difficulty, context, &mut FixedTiming::new(elapsed))
    } else {
        let (seed, rng) = seeded(seed);
        log::debug!("Auto-resolving pitch with seed {seed}");
        let mut timing = AutoTiming::new(rng, config.minigame.auto_elapsed_max);
        resolve_pitch(control, fatigue, difficulty, context, &mut timing)
    };

    println!("\n{}", result.feedback);
    println!(
        "quality {:.3} | cursor {:.3} | deviation {:.3} | window ±{:.3} | difficulty {:.2}",
        result.quality,
        result.cursor_position,
        result.deviation,
        result.target_window,
        result.difficulty
    );
    Ok(())
}

/// What `kb scout` was asked to show.
struct ScoutRequest {
    team: TeamId,
    level: Option<i32>,
    rivalry: Option<i32>,
    buy_as: Option<TeamId>,
    json: bool,
}

fn run_scout(
    config: &GameConfig,
    mut league: InMemoryLeague,
    request: ScoutRequest,
    save: Option<&Path>,
) -> Result<()> {
    let team_id = request.team;
    if let Some(user_id) = request.buy_as {
        let known = league.scouting_record(team_id).knowledge_level;
        let cost = scout_cost(known, config.scouting.base_scout_cost);
        let result = perform_scout_action(&mut league, user_id, team_id, cost)
            .context("scouting purchase failed")?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        if result.success() {
            if let Some(path) = save {
                save_league(&league, path)?;
            }
        }
    }

    let record = league.scouting_record(team_id);
    let level = request.level.unwrap_or(i32::from(record.knowledge_level));
    let rivalry = request.rivalry.unwrap_or(record.rivalry_score);
    let report = build_scouting_report(&league, team_id, level, rivalry, &config.scouting)
        .with_context(|| format!("no team {team_id} in the league"))?;

    if request.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::scouting_card(&report));
    }
    Ok(())
}

fn run_tournament(
    config: &GameConfig,
    league_path: &Path,
    user_id: TeamId,
    mode: Mode,
    seed: Option<u64>,
    interactive: bool,
    save: Option<&Path>,
) -> Result<()> {
    let mut league = load_league(league_path)?;
    let (seed, mut rng) = seeded(seed);
    let mut resolver = QuickSimResolver::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));
    log::info!("Tournament seed {seed}");

    let outcome = {
        let input = interactive.then(SharedInput::stdin);
        let mut orchestrator = BracketOrchestrator::new(&mut league, &mut resolver, &mut rng)
            .with_config(config.clone())
            .with_observer(ConsoleObserver::stdout(input.clone()));
        if let Some(input) = input {
            orchestrator = orchestrator.with_timing(StdinTiming::stdout(input));
        }
        match mode {
            Mode::Summer => orchestrator.run_summer_tournament(user_id, None),
            Mode::Spring => orchestrator.run_spring_invitational(user_id),
        }
    }
    .context("tournament failed")?;

    println!("\n{}", serde_json::to_string_pretty(&outcome)?);
    if let Some(team) = league.team(user_id) {
        println!("{} prestige: {}", team.name, team.prestige);
    }
    if let Some(path) = save {
        save_league(&league, path)?;
    }
    Ok(())
}
