//! curl - headless curling match runner
//!
//! Plays matches between the autopilot (human side) and the computer
//! strategy on a simulated sheet.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use curling_match::{
    config::MatchSettings,
    game::{MatchEngine, MatchLogger, MatchOutcome, VerbosityLevel},
    sim::{
        begin_match, headless_collaborators, run_match, step_frame, Autopilot, MemoryLeaderboard,
        SimulatedRink,
    },
};
use std::path::PathBuf;
use std::time::Duration;

/// Frame step used when no frame rate is requested
const DEFAULT_DT: f64 = 1.0 / 60.0;
/// Safety stop for a match that never concludes
const MAX_FRAMES: u64 = 1_000_000;

/// Verbosity level for match output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "curl")]
#[command(about = "Curling match engine - headless match runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct MatchArgs {
    /// JSON settings file; command-line flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Computer difficulty (normal, hard)
    #[arg(long)]
    difficulty: Option<String>,

    /// Pieces per side per set
    #[arg(long)]
    pieces: Option<i64>,

    /// Sets per match
    #[arg(long)]
    sets: Option<i64>,

    /// Random seed for deterministic matches
    #[arg(long)]
    seed: Option<u64>,

    /// Verbosity level for match output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, short = 'v')]
    verbosity: Option<VerbosityArg>,

    /// Pace frames in real time at this rate instead of running flat out
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single match
    Play {
        #[command(flatten)]
        args: MatchArgs,

        /// Write the leaderboard record as JSON
        #[arg(long, value_name = "FILE")]
        record: Option<PathBuf>,
    },

    /// Play many matches and report aggregate results
    Series {
        #[command(flatten)]
        args: MatchArgs,

        /// Number of matches to play
        #[arg(long, short = 'm', default_value_t = 10)]
        matches: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { args, record } => run_play(args, record).await?,
        Commands::Series { args, matches } => run_series(args, matches).await?,
    }

    Ok(())
}

fn load_settings(args: &MatchArgs) -> anyhow::Result<MatchSettings> {
    let mut settings = match &args.config {
        Some(path) => MatchSettings::from_json_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => MatchSettings::default(),
    };
    if let Some(difficulty) = &args.difficulty {
        settings.difficulty = difficulty.clone();
    }
    if let Some(pieces) = args.pieces {
        settings.pieces_per_side = pieces;
    }
    if let Some(sets) = args.sets {
        settings.sets_per_match = sets;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    Ok(settings)
}

fn build_engine(
    settings: MatchSettings,
    verbosity: VerbosityLevel,
    leaderboard: &MemoryLeaderboard,
) -> MatchEngine {
    let collaborators = headless_collaborators(SimulatedRink::new(), leaderboard.clone());
    MatchEngine::with_logger(
        Box::new(settings),
        collaborators,
        MatchLogger::with_verbosity(verbosity),
    )
}

/// Drive one match to its end, optionally paced by a tokio interval
async fn pump(
    engine: &mut MatchEngine,
    autopilot: &mut Autopilot,
    fps: Option<u32>,
) -> anyhow::Result<u64> {
    let frames = match fps {
        None => run_match(engine, autopilot, DEFAULT_DT, MAX_FRAMES)
            .context("match failed before finishing")?,
        Some(fps) => {
            let dt = 1.0 / f64::from(fps.max(1));
            let mut ticker = tokio::time::interval(Duration::from_secs_f64(dt));
            begin_match(engine, autopilot).context("match refused to start")?;

            let mut frames = 0;
            let mut in_progress = *engine.outcome() == MatchOutcome::InProgress;
            while in_progress && frames < MAX_FRAMES {
                ticker.tick().await;
                in_progress = step_frame(engine, autopilot, dt)?;
                frames += 1;
            }
            frames
        }
    };

    if *engine.outcome() == MatchOutcome::InProgress {
        engine.stop();
        bail!("match did not finish within {MAX_FRAMES} frames");
    }
    Ok(frames)
}

async fn run_play(args: MatchArgs, record: Option<PathBuf>) -> anyhow::Result<()> {
    let settings = load_settings(&args)?;
    let verbosity = args.verbosity.map_or(VerbosityLevel::Normal, VerbosityLevel::from);
    let leaderboard = MemoryLeaderboard::new();
    let mut engine = build_engine(settings.clone(), verbosity, &leaderboard);
    let mut autopilot = Autopilot::new(settings.seed.unwrap_or_else(rand::random));

    let frames = pump(&mut engine, &mut autopilot, args.fps).await?;

    match engine.outcome() {
        MatchOutcome::Completed { score_a, score_b } => {
            println!("Final score: A {score_a} - B {score_b} ({frames} frames)");
        }
        other => println!("Match ended without a result: {other:?}"),
    }

    if let Some(path) = record {
        let json = leaderboard.to_json()?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write record to {}", path.display()))?;
    }
    Ok(())
}

async fn run_series(args: MatchArgs, matches: u64) -> anyhow::Result<()> {
    let settings = load_settings(&args)?;
    let verbosity = args.verbosity.map_or(VerbosityLevel::Silent, VerbosityLevel::from);
    let base_seed = settings.seed.unwrap_or_else(rand::random);
    let leaderboard = MemoryLeaderboard::new();

    println!("=== Series: {matches} matches, {} difficulty ===", settings.difficulty);
    let start = std::time::Instant::now();

    for index in 0..matches {
        let seed = base_seed.wrapping_add(index);
        let match_settings = MatchSettings {
            seed: Some(seed),
            ..settings.clone()
        };
        let mut engine = build_engine(match_settings, verbosity, &leaderboard);
        let mut autopilot = Autopilot::new(seed);
        pump(&mut engine, &mut autopilot, args.fps)
            .await
            .with_context(|| format!("match {} (seed {seed}) failed", index + 1))?;
    }

    let records = leaderboard.records();
    let wins_a = records.iter().filter(|r| r.score_a > r.score_b).count();
    let wins_b = records.iter().filter(|r| r.score_b > r.score_a).count();
    let ties = records.len() - wins_a - wins_b;
    let points_a: u32 = records.iter().map(|r| r.score_a).sum();
    let points_b: u32 = records.iter().map(|r| r.score_b).sum();
    let played = records.len().max(1) as f64;

    println!("Side A (autopilot) wins: {wins_a}");
    println!("Side B (computer) wins:  {wins_b}");
    println!("Ties:                    {ties}");
    println!(
        "Average score:           A {:.2} - B {:.2}",
        f64::from(points_a) / played,
        f64::from(points_b) / played
    );
    println!("Elapsed: {:.2?}", start.elapsed());
    Ok(())
}
