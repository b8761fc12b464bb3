//! Headless collaborators and drivers
//!
//! Concrete rink, camera, scoring and leaderboard implementations that let
//! a match run without a scene: for the `curl` binary, benchmarks and tests.

pub mod autopilot;
pub mod camera;
pub mod leaderboard;
pub mod rink;
pub mod scoring;
pub mod scripted;

pub use autopilot::Autopilot;
pub use camera::{CameraCall, NullCamera, RecordingCamera};
pub use leaderboard::MemoryLeaderboard;
pub use rink::SimulatedRink;
pub use scoring::{FixedScoring, HouseScoring};
pub use scripted::ScriptedRink;

use crate::collab::Collaborators;
use crate::game::{MatchEngine, MatchOutcome};
use crate::Result;

/// Simulated sheet, house scoring, no camera, records into `leaderboard`
pub fn headless_collaborators(
    rink: SimulatedRink,
    leaderboard: MemoryLeaderboard,
) -> Collaborators {
    Collaborators::new(
        Box::new(rink),
        Box::new(NullCamera),
        Box::new(HouseScoring),
        Box::new(leaderboard),
    )
}

/// Reset the autopilot and start a fresh match
pub fn begin_match(engine: &mut MatchEngine, autopilot: &mut Autopilot) -> Result<()> {
    autopilot.reset();
    engine.start()
}

/// One frame: autopilot input, then the engine tick
///
/// Returns whether the match is still in progress afterwards.
pub fn step_frame(engine: &mut MatchEngine, autopilot: &mut Autopilot, dt: f64) -> Result<bool> {
    autopilot.drive(engine, dt)?;
    engine.update(dt)?;
    Ok(*engine.outcome() == MatchOutcome::InProgress)
}

/// Start the engine and pump frames until the match is no longer in progress
///
/// Returns the number of frames run. Stops early after `max_frames`, leaving
/// the match in progress.
pub fn run_match(
    engine: &mut MatchEngine,
    autopilot: &mut Autopilot,
    dt: f64,
    max_frames: u64,
) -> Result<u64> {
    begin_match(engine, autopilot)?;

    let mut frames = 0;
    let mut in_progress = *engine.outcome() == MatchOutcome::InProgress;
    while in_progress && frames < max_frames {
        in_progress = step_frame(engine, autopilot, dt)?;
        frames += 1;
    }
    Ok(frames)
}
