//! Computer shot selection
//!
//! A strategy looks at a snapshot of the sheet and returns the shot the
//! computer side should play. Strategies hold no match state; the RNG is
//! passed in from the engine so seeded matches replay identically.

pub mod hard;
pub mod normal;

pub use hard::HardStrategy;
pub use normal::NormalStrategy;

use crate::core::{Difficulty, RinkState, ShotParameters, Side};
use crate::Result;
use rand::RngCore;

/// Shot-selection capability for the computer side
pub trait ShotStrategy {
    /// The difficulty this strategy implements
    fn difficulty(&self) -> Difficulty;

    /// Choose a shot for `side` given the current sheet
    ///
    /// Must always return parameters inside the shot envelope.
    fn select_shot(&self, rink: &RinkState, side: Side, rng: &mut dyn RngCore) -> ShotParameters;
}

/// Build the strategy for a difficulty level
pub fn create_strategy(difficulty: Difficulty) -> Box<dyn ShotStrategy> {
    match difficulty {
        Difficulty::Normal => Box::new(NormalStrategy::new()),
        Difficulty::Hard => Box::new(HardStrategy::new()),
    }
}

/// Build the strategy named by raw configuration text
///
/// Unknown names fail with `UnsupportedDifficulty` instead of falling back.
pub fn strategy_for(name: &str) -> Result<Box<dyn ShotStrategy>> {
    Ok(create_strategy(name.parse()?))
}

/// Symmetric uniform noise in `[-amplitude, amplitude]`
pub(crate) fn jitter(rng: &mut dyn RngCore, amplitude: f64) -> f64 {
    use rand::Rng;
    if amplitude <= 0.0 {
        0.0
    } else {
        rng.gen_range(-amplitude..=amplitude)
    }
}
