//! Normal difficulty: draws toward the house with generous error

use crate::ai::{jitter, ShotStrategy};
use crate::core::kinematics::aim_at;
use crate::core::rink::TEE_Z;
use crate::core::{Difficulty, RinkState, ShotParameters, Side, Spin};
use rand::{Rng, RngCore};

/// Aims every stone at the button and misses by up to `lateral_noise`
/// across and `length_noise` along the sheet
#[derive(Debug, Clone)]
pub struct NormalStrategy {
    lateral_noise: f64,
    length_noise: f64,
}

impl NormalStrategy {
    pub fn new() -> Self {
        NormalStrategy {
            lateral_noise: 0.8,
            length_noise: 2.5,
        }
    }
}

impl Default for NormalStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ShotStrategy for NormalStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Normal
    }

    fn select_shot(&self, _rink: &RinkState, _side: Side, rng: &mut dyn RngCore) -> ShotParameters {
        let spin = if rng.gen_bool(0.5) {
            Spin::Clockwise
        } else {
            Spin::CounterClockwise
        };
        let x = jitter(rng, self.lateral_noise);
        let z = TEE_Z + jitter(rng, self.length_noise);
        aim_at(x, z, spin).clamped()
    }
}
