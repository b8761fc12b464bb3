//! Hard difficulty: reads the house before choosing a shot
//!
//! - opponent holds shot: take it out
//! - we hold shot: guard it
//! - empty house: draw to the button

use crate::ai::{jitter, ShotStrategy};
use crate::core::kinematics::{aim_at, speed_for_distance};
use crate::core::rink::{BACK_LINE_Z, LOAD_POSITION_Z, TEE_Z};
use crate::core::{Difficulty, RinkState, ShotParameters, Side, Spin};
use rand::RngCore;

/// Distance short of the house where guards are placed
const GUARD_OFFSET: f64 = 5.0;
/// Extra travel past the back line for a takeout
const TAKEOUT_OVERSHOOT: f64 = 4.0;

/// What the hard strategy decided to do with its stone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotCall {
    Draw,
    Guard,
    Takeout,
}

#[derive(Debug, Clone)]
pub struct HardStrategy {
    aim_noise: f64,
}

impl HardStrategy {
    pub fn new() -> Self {
        HardStrategy { aim_noise: 0.1 }
    }

    /// Decide the type of shot from the sheet alone
    pub fn call(&self, rink: &RinkState, side: Side) -> ShotCall {
        match rink.shot_piece() {
            Some(piece) if piece.side == side => ShotCall::Guard,
            Some(_) => ShotCall::Takeout,
            None => ShotCall::Draw,
        }
    }
}

impl Default for HardStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ShotStrategy for HardStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }

    fn select_shot(&self, rink: &RinkState, side: Side, rng: &mut dyn RngCore) -> ShotParameters {
        let shot = match (self.call(rink, side), rink.shot_piece()) {
            (ShotCall::Takeout, Some(target)) => {
                // Aim through the target with enough weight to carry past the back line
                let x = target.x + jitter(rng, self.aim_noise);
                let mut params = aim_at(x, target.z, Spin::Clockwise);
                params.speed =
                    speed_for_distance(BACK_LINE_Z + TAKEOUT_OVERSHOOT - LOAD_POSITION_Z);
                params
            }
            (ShotCall::Guard, Some(shot)) => aim_at(
                shot.x + jitter(rng, self.aim_noise),
                TEE_Z - GUARD_OFFSET + jitter(rng, self.aim_noise),
                Spin::CounterClockwise,
            ),
            _ => aim_at(
                jitter(rng, self.aim_noise),
                TEE_Z + jitter(rng, self.aim_noise),
                Spin::Clockwise,
            ),
        };
        shot.clamped()
    }
}
