//! Input driver for the human side
//!
//! Plays the human side through the same input surface a person would use:
//! move the pointer to aim, press, hold for power, release. Each turn aims a
//! draw at the button with some random error.

use crate::core::kinematics::aim_at;
use crate::core::rink::{HOUSE_RADIUS, MAX_DIRECTION, MAX_SPEED, MIN_SPEED, TEE_Z};
use crate::core::Spin;
use crate::game::phases::player_turn::CHARGE_RATE;
use crate::game::{MatchEngine, PhaseTag, PointerEvent};
use crate::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Default aiming error in meters
pub const DEFAULT_ACCURACY: f64 = 0.6;

#[derive(Debug, Clone, Copy)]
struct Plan {
    /// Activation count when the plan was made; a new turn gets a new plan
    turn: u64,
    pointer_x: f64,
    spin: Spin,
    hold: f64,
    held: f64,
    pressed: bool,
}

#[derive(Debug)]
pub struct Autopilot {
    rng: ChaCha12Rng,
    accuracy: f64,
    /// Spin the engine currently holds for the human side
    spin: Spin,
    plan: Option<Plan>,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self::with_accuracy(seed, DEFAULT_ACCURACY)
    }

    pub fn with_accuracy(seed: u64, accuracy: f64) -> Self {
        Autopilot {
            rng: ChaCha12Rng::seed_from_u64(seed),
            accuracy: accuracy.abs(),
            spin: Spin::default(),
            plan: None,
        }
    }

    /// Forget per-match input state; call whenever the engine is (re)started
    pub fn reset(&mut self) {
        self.spin = Spin::default();
        self.plan = None;
    }

    /// Feed this frame's input; call before `MatchEngine::update`
    pub fn drive(&mut self, engine: &mut MatchEngine, dt: f64) -> Result<()> {
        if engine.active_phase() != Some(PhaseTag::PlayerTurn) {
            self.plan = None;
            return Ok(());
        }

        let turn = engine.transitions();
        if self.plan.map_or(true, |plan| plan.turn != turn) {
            self.plan = Some(self.make_plan(turn));
        }
        let Some(plan) = self.plan.as_mut() else {
            return Ok(());
        };

        let pointer = PointerEvent::new(plan.pointer_x, 0.0);
        if !plan.pressed {
            if plan.spin != self.spin {
                engine.on_spin_toggle()?;
                self.spin = plan.spin;
            }
            engine.on_pointer_move(pointer)?;
            plan.pressed = true;
            if plan.hold <= 0.0 {
                return engine.on_spacebar();
            }
            return engine.on_pointer_down(pointer);
        }

        plan.held += dt;
        if plan.held >= plan.hold {
            engine.on_pointer_up(pointer)?;
        }
        Ok(())
    }

    fn make_plan(&mut self, turn: u64) -> Plan {
        let spin = if self.rng.gen_bool(0.5) {
            Spin::Clockwise
        } else {
            Spin::CounterClockwise
        };
        let spread = self.accuracy.min(HOUSE_RADIUS * 2.0);
        let (x, z) = if spread > 0.0 {
            (
                self.rng.gen_range(-spread..=spread),
                TEE_Z + self.rng.gen_range(-spread..=spread),
            )
        } else {
            (0.0, TEE_Z)
        };

        let target = aim_at(x, z, spin);
        let power = ((target.speed - MIN_SPEED) / (MAX_SPEED - MIN_SPEED)).clamp(0.0, 1.0);
        Plan {
            turn,
            pointer_x: (target.direction / MAX_DIRECTION).clamp(-1.0, 1.0),
            spin,
            hold: power / CHARGE_RATE,
            held: 0.0,
            pressed: false,
        }
    }
}
