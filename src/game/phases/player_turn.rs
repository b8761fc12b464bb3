//! PlayerTurn: the human aims, charges power and releases
//!
//! Pointer x steers the launch direction. Holding the pointer charges power
//! over time; releasing it commits the shot. The spacebar commits at the
//! current power. The spin key flips the rotation without leaving the turn.

use crate::core::rink::{MAX_DIRECTION, MAX_SPEED, MIN_SPEED};
use crate::core::{ShotParameters, Spin};
use crate::game::phase::{InputEvent, MatchContext, Phase, PhaseTag, Transition};
use crate::Result;

/// Fraction of full power gained per second of holding
pub const CHARGE_RATE: f64 = 0.5;

#[derive(Debug, Default)]
pub struct PlayerTurn {
    direction: f64,
    /// Charged power in `[0.0, 1.0]`
    power: f64,
    charging: bool,
    spin: Spin,
}

impl PlayerTurn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn spin(&self) -> Spin {
        self.spin
    }

    /// Shot the current controls would deliver
    pub fn aimed_shot(&self) -> ShotParameters {
        let speed = MIN_SPEED + self.power * (MAX_SPEED - MIN_SPEED);
        ShotParameters::new(self.direction, speed, self.spin).clamped()
    }

    fn commit(&mut self, ctx: &mut MatchContext) -> Result<Transition> {
        let shot = self.aimed_shot();
        self.charging = false;
        ctx.logger.normal(&format!("Side A commits {shot}"));
        ctx.committed_shot = Some(shot);
        Ok(Some(PhaseTag::PlayerShooting))
    }
}

impl Phase for PlayerTurn {
    fn tag(&self) -> PhaseTag {
        PhaseTag::PlayerTurn
    }

    fn on_enter(&mut self, ctx: &mut MatchContext) -> Result<Transition> {
        // Aim and power start fresh every turn; spin carries over
        self.direction = 0.0;
        self.power = 0.0;
        self.charging = false;
        if let Some(piece) = ctx.current_piece {
            ctx.collaborators.camera.follow_piece(&piece);
        }
        Ok(None)
    }

    fn on_exit(&mut self, _ctx: &mut MatchContext) {
        self.charging = false;
    }

    fn on_input(&mut self, ctx: &mut MatchContext, input: &InputEvent) -> Result<Transition> {
        match input {
            InputEvent::PointerMove(pointer) => {
                self.direction = pointer.x.clamp(-1.0, 1.0) * MAX_DIRECTION;
                Ok(None)
            }
            InputEvent::PointerDown(_) => {
                self.charging = true;
                self.power = 0.0;
                Ok(None)
            }
            InputEvent::PointerUp(_) if self.charging => self.commit(ctx),
            InputEvent::PointerUp(_) => Ok(None),
            InputEvent::Spacebar => self.commit(ctx),
            InputEvent::SpinToggle => {
                self.spin = self.spin.toggled();
                log_if_verbose!(ctx.logger, "Spin set to {:?}", self.spin);
                Ok(None)
            }
        }
    }

    fn update(&mut self, _ctx: &mut MatchContext, dt: f64) -> Result<Transition> {
        if self.charging {
            self.power = (self.power + dt * CHARGE_RATE).min(1.0);
        }
        Ok(None)
    }
}
