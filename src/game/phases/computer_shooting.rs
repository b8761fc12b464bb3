//! ComputerShooting: the computer's delivery is running on the rink

use crate::core::Side;
use crate::game::phase::{MatchContext, Phase, PhaseTag, Transition};
use crate::game::phases::shot::ShotInFlight;
use crate::Result;

#[derive(Debug)]
pub struct ComputerShooting {
    shot: ShotInFlight,
}

impl ComputerShooting {
    pub fn new() -> Self {
        ComputerShooting {
            shot: ShotInFlight::new(Side::B),
        }
    }
}

impl Default for ComputerShooting {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ComputerShooting {
    fn tag(&self) -> PhaseTag {
        PhaseTag::ComputerShooting
    }

    fn on_enter(&mut self, ctx: &mut MatchContext) -> Result<Transition> {
        self.shot.launch(ctx)?;
        Ok(None)
    }

    fn on_exit(&mut self, _ctx: &mut MatchContext) {
        self.shot.abandon();
    }

    fn update(&mut self, ctx: &mut MatchContext, _dt: f64) -> Result<Transition> {
        self.shot.poll(ctx)
    }
}
