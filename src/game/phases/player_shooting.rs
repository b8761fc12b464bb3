//! PlayerShooting: the human's delivery is running on the rink

use crate::core::Side;
use crate::game::phase::{InputEvent, MatchContext, Phase, PhaseTag, Transition};
use crate::game::phases::shot::ShotInFlight;
use crate::Result;

#[derive(Debug)]
pub struct PlayerShooting {
    shot: ShotInFlight,
}

impl PlayerShooting {
    pub fn new() -> Self {
        PlayerShooting {
            shot: ShotInFlight::new(Side::A),
        }
    }
}

impl Default for PlayerShooting {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for PlayerShooting {
    fn tag(&self) -> PhaseTag {
        PhaseTag::PlayerShooting
    }

    fn on_enter(&mut self, ctx: &mut MatchContext) -> Result<Transition> {
        self.shot.launch(ctx)?;
        Ok(None)
    }

    fn on_exit(&mut self, _ctx: &mut MatchContext) {
        self.shot.abandon();
    }

    fn on_input(&mut self, ctx: &mut MatchContext, input: &InputEvent) -> Result<Transition> {
        log_if_verbose!(ctx.logger, "Ignoring {:?} while the shot runs", input);
        Ok(None)
    }

    fn update(&mut self, ctx: &mut MatchContext, _dt: f64) -> Result<Transition> {
        self.shot.poll(ctx)
    }
}
