//! ComputerTurn: ask the strategy for a shot and deliver it at once

use crate::ai::ShotStrategy;
use crate::game::phase::{MatchContext, Phase, PhaseTag, Transition};
use crate::Result;

pub struct ComputerTurn {
    strategy: Box<dyn ShotStrategy>,
}

impl ComputerTurn {
    pub fn new(strategy: Box<dyn ShotStrategy>) -> Self {
        ComputerTurn { strategy }
    }

    pub fn strategy(&self) -> &dyn ShotStrategy {
        self.strategy.as_ref()
    }
}

impl Phase for ComputerTurn {
    fn tag(&self) -> PhaseTag {
        PhaseTag::ComputerTurn
    }

    fn on_enter(&mut self, ctx: &mut MatchContext) -> Result<Transition> {
        let snapshot = ctx.collaborators.rink.current_snapshot();
        let side = ctx.status.current_side();
        let shot = self.strategy.select_shot(&snapshot, side, &mut ctx.rng);
        ctx.logger.normal(&format!(
            "Side {side} ({} AI) plays {shot}",
            self.strategy.difficulty()
        ));
        ctx.committed_shot = Some(shot);
        Ok(Some(PhaseTag::ComputerShooting))
    }
}
