//! EndOfGame: terminal phase, records the result and ignores everything else

use crate::game::phase::{MatchContext, Phase, PhaseTag, Transition};
use crate::Result;

#[derive(Debug, Default)]
pub struct EndOfGame;

impl Phase for EndOfGame {
    fn tag(&self) -> PhaseTag {
        PhaseTag::EndOfGame
    }

    fn on_enter(&mut self, ctx: &mut MatchContext) -> Result<Transition> {
        ctx.concluded = true;
        ctx.collaborators.camera.reset_to_default();
        ctx.collaborators
            .persistence
            .record(&ctx.status.record(true));

        let verdict = match ctx.status.leader() {
            Some(side) => format!("side {side} wins"),
            None => "draw".to_string(),
        };
        ctx.logger.minimal(&format!(
            "Match over after {} sets: A {} - B {}, {verdict}",
            ctx.status.current_set, ctx.status.score_a, ctx.status.score_b
        ));
        Ok(None)
    }
}
