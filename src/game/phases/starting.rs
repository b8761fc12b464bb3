//! Starting: fresh status, clean sheet, random first thrower

use crate::game::phase::{MatchContext, Phase, PhaseTag, Transition};
use crate::Result;

#[derive(Debug, Default)]
pub struct Starting;

impl Phase for Starting {
    fn tag(&self) -> PhaseTag {
        PhaseTag::Starting
    }

    fn on_enter(&mut self, ctx: &mut MatchContext) -> Result<Transition> {
        ctx.reset();
        ctx.collaborators.camera.reset_to_default();
        ctx.collaborators.rink.clear_pieces();

        ctx.status.assign_random_side(&mut ctx.rng);
        ctx.status.launch();
        ctx.logger.minimal(&format!(
            "Match launched: {} difficulty, {} sets of {} pieces, side {} throws first",
            ctx.config.difficulty,
            ctx.config.sets_per_match,
            ctx.config.pieces_per_side,
            ctx.status.current_side()
        ));

        Ok(Some(PhaseTag::LoadingPiece))
    }
}
