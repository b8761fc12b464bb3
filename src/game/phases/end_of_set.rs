//! EndOfSet: score the house, reset the pools, decide whether to continue

use crate::core::Side;
use crate::game::phase::{MatchContext, Phase, PhaseTag, Transition};
use crate::Result;

#[derive(Debug, Default)]
pub struct EndOfSet;

impl Phase for EndOfSet {
    fn tag(&self) -> PhaseTag {
        PhaseTag::EndOfSet
    }

    fn on_enter(&mut self, ctx: &mut MatchContext) -> Result<Transition> {
        let snapshot = ctx.collaborators.rink.current_snapshot();
        let (delta_a, delta_b) = ctx.collaborators.scoring.compute_set_score_delta(&snapshot);

        ctx.status.add_score(Side::A, delta_a)?;
        ctx.status.add_score(Side::B, delta_b)?;
        ctx.status.reset_pieces();
        ctx.status.advance_set();

        // The side that scored throws first next set; a blank set keeps the order
        if delta_a > delta_b {
            ctx.status.set_first_thrower(Side::A)?;
        } else if delta_b > delta_a {
            ctx.status.set_first_thrower(Side::B)?;
        }

        ctx.collaborators.rink.clear_pieces();
        ctx.collaborators.camera.reset_to_default();
        ctx.logger.minimal(&format!(
            "Set {} scored A +{delta_a}, B +{delta_b} (A {} - B {})",
            ctx.status.current_set, ctx.status.score_a, ctx.status.score_b
        ));

        if ctx.status.current_set >= ctx.config.sets_per_match {
            Ok(Some(PhaseTag::EndOfGame))
        } else {
            Ok(Some(PhaseTag::LoadingPiece))
        }
    }
}
