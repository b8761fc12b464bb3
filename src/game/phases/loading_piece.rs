//! LoadingPiece: wait for the rink to hand over the next piece

use crate::collab::{Pending, PendingPoll};
use crate::core::{Piece, Side};
use crate::game::phase::{InputEvent, MatchContext, Phase, PhaseTag, Transition};
use crate::Result;

#[derive(Debug, Default)]
pub struct LoadingPiece {
    /// In-flight load, dropped on exit
    pending: Option<Pending<Piece>>,
}

impl LoadingPiece {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Phase for LoadingPiece {
    fn tag(&self) -> PhaseTag {
        PhaseTag::LoadingPiece
    }

    fn on_enter(&mut self, ctx: &mut MatchContext) -> Result<Transition> {
        let side = ctx.status.current_side();
        log_if_verbose!(ctx.logger, "Requesting piece for side {}", side);
        let pending = ctx.collaborators.rink.acquire_new_piece(side);
        self.pending = Some(pending);
        Ok(None)
    }

    fn on_exit(&mut self, _ctx: &mut MatchContext) {
        // Dropping the receiver turns any late completion into a no-op
        self.pending = None;
    }

    fn on_input(&mut self, ctx: &mut MatchContext, input: &InputEvent) -> Result<Transition> {
        log_if_verbose!(ctx.logger, "Ignoring {:?} while loading", input);
        Ok(None)
    }

    fn update(&mut self, ctx: &mut MatchContext, _dt: f64) -> Result<Transition> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(None);
        };

        let mut piece = match pending.poll() {
            PendingPoll::Waiting => return Ok(None),
            PendingPoll::Ready(result) => {
                self.pending = None;
                result?
            }
        };

        piece.position_for_delivery();
        ctx.collaborators.rink.place_piece(piece);
        ctx.collaborators.camera.follow_piece(&piece);
        ctx.current_piece = Some(piece);
        log_if_verbose!(ctx.logger, "Piece {} ready for side {}", piece.id, piece.side);

        match ctx.status.current_side() {
            Side::A => Ok(Some(PhaseTag::PlayerTurn)),
            _ => Ok(Some(PhaseTag::ComputerTurn)),
        }
    }
}
