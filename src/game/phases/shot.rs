//! Shared in-flight shot handling for both shooting phases

use crate::collab::{Pending, PendingPoll};
use crate::core::{ShotResult, Side};
use crate::game::phase::{MatchContext, PhaseTag, Transition};
use crate::{CurlingError, Result};

/// A physics shot launched by one side and awaited on update ticks
#[derive(Debug)]
pub struct ShotInFlight {
    side: Side,
    pending: Option<Pending<ShotResult>>,
}

impl ShotInFlight {
    pub fn new(side: Side) -> Self {
        ShotInFlight {
            side,
            pending: None,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Hand the committed parameters to the rink
    pub fn launch(&mut self, ctx: &mut MatchContext) -> Result<()> {
        let params = ctx.committed_shot.take().ok_or(CurlingError::NoCommittedShot)?;
        if let Some(piece) = ctx.current_piece {
            ctx.collaborators.camera.follow_piece(&piece);
        }
        let pending = ctx.collaborators.rink.run_physics_shot(params);
        self.pending = Some(pending);
        Ok(())
    }

    pub fn abandon(&mut self) {
        self.pending = None;
    }

    /// Check for the physics result and settle the turn once it arrives
    ///
    /// Consumes the side's piece, then either ends the set or hands the
    /// next piece to the other side.
    pub fn poll(&mut self, ctx: &mut MatchContext) -> Result<Transition> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(None);
        };

        let result = match pending.poll() {
            PendingPoll::Waiting => return Ok(None),
            PendingPoll::Ready(result) => {
                self.pending = None;
                result?
            }
        };

        match result.resting {
            Some((x, z)) => ctx.logger.normal(&format!(
                "Side {} piece {} rests at ({x:.2}, {z:.2})",
                self.side, result.piece
            )),
            None => ctx.logger.normal(&format!(
                "Side {} piece {} left play",
                self.side, result.piece
            )),
        }
        ctx.current_piece = None;

        if ctx.status.current_side() != self.side {
            return Err(CurlingError::NotSidesTurn(self.side));
        }
        ctx.status.use_piece()?;

        if ctx.status.is_set_exhausted() {
            return Ok(Some(PhaseTag::EndOfSet));
        }
        if ctx.status.pieces_remaining(self.side.opponent()) > 0 {
            ctx.status.next_side()?;
        }
        Ok(Some(PhaseTag::LoadingPiece))
    }
}
