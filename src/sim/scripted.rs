//! Rink whose operations are resolved by hand
//!
//! Requests queue up until the caller resolves or fails them, which lets a
//! test hold an operation open across `stop()` or a phase change and then
//! deliver it late.

use crate::collab::{completion, Completer, Pending, RinkCollaborator};
use crate::core::{Piece, PieceId, RinkState, ShotParameters, ShotResult, Side};
use crate::CurlingError;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Script {
    loads: VecDeque<(Side, Completer<Piece>)>,
    shots: VecDeque<Completer<ShotResult>>,
    delivered: Vec<ShotParameters>,
    placed: Vec<Piece>,
    snapshot: RinkState,
    next_id: u32,
    clears: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedRink {
    script: Rc<RefCell<Script>>,
}

impl ScriptedRink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_loads(&self) -> usize {
        self.script.borrow().loads.len()
    }

    pub fn pending_shots(&self) -> usize {
        self.script.borrow().shots.len()
    }

    /// Hand over the oldest requested piece
    ///
    /// Returns whether anyone was still waiting for it; `false` when no load
    /// is queued or its requester has gone away.
    pub fn resolve_load(&self) -> bool {
        let mut script = self.script.borrow_mut();
        let Some((side, completer)) = script.loads.pop_front() else {
            return false;
        };
        script.next_id += 1;
        let piece = Piece::new(PieceId::new(script.next_id), side);
        completer.complete(Ok(piece))
    }

    pub fn fail_load(&self, reason: &str) -> bool {
        match self.script.borrow_mut().loads.pop_front() {
            Some((_, completer)) => {
                completer.complete(Err(CurlingError::Collaborator(reason.to_string())))
            }
            None => false,
        }
    }

    /// Finish the oldest shot with the last placed piece resting at `resting`
    ///
    /// A resting piece is added to the snapshot used for scoring.
    pub fn resolve_shot(&self, resting: Option<(f64, f64)>) -> bool {
        let mut script = self.script.borrow_mut();
        let Some(completer) = script.shots.pop_front() else {
            return false;
        };
        let Some(mut piece) = script.placed.last().copied() else {
            return completer.complete(Err(CurlingError::Collaborator(
                "no piece placed for delivery".to_string(),
            )));
        };
        if completer.is_stale() {
            return false;
        }
        if let Some((x, z)) = resting {
            piece.x = x;
            piece.z = z;
            script.snapshot.pieces.push(piece);
        }
        completer.complete(Ok(ShotResult {
            piece: piece.id,
            resting,
            removed: Vec::new(),
        }))
    }

    pub fn fail_shot(&self, reason: &str) -> bool {
        match self.script.borrow_mut().shots.pop_front() {
            Some(completer) => {
                completer.complete(Err(CurlingError::Collaborator(reason.to_string())))
            }
            None => false,
        }
    }

    pub fn set_snapshot(&self, snapshot: RinkState) {
        self.script.borrow_mut().snapshot = snapshot;
    }

    /// Every piece placed at the hack, in order
    pub fn placed(&self) -> Vec<Piece> {
        self.script.borrow().placed.clone()
    }

    /// Parameters of every shot requested, in order
    pub fn delivered(&self) -> Vec<ShotParameters> {
        self.script.borrow().delivered.clone()
    }

    pub fn clear_count(&self) -> usize {
        self.script.borrow().clears
    }
}

impl RinkCollaborator for ScriptedRink {
    fn acquire_new_piece(&mut self, side: Side) -> Pending<Piece> {
        let (completer, pending) = completion();
        self.script.borrow_mut().loads.push_back((side, completer));
        pending
    }

    fn place_piece(&mut self, piece: Piece) {
        self.script.borrow_mut().placed.push(piece);
    }

    fn current_snapshot(&self) -> RinkState {
        self.script.borrow().snapshot.clone()
    }

    fn run_physics_shot(&mut self, params: ShotParameters) -> Pending<ShotResult> {
        let (completer, pending) = completion();
        let mut script = self.script.borrow_mut();
        script.delivered.push(params);
        script.shots.push_back(completer);
        pending
    }

    fn clear_pieces(&mut self) {
        let mut script = self.script.borrow_mut();
        script.snapshot = RinkState::new();
        script.clears += 1;
    }
}
