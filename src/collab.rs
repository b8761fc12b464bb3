//! Collaborator contracts consumed by the match engine
//!
//! The engine never simulates physics, renders, scores or stores anything
//! itself. It talks to these traits instead. Long-running rink operations
//! return a [`Pending`] handle that the owning phase polls on each update
//! tick; the rink fulfils it through the matching [`Completer`].

use crate::core::{Piece, RinkState, ShotParameters, ShotResult};
use crate::{CurlingError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Create a linked completer/pending pair for one asynchronous operation
pub fn completion<T>() -> (Completer<T>, Pending<T>) {
    let (tx, rx) = oneshot::channel();
    (Completer { tx }, Pending { rx })
}

/// Receiving half of an asynchronous rink operation
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<Result<T>>,
}

/// State of a pending operation when polled
#[derive(Debug)]
pub enum PendingPoll<T> {
    Waiting,
    Ready(Result<T>),
}

impl<T> Pending<T> {
    /// An operation that has already finished
    pub fn ready(value: Result<T>) -> Self {
        let (completer, pending) = completion();
        completer.complete(value);
        pending
    }

    /// Non-blocking check for the result
    ///
    /// A completer dropped without answering is reported as a collaborator
    /// failure so the match can never stay suspended forever.
    pub fn poll(&mut self) -> PendingPoll<T> {
        match self.rx.try_recv() {
            Ok(result) => PendingPoll::Ready(result),
            Err(TryRecvError::Empty) => PendingPoll::Waiting,
            Err(TryRecvError::Closed) => PendingPoll::Ready(Err(CurlingError::Collaborator(
                "operation abandoned before completion".to_string(),
            ))),
        }
    }
}

/// Sending half of an asynchronous rink operation
#[derive(Debug)]
pub struct Completer<T> {
    tx: oneshot::Sender<Result<T>>,
}

impl<T> Completer<T> {
    /// Deliver the result. Returns `false` when nobody is listening anymore
    /// (the phase that asked was exited or the match was stopped), in which
    /// case the result is discarded.
    pub fn complete(self, value: Result<T>) -> bool {
        self.tx.send(value).is_ok()
    }

    pub fn is_stale(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owns the pieces and runs the physics
pub trait RinkCollaborator {
    /// Start loading a new piece for `side`
    fn acquire_new_piece(&mut self, side: crate::core::Side) -> Pending<Piece>;

    /// Put a loaded piece on the sheet at its delivery position
    fn place_piece(&mut self, piece: Piece);

    fn current_snapshot(&self) -> RinkState;

    /// Deliver the most recently placed piece with the given parameters
    fn run_physics_shot(&mut self, params: ShotParameters) -> Pending<ShotResult>;

    /// Remove every piece from the sheet at a set boundary
    fn clear_pieces(&mut self);

    /// Per-frame tick, called before the active phase sees the frame
    fn update(&mut self, _dt: f64) {}
}

/// Fire-and-forget camera control
pub trait CameraCollaborator {
    fn follow_piece(&mut self, piece: &Piece);
    fn reset_to_default(&mut self);
    fn resize(&mut self, _width: u32, _height: u32) {}
    fn update(&mut self, _dt: f64) {}
}

/// Computes the points each side earns for a finished set
pub trait ScoringCollaborator {
    /// Returns `(delta_a, delta_b)`
    fn compute_set_score_delta(&self, rink: &RinkState) -> (u32, u32);
}

/// Final status handed to leaderboard storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub score_a: u32,
    pub score_b: u32,
    pub sets_played: u32,
    /// `false` for matches stopped or aborted before the last set
    pub concluded: bool,
}

/// Receives the final status of a match; the engine ignores its outcome
pub trait PersistenceCollaborator {
    fn record(&mut self, record: &MatchRecord);
}

/// Every external dependency of a match, owned by the engine
pub struct Collaborators {
    pub rink: Box<dyn RinkCollaborator>,
    pub camera: Box<dyn CameraCollaborator>,
    pub scoring: Box<dyn ScoringCollaborator>,
    pub persistence: Box<dyn PersistenceCollaborator>,
}

impl Collaborators {
    pub fn new(
        rink: Box<dyn RinkCollaborator>,
        camera: Box<dyn CameraCollaborator>,
        scoring: Box<dyn ScoringCollaborator>,
        persistence: Box<dyn PersistenceCollaborator>,
    ) -> Self {
        Collaborators {
            rink,
            camera,
            scoring,
            persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_waits_until_completed() {
        let (completer, mut pending) = completion::<u32>();
        assert!(matches!(pending.poll(), PendingPoll::Waiting));
        assert!(completer.complete(Ok(7)));
        assert!(matches!(pending.poll(), PendingPoll::Ready(Ok(7))));
    }

    #[test]
    fn test_dropped_pending_makes_completion_stale() {
        let (completer, pending) = completion::<u32>();
        assert!(!completer.is_stale());
        drop(pending);
        assert!(completer.is_stale());
        assert!(!completer.complete(Ok(1)));
    }

    #[test]
    fn test_abandoned_completer_is_a_failure() {
        let (completer, mut pending) = completion::<u32>();
        drop(completer);
        assert!(matches!(
            pending.poll(),
            PendingPoll::Ready(Err(CurlingError::Collaborator(_)))
        ));
    }

    #[test]
    fn test_ready_pending() {
        let mut pending = Pending::ready(Ok("loaded"));
        assert!(matches!(pending.poll(), PendingPoll::Ready(Ok("loaded"))));
    }
}
