//! Camera stand-ins

use crate::collab::CameraCollaborator;
use crate::core::{Piece, PieceId};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraCall {
    Follow(PieceId),
    Reset,
    Resize(u32, u32),
}

/// Records every call; clones share the recording
#[derive(Debug, Clone, Default)]
pub struct RecordingCamera {
    calls: Rc<RefCell<Vec<CameraCall>>>,
}

impl RecordingCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<CameraCall> {
        self.calls.borrow().clone()
    }

    pub fn resets(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == CameraCall::Reset)
            .count()
    }
}

impl CameraCollaborator for RecordingCamera {
    fn follow_piece(&mut self, piece: &Piece) {
        self.calls.borrow_mut().push(CameraCall::Follow(piece.id));
    }

    fn reset_to_default(&mut self) {
        self.calls.borrow_mut().push(CameraCall::Reset);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.calls.borrow_mut().push(CameraCall::Resize(width, height));
    }
}

/// Ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCamera;

impl CameraCollaborator for NullCamera {
    fn follow_piece(&mut self, _piece: &Piece) {}

    fn reset_to_default(&mut self) {}
}
