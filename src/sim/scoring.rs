//! Set scoring rules

use crate::collab::ScoringCollaborator;
use crate::core::{RinkState, Side};
use std::cell::Cell;

/// Standard end scoring
///
/// Only the side owning the piece closest to the button scores: one point
/// for each of its pieces in the house that is closer than the opponent's
/// closest piece in the house.
#[derive(Debug, Clone, Copy, Default)]
pub struct HouseScoring;

impl ScoringCollaborator for HouseScoring {
    fn compute_set_score_delta(&self, rink: &RinkState) -> (u32, u32) {
        let Some(shot) = rink.shot_piece() else {
            return (0, 0);
        };
        let scorer = shot.side;
        let threshold = rink
            .closest_distance(scorer.opponent())
            .unwrap_or(f64::INFINITY);
        let points = rink
            .in_house()
            .filter(|p| p.side == scorer && p.distance_to_button() < threshold)
            .count() as u32;

        match scorer {
            Side::A => (points, 0),
            Side::B => (0, points),
            Side::Invalid => (0, 0),
        }
    }
}

/// Replays a fixed list of deltas, one per set, then blanks
#[derive(Debug, Clone, Default)]
pub struct FixedScoring {
    deltas: Vec<(u32, u32)>,
    next: Cell<usize>,
}

impl FixedScoring {
    pub fn new(deltas: Vec<(u32, u32)>) -> Self {
        FixedScoring {
            deltas,
            next: Cell::new(0),
        }
    }

    /// Number of sets scored so far
    pub fn calls(&self) -> usize {
        self.next.get()
    }
}

impl ScoringCollaborator for FixedScoring {
    fn compute_set_score_delta(&self, _rink: &RinkState) -> (u32, u32) {
        let index = self.next.get();
        self.next.set(index + 1);
        self.deltas.get(index).copied().unwrap_or((0, 0))
    }
}
