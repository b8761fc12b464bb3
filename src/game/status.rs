//! Shared match status: scores, pieces left, current set and side
//!
//! Only phase entry/exit actions mutate this record, and only through the
//! methods below, which keep the counters inside their documented ranges.

use crate::collab::MatchRecord;
use crate::core::Side;
use crate::{CurlingError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatus {
    pub score_a: u32,
    pub score_b: u32,
    pub current_set: u32,
    pub pieces_remaining_a: u32,
    pub pieces_remaining_b: u32,
    current_side: Side,
    pub is_launched: bool,
    /// Pieces each side starts a set with
    initial_pieces: u32,
}

impl MatchStatus {
    pub fn new(initial_pieces: u32) -> Self {
        MatchStatus {
            score_a: 0,
            score_b: 0,
            current_set: 0,
            pieces_remaining_a: initial_pieces,
            pieces_remaining_b: initial_pieces,
            current_side: Side::Invalid,
            is_launched: false,
            initial_pieces,
        }
    }

    /// Side whose turn it is; `Invalid` before the match launches
    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn initial_pieces(&self) -> u32 {
        self.initial_pieces
    }

    /// Back to the pre-launch state with the given piece allotment
    pub fn reset(&mut self, initial_pieces: u32) {
        *self = MatchStatus::new(initial_pieces);
    }

    pub fn launch(&mut self) {
        self.is_launched = true;
    }

    /// Pick which side throws first
    pub fn assign_random_side<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current_side = if rng.gen_bool(0.5) { Side::A } else { Side::B };
    }

    /// Fix which side throws first in the coming set
    pub fn set_first_thrower(&mut self, side: Side) -> Result<()> {
        if !side.is_valid() {
            return Err(CurlingError::NoActiveSide);
        }
        self.current_side = side;
        Ok(())
    }

    /// Hand the turn to the other side
    pub fn next_side(&mut self) -> Result<Side> {
        if !self.current_side.is_valid() {
            return Err(CurlingError::NoActiveSide);
        }
        self.current_side = self.current_side.opponent();
        Ok(self.current_side)
    }

    pub fn pieces_remaining(&self, side: Side) -> u32 {
        match side {
            Side::A => self.pieces_remaining_a,
            Side::B => self.pieces_remaining_b,
            Side::Invalid => 0,
        }
    }

    /// Pieces already thrown by `side` in the current set
    pub fn pieces_used(&self, side: Side) -> u32 {
        match side {
            Side::Invalid => 0,
            _ => self.initial_pieces - self.pieces_remaining(side),
        }
    }

    /// Consume one piece from the current side's pool
    pub fn use_piece(&mut self) -> Result<()> {
        let side = self.current_side;
        let remaining = match side {
            Side::A => &mut self.pieces_remaining_a,
            Side::B => &mut self.pieces_remaining_b,
            Side::Invalid => return Err(CurlingError::NoActiveSide),
        };
        if *remaining == 0 {
            return Err(CurlingError::NoPiecesRemaining(side));
        }
        *remaining -= 1;
        Ok(())
    }

    pub fn is_set_exhausted(&self) -> bool {
        self.pieces_remaining_a == 0 && self.pieces_remaining_b == 0
    }

    pub fn add_score(&mut self, side: Side, points: u32) -> Result<()> {
        match side {
            Side::A => self.score_a += points,
            Side::B => self.score_b += points,
            Side::Invalid => return Err(CurlingError::NoActiveSide),
        }
        Ok(())
    }

    pub fn reset_pieces(&mut self) {
        self.pieces_remaining_a = self.initial_pieces;
        self.pieces_remaining_b = self.initial_pieces;
    }

    pub fn advance_set(&mut self) {
        self.current_set += 1;
    }

    /// Side with the higher score, `None` when level
    pub fn leader(&self) -> Option<Side> {
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn record(&self, concluded: bool) -> MatchRecord {
        MatchRecord {
            score_a: self.score_a,
            score_b: self.score_b,
            sets_played: self.current_set,
            concluded,
        }
    }
}

impl Default for MatchStatus {
    fn default() -> Self {
        MatchStatus::new(crate::config::MatchConfig::default().pieces_per_side)
    }
}
