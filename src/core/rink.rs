//! Sheet geometry and rink snapshots
//!
//! Coordinates are in meters: `x` runs across the sheet, `z` runs from the
//! hack toward the house. The tee (center of the button) sits at
//! `(0.0, TEE_Z)`.

use crate::core::Side;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Where a freshly loaded piece is placed before delivery
pub const LOAD_POSITION_X: f64 = 0.0;
pub const LOAD_POSITION_Z: f64 = -11.4;

pub const TEE_Z: f64 = 17.0;
pub const HOUSE_RADIUS: f64 = 1.83;
pub const PIECE_RADIUS: f64 = 0.145;
pub const SHEET_HALF_WIDTH: f64 = 2.2;
pub const BACK_LINE_Z: f64 = TEE_Z + HOUSE_RADIUS;

/// Shot envelope accepted by the physics collaborator
pub const MAX_DIRECTION: f64 = 0.12;
pub const MIN_SPEED: f64 = 1.0;
pub const MAX_SPEED: f64 = 4.5;

/// Identifier handed out by the rink for each loaded piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(u32);

impl PieceId {
    pub fn new(id: u32) -> Self {
        PieceId(id)
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece on the sheet (loaded, in motion, or at rest)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub side: Side,
    pub x: f64,
    pub z: f64,
}

impl Piece {
    pub fn new(id: PieceId, side: Side) -> Self {
        Piece {
            id,
            side,
            x: LOAD_POSITION_X,
            z: LOAD_POSITION_Z,
        }
    }

    /// Place the piece on the hack, ready for delivery
    pub fn position_for_delivery(&mut self) {
        self.x = LOAD_POSITION_X;
        self.z = LOAD_POSITION_Z;
    }

    pub fn distance_to_button(&self) -> f64 {
        (self.x * self.x + (self.z - TEE_Z) * (self.z - TEE_Z)).sqrt()
    }

    /// Any part of the piece overlaps the house
    pub fn is_in_house(&self) -> bool {
        self.distance_to_button() <= HOUSE_RADIUS + PIECE_RADIUS
    }

    /// Still on the playing surface (not past the back line or off the side)
    pub fn is_in_play(&self) -> bool {
        self.x.abs() <= SHEET_HALF_WIDTH && self.z <= BACK_LINE_Z + PIECE_RADIUS
    }
}

/// Read-only snapshot of every piece resting on the sheet
///
/// A full set never has more than 16 pieces, so the snapshot stays inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RinkState {
    pub pieces: SmallVec<[Piece; 16]>,
}

impl RinkState {
    pub fn new() -> Self {
        RinkState::default()
    }

    pub fn with_pieces(pieces: impl IntoIterator<Item = Piece>) -> Self {
        RinkState {
            pieces: pieces.into_iter().collect(),
        }
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.side == side)
    }

    pub fn in_house(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.is_in_house())
    }

    /// The piece nearest the tee, if any piece is in the house
    pub fn shot_piece(&self) -> Option<&Piece> {
        self.in_house().min_by(|a, b| {
            a.distance_to_button()
                .total_cmp(&b.distance_to_button())
        })
    }

    /// Distance to the tee of the given side's best piece in the house
    pub fn closest_distance(&self, side: Side) -> Option<f64> {
        self.in_house()
            .filter(|p| p.side == side)
            .map(Piece::distance_to_button)
            .min_by(f64::total_cmp)
    }
}

/// Outcome of a physics shot once every piece has come to rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub piece: PieceId,
    /// Final resting place of the delivered piece, `None` if it left play
    pub resting: Option<(f64, f64)>,
    /// Pieces knocked out of play by this shot
    pub removed: Vec<PieceId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_at(id: u32, side: Side, x: f64, z: f64) -> Piece {
        Piece {
            id: PieceId::new(id),
            side,
            x,
            z,
        }
    }

    #[test]
    fn test_new_piece_is_on_the_hack() {
        let piece = Piece::new(PieceId::new(3), Side::A);
        assert_eq!(piece.x, LOAD_POSITION_X);
        assert_eq!(piece.z, LOAD_POSITION_Z);
        assert!(!piece.is_in_house());
        assert!(piece.is_in_play());
    }

    #[test]
    fn test_in_house_and_out_of_play() {
        assert!(piece_at(0, Side::A, 0.0, TEE_Z).is_in_house());
        assert!(piece_at(0, Side::A, 1.9, TEE_Z).is_in_house());
        assert!(!piece_at(0, Side::A, 2.1, TEE_Z).is_in_house());
        assert!(!piece_at(0, Side::A, 0.0, BACK_LINE_Z + 1.0).is_in_play());
        assert!(!piece_at(0, Side::A, 2.5, 5.0).is_in_play());
    }

    #[test]
    fn test_shot_piece() {
        let rink = RinkState::with_pieces([
            piece_at(0, Side::A, 0.5, TEE_Z),
            piece_at(1, Side::B, 0.1, TEE_Z),
            piece_at(2, Side::B, 0.0, 5.0),
        ]);
        assert_eq!(rink.shot_piece().map(|p| p.id), Some(PieceId::new(1)));
        assert_eq!(rink.in_house().count(), 2);
        assert_eq!(rink.pieces_of(Side::B).count(), 2);
        assert!(rink.closest_distance(Side::A).unwrap() > rink.closest_distance(Side::B).unwrap());
        assert!(RinkState::new().shot_piece().is_none());
    }
}
