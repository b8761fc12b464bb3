//! Core match types: sides, shots and the sheet

pub mod kinematics;
pub mod rink;
pub mod types;

pub use rink::{Piece, PieceId, RinkState, ShotResult};
pub use types::{Difficulty, ShotParameters, Side, Spin};
