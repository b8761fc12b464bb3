//! Phase contract, phase tags and input events
//!
//! Each phase reacts to entry, exit, input and update ticks. Instead of
//! calling back into the engine, handlers *return* the tag of the phase to
//! switch to; the engine performs the swap. A handler returning `None`
//! keeps the current phase active.

use crate::collab::Collaborators;
use crate::config::MatchConfig;
use crate::core::{Piece, ShotParameters};
use crate::game::{MatchLogger, MatchStatus};
use crate::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of each phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseTag {
    Starting,
    LoadingPiece,
    PlayerTurn,
    PlayerShooting,
    ComputerTurn,
    ComputerShooting,
    EndOfSet,
    EndOfGame,
}

impl PhaseTag {
    pub const ALL: [PhaseTag; 8] = [
        PhaseTag::Starting,
        PhaseTag::LoadingPiece,
        PhaseTag::PlayerTurn,
        PhaseTag::PlayerShooting,
        PhaseTag::ComputerTurn,
        PhaseTag::ComputerShooting,
        PhaseTag::EndOfSet,
        PhaseTag::EndOfGame,
    ];

    /// Phases waiting on a rink operation; input is ignored while in them
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PhaseTag::LoadingPiece | PhaseTag::PlayerShooting | PhaseTag::ComputerShooting
        )
    }

    /// No transition ever leaves a terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, PhaseTag::EndOfGame)
    }
}

impl fmt::Display for PhaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Requested next phase, if any
pub type Transition = Option<PhaseTag>;

/// Pointer position normalized to `[-1.0, 1.0]` on both axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        PointerEvent { x, y }
    }
}

/// Raw input routed from the embedding application to the active phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMove(PointerEvent),
    PointerDown(PointerEvent),
    PointerUp(PointerEvent),
    Spacebar,
    SpinToggle,
}

/// Everything a phase may read or mutate while it is active
pub struct MatchContext {
    pub status: MatchStatus,
    pub config: MatchConfig,
    pub collaborators: Collaborators,
    pub rng: ChaCha12Rng,
    pub logger: MatchLogger,
    /// Shot committed by a turn phase, consumed by the shooting phase that follows
    pub committed_shot: Option<ShotParameters>,
    /// Piece loaded for the current turn
    pub current_piece: Option<Piece>,
    /// Set once the final set has been scored
    pub concluded: bool,
}

impl MatchContext {
    pub fn new(collaborators: Collaborators, logger: MatchLogger) -> Self {
        let config = MatchConfig::default();
        MatchContext {
            status: MatchStatus::new(config.pieces_per_side),
            config,
            collaborators,
            rng: ChaCha12Rng::seed_from_u64(0),
            logger,
            committed_shot: None,
            current_piece: None,
            concluded: false,
        }
    }

    /// Drop all per-match scratch state and reset the status
    pub fn reset(&mut self) {
        self.status.reset(self.config.pieces_per_side);
        self.committed_shot = None;
        self.current_piece = None;
        self.concluded = false;
    }
}

/// Uniform lifecycle contract implemented by every phase
pub trait Phase {
    fn tag(&self) -> PhaseTag;

    /// Entry action; may immediately request the next phase
    fn on_enter(&mut self, ctx: &mut MatchContext) -> Result<Transition>;

    /// Exit action; runs exactly once before the phase stops being active
    fn on_exit(&mut self, _ctx: &mut MatchContext) {}

    fn on_input(&mut self, _ctx: &mut MatchContext, _input: &InputEvent) -> Result<Transition> {
        Ok(None)
    }

    fn update(&mut self, _ctx: &mut MatchContext, _dt: f64) -> Result<Transition> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_and_terminal_tags() {
        let busy: Vec<_> = PhaseTag::ALL.iter().filter(|t| t.is_busy()).collect();
        assert_eq!(
            busy,
            vec![
                &PhaseTag::LoadingPiece,
                &PhaseTag::PlayerShooting,
                &PhaseTag::ComputerShooting
            ]
        );
        assert!(PhaseTag::EndOfGame.is_terminal());
        assert!(!PhaseTag::EndOfSet.is_terminal());
        assert_eq!(PhaseTag::EndOfSet.to_string(), "EndOfSet");
    }
}
