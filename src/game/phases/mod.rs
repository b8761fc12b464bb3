//! The eight phases of a match and the table that owns them

pub mod computer_shooting;
pub mod computer_turn;
pub mod end_of_game;
pub mod end_of_set;
pub mod loading_piece;
pub mod player_shooting;
pub mod player_turn;
pub mod shot;
pub mod starting;

pub use computer_shooting::ComputerShooting;
pub use computer_turn::ComputerTurn;
pub use end_of_game::EndOfGame;
pub use end_of_set::EndOfSet;
pub use loading_piece::LoadingPiece;
pub use player_shooting::PlayerShooting;
pub use player_turn::PlayerTurn;
pub use starting::Starting;

use crate::ai::create_strategy;
use crate::config::MatchConfig;
use crate::game::phase::{Phase, PhaseTag};

/// One instance of every phase, built once the configuration is known
pub struct PhaseTable {
    pub starting: Starting,
    pub loading_piece: LoadingPiece,
    pub player_turn: PlayerTurn,
    pub player_shooting: PlayerShooting,
    pub computer_turn: ComputerTurn,
    pub computer_shooting: ComputerShooting,
    pub end_of_set: EndOfSet,
    pub end_of_game: EndOfGame,
}

impl PhaseTable {
    pub fn new(config: &MatchConfig) -> Self {
        PhaseTable {
            starting: Starting,
            loading_piece: LoadingPiece::new(),
            player_turn: PlayerTurn::new(),
            player_shooting: PlayerShooting::new(),
            computer_turn: ComputerTurn::new(create_strategy(config.difficulty)),
            computer_shooting: ComputerShooting::new(),
            end_of_set: EndOfSet,
            end_of_game: EndOfGame,
        }
    }

    pub fn get_mut(&mut self, tag: PhaseTag) -> &mut dyn Phase {
        match tag {
            PhaseTag::Starting => &mut self.starting,
            PhaseTag::LoadingPiece => &mut self.loading_piece,
            PhaseTag::PlayerTurn => &mut self.player_turn,
            PhaseTag::PlayerShooting => &mut self.player_shooting,
            PhaseTag::ComputerTurn => &mut self.computer_turn,
            PhaseTag::ComputerShooting => &mut self.computer_shooting,
            PhaseTag::EndOfSet => &mut self.end_of_set,
            PhaseTag::EndOfGame => &mut self.end_of_game,
        }
    }
}
