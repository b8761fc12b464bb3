//! Error types for the curling match engine

use crate::core::Side;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurlingError {
    #[error("Unsupported difficulty: {0}")]
    UnsupportedDifficulty(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Match has already been started")]
    AlreadyStarted,

    #[error("Match has not been started")]
    NotStarted,

    #[error("No side is currently active")]
    NoActiveSide,

    #[error("Side {0} has no pieces remaining")]
    NoPiecesRemaining(Side),

    #[error("It is not side {0}'s turn")]
    NotSidesTurn(Side),

    #[error("Shooting phase entered without committed shot parameters")]
    NoCommittedShot,

    #[error("Collaborator failure: {0}")]
    Collaborator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CurlingError {
    /// Configuration errors are fatal at start time and never abort a running match
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CurlingError::UnsupportedDifficulty(_) | CurlingError::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CurlingError>;
