//! Recoverable input errors raised while driving a game.

use thiserror::Error;

use super::types::Coord;

/// Every variant leaves the game state untouched; the caller re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Invalid format {0:?}. Please use a letter (A-H) followed by a number (1-8), e.g., \"E3\"")]
    InvalidFormat(String),
    #[error("There is no piece at {0}")]
    NoPiece(Coord),
    #[error("The piece at {0} belongs to your opponent")]
    WrongOwner(Coord),
    #[error("Moving {from} to {to} is not valid for this piece")]
    IllegalDestination { from: Coord, to: Coord },
    #[error("Select one of your pieces first")]
    NoSelection,
    #[error("The game is over")]
    GameOver,
}

impl MoveError {
    pub fn kind(&self) -> &'static str {
        match self {
            MoveError::InvalidFormat(_) => "invalid_format",
            MoveError::NoPiece(_) => "no_piece",
            MoveError::WrongOwner(_) => "wrong_owner",
            MoveError::IllegalDestination { .. } => "illegal_destination",
            MoveError::NoSelection => "no_selection",
            MoveError::GameOver => "game_over",
        }
    }
}
