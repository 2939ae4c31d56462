//! Simplified draughts on an 8x8 board: forward-only diagonal steps and
//! single jump captures, no kings, no chained jumps, no forced captures.

pub mod board;
pub mod computer;
pub mod error;
pub mod game;
pub mod moves;
pub mod notation;
pub mod plugin;
pub mod types;

pub use board::{create_initial_board, is_on_board, winner, Board};
pub use computer::choose_move;
pub use error::MoveError;
pub use game::{GameState, TurnPhase};
pub use moves::{apply_move, legal_destinations, AppliedMove};
pub use notation::{coordinate_to_notation, notation_to_coordinate};
pub use plugin::{DraughtsAction, DraughtsPlugin};
pub use types::{Coord, MoveRecord, PlayerColor};
