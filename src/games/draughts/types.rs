//! Domain types for draughts.

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;

/// The two sides. Doubles as the owner tag of a piece and the turn indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerColor {
    PlayerOne,
    PlayerTwo,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 2] = [PlayerColor::PlayerOne, PlayerColor::PlayerTwo];

    pub fn opponent(self) -> PlayerColor {
        match self {
            PlayerColor::PlayerOne => PlayerColor::PlayerTwo,
            PlayerColor::PlayerTwo => PlayerColor::PlayerOne,
        }
    }

    /// Seat index: Player One sits first.
    pub fn seat(self) -> usize {
        match self {
            PlayerColor::PlayerOne => 0,
            PlayerColor::PlayerTwo => 1,
        }
    }

    pub fn from_seat(seat: usize) -> Option<PlayerColor> {
        match seat {
            0 => Some(PlayerColor::PlayerOne),
            1 => Some(PlayerColor::PlayerTwo),
            _ => None,
        }
    }

    /// Forward diagonals as (row delta, col delta). Pieces never retreat.
    pub fn directions(self) -> [(i8, i8); 2] {
        match self {
            PlayerColor::PlayerOne => [(1, -1), (1, 1)],
            PlayerColor::PlayerTwo => [(-1, -1), (-1, 1)],
        }
    }

    pub fn colour_name(self) -> &'static str {
        match self {
            PlayerColor::PlayerOne => "red",
            PlayerColor::PlayerTwo => "blue",
        }
    }

    /// Single-character glyph used by the text board.
    pub fn glyph(self) -> char {
        match self {
            PlayerColor::PlayerOne => 'r',
            PlayerColor::PlayerTwo => 'b',
        }
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.colour_name())
    }
}

/// A board cell as (row, col). Row 0 is the top edge, col 0 the left edge.
///
/// Components are signed so that stepping off the edge yields a coordinate
/// that `is_on_board` rejects instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE as i8).contains(&self.row) && (0..BOARD_SIZE as i8).contains(&self.col)
    }

    /// Dark squares are the only ones pieces ever stand on.
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Coord {
        Coord::new(self.row + d_row, self.col + d_col)
    }
}

/// One completed move, as shown in the move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: PlayerColor,
    /// Source square in notation, e.g. "B6".
    pub from: String,
    /// Destination square in notation.
    pub to: String,
    #[serde(default)]
    pub captured: bool,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.captured { 'x' } else { '-' };
        write!(f, "{}: {}{}{}", self.player, self.from, sep, self.to)
    }
}
