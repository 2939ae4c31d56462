//! Two-character square notation: column letter A-H, then row digit 1-8.
//!
//! Rows are labelled top to bottom 8,7,...,1, so the digit is a reversed
//! lookup rather than an offset: "8" is row 0 and "1" is row 7.

use std::fmt;
use std::str::FromStr;

use super::error::MoveError;
use super::types::Coord;

pub const COLUMN_LABELS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
pub const ROW_LABELS: [char; 8] = ['8', '7', '6', '5', '4', '3', '2', '1'];

/// Parse notation such as "E3" (letter case is ignored).
pub fn notation_to_coordinate(notation: &str) -> Result<Coord, MoveError> {
    let invalid = || MoveError::InvalidFormat(notation.to_string());

    let mut chars = notation.chars();
    let (Some(col_ch), Some(row_ch), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(invalid());
    };

    let col = COLUMN_LABELS
        .iter()
        .position(|&c| c == col_ch.to_ascii_uppercase())
        .ok_or_else(invalid)?;
    let row = ROW_LABELS
        .iter()
        .position(|&c| c == row_ch)
        .ok_or_else(invalid)?;

    Ok(Coord::new(row as i8, col as i8))
}

/// Format an on-board coordinate. Panics on off-board input.
pub fn coordinate_to_notation(coord: Coord) -> String {
    assert!(coord.is_on_board(), "coordinate off the board: {:?}", coord);
    let mut s = String::with_capacity(2);
    s.push(COLUMN_LABELS[coord.col as usize]);
    s.push(ROW_LABELS[coord.row as usize]);
    s
}

impl FromStr for Coord {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        notation_to_coordinate(s)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            f.write_str(&coordinate_to_notation(*self))
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}
