//! The 8x8 board and the standard starting layout.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::notation::{COLUMN_LABELS, ROW_LABELS};
use super::types::{Coord, PlayerColor, BOARD_SIZE};

/// Rows filled by each side at the start.
const STARTING_ROWS: usize = 3;

/// All 32 dark squares in row-major order.
pub static DARK_SQUARES: Lazy<Vec<Coord>> = Lazy::new(|| {
    let mut squares = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE / 2);
    for row in 0..BOARD_SIZE as i8 {
        for col in 0..BOARD_SIZE as i8 {
            let c = Coord::new(row, col);
            if c.is_dark() {
                squares.push(c);
            }
        }
    }
    squares
});

/// 8x8 grid of optional pieces. A piece is just its owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<PlayerColor>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Player One fills the dark squares of the top three rows, Player Two
    /// those of the bottom three.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for &sq in DARK_SQUARES.iter() {
            let row = sq.row as usize;
            if row < STARTING_ROWS {
                board.set(sq, Some(PlayerColor::PlayerOne));
            } else if row >= BOARD_SIZE - STARTING_ROWS {
                board.set(sq, Some(PlayerColor::PlayerTwo));
            }
        }
        board
    }

    /// Owner of the piece on `coord`, if any. Panics when off the board.
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<PlayerColor> {
        assert!(coord.is_on_board(), "board read off the edge: {:?}", coord);
        self.cells[coord.row as usize][coord.col as usize]
    }

    /// Panics when off the board.
    #[inline]
    pub fn set(&mut self, coord: Coord, piece: Option<PlayerColor>) {
        assert!(coord.is_on_board(), "board write off the edge: {:?}", coord);
        self.cells[coord.row as usize][coord.col as usize] = piece;
    }

    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.get(coord).is_none()
    }

    pub fn piece_count(&self, player: PlayerColor) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(player))
            .count()
    }

    /// Squares occupied by `player`, in row-major order.
    pub fn pieces(&self, player: PlayerColor) -> Vec<Coord> {
        let mut out = Vec::new();
        for row in 0..BOARD_SIZE as i8 {
            for col in 0..BOARD_SIZE as i8 {
                let c = Coord::new(row, col);
                if self.get(c) == Some(player) {
                    out.push(c);
                }
            }
        }
        out
    }

    /// Build a board from `(coord, owner)` pairs on an empty grid.
    pub fn with_pieces(pieces: &[(Coord, PlayerColor)]) -> Self {
        let mut board = Self::empty();
        for &(c, p) in pieces {
            board.set(c, Some(p));
        }
        board
    }
}

/// Standard starting layout.
pub fn create_initial_board() -> Board {
    Board::initial()
}

pub fn is_on_board(coord: Coord) -> bool {
    coord.is_on_board()
}

/// A side wins once the other has no pieces left.
pub fn winner(board: &Board) -> Option<PlayerColor> {
    if board.piece_count(PlayerColor::PlayerOne) == 0 {
        return Some(PlayerColor::PlayerTwo);
    }
    if board.piece_count(PlayerColor::PlayerTwo) == 0 {
        return Some(PlayerColor::PlayerOne);
    }
    None
}

impl fmt::Display for Board {
    /// Text rendering with notation labels: `r`/`b` pieces, `.` empty dark
    /// squares, `-` light squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: String = COLUMN_LABELS
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "  {}", header)?;
        for row in 0..BOARD_SIZE as i8 {
            let label = ROW_LABELS[row as usize];
            let cells: Vec<String> = (0..BOARD_SIZE as i8)
                .map(|col| {
                    let c = Coord::new(row, col);
                    match self.get(c) {
                        Some(p) => p.glyph().to_string(),
                        None if c.is_dark() => ".".into(),
                        None => "-".into(),
                    }
                })
                .collect();
            writeln!(f, "{} {} {}", label, cells.join(" "), label)?;
        }
        write!(f, "  {}", header)
    }
}
