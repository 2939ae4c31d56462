//! Move generation and execution.
//!
//! Pieces step one square forward diagonally onto an empty square, or jump
//! two squares over an adjacent opposing piece which is then removed. There
//! is no kinging, no chained jumps, and capturing is never mandatory.

use super::board::Board;
use super::notation::coordinate_to_notation;
use super::types::{Coord, MoveRecord, PlayerColor};

/// Legal destinations for the piece on `source`, moving as `player`.
///
/// Does not check that `source` actually holds a piece of `player`; callers
/// validate ownership first. Order is unspecified.
pub fn legal_destinations(board: &Board, source: Coord, player: PlayerColor) -> Vec<Coord> {
    debug_assert!(source.is_on_board());
    let mut out = Vec::with_capacity(2);

    for (d_row, d_col) in player.directions() {
        let step = source.offset(d_row, d_col);
        if step.is_on_board() && board.is_empty_at(step) {
            out.push(step);
        }

        let jump = source.offset(2 * d_row, 2 * d_col);
        if jump.is_on_board()
            && board.is_empty_at(jump)
            && board.get(step) == Some(player.opponent())
        {
            out.push(jump);
        }
    }

    out
}

pub fn is_legal_move(board: &Board, from: Coord, to: Coord, player: PlayerColor) -> bool {
    legal_destinations(board, from, player).contains(&to)
}

/// Every (from, to) pair available to `player`.
pub fn legal_moves(board: &Board, player: PlayerColor) -> Vec<(Coord, Coord)> {
    board
        .pieces(player)
        .into_iter()
        .flat_map(|from| {
            legal_destinations(board, from, player)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

pub fn has_any_move(board: &Board, player: PlayerColor) -> bool {
    board
        .pieces(player)
        .into_iter()
        .any(|from| !legal_destinations(board, from, player).is_empty())
}

/// A move is a capture exactly when it spans two rows and two columns.
pub fn is_capture_move(from: Coord, to: Coord) -> bool {
    (to.row - from.row).abs() == 2 && (to.col - from.col).abs() == 2
}

/// Square jumped over by a capture move, or None for a simple move.
pub fn captured_position(from: Coord, to: Coord) -> Option<Coord> {
    if !is_capture_move(from, to) {
        return None;
    }
    Some(Coord::new(
        from.row + (to.row - from.row) / 2,
        from.col + (to.col - from.col) / 2,
    ))
}

/// Result of applying one move to a board.
#[derive(Debug, Clone)]
pub struct AppliedMove {
    pub board: Board,
    pub record: MoveRecord,
    /// Points earned by the mover: 1 for a capture, else 0.
    pub score_delta: u32,
    /// Square whose piece was removed, if any.
    pub captured: Option<Coord>,
}

/// Apply a move that `legal_destinations` already allowed. The input board is
/// left untouched; legality is not re-checked.
pub fn apply_move(board: &Board, from: Coord, to: Coord, player: PlayerColor) -> AppliedMove {
    let mut next = board.clone();
    next.set(from, None);
    next.set(to, Some(player));

    let captured = captured_position(from, to);
    if let Some(mid) = captured {
        next.set(mid, None);
    }

    AppliedMove {
        board: next,
        record: MoveRecord {
            player,
            from: coordinate_to_notation(from),
            to: coordinate_to_notation(to),
            captured: captured.is_some(),
        },
        score_delta: u32::from(captured.is_some()),
        captured,
    }
}
