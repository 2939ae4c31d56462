//! Turn sequencing for one game of draughts.
//!
//! `GameState` is a value: every transition borrows the current state and
//! returns a new one, leaving the original intact. Whoever drives the game
//! keeps the single "current state" slot and swaps it after each call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::board::{winner, Board};
use super::error::MoveError;
use super::moves::{apply_move, has_any_move, is_capture_move, legal_destinations};
use super::notation::notation_to_coordinate;
use super::types::{Coord, MoveRecord, PlayerColor};

/// Where the game is in the two-step select-then-move cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TurnPhase {
    AwaitingSource,
    /// A piece is selected; its legal destinations are cached here.
    AwaitingTarget {
        source: Coord,
        destinations: Vec<Coord>,
    },
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: PlayerColor,
    /// Captures made by each side.
    pub scores: BTreeMap<PlayerColor, u32>,
    pub history: Vec<MoveRecord>,
    pub winner: Option<PlayerColor>,
    pub phase: TurnPhase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh game: standard layout, Player One to move.
    pub fn new() -> Self {
        Self::from_board(Board::initial(), PlayerColor::PlayerOne)
    }

    /// Start from an arbitrary position with zero scores and no history.
    pub fn from_board(board: Board, to_move: PlayerColor) -> Self {
        Self {
            board,
            current_player: to_move,
            scores: PlayerColor::ALL.iter().map(|p| (*p, 0)).collect(),
            history: Vec::new(),
            winner: None,
            phase: TurnPhase::AwaitingSource,
        }
    }

    pub fn score(&self, player: PlayerColor) -> u32 {
        self.scores.get(&player).copied().unwrap_or(0)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, TurnPhase::GameOver)
    }

    /// Selected square and its cached destinations while awaiting a target.
    pub fn selection(&self) -> Option<(Coord, &[Coord])> {
        match &self.phase {
            TurnPhase::AwaitingTarget {
                source,
                destinations,
            } => Some((*source, destinations.as_slice())),
            _ => None,
        }
    }

    /// True when the current selection has at least one capture available.
    pub fn selection_has_capture(&self) -> bool {
        self.selection()
            .map(|(src, dests)| dests.iter().any(|d| is_capture_move(src, *d)))
            .unwrap_or(false)
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Whether the side to move has any legal move at all.
    pub fn has_legal_move(&self) -> bool {
        has_any_move(&self.board, self.current_player)
    }

    /// Select one of the current player's pieces and cache its destinations.
    ///
    /// A piece with no legal destination can still be selected. Selecting
    /// while another piece is selected replaces that selection.
    pub fn select_source(&self, coord: Coord) -> Result<GameState, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        match self.board.get(coord) {
            None => return Err(MoveError::NoPiece(coord)),
            Some(owner) if owner != self.current_player => {
                return Err(MoveError::WrongOwner(coord))
            }
            Some(_) => {}
        }

        let destinations = legal_destinations(&self.board, coord, self.current_player);
        tracing::debug!(
            player = ?self.current_player,
            source = %coord,
            options = destinations.len(),
            "piece selected"
        );

        let mut next = self.clone();
        next.phase = TurnPhase::AwaitingTarget {
            source: coord,
            destinations,
        };
        Ok(next)
    }

    /// Move the selected piece to `coord`, which must be one of the cached
    /// destinations.
    pub fn select_target(&self, coord: Coord) -> Result<GameState, MoveError> {
        let (source, destinations) = match &self.phase {
            TurnPhase::GameOver => return Err(MoveError::GameOver),
            TurnPhase::AwaitingSource => return Err(MoveError::NoSelection),
            TurnPhase::AwaitingTarget {
                source,
                destinations,
            } => (*source, destinations),
        };
        if !destinations.contains(&coord) {
            return Err(MoveError::IllegalDestination {
                from: source,
                to: coord,
            });
        }
        Ok(self.complete_move(source, coord))
    }

    /// Drop the current selection. The board is untouched.
    pub fn cancel(&self) -> GameState {
        let mut next = self.clone();
        if !next.is_over() {
            next.phase = TurnPhase::AwaitingSource;
        }
        next
    }

    /// End the game as a draw because the side to move cannot move.
    pub fn end_blocked(&self) -> GameState {
        let mut next = self.clone();
        if !next.is_over() {
            tracing::info!(player = ?next.current_player, moves = next.history.len(), "game blocked");
            next.winner = None;
            next.phase = TurnPhase::GameOver;
        }
        next
    }

    /// Select and move in one step.
    pub fn play_move(&self, from: Coord, to: Coord) -> Result<GameState, MoveError> {
        self.select_source(from)?.select_target(to)
    }

    /// Route notation input by phase: a source while awaiting one, otherwise a
    /// target.
    pub fn submit_notation(&self, input: &str) -> Result<GameState, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let coord = notation_to_coordinate(input)?;
        match self.phase {
            TurnPhase::AwaitingSource => self.select_source(coord),
            _ => self.select_target(coord),
        }
    }

    fn complete_move(&self, from: Coord, to: Coord) -> GameState {
        let mover = self.current_player;
        let applied = apply_move(&self.board, from, to, mover);
        tracing::debug!(
            player = ?mover,
            from = %from,
            to = %to,
            captured = applied.record.captured,
            "move applied"
        );

        let mut next = self.clone();
        next.board = applied.board;
        next.history.push(applied.record);
        *next.scores.entry(mover).or_insert(0) += applied.score_delta;

        match winner(&next.board) {
            Some(w) => {
                tracing::info!(winner = ?w, moves = next.history.len(), "game over");
                next.winner = Some(w);
                next.phase = TurnPhase::GameOver;
            }
            None => {
                next.current_player = mover.opponent();
                next.phase = TurnPhase::AwaitingSource;
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i8, col: i8) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_new_game() {
        let g = GameState::new();
        assert_eq!(g.current_player, PlayerColor::PlayerOne);
        assert_eq!(g.score(PlayerColor::PlayerOne), 0);
        assert_eq!(g.score(PlayerColor::PlayerTwo), 0);
        assert!(g.history.is_empty());
        assert_eq!(g.winner, None);
        assert_eq!(g.phase, TurnPhase::AwaitingSource);
    }

    #[test]
    fn test_select_source_errors_leave_state() {
        let g = GameState::new();
        assert_eq!(g.select_source(c(3, 0)), Err(MoveError::NoPiece(c(3, 0))));
        assert_eq!(g.select_source(c(5, 0)), Err(MoveError::WrongOwner(c(5, 0))));
        assert_eq!(g.select_target(c(3, 0)), Err(MoveError::NoSelection));
        assert_eq!(g, GameState::new());
    }

    #[test]
    fn test_select_blocked_piece_still_transitions() {
        let g = GameState::new().select_source(c(0, 1)).unwrap();
        let (src, dests) = g.selection().unwrap();
        assert_eq!(src, c(0, 1));
        assert!(dests.is_empty());
    }

    #[test]
    fn test_illegal_target_rejected() {
        let g = GameState::new().select_source(c(2, 1)).unwrap();
        let err = g.select_target(c(4, 3)).unwrap_err();
        assert_eq!(
            err,
            MoveError::IllegalDestination {
                from: c(2, 1),
                to: c(4, 3)
            }
        );
        assert!(g.selection().is_some());
    }

    #[test]
    fn test_cancel_discards_selection() {
        let g = GameState::new();
        let selected = g.select_source(c(2, 1)).unwrap();
        let cancelled = selected.cancel();
        assert_eq!(cancelled, g);
    }

    #[test]
    fn test_turn_alternates_and_history_grows() {
        let g = GameState::new().play_move(c(2, 1), c(3, 2)).unwrap();
        assert_eq!(g.current_player, PlayerColor::PlayerTwo);
        assert_eq!(g.history.len(), 1);
        assert_eq!(g.last_move().unwrap().from, "B6");
        let g = g.play_move(c(5, 4), c(4, 3)).unwrap();
        assert_eq!(g.current_player, PlayerColor::PlayerOne);
        assert_eq!(g.history.len(), 2);
    }

    #[test]
    fn test_capture_scores_and_flips_turn() {
        let board = Board::with_pieces(&[
            (c(3, 2), PlayerColor::PlayerOne),
            (c(4, 3), PlayerColor::PlayerTwo),
            (c(7, 0), PlayerColor::PlayerTwo),
        ]);
        let g = GameState::from_board(board, PlayerColor::PlayerOne)
            .select_source(c(3, 2))
            .unwrap();
        assert!(g.selection_has_capture());
        let g = g.select_target(c(5, 4)).unwrap();
        assert_eq!(g.score(PlayerColor::PlayerOne), 1);
        assert_eq!(g.current_player, PlayerColor::PlayerTwo);
        assert_eq!(g.winner, None);
        assert!(g.history[0].captured);
    }

    #[test]
    fn test_last_capture_wins() {
        let board = Board::with_pieces(&[
            (c(3, 2), PlayerColor::PlayerOne),
            (c(4, 3), PlayerColor::PlayerTwo),
        ]);
        let g = GameState::from_board(board, PlayerColor::PlayerOne)
            .play_move(c(3, 2), c(5, 4))
            .unwrap();
        assert_eq!(g.winner, Some(PlayerColor::PlayerOne));
        assert!(g.is_over());
        assert_eq!(g.current_player, PlayerColor::PlayerOne);
        assert_eq!(g.select_source(c(5, 4)), Err(MoveError::GameOver));
        assert_eq!(g.submit_notation("E3"), Err(MoveError::GameOver));
        assert!(g.cancel().is_over());
    }

    #[test]
    fn test_submit_notation_routes_by_phase() {
        let g = GameState::new();
        assert!(matches!(g.submit_notation("Z9"), Err(MoveError::InvalidFormat(_))));
        let g = g.submit_notation("b6").unwrap();
        assert!(g.selection().is_some());
        let g = g.submit_notation("C5").unwrap();
        assert_eq!(g.board.get(c(3, 2)), Some(PlayerColor::PlayerOne));
        assert_eq!(g.current_player, PlayerColor::PlayerTwo);
    }

    #[test]
    fn test_reselect_replaces_selection() {
        let g = GameState::new()
            .select_source(c(2, 1))
            .unwrap()
            .select_source(c(2, 3))
            .unwrap();
        assert_eq!(g.selection().unwrap().0, c(2, 3));
    }

    #[test]
    fn test_end_blocked_is_terminal_draw() {
        let board = Board::with_pieces(&[
            (c(5, 0), PlayerColor::PlayerOne),
            (c(0, 1), PlayerColor::PlayerTwo),
        ]);
        let g = GameState::from_board(board, PlayerColor::PlayerTwo);
        assert!(!g.has_legal_move());
        let done = g.end_blocked();
        assert!(done.is_over());
        assert_eq!(done.winner, None);
        assert_eq!(done.current_player, PlayerColor::PlayerTwo);
        assert_eq!(done.board, g.board);
        assert_eq!(done.select_source(c(0, 1)).unwrap_err(), MoveError::GameOver);
        assert_eq!(done.cancel(), done);
    }

    #[test]
    fn test_has_legal_move() {
        assert!(GameState::new().has_legal_move());
        let stuck = Board::with_pieces(&[
            (c(7, 0), PlayerColor::PlayerOne),
            (c(0, 1), PlayerColor::PlayerTwo),
        ]);
        assert!(!GameState::from_board(stuck, PlayerColor::PlayerOne).has_legal_move());
    }

    #[test]
    fn test_state_serializes() {
        let g = GameState::new().select_source(c(2, 1)).unwrap();
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["phase"]["phase"], "awaiting_target");
        assert_eq!(json["current_player"], "player_one");
        let back: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(back, g);
    }
}
