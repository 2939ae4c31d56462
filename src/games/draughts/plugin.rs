//! Draughts as a `GamePlugin`, so the simulator, bots and arena can drive it.
//!
//! Seat 0 plays Player One (red), seat 1 Player Two (blue). When the side to
//! move has no legal move the game ends as a draw with reason "blocked".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::models::*;
use crate::engine::plugin::GamePlugin;

use super::error::MoveError;
use super::game::GameState;
use super::moves::{captured_position, is_legal_move, legal_moves};
use super::types::{Coord, PlayerColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraughtsAction {
    pub from: Coord,
    pub to: Coord,
}

pub struct DraughtsPlugin;

fn player_id(players: &[Player], color: PlayerColor) -> Option<&str> {
    players.get(color.seat()).map(|p| p.player_id.as_str())
}

impl GamePlugin for DraughtsPlugin {
    type State = GameState;
    type Action = DraughtsAction;

    fn game_id(&self) -> &str { "draughts" }
    fn display_name(&self) -> &str { "Draughts" }
    fn num_players(&self) -> usize { 2 }

    fn create_initial_state(&self, players: &[Player]) -> (GameState, Vec<Event>) {
        let state = GameState::new();
        let events = vec![Event::new(
            "game_started",
            None,
            serde_json::json!({
                "players": players.iter().map(|p| &p.player_id).collect::<Vec<_>>(),
                "first": player_id(players, state.current_player),
            }),
        )];
        (state, events)
    }

    fn acting_seat(&self, state: &GameState) -> Option<usize> {
        if state.is_over() {
            None
        } else {
            Some(state.current_player.seat())
        }
    }

    fn get_valid_actions(&self, state: &GameState, seat: usize) -> Vec<DraughtsAction> {
        match PlayerColor::from_seat(seat) {
            Some(color) if !state.is_over() => legal_moves(&state.board, color)
                .into_iter()
                .map(|(from, to)| DraughtsAction { from, to })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn validate_action(&self, state: &GameState, seat: usize, action: &DraughtsAction) -> Option<String> {
        if state.is_over() {
            return Some("game is over".into());
        }
        if state.current_player.seat() != seat {
            return Some("not your turn".into());
        }
        if !action.from.is_on_board() || !action.to.is_on_board() {
            return Some("square is off the board".into());
        }
        if let Err(e) = state.select_source(action.from) {
            return Some(e.to_string());
        }
        if !is_legal_move(&state.board, action.from, action.to, state.current_player) {
            return Some(format!("Moving {} to {} is not valid for this piece", action.from, action.to));
        }
        None
    }

    fn apply_action(
        &self,
        state: &GameState,
        action: &DraughtsAction,
        players: &[Player],
    ) -> TransitionResult<GameState> {
        let mover = state.current_player;
        let mover_id = player_id(players, mover);

        let attempt = if action.from.is_on_board() && action.to.is_on_board() {
            state.play_move(action.from, action.to)
        } else {
            Err(MoveError::InvalidFormat(format!("{}->{}", action.from, action.to)))
        };
        let mut next = match attempt {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(error = %e, action = ?action, "rejected draughts action");
                return TransitionResult {
                    scores: self.get_scores(state, players),
                    state: state.clone(),
                    events: vec![Event::new(
                        "invalid_action",
                        mover_id,
                        serde_json::json!({ "kind": e.kind(), "message": e.to_string() }),
                    )],
                    game_over: None,
                };
            }
        };

        let mut events = vec![Event::new(
            "piece_moved",
            mover_id,
            serde_json::json!({
                "from": action.from.to_string(),
                "to": action.to.to_string(),
                "captured": captured_position(action.from, action.to).is_some(),
            }),
        )];
        if let Some(at) = captured_position(action.from, action.to) {
            events.push(Event::new(
                "piece_captured",
                mover_id,
                serde_json::json!({ "at": at.to_string() }),
            ));
        }

        let scores = self.get_scores(&next, players);
        let game_over = if let Some(w) = next.winner {
            Some(GameResult {
                winners: player_id(players, w).map(|id| vec![id.to_string()]).unwrap_or_default(),
                final_scores: scores.clone(),
                reason: "normal".into(),
            })
        } else if !next.has_legal_move() {
            tracing::debug!(player = ?next.current_player, "side to move is blocked");
            next = next.end_blocked();
            Some(GameResult {
                winners: Vec::new(),
                final_scores: scores.clone(),
                reason: "blocked".into(),
            })
        } else {
            None
        };

        if let Some(gr) = &game_over {
            events.push(Event::new(
                "game_over",
                None,
                serde_json::json!({ "winners": gr.winners, "reason": gr.reason }),
            ));
        }

        TransitionResult {
            state: next,
            events,
            scores,
            game_over,
        }
    }

    fn get_scores(&self, state: &GameState, players: &[Player]) -> HashMap<String, f64> {
        PlayerColor::ALL
            .iter()
            .filter_map(|c| player_id(players, *c).map(|id| (id.to_string(), state.score(*c) as f64)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::arena::run_arena;
    use crate::engine::bot_strategy::{BotStrategy, RandomStrategy};
    use crate::games::draughts::board::Board;
    use crate::games::draughts::computer::ShuffleScanStrategy;

    fn make_players() -> Vec<Player> {
        vec![Player::bot(0, "red"), Player::bot(1, "blue")]
    }

    fn c(row: i8, col: i8) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_game_flow() {
        let plugin = DraughtsPlugin;
        let players = make_players();
        let (state, events) = plugin.create_initial_state(&players);
        assert_eq!(events[0].event_type, "game_started");
        assert_eq!(plugin.acting_seat(&state), Some(0));
        assert_eq!(plugin.get_valid_actions(&state, 0).len(), 7);

        let action = DraughtsAction { from: c(2, 1), to: c(3, 2) };
        assert_eq!(plugin.validate_action(&state, 0, &action), None);
        let result = plugin.apply_action(&state, &action, &players);
        assert!(result.game_over.is_none());
        assert_eq!(result.events[0].event_type, "piece_moved");
        assert_eq!(result.events[0].payload["from"], "B6");
        assert_eq!(plugin.acting_seat(&result.state), Some(1));
    }

    #[test]
    fn test_validate_rejects() {
        let plugin = DraughtsPlugin;
        let state = GameState::new();
        let wrong_turn = DraughtsAction { from: c(5, 0), to: c(4, 1) };
        assert_eq!(plugin.validate_action(&state, 1, &wrong_turn).as_deref(), Some("not your turn"));
        let empty = DraughtsAction { from: c(3, 0), to: c(4, 1) };
        assert!(plugin.validate_action(&state, 0, &empty).unwrap().contains("no piece"));
        let backwards = DraughtsAction { from: c(2, 1), to: c(1, 0) };
        assert!(plugin.validate_action(&state, 0, &backwards).is_some());
        let off = DraughtsAction { from: c(2, 7), to: c(3, 8) };
        assert!(plugin.validate_action(&state, 0, &off).is_some());
    }

    #[test]
    fn test_capture_win_ends_game() {
        let plugin = DraughtsPlugin;
        let players = make_players();
        let board = Board::with_pieces(&[
            (c(3, 2), PlayerColor::PlayerOne),
            (c(4, 3), PlayerColor::PlayerTwo),
        ]);
        let state = GameState::from_board(board, PlayerColor::PlayerOne);
        let result = plugin.apply_action(&state, &DraughtsAction { from: c(3, 2), to: c(5, 4) }, &players);
        let gr = result.game_over.unwrap();
        assert_eq!(gr.winners, vec!["p0".to_string()]);
        assert_eq!(gr.final_scores["p0"], 1.0);
        let kinds: Vec<&str> = result.events.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(kinds, vec!["piece_moved", "piece_captured", "game_over"]);
        assert_eq!(plugin.acting_seat(&result.state), None);
    }

    #[test]
    fn test_blocked_side_is_draw() {
        let plugin = DraughtsPlugin;
        let players = make_players();
        // Blue's last piece sits on the top edge and cannot advance.
        let board = Board::with_pieces(&[
            (c(5, 0), PlayerColor::PlayerOne),
            (c(0, 1), PlayerColor::PlayerTwo),
        ]);
        let state = GameState::from_board(board, PlayerColor::PlayerOne);
        let result = plugin.apply_action(&state, &DraughtsAction { from: c(5, 0), to: c(6, 1) }, &players);
        let gr = result.game_over.unwrap();
        assert!(gr.is_draw());
        assert_eq!(gr.reason, "blocked");
        assert!(result.state.is_over());
        assert_eq!(result.state.winner, None);
        assert_eq!(plugin.acting_seat(&result.state), None);
        assert!(plugin.get_valid_actions(&result.state, 1).is_empty());
    }

    #[test]
    fn test_invalid_action_keeps_state() {
        let plugin = DraughtsPlugin;
        let players = make_players();
        let state = GameState::new();
        let result = plugin.apply_action(&state, &DraughtsAction { from: c(2, 1), to: c(4, 3) }, &players);
        assert_eq!(result.state, state);
        assert_eq!(result.events[0].event_type, "invalid_action");
        assert_eq!(result.events[0].payload["kind"], "illegal_destination");
    }

    #[test]
    fn test_off_board_action_is_invalid() {
        let plugin = DraughtsPlugin;
        let players = make_players();
        let state = GameState::new();
        for action in [
            DraughtsAction { from: c(2, 9), to: c(3, 8) },
            DraughtsAction { from: c(2, 1), to: c(-1, 0) },
        ] {
            let result = plugin.apply_action(&state, &action, &players);
            assert_eq!(result.state, state);
            assert!(result.game_over.is_none());
            assert_eq!(result.events.len(), 1);
            assert_eq!(result.events[0].event_type, "invalid_action");
            assert_eq!(result.events[0].payload["kind"], "invalid_format");
        }
    }

    #[test]
    fn test_random_bots_finish() {
        let plugin = DraughtsPlugin;
        let entrants: Vec<(String, Box<dyn BotStrategy<DraughtsPlugin>>)> = vec![
            ("shuffle".into(), Box::new(ShuffleScanStrategy)),
            ("uniform".into(), Box::new(RandomStrategy)),
        ];

        let result = run_arena(&plugin, &entrants, 6, 42, true, 500, None);

        assert_eq!(result.num_games, 6);
        let total_outcomes = result.wins.values().sum::<usize>() + result.draws;
        assert_eq!(total_outcomes, 6);
        assert_eq!(result.game_turns.len(), 6);
        assert!(result.game_turns.iter().all(|t| *t > 0 && *t <= 500));
    }

    #[test]
    fn test_arena_is_reproducible() {
        let plugin = DraughtsPlugin;
        let entrants: Vec<(String, Box<dyn BotStrategy<DraughtsPlugin>>)> = vec![
            ("a".into(), Box::new(ShuffleScanStrategy)),
            ("b".into(), Box::new(ShuffleScanStrategy)),
        ];

        let first = run_arena(&plugin, &entrants, 4, 7, true, 500, None);
        let second = run_arena(&plugin, &entrants, 4, 7, true, 500, None);
        assert_eq!(first.game_turns, second.game_turns);
        assert_eq!(first.wins, second.wins);
        assert_eq!(first.total_scores, second.total_scores);
    }
}
