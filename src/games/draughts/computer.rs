//! Random computer opponent.

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::engine::bot_profiles::StrategyType;
use crate::engine::bot_strategy::{BotStrategy, RandomStrategy};
use crate::engine::models::Player;

use super::board::Board;
use super::game::GameState;
use super::moves::legal_destinations;
use super::plugin::{DraughtsAction, DraughtsPlugin};
use super::types::{Coord, PlayerColor};

/// Pick a move for `player`: walk its pieces in a uniformly random order, stop
/// at the first one that can move, and choose among its destinations
/// uniformly. Returns None when no piece can move.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    player: PlayerColor,
    rng: &mut R,
) -> Option<(Coord, Coord)> {
    let pieces = board.pieces(player);
    for i in index::sample(rng, pieces.len(), pieces.len()).into_iter() {
        let from = pieces[i];
        let dests = legal_destinations(board, from, player);
        if let Some(&to) = dests.choose(rng) {
            tracing::debug!(player = ?player, from = %from, to = %to, "computer move chosen");
            return Some((from, to));
        }
    }
    None
}

/// `choose_move` as a bot strategy, so the arena can seat it.
pub struct ShuffleScanStrategy;

impl BotStrategy<DraughtsPlugin> for ShuffleScanStrategy {
    fn choose_action(
        &self,
        state: &GameState,
        seat: usize,
        _plugin: &DraughtsPlugin,
        _players: &[Player],
        rng: &mut StdRng,
    ) -> Option<DraughtsAction> {
        let player = PlayerColor::from_seat(seat)?;
        choose_move(&state.board, player, rng).map(|(from, to)| DraughtsAction { from, to })
    }
}

pub fn build_strategy(strategy_type: StrategyType) -> Box<dyn BotStrategy<DraughtsPlugin>> {
    match strategy_type {
        StrategyType::ShuffleScan => Box::new(ShuffleScanStrategy),
        StrategyType::Uniform => Box::new(RandomStrategy),
    }
}
