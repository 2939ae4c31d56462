//! Bot strategy trait and the game-agnostic random bot.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::engine::models::*;
use crate::engine::plugin::GamePlugin;

/// A bot strategy selects an action given the current typed game state.
///
/// Randomness comes from the caller's RNG so that seeded games replay exactly.
pub trait BotStrategy<P: GamePlugin>: Send + Sync {
    /// None when the seat has nothing it can do.
    fn choose_action(
        &self,
        state: &P::State,
        seat: usize,
        plugin: &P,
        players: &[Player],
        rng: &mut StdRng,
    ) -> Option<P::Action>;
}

/// Picks a uniformly random valid action.
pub struct RandomStrategy;

impl<P: GamePlugin> BotStrategy<P> for RandomStrategy {
    fn choose_action(
        &self,
        state: &P::State,
        seat: usize,
        plugin: &P,
        _players: &[Player],
        rng: &mut StdRng,
    ) -> Option<P::Action> {
        let valid = plugin.get_valid_actions(state, seat);
        valid.choose(rng).cloned()
    }
}
