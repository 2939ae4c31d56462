//! GamePlugin trait: the interface every game must implement.

use std::collections::HashMap;
use std::fmt::Debug;

use crate::engine::models::*;

/// Typed game rules driven by the simulator, bot strategies and the arena.
///
/// Seats are indices into the `players` slice, in turn order.
pub trait GamePlugin: Send + Sync {
    type State: Clone + Send + Sync;
    type Action: Clone + Debug + Send + Sync;

    fn game_id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn num_players(&self) -> usize;

    /// Create initial game state for the seated players.
    fn create_initial_state(&self, players: &[Player]) -> (Self::State, Vec<Event>);

    /// Seat expected to act next, or None once the game has ended.
    fn acting_seat(&self, state: &Self::State) -> Option<usize>;

    /// Return all legal actions for the given seat.
    fn get_valid_actions(&self, state: &Self::State, seat: usize) -> Vec<Self::Action>;

    /// Validate an action. Returns None if valid, Some(error) if invalid.
    fn validate_action(&self, state: &Self::State, seat: usize, action: &Self::Action) -> Option<String>;

    /// Apply a validated action, returning new state + events.
    fn apply_action(
        &self,
        state: &Self::State,
        action: &Self::Action,
        players: &[Player],
    ) -> TransitionResult<Self::State>;

    /// Current scores keyed by player_id.
    fn get_scores(&self, state: &Self::State, players: &[Player]) -> HashMap<String, f64>;
}
