//! Synchronous game simulator. Used by the arena to drive bot-vs-bot games.

use std::collections::HashMap;

use crate::engine::models::*;
use crate::engine::plugin::GamePlugin;

/// Mutable game state for synchronous simulation.
#[derive(Clone)]
pub struct SimulationState<S> {
    pub state: S,
    pub players: Vec<Player>,
    pub scores: HashMap<String, f64>,
    pub game_over: Option<GameResult>,
    pub turns: usize,
    pub events: Vec<Event>,
}

impl<S> SimulationState<S> {
    pub fn new<P: GamePlugin<State = S>>(plugin: &P, players: &[Player]) -> Self {
        let (state, events) = plugin.create_initial_state(players);
        Self {
            state,
            players: players.to_vec(),
            scores: players.iter().map(|p| (p.player_id.clone(), 0.0)).collect(),
            game_over: None,
            turns: 0,
            events,
        }
    }
}

/// Apply an action and fold its result into `sim`. Mutates `sim` in place.
pub fn apply_action_in_place<P: GamePlugin>(
    plugin: &P,
    sim: &mut SimulationState<P::State>,
    action: &P::Action,
) {
    let result = plugin.apply_action(&sim.state, action, &sim.players);
    sim.state = result.state;
    sim.events.extend(result.events);
    if !result.scores.is_empty() {
        sim.scores = result.scores;
    }
    sim.game_over = result.game_over;
    sim.turns += 1;
}
