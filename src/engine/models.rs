//! Core engine data types shared by every game plugin.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type PlayerId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub display_name: String,
    #[serde(default)]
    pub seat_index: usize,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub bot_id: Option<String>,
}

impl Player {
    pub fn human(seat_index: usize, display_name: &str) -> Self {
        Self {
            player_id: format!("p{}", seat_index),
            display_name: display_name.into(),
            seat_index,
            is_bot: false,
            bot_id: None,
        }
    }

    pub fn bot(seat_index: usize, bot_id: &str) -> Self {
        Self {
            player_id: format!("p{}", seat_index),
            display_name: bot_id.into(),
            seat_index,
            is_bot: true,
            bot_id: Some(bot_id.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_type: String,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Event {
    pub fn new(event_type: &str, player_id: Option<&str>, payload: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            player_id: player_id.map(Into::into),
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    /// Empty for a draw.
    pub winners: Vec<PlayerId>,
    pub final_scores: HashMap<String, f64>,
    #[serde(default = "default_reason")]
    pub reason: String,
}

fn default_reason() -> String {
    "normal".to_string()
}

impl GameResult {
    pub fn is_draw(&self) -> bool {
        self.winners.len() != 1
    }
}

/// Outcome of applying one action.
#[derive(Debug, Clone)]
pub struct TransitionResult<S> {
    pub state: S,
    pub events: Vec<Event>,
    pub scores: HashMap<String, f64>,
    pub game_over: Option<GameResult>,
}
