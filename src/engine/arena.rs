//! Bot-vs-bot arena runner.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::engine::bot_strategy::BotStrategy;
use crate::engine::models::*;
use crate::engine::plugin::GamePlugin;
use crate::engine::simulator::{apply_action_in_place, SimulationState};

/// Aggregated results from an arena run.
#[derive(Debug, Clone, Serialize)]
pub struct ArenaResult {
    pub num_games: usize,
    pub wins: HashMap<String, usize>,
    pub draws: usize,
    pub total_scores: HashMap<String, Vec<f64>>,
    pub game_durations_ms: Vec<f64>,
    pub game_turns: Vec<usize>,
}

impl ArenaResult {
    pub fn win_rate(&self, name: &str) -> f64 {
        *self.wins.get(name).unwrap_or(&0) as f64 / self.num_games.max(1) as f64
    }

    pub fn avg_score(&self, name: &str) -> f64 {
        let scores = self.total_scores.get(name);
        match scores {
            Some(s) if !s.is_empty() => s.iter().sum::<f64>() / s.len() as f64,
            _ => 0.0,
        }
    }

    pub fn score_stddev(&self, name: &str) -> f64 {
        let scores = match self.total_scores.get(name) {
            Some(s) if s.len() >= 2 => s,
            _ => return 0.0,
        };
        let avg = self.avg_score(name);
        let variance = scores.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / (scores.len() - 1) as f64;
        variance.sqrt()
    }

    /// Wilson score interval for the win rate.
    pub fn confidence_interval_95(&self, name: &str) -> (f64, f64) {
        let n = self.num_games;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate(name);
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn avg_turns(&self) -> f64 {
        if self.game_turns.is_empty() {
            return 0.0;
        }
        self.game_turns.iter().sum::<usize>() as f64 / self.game_turns.len() as f64
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Arena Results ({} games)", self.num_games)];
        lines.push("=".repeat(60));
        let mut names: Vec<&String> = self.wins.keys().collect();
        names.sort();
        for name in names {
            let wr = self.win_rate(name);
            let (ci_lo, ci_hi) = self.confidence_interval_95(name);
            let avg = self.avg_score(name);
            let std = self.score_stddev(name);
            lines.push(format!(
                "  {:>12}: {:3} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]  captures={:4.1} +/- {:3.1}",
                name,
                self.wins[name],
                wr * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
                avg,
                std,
            ));
        }
        lines.push(format!("  {:>12}: {}", "Draws", self.draws));
        if !self.game_durations_ms.is_empty() {
            let avg_ms = self.game_durations_ms.iter().sum::<f64>() / self.game_durations_ms.len() as f64;
            let total_s = self.game_durations_ms.iter().sum::<f64>() / 1000.0;
            lines.push(format!(
                "  Avg game: {:.2}ms, {:.1} turns  |  Total: {:.2}s",
                avg_ms,
                self.avg_turns(),
                total_s
            ));
        }
        lines.join("\n")
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut names: Vec<&String> = self.wins.keys().collect();
        names.sort();
        let per_bot: serde_json::Map<String, serde_json::Value> = names
            .into_iter()
            .map(|name| {
                let (lo, hi) = self.confidence_interval_95(name);
                (
                    name.clone(),
                    serde_json::json!({
                        "wins": self.wins[name],
                        "win_rate": self.win_rate(name),
                        "ci95": [lo, hi],
                        "avg_score": self.avg_score(name),
                        "score_stddev": self.score_stddev(name),
                    }),
                )
            })
            .collect();
        serde_json::json!({
            "num_games": self.num_games,
            "draws": self.draws,
            "avg_turns": self.avg_turns(),
            "bots": per_bot,
        })
    }
}

/// Outcome of one arena game, keyed by strategy name.
struct GameOutcome {
    winner: Option<String>,
    scores: Vec<(String, f64)>,
    turns: usize,
    duration_ms: f64,
}

/// Seed for arena game `game_idx`.
pub fn game_seed(base_seed: u64, game_idx: usize) -> u64 {
    base_seed.wrapping_add(game_idx as u64)
}

/// Indices into the entrant list, one per seat. Entrant `i` sits in seat `i`
/// unless seats rotate, in which case game `g` shifts everyone by `g`.
pub fn seat_order(num_players: usize, game_idx: usize, alternate_seats: bool) -> Vec<usize> {
    (0..num_players)
        .map(|seat| if alternate_seats { (seat + game_idx) % num_players } else { seat })
        .collect()
}

/// Run `num_games` between the given entrants and return aggregated stats.
///
/// `entrants` is in seat order: the first entry plays seat 0 whenever seats
/// are not rotated. Game `i` uses seed `base_seed + i` (wrapping); games run
/// in parallel. Games that reach `max_turns` without a result count as draws.
pub fn run_arena<P: GamePlugin>(
    plugin: &P,
    entrants: &[(String, Box<dyn BotStrategy<P>>)],
    num_games: usize,
    base_seed: u64,
    alternate_seats: bool,
    max_turns: usize,
    progress_callback: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> ArenaResult {
    let num_players = plugin.num_players();
    assert_eq!(entrants.len(), num_players);
    let strategy_names: Vec<String> = entrants.iter().map(|(name, _)| name.clone()).collect();

    let completed = AtomicUsize::new(0);

    let outcomes: Vec<GameOutcome> = (0..num_games)
        .into_par_iter()
        .map(|game_idx| {
            let seed = game_seed(base_seed, game_idx);
            let seats = seat_order(num_players, game_idx, alternate_seats);

            let seat_assignment: Vec<&str> = seats.iter().map(|&i| entrants[i].0.as_str()).collect();

            let players: Vec<Player> = seat_assignment
                .iter()
                .enumerate()
                .map(|(i, name)| Player::bot(i, *name))
                .collect();

            let seat_strategies: Vec<&dyn BotStrategy<P>> =
                seats.iter().map(|&i| entrants[i].1.as_ref()).collect();

            let t0 = Instant::now();
            let sim = play_one_game(plugin, &players, &seat_strategies, seed, max_turns);
            let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

            let pid_to_name: HashMap<&str, &str> = players
                .iter()
                .map(|p| (p.player_id.as_str(), p.display_name.as_str()))
                .collect();

            let winner = sim
                .game_over
                .as_ref()
                .filter(|gr| !gr.is_draw())
                .and_then(|gr| pid_to_name.get(gr.winners[0].as_str()))
                .map(|name| name.to_string());

            let scores = sim
                .scores
                .iter()
                .filter_map(|(pid, score)| pid_to_name.get(pid.as_str()).map(|n| (n.to_string(), *score)))
                .collect();

            if sim.game_over.is_none() {
                tracing::debug!(game_idx, seed, turns = sim.turns, "arena game hit turn limit");
            }

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = progress_callback {
                cb(done, num_games);
            }

            GameOutcome {
                winner,
                scores,
                turns: sim.turns,
                duration_ms,
            }
        })
        .collect();

    let mut result = ArenaResult {
        num_games,
        wins: strategy_names.iter().map(|n| (n.clone(), 0)).collect(),
        draws: 0,
        total_scores: strategy_names.iter().map(|n| (n.clone(), Vec::new())).collect(),
        game_durations_ms: Vec::with_capacity(num_games),
        game_turns: Vec::with_capacity(num_games),
    };

    for outcome in outcomes {
        match outcome.winner {
            Some(name) => *result.wins.entry(name).or_insert(0) += 1,
            None => result.draws += 1,
        }
        for (name, score) in outcome.scores {
            result.total_scores.entry(name).or_default().push(score);
        }
        result.game_turns.push(outcome.turns);
        result.game_durations_ms.push(outcome.duration_ms);
    }

    tracing::info!(
        games = num_games,
        draws = result.draws,
        game = plugin.game_id(),
        "arena run finished"
    );
    result
}

/// Play a single seeded game to completion or the turn cap.
pub fn play_one_game<P: GamePlugin>(
    plugin: &P,
    players: &[Player],
    seat_strategies: &[&dyn BotStrategy<P>],
    seed: u64,
    max_turns: usize,
) -> SimulationState<P::State> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sim = SimulationState::new(plugin, players);

    while sim.game_over.is_none() && sim.turns < max_turns {
        let seat = match plugin.acting_seat(&sim.state) {
            Some(s) => s,
            None => break,
        };
        let strategy = match seat_strategies.get(seat) {
            Some(s) => *s,
            None => break,
        };
        let action = match strategy.choose_action(&sim.state, seat, plugin, players, &mut rng) {
            Some(a) => a,
            None => break,
        };
        apply_action_in_place(plugin, &mut sim, &action);
    }

    sim
}
