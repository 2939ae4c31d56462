//! Bot-vs-bot diagnostic simulations.
//!
//! The large runs are NOT run in CI. Use them locally to eyeball how often
//! random games end in a win versus a blocked draw.
//!
//! Run with:
//!     cargo test --release --test bot_diagnostics -- --ignored --nocapture

use draughts_engine::engine::arena::{play_one_game, run_arena};
use draughts_engine::engine::bot_strategy::{BotStrategy, RandomStrategy};
use draughts_engine::engine::models::Player;
use draughts_engine::engine::plugin::GamePlugin;
use draughts_engine::games::draughts::computer::ShuffleScanStrategy;
use draughts_engine::games::draughts::DraughtsPlugin;

fn make_players() -> Vec<Player> {
    vec![Player::bot(0, "red"), Player::bot(1, "blue")]
}

#[test]
fn single_game_event_log_is_consistent() {
    let plugin = DraughtsPlugin;
    let players = make_players();
    let strategy = ShuffleScanStrategy;
    let seats: Vec<&dyn BotStrategy<DraughtsPlugin>> = vec![&strategy, &strategy];

    let sim = play_one_game(&plugin, &players, &seats, 11, 1000);
    let gr = sim.game_over.as_ref().expect("random game should finish within 1000 turns");

    let moved = sim.events.iter().filter(|e| e.event_type == "piece_moved").count();
    let captured = sim.events.iter().filter(|e| e.event_type == "piece_captured").count();
    assert_eq!(moved, sim.turns);
    assert_eq!(moved, sim.state.history.len());
    assert_eq!(captured as f64, sim.scores.values().sum::<f64>());
    assert_eq!(sim.events.last().unwrap().event_type, "game_over");
    assert!(gr.reason == "normal" || gr.reason == "blocked");
    assert_eq!(plugin.acting_seat(&sim.state), None);
}

#[test]
#[ignore]
fn shuffle_scan_vs_uniform() {
    let plugin = DraughtsPlugin;
    let num_games = 2000;

    let entrants: Vec<(String, Box<dyn BotStrategy<DraughtsPlugin>>)> = vec![
        ("shuffle_scan".into(), Box::new(ShuffleScanStrategy)),
        ("uniform".into(), Box::new(RandomStrategy)),
    ];

    let result = run_arena(&plugin, &entrants, num_games, 42, true, 1000, None);

    println!("\n{}", result.summary());
    println!(
        "\n  decisive={:.0}%  avg turns={:.1}",
        (num_games - result.draws) as f64 / num_games as f64 * 100.0,
        result.avg_turns()
    );

    assert_eq!(result.wins.values().sum::<usize>() + result.draws, num_games);
}
