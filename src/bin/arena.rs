//! Arena CLI: run bot-vs-bot draughts games from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 1000 --p1-type shuffle_scan --p2-type uniform
//!   cargo run --release --bin arena -- --games 200 --p1-profile classic --p2-profile uniform --json

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use draughts_engine::engine::arena::run_arena;
use draughts_engine::engine::bot_profiles::{load_default_profiles, load_profiles, BotProfilesFile, StrategyType};
use draughts_engine::engine::bot_strategy::BotStrategy;
use draughts_engine::games::draughts::computer::build_strategy;
use draughts_engine::games::draughts::DraughtsPlugin;

#[derive(Parser)]
#[command(name = "arena", about = "Run bot-vs-bot arena experiments for draughts")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Alternate seat positions between games
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    alternate_seats: bool,

    /// Turn cap per game; capped games count as draws
    #[arg(long, default_value = "500")]
    max_turns: usize,

    /// Path to bot_profiles.toml
    #[arg(long, env = "DRAUGHTS_BOT_PROFILES")]
    profiles: Option<PathBuf>,

    /// Print the result as JSON instead of a text table
    #[arg(long)]
    json: bool,

    /// P1 display name
    #[arg(long, default_value = "p1")]
    p1_name: String,

    /// P1 profile name (from bot_profiles.toml)
    #[arg(long)]
    p1_profile: Option<String>,

    /// P1 strategy type: "shuffle_scan" or "uniform"
    #[arg(long, default_value = "shuffle_scan")]
    p1_type: StrategyType,

    /// P2 display name
    #[arg(long, default_value = "p2")]
    p2_name: String,

    /// P2 profile name (from bot_profiles.toml)
    #[arg(long)]
    p2_profile: Option<String>,

    /// P2 strategy type: "shuffle_scan" or "uniform"
    #[arg(long, default_value = "uniform")]
    p2_type: StrategyType,
}

/// Resolve a seat's display name and strategy. A profile, when given, wins
/// over the `--pN-type` flag.
fn resolve_player(
    name: &str,
    profile_name: Option<&str>,
    strategy_type: StrategyType,
    profiles: &BotProfilesFile,
) -> Result<(String, StrategyType), String> {
    match profile_name {
        Some(prof) => {
            let profile = profiles.resolve(Some(prof))?;
            let display = if name == "p1" || name == "p2" { prof.to_string() } else { name.to_string() };
            Ok((display, profile.strategy_type))
        }
        None => Ok((name.to_string(), strategy_type)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path)?,
        None => load_default_profiles(),
    };

    let (p1_name, p1_type) = resolve_player(&cli.p1_name, cli.p1_profile.as_deref(), cli.p1_type, &profiles)?;
    let (mut p2_name, p2_type) = resolve_player(&cli.p2_name, cli.p2_profile.as_deref(), cli.p2_type, &profiles)?;
    if p2_name == p1_name {
        p2_name = format!("{}_2", p2_name);
    }

    eprintln!(
        "Arena: {} games, seed={}, alternate_seats={}, max_turns={}",
        cli.games, cli.seed, cli.alternate_seats, cli.max_turns
    );
    eprintln!("  {}: type={:?}", p1_name, p1_type);
    eprintln!("  {}: type={:?}", p2_name, p2_type);
    eprintln!();

    let entrants: Vec<(String, Box<dyn BotStrategy<DraughtsPlugin>>)> = vec![
        (p1_name, build_strategy(p1_type)),
        (p2_name, build_strategy(p2_type)),
    ];

    let total = cli.games;
    let progress_cb = move |done: usize, _total: usize| {
        eprint!("\r  [{}/{}] games completed", done, total);
    };

    let result = run_arena(
        &DraughtsPlugin,
        &entrants,
        cli.games,
        cli.seed,
        cli.alternate_seats,
        cli.max_turns,
        Some(&progress_cb),
    );

    eprintln!("\r                                    "); // clear progress line
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.to_json())?);
    } else {
        println!("{}", result.summary());
    }
    Ok(())
}
