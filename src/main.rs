use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

mod session;

use draughts_engine::engine::bot_profiles::{load_default_profiles, load_profiles};
use draughts_engine::games::draughts::computer::build_strategy;
use draughts_engine::games::draughts::PlayerColor;
use session::{ComputerOpponent, SessionConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Red is played from the keyboard, blue by the computer
    Single,
    /// Both sides share the keyboard
    Multi,
}

#[derive(Parser)]
#[command(name = "draughts-engine", about = "Play simplified draughts in the terminal")]
struct Cli {
    /// Game mode
    #[arg(short, long, value_enum, default_value = "single", env = "DRAUGHTS_MODE")]
    mode: Mode,

    /// Pause before the computer moves, in milliseconds (overrides the profile)
    #[arg(long, env = "DRAUGHTS_COMPUTER_DELAY_MS")]
    computer_delay_ms: Option<u64>,

    /// Path to bot_profiles.toml (default: auto-discover)
    #[arg(long, env = "DRAUGHTS_BOT_PROFILES")]
    profiles: Option<PathBuf>,

    /// Bot profile name (default: the file's default_profile)
    #[arg(long)]
    bot: Option<String>,

    /// Random seed for the computer player
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path)?,
        None => load_default_profiles(),
    };
    let profile = profiles.resolve(cli.bot.as_deref())?;

    let computer = match cli.mode {
        Mode::Single => {
            let delay_ms = cli
                .computer_delay_ms
                .unwrap_or_else(|| profile.effective_think_delay_ms());
            tracing::info!(
                strategy = ?profile.strategy_type,
                delay_ms,
                "computer opponent configured"
            );
            Some(ComputerOpponent {
                color: PlayerColor::PlayerTwo,
                strategy: build_strategy(profile.strategy_type),
                think_delay: Duration::from_millis(delay_ms),
            })
        }
        Mode::Multi => None,
    };

    session::run(SessionConfig {
        computer,
        seed: cli.seed.or(profile.seed),
    })
    .await
}
