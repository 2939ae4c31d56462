//! Interactive terminal session: renders the board, reads notation from
//! stdin and paces the computer's reply.

use std::io::Write;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use draughts_engine::engine::bot_strategy::BotStrategy;
use draughts_engine::engine::models::Player;
use draughts_engine::games::draughts::{DraughtsPlugin, GameState, MoveError, PlayerColor, TurnPhase};

const HISTORY_SHOWN: usize = 8;

pub struct ComputerOpponent {
    pub color: PlayerColor,
    pub strategy: Box<dyn BotStrategy<DraughtsPlugin>>,
    pub think_delay: Duration,
}

pub struct SessionConfig {
    pub computer: Option<ComputerOpponent>,
    pub seed: Option<u64>,
}

enum Command {
    Quit,
    NewGame,
    Cancel,
    Help,
    Square(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let input = line.trim();
    if input.is_empty() {
        return None;
    }
    Some(match input.to_ascii_lowercase().as_str() {
        "quit" | "q" | "exit" => Command::Quit,
        "new" | "reset" => Command::NewGame,
        "cancel" | "esc" => Command::Cancel,
        "help" | "?" => Command::Help,
        _ => Command::Square(input.to_string()),
    })
}

fn prompt_text(state: &GameState) -> String {
    match state.phase {
        TurnPhase::AwaitingSource => format!("{}'s turn - Select piece (e.g., E3):", state.current_player),
        TurnPhase::AwaitingTarget { .. } => "Select destination for piece:".into(),
        TurnPhase::GameOver => "Type 'new' to play again or 'quit' to exit:".into(),
    }
}

/// Feedback after a successful selection.
fn selection_message(state: &GameState) -> Option<&'static str> {
    let (_, dests) = state.selection()?;
    Some(if dests.is_empty() {
        "That piece has no legal moves; type 'cancel' to pick another"
    } else if state.selection_has_capture() {
        "Capture move available!"
    } else {
        "Piece selected! Choose a highlighted square to move to"
    })
}

fn render(state: &GameState) {
    println!();
    println!(
        "Scores: {} {}  |  {} {}",
        PlayerColor::PlayerOne,
        state.score(PlayerColor::PlayerOne),
        PlayerColor::PlayerTwo,
        state.score(PlayerColor::PlayerTwo),
    );
    println!("{}", state.board);
    if let Some((src, dests)) = state.selection() {
        let options: Vec<String> = dests.iter().map(|d| d.to_string()).collect();
        println!("Selected {} -> [{}]", src, options.join(", "));
    }
    if !state.history.is_empty() {
        let skip = state.history.len().saturating_sub(HISTORY_SHOWN);
        let recent: Vec<String> = state.history[skip..].iter().map(|m| m.to_string()).collect();
        println!("Moves: {}", recent.join("  "));
    }
}

fn print_help() {
    println!("Enter a square such as E3 to select a piece, then its destination.");
    println!("Commands: cancel, new, quit");
}

fn show_error(err: &MoveError) {
    println!("! {}", err);
}

pub async fn run(config: SessionConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let players: Vec<Player> = PlayerColor::ALL
        .iter()
        .map(|c| match &config.computer {
            Some(cpu) if cpu.color == *c => Player::bot(c.seat(), "computer"),
            _ => Player::human(c.seat(), c.colour_name()),
        })
        .collect();

    let mut state = GameState::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    tracing::info!(computer = config.computer.is_some(), "new game");
    print_help();

    loop {
        if !state.is_over() && !state.has_legal_move() {
            println!("{} has no legal moves. The game is drawn.", state.current_player);
            state = state.end_blocked();
        }

        if let Some(cpu) = config
            .computer
            .as_ref()
            .filter(|cpu| !state.is_over() && cpu.color == state.current_player)
        {
            render(&state);
            println!("Computer is thinking...");
            tokio::time::sleep(cpu.think_delay).await;
            let action = cpu
                .strategy
                .choose_action(&state, cpu.color.seat(), &DraughtsPlugin, &players, &mut rng);
            match action {
                Some(a) => {
                    state = state.play_move(a.from, a.to)?;
                    if let Some(last) = state.last_move() {
                        println!("Computer played {}", last);
                    }
                }
                None => state = state.end_blocked(),
            }
            continue;
        }

        render(&state);
        if let Some(w) = state.winner {
            println!("{} wins!", w);
        }
        print!("{} ", prompt_text(&state));
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let command = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match command {
            Command::Quit => break,
            Command::NewGame => {
                state = GameState::new();
                tracing::info!("new game");
            }
            Command::Cancel => state = state.cancel(),
            Command::Help => print_help(),
            Command::Square(input) => match state.submit_notation(&input) {
                Ok(next) => {
                    if let Some(msg) = selection_message(&next) {
                        println!("{}", msg);
                    }
                    state = next;
                }
                Err(e) => show_error(&e),
            },
        }
    }

    println!("Goodbye!");
    Ok(())
}
