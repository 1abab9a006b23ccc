//! Draughts CLI
//!
//! Play English draughts in the terminal, against another person at the
//! same keyboard or against the random selector.

mod console;
mod render;

use std::env;
use std::io::{self, BufReader};

use anyhow::{Context, Result, bail};
use draughts_core::{Colour, Game, GameError, MoveSelector, Seats};
use random_selector::RandomSelector;
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleSelector;
use crate::render::render_board;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Player {
    Human,
    Random,
}

impl Player {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "human" => Ok(Player::Human),
            "random" => Ok(Player::Random),
            other => bail!("unknown player kind: {other} (expected human or random)"),
        }
    }
}

struct PlayArgs {
    red: Player,
    white: Player,
    seed: Option<u64>,
    max_turns: Option<u32>,
}

fn print_usage() {
    println!("Draughts");
    println!();
    println!("Usage:");
    println!("  draughts play [--red human|random] [--white human|random] [--seed N] [--max-turns N]");
    println!();
    println!("Enter a move as two squares, origin then destination, e.g. `2,5 3,4`.");
    println!("Type `quit` to leave the game.");
}

fn parse_play_args(args: &[String]) -> Result<PlayArgs> {
    let mut parsed = PlayArgs {
        red: Player::Human,
        white: Player::Human,
        seed: None,
        max_turns: None,
    };
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let value = args
            .get(i)
            .with_context(|| format!("{flag} needs a value"))?;
        match flag {
            "--red" | "-r" => parsed.red = Player::parse(value)?,
            "--white" | "-w" => parsed.white = Player::parse(value)?,
            "--seed" | "-s" => parsed.seed = Some(value.parse().context("--seed")?),
            "--max-turns" | "-t" => {
                parsed.max_turns = Some(value.parse().context("--max-turns")?)
            }
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }
    Ok(parsed)
}

fn selector_for<'a>(player: Player, seed: Option<u64>) -> Box<dyn MoveSelector + 'a> {
    match player {
        Player::Human => Box::new(ConsoleSelector::new(BufReader::new(io::stdin()), io::stdout())),
        Player::Random => match seed {
            Some(seed) => Box::new(RandomSelector::with_seed(seed)),
            None => Box::new(RandomSelector::new()),
        },
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let selector: Box<dyn MoveSelector> = if args.red == Player::Human && args.white == Player::Human {
        selector_for(Player::Human, None)
    } else {
        let white_seed = args.seed.map(|s| s.wrapping_add(1));
        Box::new(Seats::new(
            selector_for(args.red, args.seed),
            selector_for(args.white, white_seed),
        ))
    };

    let mut game = Game::new_game("terminal", selector);
    let mut turns = 0;
    while !game.is_game_over() {
        if args.max_turns.is_some_and(|cap| turns >= cap) {
            println!("Turn limit reached.");
            break;
        }
        turns += 1;
        match game.turn() {
            Ok(record) => {
                let moves: Vec<String> = record.moves.iter().map(|m| m.to_string()).collect();
                print!("{}: {}", record.player, moves.join(", "));
                if !record.captured.is_empty() {
                    print!(" (captured {})", record.captured.len());
                }
                if record.promoted {
                    print!(" (crowned)");
                }
                println!();
            }
            Err(GameError::SelectionAborted) => {
                println!("Game abandoned.");
                return Ok(());
            }
            Err(e) => return Err(e).context("game stopped"),
        }
    }

    let board = game.board();
    println!();
    print!("{}", render_board(board, None));
    if let Some(message) = board.result_message() {
        println!("{message}");
    }
    println!(
        "Pieces left: {} Red, {} White",
        board.count(Colour::Red),
        board.count(Colour::White)
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("play") => play(parse_play_args(&args[1..])?),
        None | Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some(other) => bail!("unknown command: {other}"),
    }
}
