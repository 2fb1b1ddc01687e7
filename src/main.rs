//! Tictactoe-Rust: tic-tac-toe against an optimal minimax opponent.
//!
//! ## Usage
//!
//! - `tictactoe-rust` - Show a demo
//! - `tictactoe-rust play [--name NAME] [--pvp]` - Play in the terminal
//! - `tictactoe-rust protocol` - Text protocol server on stdin/stdout
//! - `tictactoe-rust selfplay` - Engine against itself
//! - `tictactoe-rust arena [--games N] [--seed S] [--engine x|o]` - Engine
//!   against a random mover

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictactoe_rust::board::{Board, Mark, parse_coord, str_coord};
use tictactoe_rust::constants::ARENA_GAMES;
use tictactoe_rust::playout;
use tictactoe_rust::protocol::ProtocolEngine;
use tictactoe_rust::search::best_move_with_stats;
use tictactoe_rust::session::{Event, Mode, Session};

/// Tictactoe-Rust: tic-tac-toe with an optimal minimax opponent
#[derive(Parser)]
#[command(name = "tictactoe-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search and session details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game in the terminal
    Play {
        /// Display name for X
        #[arg(short, long)]
        name: Option<String>,
        /// Two humans instead of human vs computer
        #[arg(long)]
        pvp: bool,
    },
    /// Start the text protocol server for use with external front ends
    Protocol,
    /// Let the engine play itself from the empty board
    Selfplay,
    /// Pit the engine against a seeded random mover
    Arena {
        /// Number of games
        #[arg(short, long, default_value_t = ARENA_GAMES)]
        games: usize,
        /// RNG seed
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
        /// Mark played by the engine
        #[arg(short, long, default_value = "o", value_parser = parse_mark)]
        engine: Mark,
    },
    /// Run a short demo of the engine
    Demo,
}

fn parse_mark(s: &str) -> Result<Mark, String> {
    Mark::parse(s).ok_or_else(|| format!("expected x or o, got {s}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Play { name, pvp }) => run_play(name.as_deref(), pvp),
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::new();
            engine.run(io::stdin().lock(), io::stdout())
        }
        Some(Commands::Selfplay) => run_selfplay(),
        Some(Commands::Arena {
            games,
            seed,
            engine,
        }) => run_arena(games, seed, engine),
        Some(Commands::Demo) | None => run_demo(),
    }
}

/// Logs go to stderr so the protocol stream on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run_play(name: Option<&str>, pvp: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let name = match name {
        Some(n) => Some(n.to_string()),
        None => prompt(&stdin, &mut stdout, "Enter your name: ")?,
    };
    let mut session = Session::new(name.as_deref());
    if pvp {
        session.set_mode(Mode::PlayerVsPlayer);
    }
    info!(mode = %session.mode(), "starting interactive game");

    println!("Commands: a cell (A1..C3 or 'row col'), reset, mode, score, quit");
    loop {
        println!("\n{}", session.scoreline());
        println!("{}", session.board());
        let status = format!("{}> ", session.status_line());
        let Some(line) = prompt(&stdin, &mut stdout, &status)? else {
            return Ok(());
        };
        if line.is_empty() {
            continue;
        }

        match line.to_lowercase().as_str() {
            "quit" | "exit" => return Ok(()),
            "reset" => {
                session.reset();
                continue;
            }
            "mode" => {
                session.toggle_mode();
                println!("Mode: {}", session.mode());
                continue;
            }
            "score" => {
                println!("{}", session.scoreline());
                continue;
            }
            _ => {}
        }

        let Some((row, col)) = parse_coord(&line) else {
            println!("Unrecognised cell: {line}");
            continue;
        };
        let turn = match session.play(row, col) {
            Ok(turn) => turn,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        for event in &turn.events {
            match event {
                Event::MovePlayed { mark, coord } if session.is_computer(*mark) => {
                    println!("{} plays {}", session.name(*mark), str_coord(*coord));
                }
                Event::Won(mark) => {
                    println!("{}", turn.board);
                    println!("{} wins!", session.name(*mark));
                }
                Event::Draw => {
                    println!("{}", turn.board);
                    println!("It's a draw!");
                }
                _ => {}
            }
        }
    }
}

/// Print `message` and read one trimmed line. `None` at end of input.
fn prompt(stdin: &io::Stdin, stdout: &mut io::Stdout, message: &str) -> Result<Option<String>> {
    write!(stdout, "{message}")?;
    stdout.flush()?;
    let mut line = String::new();
    let read = stdin.lock().read_line(&mut line).context("reading input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn run_selfplay() -> Result<()> {
    let (moves, outcome) = playout::self_play()?;
    let mut board = Board::new();
    for (mark, (row, col)) in moves {
        board.place(row, col, mark)?;
        println!("{mark} {}", str_coord((row, col)));
    }
    println!("{board}");
    println!("Result: {outcome}");
    Ok(())
}

fn run_arena(games: usize, seed: u64, engine: Mark) -> Result<()> {
    let report = playout::arena(games, seed, engine)?;
    println!(
        "engine as {engine}: {} games, {} wins, {} draws, {} losses",
        report.games, report.engine_wins, report.draws, report.engine_losses
    );
    if report.engine_losses > 0 {
        bail!("engine lost {} games", report.engine_losses);
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Tictactoe-Rust: optimal minimax opponent\n");

    println!("=== Board Demo ===");
    let mut board = Board::new();
    board.place(0, 0, Mark::X)?;
    board.place(1, 0, Mark::O)?;
    board.place(0, 1, Mark::X)?;
    board.place(1, 1, Mark::O)?;
    println!("{board}");

    println!("=== Search Demo ===");
    for mark in [Mark::X, Mark::O] {
        let (coord, stats) = best_move_with_stats(&board, mark)?;
        println!(
            "Best move for {mark}: {} (score {}, {} nodes)",
            str_coord(coord),
            stats.score,
            stats.nodes
        );
    }

    let (coord, stats) = best_move_with_stats(&Board::new(), Mark::X)?;
    println!(
        "Opening move: {} (score {}, {} nodes)",
        str_coord(coord),
        stats.score,
        stats.nodes
    );
    Ok(())
}
