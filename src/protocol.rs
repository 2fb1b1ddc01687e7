//! Line-oriented text protocol for driving a [`Session`].
//!
//! Modelled on GTP so a front end (GUI, script, test harness) can act as the
//! presentation layer over stdin/stdout. Each command is one line with an
//! optional numeric id; each response is `=[id] message` on success or
//! `?[id] message` on failure, followed by a blank line. Blank lines and
//! `#` comments are ignored.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`,
//!   `known_command <cmd>`, `quit`
//! - `clear_board` - Start a new round (scores kept)
//! - `play [x|o] <coord>` - Move for the side to move; in PvAI mode the
//!   response also carries the engine's reply
//! - `genmove [x|o]` - Engine plays for the side to move
//! - `analyze` - Minimax value of every legal move for the side to move
//! - `showboard`, `status`, `score`, `reset_scores`
//! - `mode [pvp|pvai]` - Report or set the play mode
//! - `name_player <name>` - Set X's display name
//!
//! Coordinates are `A1`..`C3` (column letter, row digit, row 1 on top) or a
//! 0-based `row col` pair.
//!
//! ## Example
//!
//! ```ignore
//! use tictactoe_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, warn};

use crate::board::{Mark, parse_coord, str_coord};
use crate::constants::{ENGINE_NAME, PROTOCOL_VERSION};
use crate::search::evaluate_moves;
use crate::session::{Mode, Session, Turn};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "analyze",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "mode",
    "name",
    "name_player",
    "play",
    "protocol_version",
    "quit",
    "reset_scores",
    "score",
    "showboard",
    "status",
    "version",
];

/// Protocol front end over a session.
#[derive(Default)]
pub struct ProtocolEngine {
    session: Session,
}

impl ProtocolEngine {
    pub fn new() -> Self {
        Self::with_session(Session::default())
    }

    pub fn with_session(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("reading command")?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(%command, %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n").context("writing response")?;
            output.flush().context("flushing response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "executing");
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.session.reset();
                (true, String::new())
            }

            "play" => {
                let (mark, coord_args) = match args.first().and_then(|a| Mark::parse(a)) {
                    Some(mark) if args.len() > 1 => (Some(mark), &args[1..]),
                    _ => (None, args),
                };
                if coord_args.is_empty() {
                    return (false, "missing arguments".to_string());
                }
                if let Err(msg) = self.check_side(mark) {
                    return (false, msg);
                }
                let Some((row, col)) = parse_coord(&coord_args.join(" ")) else {
                    return (false, "invalid coordinate".to_string());
                };
                match self.session.play(row, col) {
                    Ok(turn) => (true, format_turn(&turn)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let mark = match args.first() {
                    Some(a) => match Mark::parse(a) {
                        Some(mark) => Some(mark),
                        None => return (false, "invalid color".to_string()),
                    },
                    None => None,
                };
                if let Err(msg) = self.check_side(mark) {
                    return (false, msg);
                }
                match self.session.engine_move() {
                    Ok(turn) => (true, format_turn(&turn)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "analyze" => {
                let mark = self.session.current_player();
                match evaluate_moves(self.session.board(), mark) {
                    Ok(scored) => {
                        let cells: Vec<String> = scored
                            .iter()
                            .map(|(coord, score)| format!("{}:{score}", str_coord(*coord)))
                            .collect();
                        (true, cells.join(" "))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.session.board())),

            "status" => (true, self.session.status_line()),

            "score" => (true, self.session.scoreline()),

            "reset_scores" => {
                self.session.reset_scores();
                (true, String::new())
            }

            "mode" => match args.first() {
                None => (true, self.session.mode().to_string()),
                Some(arg) => match Mode::parse(arg) {
                    Some(mode) => {
                        self.session.set_mode(mode);
                        (true, mode.to_string())
                    }
                    None => (false, format!("unknown mode: {arg}")),
                },
            },

            "name_player" => {
                let name = args.join(" ");
                self.session.set_player_name(Some(&name));
                (true, self.session.name(Mark::X).to_string())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Reject an explicit color that is not the side to move.
    fn check_side(&self, mark: Option<Mark>) -> Result<(), String> {
        match mark {
            Some(mark) if mark != self.session.current_player() => {
                Err(format!("not {mark}'s turn"))
            }
            _ => Ok(()),
        }
    }
}

/// `"X B2 O A1"`, followed by the result if the round ended.
fn format_turn(turn: &Turn) -> String {
    let mut parts: Vec<String> = turn
        .moves
        .iter()
        .map(|(mark, coord)| format!("{mark} {}", str_coord(*coord)))
        .collect();
    if turn.outcome.is_terminal() {
        parts.push(turn.outcome.to_string());
    }
    parts.join(" ")
}
