//! Session state held by a front end across rounds.
//!
//! A `Session` owns the current [`GameState`], the display names, the
//! play mode, and the per-mark win tally. Front ends feed it moves and read
//! back [`Turn`] reports; they hold no game logic of their own.
//!
//! In player-vs-computer mode the computer always plays O. A move by X that
//! leaves the round open is answered by the engine inside the same call, so
//! callers never observe a position where the computer is to move.

use std::fmt;

use tracing::{info, instrument, warn};

use crate::board::{Board, Coord, Mark};
use crate::constants::{COMPUTER_NAME, DEFAULT_O_NAME, DEFAULT_X_NAME};
use crate::error::{GameError, MoveError};
use crate::game::{GameState, Outcome};
use crate::search::best_move;

/// The mark played by the computer in player-vs-computer mode.
pub const COMPUTER_MARK: Mark = Mark::O;

/// Who supplies O's moves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Human X against the engine.
    #[default]
    PlayerVsComputer,
    /// Two humans.
    PlayerVsPlayer,
}

impl Mode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pvai" | "pvc" | "computer" | "ai" => Some(Mode::PlayerVsComputer),
            "pvp" | "human" => Some(Mode::PlayerVsPlayer),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::PlayerVsComputer => write!(f, "pvai"),
            Mode::PlayerVsPlayer => write!(f, "pvp"),
        }
    }
}

/// Notification points for the front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A mark was placed.
    MovePlayed { mark: Mark, coord: Coord },
    /// The side to move changed.
    TurnChanged(Mark),
    /// The round was won. The tally has been updated.
    Won(Mark),
    /// The round ended in a draw.
    Draw,
}

/// What one call to [`Session::play`] or [`Session::engine_move`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// Moves applied, in order. Two entries when the engine replied.
    pub moves: Vec<(Mark, Coord)>,
    /// Outcome after the last move.
    pub outcome: Outcome,
    /// Board after the last move. When the round ended this is the final
    /// position; the session itself has already been reset.
    pub board: Board,
    pub events: Vec<Event>,
}

/// Game session across rounds.
#[derive(Clone, Debug)]
pub struct Session {
    game: GameState,
    mode: Mode,
    x_name: String,
    o_name: String,
    x_score: u32,
    o_score: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Session {
    /// Start a session in player-vs-computer mode.
    ///
    /// A missing or blank name falls back to [`DEFAULT_X_NAME`].
    pub fn new(x_name: Option<&str>) -> Self {
        Self {
            game: GameState::new(),
            mode: Mode::PlayerVsComputer,
            x_name: display_name(x_name),
            o_name: COMPUTER_NAME.to_string(),
            x_score: 0,
            o_score: 0,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn board(&self) -> &Board {
        self.game.board()
    }

    pub fn current_player(&self) -> Mark {
        self.game.current_player()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn name(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x_name,
            Mark::O => &self.o_name,
        }
    }

    pub fn score(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_score,
            Mark::O => self.o_score,
        }
    }

    /// True if `mark` is played by the engine in the current mode.
    pub fn is_computer(&self, mark: Mark) -> bool {
        self.mode == Mode::PlayerVsComputer && mark == COMPUTER_MARK
    }

    /// Rename X. Blank names fall back to the default.
    pub fn set_player_name(&mut self, name: Option<&str>) {
        self.x_name = display_name(name);
    }

    /// Switch between PvP and PvAI. Renames O and starts a fresh round;
    /// scores are kept.
    #[instrument(skip(self))]
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::PlayerVsComputer => Mode::PlayerVsPlayer,
            Mode::PlayerVsPlayer => Mode::PlayerVsComputer,
        };
        self.o_name = match self.mode {
            Mode::PlayerVsComputer => COMPUTER_NAME.to_string(),
            Mode::PlayerVsPlayer => DEFAULT_O_NAME.to_string(),
        };
        self.game.reset();
        info!(mode = %self.mode, "mode changed");
    }

    /// Set the mode, toggling only if it differs.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.toggle_mode();
        }
    }

    /// Abandon the current round. Scores are kept.
    pub fn reset(&mut self) {
        self.game.reset();
    }

    /// Zero both tallies. Only ever called on explicit request.
    pub fn reset_scores(&mut self) {
        self.x_score = 0;
        self.o_score = 0;
    }

    /// Play a move for the side to move, supplied by a human.
    ///
    /// In PvAI mode the engine's reply is applied before returning.
    ///
    /// # Errors
    /// `IllegalMove` for an occupied or out-of-range cell, or if the side to
    /// move is computer-controlled. Nothing changes on error.
    #[instrument(skip(self))]
    pub fn play(&mut self, row: usize, col: usize) -> Result<Turn, GameError> {
        let mark = self.game.current_player();
        if self.is_computer(mark) {
            warn!(%mark, "move supplied for computer-controlled side");
            return Err(GameError::illegal(row, col, MoveError::NotYourTurn));
        }

        let mut turn = Turn::new();
        if let Err(e) = self.apply(mark, (row, col), &mut turn) {
            warn!(error = %e, "move rejected");
            return Err(e);
        }
        self.reply_and_finish(turn)
    }

    /// Let the engine play for the side to move.
    ///
    /// In PvAI mode, if that leaves the computer to move (the engine just
    /// played for X), the engine's O reply follows in the same turn.
    ///
    /// # Errors
    /// `InvalidState` only if the round is already over, which the session
    /// never leaves it in.
    #[instrument(skip(self))]
    pub fn engine_move(&mut self) -> Result<Turn, GameError> {
        let mark = self.game.current_player();
        let coord = best_move(self.game.board(), mark)?;
        let mut turn = Turn::new();
        self.apply(mark, coord, &mut turn)?;
        self.reply_and_finish(turn)
    }

    /// `"Score - <X name>: n | <O name>: m"`
    pub fn scoreline(&self) -> String {
        format!(
            "Score - {}: {} | {}: {}",
            self.x_name, self.x_score, self.o_name, self.o_score
        )
    }

    /// `"Current turn: <name>"`
    pub fn status_line(&self) -> String {
        format!("Current turn: {}", self.name(self.game.current_player()))
    }

    fn apply(&mut self, mark: Mark, coord: Coord, turn: &mut Turn) -> Result<(), GameError> {
        let outcome = self.game.play(mark, coord.0, coord.1)?;
        turn.moves.push((mark, coord));
        turn.outcome = outcome;
        turn.events.push(Event::MovePlayed { mark, coord });
        Ok(())
    }

    fn reply_and_finish(&mut self, mut turn: Turn) -> Result<Turn, GameError> {
        if turn.outcome == Outcome::InProgress && self.is_computer(self.game.current_player()) {
            let coord = best_move(self.game.board(), COMPUTER_MARK)?;
            self.apply(COMPUTER_MARK, coord, &mut turn)?;
        }

        turn.board = *self.game.board();
        match turn.outcome {
            Outcome::InProgress => {
                turn.events.push(Event::TurnChanged(self.game.current_player()));
            }
            Outcome::Win(mark) => {
                match mark {
                    Mark::X => self.x_score += 1,
                    Mark::O => self.o_score += 1,
                }
                info!(winner = %self.name(mark), "{}", self.scoreline());
                turn.events.push(Event::Won(mark));
                self.end_round(&mut turn);
            }
            Outcome::Draw => {
                info!("round drawn");
                turn.events.push(Event::Draw);
                self.end_round(&mut turn);
            }
        }
        Ok(turn)
    }

    fn end_round(&mut self, turn: &mut Turn) {
        self.game.reset();
        turn.events.push(Event::TurnChanged(self.game.current_player()));
    }
}

impl Turn {
    fn new() -> Self {
        Self {
            moves: Vec::with_capacity(2),
            outcome: Outcome::InProgress,
            board: Board::new(),
            events: Vec::new(),
        }
    }
}

fn display_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => DEFAULT_X_NAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let s = Session::new(None);
        assert_eq!(s.name(Mark::X), "Player X");
        assert_eq!(s.name(Mark::O), "AI");
        assert_eq!(Session::new(Some("   ")).name(Mark::X), "Player X");
        assert_eq!(Session::new(Some(" Ada ")).name(Mark::X), "Ada");
    }

    #[test]
    fn test_pvai_reply_is_atomic() {
        let mut s = Session::new(Some("Ada"));
        let turn = s.play(0, 0).unwrap();
        assert_eq!(turn.moves.len(), 2);
        assert_eq!(turn.moves[0], (Mark::X, (0, 0)));
        assert_eq!(turn.moves[1].0, Mark::O);
        // Back to the human straight away.
        assert_eq!(s.current_player(), Mark::X);
        assert_eq!(turn.events.last(), Some(&Event::TurnChanged(Mark::X)));
        assert_eq!(s.board().count(Mark::O), 1);
    }

    #[test]
    fn test_pvp_no_reply() {
        let mut s = Session::new(None);
        s.toggle_mode();
        assert_eq!(s.mode(), Mode::PlayerVsPlayer);
        assert_eq!(s.name(Mark::O), "Player O");

        let turn = s.play(1, 1).unwrap();
        assert_eq!(turn.moves, vec![(Mark::X, (1, 1))]);
        assert_eq!(s.current_player(), Mark::O);
        assert_eq!(s.status_line(), "Current turn: Player O");
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut s = Session::new(None);
        s.play(1, 1).unwrap();
        let before = *s.board();
        assert!(s.play(1, 1).is_err());
        assert!(s.play(5, 0).is_err());
        assert_eq!(*s.board(), before);
        assert_eq!(s.current_player(), Mark::X);
    }

    #[test]
    fn test_pvp_win_tallies_and_resets() {
        let mut s = Session::new(Some("Ada"));
        s.set_mode(Mode::PlayerVsPlayer);
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            s.play(r, c).unwrap();
        }
        let turn = s.play(0, 2).unwrap();
        assert_eq!(turn.outcome, Outcome::Win(Mark::X));
        assert!(turn.events.contains(&Event::Won(Mark::X)));
        assert_eq!(turn.board.winner(), Some(Mark::X));
        assert_eq!(s.score(Mark::X), 1);
        assert_eq!(s.score(Mark::O), 0);
        assert_eq!(*s.board(), Board::new());
        assert_eq!(s.current_player(), Mark::X);
        assert_eq!(s.scoreline(), "Score - Ada: 1 | Player O: 0");
    }

    #[test]
    fn test_pvp_draw() {
        let mut s = Session::new(None);
        s.set_mode(Mode::PlayerVsPlayer);
        // X O X / X O O / O X X
        let moves = [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0)];
        for (r, c) in moves {
            assert_eq!(s.play(r, c).unwrap().outcome, Outcome::InProgress);
        }
        let turn = s.play(2, 2).unwrap();
        assert_eq!(turn.outcome, Outcome::Draw);
        assert_eq!(turn.events.iter().filter(|e| **e == Event::Draw).count(), 1);
        assert_eq!(s.score(Mark::X) + s.score(Mark::O), 0);
    }

    #[test]
    fn test_toggle_keeps_scores_and_resets_board() {
        let mut s = Session::new(None);
        s.set_mode(Mode::PlayerVsPlayer);
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            s.play(r, c).unwrap();
        }
        s.play(2, 2).unwrap();
        s.toggle_mode();
        assert_eq!(s.score(Mark::X), 1);
        assert_eq!(*s.board(), Board::new());
        assert_eq!(s.name(Mark::O), "AI");

        s.reset_scores();
        assert_eq!(s.score(Mark::X), 0);
    }

    #[test]
    fn test_engine_move_pvp_plays_one_side() {
        let mut s = Session::new(None);
        s.set_mode(Mode::PlayerVsPlayer);
        s.play(1, 1).unwrap();
        let turn = s.engine_move().unwrap();
        assert_eq!(turn.moves.len(), 1);
        assert_eq!(turn.moves[0].0, Mark::O);
        assert_eq!(s.current_player(), Mark::X);
    }

    #[test]
    fn test_engine_move_pvai_includes_reply() {
        let mut s = Session::new(None);
        let turn = s.engine_move().unwrap();
        assert_eq!(turn.moves[0], (Mark::X, (0, 0)));
        assert_eq!(turn.moves[1].0, Mark::O);
        assert_eq!(s.current_player(), Mark::X);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("PvP"), Some(Mode::PlayerVsPlayer));
        assert_eq!(Mode::parse("pvai"), Some(Mode::PlayerVsComputer));
        assert_eq!(Mode::parse("solo"), None);
    }
}
