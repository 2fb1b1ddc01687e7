//! Game state: a board plus the side to move.
//!
//! `GameState` is the only place turn alternation is enforced. The board
//! itself accepts any mark; `play` checks the turn, the round status, and
//! cell legality before touching it.

use std::fmt;

use tracing::debug;

use crate::board::{Board, Mark};
use crate::error::{GameError, MoveError};

/// Result of evaluating a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Win(Mark),
    Draw,
}

impl Outcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Win(mark) => write!(f, "{mark} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Derive the outcome of a board.
///
/// A completed line is always a win, even on a full board.
pub fn current_outcome(board: &Board) -> Outcome {
    if let Some(mark) = board.winner() {
        Outcome::Win(mark)
    } else if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// A round of play: the board and whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Mark,
    moves_played: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh round, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            moves_played: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn outcome(&self) -> Outcome {
        current_outcome(&self.board)
    }

    /// Apply a move for `mark` at `(row, col)` and return the new outcome.
    ///
    /// Moves may come from any source (a human, the engine, a script), but
    /// only for the side to move.
    ///
    /// # Errors
    /// `IllegalMove` with reason `GameOver`, `NotYourTurn`, `OutOfRange` or
    /// `Occupied`. The state is unchanged on error.
    pub fn play(&mut self, mark: Mark, row: usize, col: usize) -> Result<Outcome, GameError> {
        if self.outcome().is_terminal() {
            return Err(GameError::illegal(row, col, MoveError::GameOver));
        }
        if mark != self.current_player {
            return Err(GameError::illegal(row, col, MoveError::NotYourTurn));
        }
        self.board.place(row, col, mark)?;
        self.moves_played += 1;
        self.current_player = mark.opponent();

        let outcome = self.outcome();
        debug!(%mark, row, col, %outcome, "move applied");
        Ok(outcome)
    }

    /// Replace the round wholesale: empty board, X to move.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
