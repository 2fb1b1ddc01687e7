//! Error types for the game core.

use thiserror::Error;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Row or column outside `0..3`.
    OutOfRange,
    /// Cell already holds a mark.
    Occupied,
    /// The mark supplied is not the side to move.
    NotYourTurn,
    /// The round already has a winner or the board is full.
    GameOver,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::OutOfRange => write!(f, "cell out of range"),
            MoveError::Occupied => write!(f, "cell not empty"),
            MoveError::NotYourTurn => write!(f, "not this mark's turn"),
            MoveError::GameOver => write!(f, "game is over"),
        }
    }
}

/// Errors raised by the board, game state, and search engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A move was rejected. No state was changed.
    #[error("illegal move at ({row}, {col}): {reason}")]
    IllegalMove {
        row: usize,
        col: usize,
        reason: MoveError,
    },
    /// Search requested on a board that is already won or full.
    #[error("invalid state: search requested on a finished board")]
    InvalidState,
}

impl GameError {
    pub(crate) fn illegal(row: usize, col: usize, reason: MoveError) -> Self {
        GameError::IllegalMove { row, col, reason }
    }
}
