//! Exhaustive minimax search.
//!
//! The engine explores every continuation of a position and scores terminal
//! positions from the searching mark's point of view: `WIN_SCORE` if it has
//! won, `LOSS_SCORE` if the opponent has, `DRAW_SCORE` for a full board.
//! Interior nodes take the maximum over children when the searching mark is
//! to move and the minimum otherwise.
//!
//! A 3x3 game tree has fewer than 9! leaves, so the search runs to the end
//! with no pruning, memoization, or depth limit. Scores are exact, which
//! keeps the tie-break (first best cell in row-major order) reproducible.
//!
//! The caller's board is never touched: the search copies it and explores
//! the copy with a scoped place/recurse/undo discipline (see [`Trial`]).

use std::ops::{Deref, DerefMut};

use tracing::{debug, instrument};

use crate::board::{Board, Coord, Mark};
use crate::constants::{DRAW_SCORE, LOSS_SCORE, SIZE, WIN_SCORE};
use crate::error::GameError;
use crate::game::{Outcome, current_outcome};

/// Counters from one search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, including the children of the root.
    pub nodes: u64,
    /// Minimax value of the chosen move.
    pub score: i32,
}

/// A mark placed on a board for the lifetime of this guard.
///
/// Dropping the guard empties the cell again, so every exit from a
/// recursive call (normal return or unwind) restores the board.
struct Trial<'a> {
    board: &'a mut Board,
    row: usize,
    col: usize,
}

impl<'a> Trial<'a> {
    fn place(board: &'a mut Board, row: usize, col: usize, mark: Mark) -> Result<Self, GameError> {
        board.place(row, col, mark)?;
        Ok(Self { board, row, col })
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.clear(self.row, self.col);
    }
}

/// Find the optimal move for `mark`.
///
/// Ties go to the first best cell in row-major order.
///
/// # Errors
/// `InvalidState` if the board is already won or full.
pub fn best_move(board: &Board, mark: Mark) -> Result<Coord, GameError> {
    best_move_with_stats(board, mark).map(|(coord, _)| coord)
}

/// Like [`best_move`], also returning search counters.
#[instrument(skip(board))]
pub fn best_move_with_stats(board: &Board, mark: Mark) -> Result<(Coord, SearchStats), GameError> {
    let mut nodes = 0;
    let scored = score_moves(board, mark, &mut nodes)?;

    let mut best: Option<(Coord, i32)> = None;
    for (coord, score) in scored {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((coord, score));
        }
    }
    let (coord, score) = best.ok_or(GameError::InvalidState)?;

    debug!(row = coord.0, col = coord.1, score, nodes, "best move");
    Ok((coord, SearchStats { nodes, score }))
}

/// Minimax value of every legal move for `mark`, in row-major order.
///
/// # Errors
/// `InvalidState` if the board is already won or full.
pub fn evaluate_moves(board: &Board, mark: Mark) -> Result<Vec<(Coord, i32)>, GameError> {
    let mut nodes = 0;
    score_moves(board, mark, &mut nodes)
}

fn score_moves(board: &Board, mark: Mark, nodes: &mut u64) -> Result<Vec<(Coord, i32)>, GameError> {
    if current_outcome(board).is_terminal() {
        return Err(GameError::InvalidState);
    }

    let mut scratch = *board;
    let mut scored = Vec::with_capacity(SIZE * SIZE);
    for (row, col) in board.empty_cells() {
        let mut trial = Trial::place(&mut scratch, row, col, mark)?;
        let score = minimax(&mut trial, mark, mark.opponent(), nodes);
        scored.push(((row, col), score));
    }
    Ok(scored)
}

/// Minimax value of `board` for `searcher`, with `to_move` about to play.
///
/// `board` is restored to its original contents before returning.
pub fn minimax(board: &mut Board, searcher: Mark, to_move: Mark, nodes: &mut u64) -> i32 {
    *nodes += 1;

    match current_outcome(board) {
        Outcome::Win(mark) if mark == searcher => return WIN_SCORE,
        Outcome::Win(_) => return LOSS_SCORE,
        Outcome::Draw => return DRAW_SCORE,
        Outcome::InProgress => {}
    }

    let maximizing = to_move == searcher;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for row in 0..SIZE {
        for col in 0..SIZE {
            let Ok(mut trial) = Trial::place(board, row, col, to_move) else {
                continue;
            };
            let score = minimax(&mut trial, searcher, to_move.opponent(), nodes);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
    }

    best
}
