//! Full-game playouts between move sources.
//!
//! A playout drives a [`GameState`] from its current position to the end,
//! asking a [`Strategy`] for each side's move. The engine strategy is the
//! minimax search; the random strategy picks a uniformly random empty cell
//! from a seeded `fastrand` generator so runs are reproducible.

use tracing::{debug, info};

use crate::board::{Board, Coord, Mark};
use crate::error::GameError;
use crate::game::{GameState, Outcome};
use crate::search::best_move;

/// Where a side's moves come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Optimal play from the minimax search.
    Engine,
    /// A uniformly random empty cell.
    Random,
}

/// A uniformly random empty cell, or `None` on a full board.
pub fn random_move(board: &Board, rng: &mut fastrand::Rng) -> Option<Coord> {
    let empty: Vec<Coord> = board.empty_cells().collect();
    if empty.is_empty() {
        return None;
    }
    Some(empty[rng.usize(..empty.len())])
}

/// Play `game` to the end and return the moves made and the final outcome.
///
/// `x` and `o` choose the move source for each mark.
pub fn playout(
    game: &mut GameState,
    x: Strategy,
    o: Strategy,
    rng: &mut fastrand::Rng,
) -> Result<(Vec<(Mark, Coord)>, Outcome), GameError> {
    let mut moves = Vec::new();

    let mut outcome = game.outcome();
    while outcome == Outcome::InProgress {
        let mark = game.current_player();
        let strategy = match mark {
            Mark::X => x,
            Mark::O => o,
        };
        let coord = match strategy {
            Strategy::Engine => best_move(game.board(), mark)?,
            Strategy::Random => random_move(game.board(), rng).ok_or(GameError::InvalidState)?,
        };
        outcome = game.play(mark, coord.0, coord.1)?;
        moves.push((mark, coord));
    }

    Ok((moves, outcome))
}

/// Engine against itself from the empty board.
pub fn self_play() -> Result<(Vec<(Mark, Coord)>, Outcome), GameError> {
    let mut rng = fastrand::Rng::with_seed(0);
    playout(&mut GameState::new(), Strategy::Engine, Strategy::Engine, &mut rng)
}

/// Tally of an arena run, from the engine's side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaReport {
    pub games: usize,
    pub engine_wins: usize,
    pub draws: usize,
    pub engine_losses: usize,
}

/// Play `games` rounds of the engine (as `engine_mark`) against the random
/// strategy, seeded with `seed`.
pub fn arena(games: usize, seed: u64, engine_mark: Mark) -> Result<ArenaReport, GameError> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let (x, o) = match engine_mark {
        Mark::X => (Strategy::Engine, Strategy::Random),
        Mark::O => (Strategy::Random, Strategy::Engine),
    };

    let mut report = ArenaReport {
        games,
        ..ArenaReport::default()
    };
    for i in 0..games {
        let (moves, outcome) = playout(&mut GameState::new(), x, o, &mut rng)?;
        debug!(game = i, moves = moves.len(), %outcome, "arena game finished");
        match outcome {
            Outcome::Win(mark) if mark == engine_mark => report.engine_wins += 1,
            Outcome::Win(_) => report.engine_losses += 1,
            Outcome::Draw => report.draws += 1,
            Outcome::InProgress => {}
        }
    }

    info!(?report, "arena finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_move_is_empty_cell() {
        let mut rng = fastrand::Rng::with_seed(7);
        let board = Board::from_rows(["XOX", "O.X", "OX."]).unwrap();
        for _ in 0..20 {
            let (r, c) = random_move(&board, &mut rng).unwrap();
            assert!(board.is_empty(r, c));
        }
    }

    #[test]
    fn test_random_move_full_board() {
        let mut rng = fastrand::Rng::with_seed(7);
        let board = Board::from_rows(["XOX", "XOO", "OXX"]).unwrap();
        assert_eq!(random_move(&board, &mut rng), None);
    }

    #[test]
    fn test_random_playout_terminates() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut game = GameState::new();
        let (moves, outcome) =
            playout(&mut game, Strategy::Random, Strategy::Random, &mut rng).unwrap();
        assert!(outcome.is_terminal());
        assert!((5..=9).contains(&moves.len()));
        assert_eq!(game.moves_played(), moves.len());
    }

    #[test]
    fn test_arena_is_reproducible() {
        let a = arena(5, 3, Mark::O).unwrap();
        let b = arena(5, 3, Mark::O).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.games, 5);
        assert_eq!(a.engine_wins + a.draws + a.engine_losses, 5);
    }
}
