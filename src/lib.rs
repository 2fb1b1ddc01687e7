//! Tictactoe-Rust: a 3x3 tic-tac-toe core with an optimal minimax opponent.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, search scores, and defaults
//! - [`error`] - `IllegalMove` and `InvalidState` errors
//! - [`board`] - Cells, marks, and the 3x3 board
//! - [`game`] - Turn alternation and outcome detection
//! - [`search`] - Exhaustive minimax search
//! - [`session`] - Names, mode, and scores across rounds
//! - [`playout`] - Engine and random full-game playouts
//! - [`protocol`] - Text protocol for external front ends
//!
//! ## Example
//!
//! ```
//! use tictactoe_rust::board::Mark;
//! use tictactoe_rust::game::{GameState, Outcome};
//! use tictactoe_rust::search::best_move;
//!
//! let mut game = GameState::new();
//! game.play(Mark::X, 1, 1).unwrap();
//!
//! let (row, col) = best_move(game.board(), Mark::O).unwrap();
//! assert_eq!(game.play(Mark::O, row, col), Ok(Outcome::InProgress));
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod playout;
pub mod protocol;
pub mod search;
pub mod session;
