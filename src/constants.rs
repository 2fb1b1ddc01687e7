//! Constants for board geometry, search scores, and session defaults.
//!
//! The board is a fixed 3x3 grid stored in row-major order, so cell
//! `(row, col)` lives at index `row * SIZE + col`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board side length.
pub const SIZE: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

/// The 8 winning lines as row-major cell indices.
///
/// Order matters: `Board::winner` reports the first complete line found,
/// scanning rows 0-2, then columns 0-2, then the main diagonal and finally
/// the anti-diagonal.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

// =============================================================================
// Search Scores
// =============================================================================

/// Value of a terminal position won by the searching mark.
pub const WIN_SCORE: i32 = 1;

/// Value of a terminal position won by the opponent.
pub const LOSS_SCORE: i32 = -1;

/// Value of a drawn terminal position.
pub const DRAW_SCORE: i32 = 0;

// =============================================================================
// Session Defaults
// =============================================================================

/// Display name for X when the player gives none.
pub const DEFAULT_X_NAME: &str = "Player X";

/// Display name for O when the computer plays it.
pub const COMPUTER_NAME: &str = "AI";

/// Display name for O in player-vs-player mode.
pub const DEFAULT_O_NAME: &str = "Player O";

// =============================================================================
// Protocol
// =============================================================================

/// Engine name reported by the text protocol.
pub const ENGINE_NAME: &str = "tictactoe-rust";

/// Text protocol version.
pub const PROTOCOL_VERSION: u32 = 1;

/// Default number of games for the `arena` command.
pub const ARENA_GAMES: usize = 100;
