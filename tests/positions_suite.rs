//! Regression table of known positions and the engine's answer.
//!
//! Each entry is a board, the mark to move, and the cell the engine must
//! pick. Several entries have more than one optimal cell; those pin down
//! the first-in-row-major tie-break as well as the scoring.

use tictactoe_rust::board::{Board, Coord, Mark, str_coord};
use tictactoe_rust::search::{best_move, evaluate_moves};

// =============================================================================
// Helper functions
// =============================================================================

struct Case {
    name: &'static str,
    rows: [&'static str; 3],
    to_move: Mark,
    expected: Coord,
    score: i32,
}

fn check(case: &Case) {
    let board = Board::from_rows(case.rows).expect("valid fixture");
    let got = best_move(&board, case.to_move).expect("position is in progress");
    assert_eq!(
        got,
        case.expected,
        "{}: expected {}, got {}",
        case.name,
        str_coord(case.expected),
        str_coord(got)
    );

    let scored = evaluate_moves(&board, case.to_move).unwrap();
    let best = scored.iter().map(|(_, s)| *s).max().unwrap();
    assert_eq!(best, case.score, "{}: best score", case.name);
}

// =============================================================================
// Openings
// =============================================================================

#[test]
fn test_reply_to_corner_opening() {
    // Only the centre holds the draw against a corner opening.
    check(&Case {
        name: "corner opening",
        rows: ["X..", "...", "..."],
        to_move: Mark::O,
        expected: (1, 1),
        score: 0,
    });
    check(&Case {
        name: "far corner opening",
        rows: ["..X", "...", "..."],
        to_move: Mark::O,
        expected: (1, 1),
        score: 0,
    });
}

#[test]
fn test_reply_to_centre_opening() {
    // Any corner draws; the first corner is chosen.
    check(&Case {
        name: "centre opening",
        rows: ["...", ".X.", "..."],
        to_move: Mark::O,
        expected: (0, 0),
        score: 0,
    });
}

#[test]
fn test_reply_to_edge_opening() {
    check(&Case {
        name: "edge opening",
        rows: [".X.", "...", "..."],
        to_move: Mark::O,
        expected: (0, 0),
        score: 0,
    });
}

// =============================================================================
// Tactics
// =============================================================================

#[test]
fn test_immediate_win() {
    check(&Case {
        name: "top row win",
        rows: ["XX.", "OO.", "..."],
        to_move: Mark::X,
        expected: (0, 2),
        score: 1,
    });
}

#[test]
fn test_forced_win_preferred_over_later_immediate_win() {
    // (0, 2) forces a win via the anti-diagonal and precedes (1, 2).
    check(&Case {
        name: "O forced win",
        rows: ["XX.", "OO.", "..."],
        to_move: Mark::O,
        expected: (0, 2),
        score: 1,
    });
}

#[test]
fn test_blocks() {
    check(&Case {
        name: "block bottom row",
        rows: ["...", ".O.", "XX."],
        to_move: Mark::O,
        expected: (2, 2),
        score: 0,
    });
    check(&Case {
        name: "block top row gap",
        rows: ["X.X", ".O.", "..."],
        to_move: Mark::O,
        expected: (0, 1),
        score: 0,
    });
    check(&Case {
        name: "block diagonal",
        rows: ["X..", ".X.", "O.."],
        to_move: Mark::O,
        expected: (2, 2),
        score: 0,
    });
}

#[test]
fn test_avoids_fork_setup() {
    // Opposite corners: O must take an edge, not a corner.
    check(&Case {
        name: "opposite corners",
        rows: ["X..", ".O.", "..X"],
        to_move: Mark::O,
        expected: (0, 1),
        score: 0,
    });
    check(&Case {
        name: "centre and corner",
        rows: ["O..", ".X.", "..X"],
        to_move: Mark::O,
        expected: (0, 2),
        score: 0,
    });
}

#[test]
fn test_creates_fork() {
    check(&Case {
        name: "fork after corner reply",
        rows: ["X..", "...", "..O"],
        to_move: Mark::X,
        expected: (0, 2),
        score: 1,
    });
    check(&Case {
        name: "fork after adjacent edge reply",
        rows: ["XO.", "...", "..."],
        to_move: Mark::X,
        expected: (1, 0),
        score: 1,
    });
    check(&Case {
        name: "fork after adjacent corner reply",
        rows: ["X.O", "...", "..."],
        to_move: Mark::X,
        expected: (1, 0),
        score: 1,
    });
}

#[test]
fn test_no_win_available() {
    check(&Case {
        name: "centre taken by O",
        rows: ["...", "XO.", "..."],
        to_move: Mark::X,
        expected: (0, 0),
        score: 0,
    });
}
