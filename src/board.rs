//! The 3x3 board: cells, marks, and terminal-line detection.
//!
//! `Board` only stores marks. It does not know whose turn it is; turn
//! alternation lives in [`crate::game::GameState`]. Cells are addressed by
//! `(row, col)` with both in `0..3`, row 0 being the top row.

use std::fmt;

use crate::constants::{CELLS, LINES, SIZE};
use crate::error::{GameError, MoveError};

/// A `(row, col)` pair.
pub type Coord = (usize, usize);

/// One of the two players' marks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Parse `x`/`o` (case-insensitive), also accepting the GTP-ish
    /// `black`/`white` spellings some front ends send.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x" | "black" | "b" => Some(Mark::X),
            "o" | "white" | "w" => Some(Mark::O),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// The mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

/// Fixed 3x3 grid of cells in row-major order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from three row strings such as `["XO.", ".X.", "..O"]`.
    ///
    /// `X` and `O` are marks (case-insensitive), `.` and `-` are empty.
    /// Returns `None` if a row is not exactly 3 cells or holds any other
    /// character. No turn-count check is made.
    pub fn from_rows(rows: [&str; SIZE]) -> Option<Self> {
        let mut board = Board::new();
        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.chars().collect();
            if chars.len() != SIZE {
                return None;
            }
            for (col, ch) in chars.into_iter().enumerate() {
                board.cells[idx(row, col)] = match ch {
                    'X' | 'x' => Cell::X,
                    'O' | 'o' => Cell::O,
                    '.' | '-' => Cell::Empty,
                    _ => return None,
                };
            }
        }
        Some(board)
    }

    /// Cell at `(row, col)`, or `None` if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= SIZE || col >= SIZE {
            return None;
        }
        Some(self.cells[idx(row, col)])
    }

    /// True iff the cell exists and holds no mark.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(Cell::Empty)
    }

    /// Put `mark` at `(row, col)`.
    ///
    /// # Errors
    /// `IllegalMove` if the cell is out of range or already occupied. The
    /// board is left unchanged in that case.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), GameError> {
        match self.get(row, col) {
            None => Err(GameError::illegal(row, col, MoveError::OutOfRange)),
            Some(Cell::Empty) => {
                self.cells[idx(row, col)] = mark.into();
                Ok(())
            }
            Some(_) => Err(GameError::illegal(row, col, MoveError::Occupied)),
        }
    }

    /// Empty a cell again. Used by the search to undo a trial placement.
    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        self.cells[idx(row, col)] = Cell::Empty;
    }

    /// The mark owning a complete line, if any.
    ///
    /// Lines are checked in the order of [`LINES`]. Legal play can never
    /// complete lines for both marks, but if a hand-built board does, the
    /// mark of the first complete line in that order is returned.
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let cell = self.cells[a];
            if cell != Cell::Empty && cell == self.cells[b] && cell == self.cells[c] {
                cell.mark()
            } else {
                None
            }
        })
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// Clear every cell.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELLS];
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| (i / SIZE, i % SIZE))
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        let cell = Cell::from(mark);
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

#[inline]
fn idx(row: usize, col: usize) -> usize {
    row * SIZE + col
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cells[idx(row, col)].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parse a coordinate.
///
/// Accepts either a numeric pair `"r c"` / `"r,c"` (0-based) or a board
/// label `A1`..`C3` where the letter is the column and the digit the row,
/// row 1 being the top. Returns `None` for anything else or out of range.
pub fn parse_coord(s: &str) -> Option<Coord> {
    let s = s.trim();
    let parts: Vec<&str> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let coord = match parts.as_slice() {
        [r, c] => (r.parse::<usize>().ok()?, c.parse::<usize>().ok()?),
        [label] => {
            let mut chars = label.chars();
            let letter = chars.next()?.to_ascii_uppercase();
            let digit = chars.next()?.to_digit(10)? as usize;
            if chars.next().is_some() || !letter.is_ascii_uppercase() || digit == 0 {
                return None;
            }
            (digit - 1, (letter as u8 - b'A') as usize)
        }
        _ => return None,
    };

    if coord.0 < SIZE && coord.1 < SIZE {
        Some(coord)
    } else {
        None
    }
}

/// Format a coordinate as a board label, e.g. `(0, 2)` -> `"C1"`.
pub fn str_coord((row, col): Coord) -> String {
    format!("{}{}", (b'A' + col as u8) as char, row + 1)
}
