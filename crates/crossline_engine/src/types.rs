//! Core board types: marks, cells and the 3x3 grid.

use crate::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Symbol a player places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// First seat, always moves first.
    X,
    /// Second seat.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    Empty,
    /// Cell holds a mark.
    Occupied(Mark),
}

impl Cell {
    /// Numeric code used by the canonical board encoding.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(Mark::X) => 1,
            Cell::Occupied(Mark::O) => 2,
        }
    }

    /// Inverse of [`Cell::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Occupied(Mark::X)),
            2 => Some(Cell::Occupied(Mark::O)),
            _ => None,
        }
    }

    /// Returns the mark if occupied.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Occupied(mark)
    }
}

/// Board decoding failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Board codec error: {} at {}:{}", message, file, line)]
pub struct BoardCodecError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardCodecError {
    /// Creates a new codec error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// 3x3 board stored as nine cells in row-major order.
///
/// The canonical encoding is nine digits, one per cell, where `0` is empty,
/// `1` is X and `2` is O. Serde uses the same encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from cells in row-major order.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Returns a copy of this board with one cell replaced.
    pub fn with(mut self, pos: Position, cell: Cell) -> Self {
        self.set(pos, cell);
        self
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Empty positions in row-major scan order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|pos| self.is_empty(*pos))
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Mirror image across the main diagonal.
    pub fn transposed(&self) -> Self {
        let mut out = Self::new();
        for pos in Position::ALL {
            out.set(pos.transposed(), self.get(pos));
        }
        out
    }

    /// Encodes the board as nine digits in row-major order.
    pub fn encode(&self) -> String {
        self.cells
            .iter()
            .map(|c| char::from(b'0' + c.code()))
            .collect()
    }

    /// Decodes the canonical nine-digit encoding.
    ///
    /// # Errors
    ///
    /// Returns [`BoardCodecError`] on wrong length or an unknown cell code.
    #[instrument]
    pub fn decode(encoded: &str) -> Result<Self, BoardCodecError> {
        let bytes = encoded.as_bytes();
        if bytes.len() != 9 {
            return Err(BoardCodecError::new(format!(
                "expected 9 cells, found {}",
                bytes.len()
            )));
        }

        let mut cells = [Cell::Empty; 9];
        for (slot, byte) in cells.iter_mut().zip(bytes) {
            *slot = byte
                .checked_sub(b'0')
                .and_then(Cell::from_code)
                .ok_or_else(|| {
                    BoardCodecError::new(format!("invalid cell code '{}'", char::from(*byte)))
                })?;
        }
        Ok(Self { cells })
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => (pos + 1).to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = BoardCodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl TryFrom<String> for Board {
    type Error = BoardCodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.encode()
    }
}
