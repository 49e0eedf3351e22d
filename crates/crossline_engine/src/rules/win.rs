//! Win and draw detection.

use crate::{Board, Cell, Mark, Position};

/// Lines checked for three in a row: rows, then columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Result of inspecting a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No line and at least one empty cell.
    Ongoing,
    /// A line of three identical marks exists.
    Won(Mark),
    /// Board is full with no line.
    Draw,
}

impl Verdict {
    /// True for `Won` and `Draw`.
    pub fn is_over(&self) -> bool {
        !matches!(self, Verdict::Ongoing)
    }

    /// Mark that completed a line, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Verdict::Won(mark) => Some(*mark),
            Verdict::Ongoing | Verdict::Draw => None,
        }
    }
}

/// Inspects a board for a completed line or exhaustion.
///
/// Lines are scanned in [`LINES`] order and the first complete one wins.
pub fn evaluate(board: &Board) -> Verdict {
    for [a, b, c] in LINES {
        let cell = board.get(a);
        if let Cell::Occupied(mark) = cell
            && cell == board.get(b)
            && cell == board.get(c)
        {
            return Verdict::Won(mark);
        }
    }

    if board.is_full() {
        Verdict::Draw
    } else {
        Verdict::Ongoing
    }
}
