//! Minimax search for the computer opponent.
//!
//! The 3x3 tree is small enough to search exhaustively on every call:
//! no depth limit, no pruning, no transposition table. Scores favour the
//! fastest win and the slowest loss.

use crate::rules::{Verdict, evaluate};
use crate::{Board, Cell, Mark, Position};
use tracing::{debug, instrument};

/// Score of a win found directly after the candidate move.
pub const WIN_SCORE: i32 = 10;

/// Outcome of a search: where to play and how the position scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Chosen cell.
    pub position: Position,
    /// Minimax value from the computer's point of view.
    pub score: i32,
}

/// Exhaustive best-move search.
///
/// Returns `None` when the board has no empty cell or already holds a
/// completed line. Among equally scored moves the first in row-major
/// order is kept.
#[instrument(skip(board), fields(board = %board.encode()))]
pub fn search(board: &Board, computer: Mark) -> Option<Decision> {
    if evaluate(board).is_over() {
        debug!("Search requested on finished board");
        return None;
    }

    let mut scratch = *board;
    let mut best: Option<Decision> = None;

    for position in Position::ALL {
        if !scratch.is_empty(position) {
            continue;
        }
        scratch.set(position, Cell::Occupied(computer));
        let score = minimax(&mut scratch, 0, false, computer);
        scratch.set(position, Cell::Empty);

        if best.is_none_or(|b| score > b.score) {
            best = Some(Decision { position, score });
        }
    }

    if let Some(decision) = best {
        debug!(position = %decision.position, score = decision.score, "Search complete");
    }
    best
}

/// Best cell for `computer`, or `None` if no move exists.
pub fn best_move(board: &Board, computer: Mark) -> Option<Position> {
    search(board, computer).map(|d| d.position)
}

fn minimax(board: &mut Board, depth: i32, maximizing: bool, computer: Mark) -> i32 {
    match evaluate(board) {
        Verdict::Won(mark) if mark == computer => return WIN_SCORE - depth,
        Verdict::Won(_) => return depth - WIN_SCORE,
        Verdict::Draw => return 0,
        Verdict::Ongoing => {}
    }

    let mover = if maximizing {
        computer
    } else {
        computer.opponent()
    };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for position in Position::ALL {
        if !board.is_empty(position) {
            continue;
        }
        board.set(position, Cell::Occupied(mover));
        let score = minimax(board, depth + 1, !maximizing, computer);
        board.set(position, Cell::Empty);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}
