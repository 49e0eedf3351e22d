//! Board-diff validation for submitted moves.
//!
//! Clients submit the whole board. The previous board and the proposed
//! one must differ by exactly one empty cell gaining the mover's mark.

use crate::{Board, Cell, Mark, Position};
use derive_more::Display;
use tracing::{debug, instrument};

/// Rejected board submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ValidationError {
    /// A cell changed in a way no single legal placement explains.
    #[display("Board is corrupted at {}", _0)]
    Corrupted(Position),

    /// Proposed board is identical to the stored one.
    #[display("No move submitted")]
    NoMove,

    /// More than one cell gained a mark.
    #[display("Only one move per turn ({} placements submitted)", _0)]
    MultipleMoves(usize),
}

impl std::error::Error for ValidationError {}

/// Checks that `proposed` is `previous` plus exactly one `mover` mark.
///
/// Returns the position of the placement.
///
/// # Errors
///
/// - [`ValidationError::Corrupted`] on overwrite, wrong mark or removal
/// - [`ValidationError::NoMove`] when nothing was placed
/// - [`ValidationError::MultipleMoves`] when several cells were placed
#[instrument(skip(previous, proposed), fields(previous = %previous.encode(), proposed = %proposed.encode()))]
pub fn validate_move(
    previous: &Board,
    proposed: &Board,
    mover: Mark,
) -> Result<Position, ValidationError> {
    let mut placed = Vec::with_capacity(1);

    for pos in Position::ALL {
        let before = previous.get(pos);
        let after = proposed.get(pos);

        if before == after {
            continue;
        }
        if before == Cell::Empty && after == Cell::Occupied(mover) {
            placed.push(pos);
        } else {
            debug!(position = %pos, ?before, ?after, "Illegal cell change");
            return Err(ValidationError::Corrupted(pos));
        }
    }

    match placed.as_slice() {
        [] => Err(ValidationError::NoMove),
        [pos] => Ok(*pos),
        many => Err(ValidationError::MultipleMoves(many.len())),
    }
}
