//! Error kinds surfaced by the session engine.

use crate::repository::RepositoryError;
use crate::rules::ValidationError;
use crate::{PlayerId, SessionState};
use derive_more::{Display, From};

/// Mover is not allowed to act right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TurnOwnershipError {
    /// Mover does not sit in this session.
    #[display("Player {} is not a participant of this game", _0)]
    NotParticipant(PlayerId),

    /// Mover sits in the session but the other seat is on turn.
    #[display("Not your turn, waiting for player {}", _0)]
    NotYourTurn(PlayerId),
}

impl std::error::Error for TurnOwnershipError {}

/// Move attempted on a session that cannot accept one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TerminalStateError {
    /// Second seat is still open.
    #[display("Waiting for another player to connect")]
    Waiting,

    /// Game ended in a draw.
    #[display("Game already ended in a draw")]
    Draw,

    /// Game ended with a winner.
    #[display("Game already won by player {}", _0)]
    Won(PlayerId),
}

impl std::error::Error for TerminalStateError {}

/// Rejected attempt to take the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum JoinError {
    /// Joiner already holds the X seat.
    #[display("Cannot join your own game")]
    SamePlayer,

    /// Session is not waiting for a second player.
    #[display("Game is not open for joining (state: {})", _0)]
    NotOpen(SessionState),

    /// Single-player sessions reserve the second seat for the computer.
    #[display("Game is played against the computer")]
    SinglePlayer,
}

impl std::error::Error for JoinError {}

/// Caller-facing error of every session operation.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SessionError {
    /// Malformed board submission.
    #[display("{}", _0)]
    Validation(ValidationError),

    /// Mover is not a participant or not on turn.
    #[display("{}", _0)]
    TurnOwnership(TurnOwnershipError),

    /// Move attempted while waiting or after the game ended.
    #[display("{}", _0)]
    TerminalState(TerminalStateError),

    /// Join rejected.
    #[display("{}", _0)]
    Join(JoinError),

    /// Repository lookup or write failed.
    #[display("{}", _0)]
    Repository(RepositoryError),

    /// Engine guarantee broken. Indicates a bug, never bad input.
    #[display("Invariant violation: {}", _0)]
    #[from(ignore)]
    InvariantViolation(String),
}

impl SessionError {
    /// True when the same request may succeed if simply resent.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SessionError::Repository(RepositoryError::Conflict { .. }))
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Validation(e) => Some(e),
            SessionError::TurnOwnership(e) => Some(e),
            SessionError::TerminalState(e) => Some(e),
            SessionError::Join(e) => Some(e),
            SessionError::Repository(e) => Some(e),
            SessionError::InvariantViolation(_) => None,
        }
    }
}
