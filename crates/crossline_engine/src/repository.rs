//! Persistence port consumed by the session service.
//!
//! # Concurrency contract
//!
//! Implementations must make [`SessionRepository::save_session`] a
//! compare-and-swap on [`Session::revision`]:
//!
//! - a session with revision 0 whose id is not stored is inserted
//! - otherwise the stored revision must equal the session's revision,
//!   or the write fails with [`RepositoryError::Conflict`]
//! - a successful write returns the stored copy with the revision
//!   incremented
//!
//! The check and the write must be atomic with respect to other writers
//! of the same id. The service reports a conflict to its caller as a
//! retryable error and never overwrites blindly.

use crate::{PlayerId, Session, SessionId, Stats};
use derive_more::Display;

/// Repository failure.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RepositoryError {
    /// No session stored under this id.
    #[display("Game {} not found", _0)]
    NotFound(SessionId),

    /// Stored session changed since it was read.
    #[display(
        "Game {} was modified concurrently (expected revision {}, found {})",
        id,
        expected,
        found
    )]
    Conflict {
        /// Session that was written.
        id: SessionId,
        /// Revision the writer read.
        expected: u64,
        /// Revision currently stored.
        found: u64,
    },

    /// Backend failure.
    #[display("Storage error: {}", _0)]
    Storage(String),
}

impl std::error::Error for RepositoryError {}

/// Storage of sessions.
pub trait SessionRepository {
    /// Upserts a session with compare-and-swap on its revision.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Conflict`] when the stored revision differs.
    fn save_session(&self, session: Session) -> Result<Session, RepositoryError>;

    /// Loads a session.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::NotFound`] for unknown ids.
    fn get_session(&self, id: SessionId) -> Result<Session, RepositoryError>;

    /// Sessions `player` sits in plus open two-player sessions they could
    /// join, in creation order. Finished sessions are excluded.
    fn list_available_sessions(&self, player: PlayerId) -> Result<Vec<SessionId>, RepositoryError>;

    /// Aggregated results for `player`.
    fn get_player_stats(&self, player: PlayerId) -> Result<Stats, RepositoryError>;
}
