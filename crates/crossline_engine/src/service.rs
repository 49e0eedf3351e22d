//! Session service: runs state-machine transitions against a repository.

use crate::error::SessionError;
use crate::repository::SessionRepository;
use crate::{Board, GameMode, PlayerId, Session, SessionId, SessionState, Stats};
use tracing::{debug, info, instrument, warn};

/// Business layer over a [`SessionRepository`].
///
/// Each operation reads at most one session, applies its transitions in
/// memory and writes once. Conflicting writes come back as retryable
/// [`SessionError`]s; nothing here retries.
#[derive(Debug, Clone)]
pub struct SessionService<R> {
    repository: R,
}

impl<R: SessionRepository> SessionService<R> {
    /// Creates a new session service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: R) -> Self {
        info!("Creating SessionService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Opens a session with `player` as X.
    #[instrument(skip(self))]
    pub fn create_session(&self, player: PlayerId, mode: GameMode) -> Result<Session, SessionError> {
        let session = Session::create(SessionId::generate(), mode, player);
        let stored = self.repository.save_session(session)?;
        info!(session_id = %stored.id(), "Session stored");
        Ok(stored)
    }

    /// Loads a session.
    #[instrument(skip(self))]
    pub fn get_session(&self, id: SessionId) -> Result<Session, SessionError> {
        Ok(self.repository.get_session(id)?)
    }

    /// Seats `player` as O on a waiting two-player session.
    #[instrument(skip(self))]
    pub fn join_session(&self, id: SessionId, player: PlayerId) -> Result<Session, SessionError> {
        let mut session = self.repository.get_session(id)?;
        session.join(player)?;
        let stored = self.repository.save_session(session)?;
        info!(player_o = %player, "Session joined");
        Ok(stored)
    }

    /// Runs one move cycle.
    ///
    /// Applies the human move; on a single-player session that is still in
    /// `Turn` afterwards the computer answers immediately. The result is
    /// written once. Any rejected transition leaves storage untouched.
    #[instrument(skip(self, proposed), fields(proposed = %proposed.encode()))]
    pub fn submit_move(
        &self,
        id: SessionId,
        proposed: &Board,
        player: PlayerId,
    ) -> Result<Session, SessionError> {
        let mut session = self.repository.get_session(id)?;

        let human = session.apply_move(proposed, player).inspect_err(|e| {
            warn!(error = %e, "Move rejected");
        })?;
        debug!(position = %human, "Human move applied");

        if *session.mode() == GameMode::PlayerVsComputer && *session.state() == SessionState::Turn
        {
            let reply = session.apply_computer_move()?;
            debug!(position = %reply, "Computer replied");
        }

        let stored = self.repository.save_session(session).inspect_err(|e| {
            warn!(error = %e, "Move cycle not persisted");
        })?;
        info!(state = %stored.state(), revision = *stored.revision(), "Move cycle complete");
        Ok(stored)
    }

    /// Sessions available to `player`, in creation order.
    #[instrument(skip(self))]
    pub fn list_available_sessions(&self, player: PlayerId) -> Result<Vec<SessionId>, SessionError> {
        Ok(self.repository.list_available_sessions(player)?)
    }

    /// Aggregated results for `player`.
    #[instrument(skip(self))]
    pub fn player_stats(&self, player: PlayerId) -> Result<Stats, SessionError> {
        Ok(self.repository.get_player_stats(player)?)
    }
}
