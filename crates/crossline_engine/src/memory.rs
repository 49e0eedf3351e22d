//! In-memory session repository.

use crate::repository::{RepositoryError, SessionRepository};
use crate::{GameMode, PlayerId, Session, SessionId, SessionState, Stats};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default)]
struct Store {
    sessions: HashMap<SessionId, Session>,
    order: Vec<SessionId>,
}

/// Thread-safe in-memory repository.
///
/// Clones share the same store. The revision check and the write happen
/// under one lock, which satisfies the compare-and-swap contract of
/// [`SessionRepository::save_session`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemorySessionRepository {
    /// Creates an empty repository.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory session repository");
        Self::default()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.order.len())
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, RepositoryError> {
        self.store
            .lock()
            .map_err(|_| RepositoryError::Storage("session store lock poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self, session), fields(session_id = %session.id(), revision = *session.revision()))]
    fn save_session(&self, session: Session) -> Result<Session, RepositoryError> {
        let mut store = self.lock()?;
        let id = *session.id();
        let expected = *session.revision();

        let found = store.sessions.get(&id).map(|s| *s.revision()).unwrap_or(0);
        if found != expected {
            warn!(expected, found, "Stale session write rejected");
            return Err(RepositoryError::Conflict {
                id,
                expected,
                found,
            });
        }

        let stored = session.at_revision(expected + 1);
        if store.sessions.insert(id, stored.clone()).is_none() {
            store.order.push(id);
        }
        debug!(revision = *stored.revision(), "Session saved");
        Ok(stored)
    }

    #[instrument(skip(self))]
    fn get_session(&self, id: SessionId) -> Result<Session, RepositoryError> {
        let store = self.lock()?;
        store.sessions.get(&id).cloned().ok_or_else(|| {
            debug!("Session not found");
            RepositoryError::NotFound(id)
        })
    }

    #[instrument(skip(self))]
    fn list_available_sessions(&self, player: PlayerId) -> Result<Vec<SessionId>, RepositoryError> {
        let store = self.lock()?;
        let ids: Vec<_> = store
            .order
            .iter()
            .filter_map(|id| store.sessions.get(id))
            .filter(|s| is_available(s, player))
            .map(|s| *s.id())
            .collect();
        info!(count = ids.len(), "Listed available sessions");
        Ok(ids)
    }

    #[instrument(skip(self))]
    fn get_player_stats(&self, player: PlayerId) -> Result<Stats, RepositoryError> {
        let store = self.lock()?;
        let stats = Stats::tally(player, store.order.iter().filter_map(|id| store.sessions.get(id)));
        info!(
            total = *stats.total_games(),
            wins = *stats.wins(),
            losses = *stats.losses(),
            draws = *stats.draws(),
            win_rate = %format!("{:.1}%", stats.win_rate()),
            "Player stats computed"
        );
        Ok(stats)
    }
}

fn is_available(session: &Session, player: PlayerId) -> bool {
    match session.state() {
        SessionState::Turn => session.is_participant(player),
        SessionState::Waiting => {
            session.is_participant(player)
                || (*session.mode() == GameMode::PlayerVsPlayer && *session.player_x() != player)
        }
        SessionState::Draw | SessionState::Win { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_first_revision() {
        let repo = InMemorySessionRepository::new();
        let session = Session::create(
            SessionId::generate(),
            GameMode::PlayerVsPlayer,
            PlayerId::generate(),
        );
        let stored = repo.save_session(session).unwrap();
        assert_eq!(*stored.revision(), 1);
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    fn test_stale_write_conflicts() {
        let repo = InMemorySessionRepository::new();
        let session = Session::create(
            SessionId::generate(),
            GameMode::PlayerVsPlayer,
            PlayerId::generate(),
        );
        let stored = repo.save_session(session).unwrap();

        let first = stored.clone();
        let second = stored;
        repo.save_session(first).unwrap();

        let err = repo.save_session(second).unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Conflict {
                expected: 1,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_session() {
        let repo = InMemorySessionRepository::new();
        let id = SessionId::generate();
        assert_eq!(repo.get_session(id), Err(RepositoryError::NotFound(id)));
    }
}
