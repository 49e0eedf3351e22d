//! Per-player aggregate statistics derived from stored sessions.

use crate::{PlayerId, Session, SessionState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Aggregated results for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct Stats {
    total_games: u32,
    wins: u32,
    losses: u32,
    draws: u32,
}

impl Stats {
    /// Creates new aggregated statistics.
    pub fn new(total_games: u32, wins: u32, losses: u32, draws: u32) -> Self {
        Self {
            total_games,
            wins,
            losses,
            draws,
        }
    }

    /// Tallies every session `player` sits in.
    ///
    /// Unfinished sessions count toward the total only.
    #[instrument(skip(sessions))]
    pub fn tally<'a>(player: PlayerId, sessions: impl IntoIterator<Item = &'a Session>) -> Self {
        let mut stats = Self::default();
        for session in sessions
            .into_iter()
            .filter(|s| s.is_participant(player))
        {
            stats.total_games += 1;
            match session.state() {
                SessionState::Win { winner } if *winner == player => stats.wins += 1,
                SessionState::Win { .. } => stats.losses += 1,
                SessionState::Draw => stats.draws += 1,
                SessionState::Waiting | SessionState::Turn => {}
            }
        }
        debug!(?stats, "Stats tallied");
        stats
    }

    /// Win rate as a percentage (0.0–100.0), rounded to one decimal.
    ///
    /// Halves round up. The rate is computed in tenths of a percent with
    /// integer arithmetic, so values like 23/80 = 28.75 give 28.8.
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        let total = u64::from(self.total_games);
        let tenths = (1000 * u64::from(self.wins) + total / 2) / total;
        tenths as f64 / 10.0
    }
}
