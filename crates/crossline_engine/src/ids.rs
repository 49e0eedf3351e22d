//! Strongly typed session and player identifiers.
//!
//! Identifiers are parsed once at the boundary and passed around as
//! `Copy` values afterwards.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;
use uuid::Uuid;

/// Identifier parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum IdError {
    /// Text is not a UUID.
    #[display("Malformed identifier '{}'", _0)]
    Malformed(String),

    /// The nil UUID is reserved for the computer seat.
    #[display("Identifier is reserved")]
    Reserved,
}

impl std::error::Error for IdError {}

/// Unique identifier for a game session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random session identifier.
    #[instrument]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for SessionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdError::Malformed(s.to_string()))
    }
}

/// Unique identifier for a player.
///
/// [`PlayerId::COMPUTER`] occupies the O seat of single-player sessions.
/// Text parsing refuses it, so a human can never claim that seat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Seat identity of the computer opponent.
    pub const COMPUTER: PlayerId = PlayerId(Uuid::nil());

    /// Generates a fresh random player identifier.
    #[instrument]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns true for the computer seat.
    pub fn is_computer(&self) -> bool {
        *self == Self::COMPUTER
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for PlayerId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Uuid::parse_str(s.trim()).map_err(|_| IdError::Malformed(s.to_string()))?;
        if id.is_nil() {
            return Err(IdError::Reserved);
        }
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_round_trips_through_text() {
        let id = PlayerId::generate();
        let parsed: PlayerId = id.to_string().parse().expect("valid id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_player_id_rejects_computer_seat() {
        let result = "00000000-0000-0000-0000-000000000000".parse::<PlayerId>();
        assert_eq!(result, Err(IdError::Reserved));
    }

    #[test]
    fn test_session_id_rejects_garbage() {
        let result = "not-a-uuid".parse::<SessionId>();
        assert!(matches!(result, Err(IdError::Malformed(_))));
    }
}
