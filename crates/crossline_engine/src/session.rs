//! Session entity: one game between two seats.

use crate::{Board, Mark, PlayerId, SessionId};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Who occupies the O seat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum GameMode {
    /// Two humans; the session waits for the second one to join.
    #[serde(rename = "human")]
    #[strum(serialize = "human")]
    PlayerVsPlayer,
    /// Human plays X, the computer plays O.
    #[serde(rename = "ai")]
    #[strum(serialize = "ai")]
    PlayerVsComputer,
}

/// Lifecycle state of a session.
///
/// The winner lives inside [`SessionState::Win`], so a draw and an
/// unfinished game never carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Only X is seated.
    #[display("waiting")]
    Waiting,
    /// Both seats filled, a move is expected from `current_turn`.
    #[display("turn")]
    Turn,
    /// Board full with no line.
    #[display("draw")]
    Draw,
    /// Line completed by the winner.
    #[display("win")]
    Win {
        /// Player who completed the line.
        winner: PlayerId,
    },
}

impl SessionState {
    /// True for `Draw` and `Win`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Draw | SessionState::Win { .. })
    }

    /// Winner, only for `Win`.
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            SessionState::Win { winner } => Some(*winner),
            _ => None,
        }
    }
}

/// A tic-tac-toe session.
///
/// Fields are private; state changes go through [`Session::create`],
/// [`Session::join`], [`Session::apply_move`] and
/// [`Session::apply_computer_move`]. `revision` is owned by the
/// repository and used for compare-and-swap writes.
///
/// Sessions serialize but cannot be deserialized, so a session that
/// skipped these transitions cannot be built from outside:
///
/// ```compile_fail
/// let _: crossline_engine::Session = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Session {
    id: SessionId,
    mode: GameMode,
    board: Board,
    player_x: PlayerId,
    player_o: Option<PlayerId>,
    current_turn: PlayerId,
    state: SessionState,
    revision: u64,
}

impl Session {
    /// Mark held by `player`, if seated.
    pub fn mark_of(&self, player: PlayerId) -> Option<Mark> {
        if player == self.player_x {
            Some(Mark::X)
        } else if Some(player) == self.player_o {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Player seated on `mark`, if any.
    pub fn seat(&self, mark: Mark) -> Option<PlayerId> {
        match mark {
            Mark::X => Some(self.player_x),
            Mark::O => self.player_o,
        }
    }

    /// True if `player` holds either seat.
    pub fn is_participant(&self, player: PlayerId) -> bool {
        self.mark_of(player).is_some()
    }

    /// Winner, only when the state is `Win`.
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    /// Returns the session as stored at `revision`.
    ///
    /// Repositories call this after a successful write.
    pub fn at_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    pub(crate) fn from_parts(
        id: SessionId,
        mode: GameMode,
        player_x: PlayerId,
        player_o: Option<PlayerId>,
        state: SessionState,
    ) -> Self {
        Self {
            id,
            mode,
            board: Board::new(),
            player_x,
            player_o,
            current_turn: player_x,
            state,
            revision: 0,
        }
    }

    pub(crate) fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub(crate) fn set_player_o(&mut self, player: PlayerId) {
        self.player_o = Some(player);
    }

    pub(crate) fn set_current_turn(&mut self, player: PlayerId) {
        self.current_turn = player;
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }
}
