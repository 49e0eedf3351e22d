//! Session state machine.
//!
//! ```text
//!  create(PvP) ──> Waiting ──join──> Turn ──move──> Turn
//!  create(PvC) ─────────────────────> Turn ──move──> Draw | Win
//! ```
//!
//! Every transition checks its preconditions before touching the
//! session, so a rejected call leaves it unchanged. `Draw` and `Win`
//! accept nothing.

use crate::decision;
use crate::error::{JoinError, SessionError, TerminalStateError, TurnOwnershipError};
use crate::rules::{Verdict, evaluate, validate_move};
use crate::{Board, Cell, GameMode, Mark, PlayerId, Position, Session, SessionId, SessionState};
use tracing::{debug, error, info, instrument, warn};

impl Session {
    /// Opens a new session with `player` in the X seat.
    ///
    /// Two-player sessions start in `Waiting`. Single-player sessions seat
    /// the computer as O and start in `Turn` with the human to move.
    #[instrument]
    pub fn create(id: SessionId, mode: GameMode, player: PlayerId) -> Self {
        let session = match mode {
            GameMode::PlayerVsPlayer => {
                Self::from_parts(id, mode, player, None, SessionState::Waiting)
            }
            GameMode::PlayerVsComputer => Self::from_parts(
                id,
                mode,
                player,
                Some(PlayerId::COMPUTER),
                SessionState::Turn,
            ),
        };
        info!(session_id = %id, %mode, state = %session.state(), "Session created");
        session
    }

    /// Seats `player` as O and starts the game.
    ///
    /// # Errors
    ///
    /// - [`JoinError::SinglePlayer`] for sessions against the computer
    /// - [`JoinError::NotOpen`] unless the session is `Waiting`
    /// - [`JoinError::SamePlayer`] if `player` already holds X
    #[instrument(skip(self), fields(session_id = %self.id()))]
    pub fn join(&mut self, player: PlayerId) -> Result<(), JoinError> {
        if *self.mode() == GameMode::PlayerVsComputer {
            warn!("Join attempted on single-player session");
            return Err(JoinError::SinglePlayer);
        }
        if *self.state() != SessionState::Waiting {
            warn!(state = %self.state(), "Join attempted on session that is not waiting");
            return Err(JoinError::NotOpen(*self.state()));
        }
        if player == *self.player_x() {
            warn!("Player tried to join own session");
            return Err(JoinError::SamePlayer);
        }

        self.set_player_o(player);
        self.set_state(SessionState::Turn);
        let first = *self.player_x();
        self.set_current_turn(first);
        info!(player_o = %player, "Second player joined");
        Ok(())
    }

    /// Applies a human move submitted as a full proposed board.
    ///
    /// Returns the cell that was played.
    ///
    /// # Errors
    ///
    /// - [`SessionError::TerminalState`] when `Waiting`, `Draw` or `Win`
    /// - [`SessionError::TurnOwnership`] when `mover` is not seated or not on turn
    /// - [`SessionError::Validation`] when the board diff is not one legal move
    #[instrument(skip(self, proposed), fields(session_id = %self.id(), proposed = %proposed.encode()))]
    pub fn apply_move(
        &mut self,
        proposed: &Board,
        mover: PlayerId,
    ) -> Result<Position, SessionError> {
        self.ensure_accepting_moves()?;

        let mark = self.mark_of(mover).ok_or_else(|| {
            warn!("Move from non-participant");
            TurnOwnershipError::NotParticipant(mover)
        })?;

        if mover != *self.current_turn() {
            warn!(current_turn = %self.current_turn(), "Move out of turn");
            return Err(TurnOwnershipError::NotYourTurn(*self.current_turn()).into());
        }

        self.transition(proposed, mover, mark)
    }

    /// Lets the computer play O on a single-player session.
    ///
    /// Ownership checks are skipped; the move still goes through board
    /// validation and outcome detection like a human move.
    ///
    /// # Errors
    ///
    /// - [`SessionError::TerminalState`] unless the session is in `Turn`
    /// - [`SessionError::InvariantViolation`] if the session is not
    ///   single-player or the search finds no move
    #[instrument(skip(self), fields(session_id = %self.id()))]
    pub fn apply_computer_move(&mut self) -> Result<Position, SessionError> {
        self.ensure_accepting_moves()?;

        if *self.mode() != GameMode::PlayerVsComputer {
            error!("Computer move requested on two-player session");
            return Err(SessionError::InvariantViolation(
                "computer move on a two-player session".to_string(),
            ));
        }

        let Some(position) = decision::best_move(self.board(), Mark::O) else {
            error!(board = %self.board().encode(), "No computer move on a session in Turn");
            return Err(SessionError::InvariantViolation(
                "decision engine found no move on an unfinished board".to_string(),
            ));
        };

        let proposed = self.board().with(position, Cell::Occupied(Mark::O));
        self.transition(&proposed, PlayerId::COMPUTER, Mark::O)
    }

    fn ensure_accepting_moves(&self) -> Result<(), TerminalStateError> {
        match self.state() {
            SessionState::Turn => Ok(()),
            SessionState::Waiting => Err(TerminalStateError::Waiting),
            SessionState::Draw => Err(TerminalStateError::Draw),
            SessionState::Win { winner } => Err(TerminalStateError::Won(*winner)),
        }
    }

    fn transition(
        &mut self,
        proposed: &Board,
        mover: PlayerId,
        mark: Mark,
    ) -> Result<Position, SessionError> {
        let position = validate_move(self.board(), proposed, mark)?;

        let next = self.seat(mark.opponent()).ok_or_else(|| {
            error!("Session in Turn with an empty seat");
            SessionError::InvariantViolation("session in Turn with an empty seat".to_string())
        })?;

        self.set_board(*proposed);
        self.set_current_turn(next);

        match evaluate(proposed) {
            Verdict::Won(_) => self.set_state(SessionState::Win { winner: mover }),
            Verdict::Draw => self.set_state(SessionState::Draw),
            Verdict::Ongoing => {}
        }

        debug!(board = %proposed.encode(), "Board updated");
        info!(%mover, %mark, %position, state = %self.state(), "Move applied");
        Ok(position)
    }
}
