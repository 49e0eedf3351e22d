//! Tests for the session state machine.

use crossline_engine::{
    Board, GameMode, JoinError, Mark, PlayerId, Position, Session, SessionError, SessionId,
    SessionState, TerminalStateError, TurnOwnershipError, ValidationError,
};

fn two_player() -> (Session, PlayerId, PlayerId) {
    let x = PlayerId::generate();
    let o = PlayerId::generate();
    let mut session = Session::create(SessionId::generate(), GameMode::PlayerVsPlayer, x);
    session.join(o).expect("join should succeed");
    (session, x, o)
}

fn play(session: &mut Session, player: PlayerId, pos: Position) -> Result<Position, SessionError> {
    let mark = session.mark_of(player).unwrap_or(Mark::X);
    let proposed = session.board().with(pos, mark.into());
    session.apply_move(&proposed, player)
}

#[test]
fn test_create_two_player_waits() {
    let x = PlayerId::generate();
    let session = Session::create(SessionId::generate(), GameMode::PlayerVsPlayer, x);
    assert_eq!(*session.state(), SessionState::Waiting);
    assert_eq!(*session.player_x(), x);
    assert_eq!(*session.player_o(), None);
    assert_eq!(*session.current_turn(), x);
    assert_eq!(session.winner(), None);
}

#[test]
fn test_create_single_player_seats_computer() {
    let x = PlayerId::generate();
    let session = Session::create(SessionId::generate(), GameMode::PlayerVsComputer, x);
    assert_eq!(*session.state(), SessionState::Turn);
    assert_eq!(*session.player_o(), Some(PlayerId::COMPUTER));
    assert_eq!(*session.current_turn(), x);
}

#[test]
fn test_join_with_own_id_rejected() {
    let x = PlayerId::generate();
    let mut session = Session::create(SessionId::generate(), GameMode::PlayerVsPlayer, x);
    let before = session.clone();

    assert_eq!(session.join(x), Err(JoinError::SamePlayer));
    assert_eq!(session, before);

    let o = PlayerId::generate();
    session.join(o).expect("distinct player joins");
    assert_eq!(*session.state(), SessionState::Turn);
    assert_eq!(*session.player_o(), Some(o));
    assert_eq!(*session.current_turn(), x);
}

#[test]
fn test_join_started_session_rejected() {
    let (mut session, _, _) = two_player();
    let result = session.join(PlayerId::generate());
    assert_eq!(result, Err(JoinError::NotOpen(SessionState::Turn)));
}

#[test]
fn test_join_single_player_rejected() {
    let mut session = Session::create(
        SessionId::generate(),
        GameMode::PlayerVsComputer,
        PlayerId::generate(),
    );
    assert_eq!(session.join(PlayerId::generate()), Err(JoinError::SinglePlayer));
}

#[test]
fn test_move_while_waiting_rejected() {
    let x = PlayerId::generate();
    let mut session = Session::create(SessionId::generate(), GameMode::PlayerVsPlayer, x);
    let before = session.clone();

    let result = play(&mut session, x, Position::Center);
    assert_eq!(
        result,
        Err(SessionError::TerminalState(TerminalStateError::Waiting))
    );
    assert_eq!(session, before);
}

#[test]
fn test_turns_alternate() {
    let (mut session, x, o) = two_player();

    assert_eq!(play(&mut session, x, Position::Center), Ok(Position::Center));
    assert_eq!(*session.current_turn(), o);

    assert_eq!(play(&mut session, o, Position::TopLeft), Ok(Position::TopLeft));
    assert_eq!(*session.current_turn(), x);
    assert_eq!(session.board().encode(), "200010000");
}

#[test]
fn test_out_of_turn_rejected() {
    let (mut session, x, o) = two_player();
    let before = session.clone();

    let result = play(&mut session, o, Position::Center);
    assert_eq!(
        result,
        Err(SessionError::TurnOwnership(TurnOwnershipError::NotYourTurn(x)))
    );
    assert_eq!(session, before);
}

#[test]
fn test_stranger_rejected() {
    let (mut session, _, _) = two_player();
    let stranger = PlayerId::generate();
    let proposed = session.board().with(Position::Center, Mark::X.into());

    let result = session.apply_move(&proposed, stranger);
    assert_eq!(
        result,
        Err(SessionError::TurnOwnership(TurnOwnershipError::NotParticipant(stranger)))
    );
}

#[test]
fn test_invalid_board_leaves_session_unchanged() {
    let (mut session, x, _) = two_player();
    let before = session.clone();

    let two = Board::decode("110000000").unwrap();
    assert_eq!(
        session.apply_move(&two, x),
        Err(SessionError::Validation(ValidationError::MultipleMoves(2)))
    );
    assert_eq!(
        session.apply_move(&Board::new(), x),
        Err(SessionError::Validation(ValidationError::NoMove))
    );
    assert_eq!(session, before);
}

#[test]
fn test_diagonal_win_then_terminal() {
    let (mut session, x, o) = two_player();

    play(&mut session, x, Position::TopLeft).unwrap();
    play(&mut session, o, Position::TopCenter).unwrap();
    play(&mut session, x, Position::Center).unwrap();
    play(&mut session, o, Position::TopRight).unwrap();
    play(&mut session, x, Position::BottomRight).unwrap();

    assert_eq!(*session.state(), SessionState::Win { winner: x });
    assert_eq!(session.winner(), Some(x));

    let before = session.clone();
    let result = play(&mut session, o, Position::BottomLeft);
    assert_eq!(
        result,
        Err(SessionError::TerminalState(TerminalStateError::Won(x)))
    );
    assert_eq!(session, before);
}

#[test]
fn test_full_board_is_draw_without_winner() {
    let (mut session, x, o) = two_player();

    // X O X / X O O / O X X
    let moves = [
        (x, Position::TopLeft),
        (o, Position::TopCenter),
        (x, Position::TopRight),
        (o, Position::Center),
        (x, Position::MiddleLeft),
        (o, Position::MiddleRight),
        (x, Position::BottomCenter),
        (o, Position::BottomLeft),
        (x, Position::BottomRight),
    ];
    for (player, pos) in moves {
        play(&mut session, player, pos).unwrap();
    }

    assert_eq!(*session.state(), SessionState::Draw);
    assert_eq!(session.winner(), None);
    assert_eq!(
        play(&mut session, o, Position::Center),
        Err(SessionError::TerminalState(TerminalStateError::Draw))
    );
}

#[test]
fn test_computer_move_on_two_player_session_is_invariant_violation() {
    let (mut session, _, _) = two_player();
    let result = session.apply_computer_move();
    assert!(matches!(result, Err(SessionError::InvariantViolation(_))));
}
