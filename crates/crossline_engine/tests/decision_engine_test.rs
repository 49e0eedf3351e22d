//! Tests for the minimax opponent.

use crossline_engine::decision::search;
use crossline_engine::{Board, Cell, Mark, Position, Verdict, best_move, evaluate};

/// Plays the engine against itself until the game ends.
fn self_play(mut board: Board, mut to_move: Mark) -> Verdict {
    loop {
        let verdict = evaluate(&board);
        if verdict.is_over() {
            return verdict;
        }
        let pos = best_move(&board, to_move).expect("unfinished board has a move");
        assert!(board.is_empty(pos), "engine chose occupied cell {pos}");
        board.set(pos, Cell::Occupied(to_move));
        to_move = to_move.opponent();
    }
}

/// Collects every position reachable from the empty board, X first.
fn reachable() -> Vec<(Board, Mark)> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    let mut stack = vec![(Board::new(), Mark::X)];
    while let Some((board, to_move)) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        out.push((board, to_move));
        if evaluate(&board).is_over() {
            continue;
        }
        for pos in board.empty_positions() {
            stack.push((board.with(pos, to_move.into()), to_move.opponent()));
        }
    }
    out
}

#[test]
fn test_self_play_from_empty_board_is_draw() {
    assert_eq!(self_play(Board::new(), Mark::X), Verdict::Draw);
}

#[test]
fn test_self_play_after_any_opening_is_draw() {
    for pos in Position::ALL {
        let board = Board::new().with(pos, Mark::X.into());
        assert_eq!(self_play(board, Mark::O), Verdict::Draw, "opening at {pos}");
    }
}

#[test]
fn test_sentinel_only_when_no_move_exists() {
    for (board, to_move) in reachable() {
        let choice = best_move(&board, to_move);
        if evaluate(&board).is_over() {
            assert_eq!(choice, None, "finished board {}", board.encode());
        } else {
            let pos = choice.expect("unfinished board has a move");
            assert!(board.is_empty(pos), "occupied choice on {}", board.encode());
        }
    }
}

#[test]
fn test_center_opening_answered_in_first_corner() {
    let board = Board::new().with(Position::Center, Mark::X.into());
    let decision = search(&board, Mark::O).unwrap();
    assert_eq!(decision.position, Position::TopLeft);
    assert_eq!(decision.score, 0);
}

#[test]
fn test_prefers_faster_win() {
    // X X _ / O O _ / _ _ _ with X to move: TopRight wins at once
    let board = Board::decode("110220000").unwrap();
    let decision = search(&board, Mark::X).unwrap();
    assert_eq!(decision.position, Position::TopRight);
    assert_eq!(decision.score, 10);
}

#[test]
fn test_engine_never_loses_as_second_player() {
    // Every human opening and every human reply after the engine's answer.
    for first in Position::ALL {
        let board = Board::new().with(first, Mark::X.into());
        let reply = best_move(&board, Mark::O).unwrap();
        let board = board.with(reply, Mark::O.into());
        for second in board.empty_positions().collect::<Vec<_>>() {
            let b = board.with(second, Mark::X.into());
            let verdict = self_play(b, Mark::O);
            assert_ne!(verdict, Verdict::Won(Mark::X), "lost after {first}, {second}");
        }
    }
}
