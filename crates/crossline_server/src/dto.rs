//! Request and response bodies for the REST API.

use crate::error::ApiError;
use crossline_engine::{Board, Cell, GameMode, Mark, PlayerId, Position, Session, SessionState, Stats};
use serde::{Deserialize, Serialize};

/// Body of `POST /games`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// `"human"` (default) or `"ai"`.
    #[serde(default)]
    pub mode: Option<GameMode>,
}

/// Body of `POST /games/{id}/move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Full proposed board as 3 rows of `"X"`, `"O"` or `""`.
    pub board: Vec<Vec<String>>,
}

/// Game view returned by every game endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    /// Session id.
    pub id: String,
    /// Board as 3 rows of `"X"`, `"O"` or `""`.
    pub board: Vec<Vec<String>>,
    /// Canonical nine-digit board encoding.
    pub encoded: String,
    /// Mode, `"human"` or `"ai"`.
    pub mode: String,
    /// X seat.
    pub player_x: String,
    /// O seat, absent while waiting.
    pub player_o: Option<String>,
    /// Seat expected to move next.
    pub current_turn: String,
    /// `waiting`, `turn`, `draw` or `win`.
    pub state: String,
    /// Winner, only for `win`.
    pub winner: Option<String>,
    /// Human-readable status line.
    pub message: String,
}

impl From<&Session> for GameResponse {
    fn from(session: &Session) -> Self {
        let message = match session.state() {
            SessionState::Waiting => "Waiting for another player to connect".to_string(),
            SessionState::Turn => "In progress".to_string(),
            SessionState::Draw => "Draw".to_string(),
            SessionState::Win { winner } => format!("Player {} won", player_label(*winner)),
        };

        Self {
            id: session.id().to_string(),
            board: board_to_grid(session.board()),
            encoded: session.board().encode(),
            mode: session.mode().to_string(),
            player_x: player_label(*session.player_x()),
            player_o: (*session.player_o()).map(player_label),
            current_turn: player_label(*session.current_turn()),
            state: session.state().to_string(),
            winner: session.winner().map(player_label),
            message,
        }
    }
}

/// Body of `GET /stats/{player_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Sessions the player sits in.
    pub total_games: u32,
    /// Wins.
    pub wins: u32,
    /// Losses.
    pub losses: u32,
    /// Draws.
    pub draws: u32,
    /// Win percentage, one decimal.
    #[serde(rename = "winrate")]
    pub win_rate: f64,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            total_games: *stats.total_games(),
            wins: *stats.wins(),
            losses: *stats.losses(),
            draws: *stats.draws(),
            win_rate: stats.win_rate(),
        }
    }
}

fn player_label(player: PlayerId) -> String {
    if player.is_computer() {
        "computer".to_string()
    } else {
        player.to_string()
    }
}

/// Renders a board as 3 rows of `"X"`, `"O"` or `""`.
pub fn board_to_grid(board: &Board) -> Vec<Vec<String>> {
    (0..3)
        .map(|row| {
            (0..3)
                .map(|col| {
                    let pos = Position::ALL[row * 3 + col];
                    match board.get(pos) {
                        Cell::Empty => String::new(),
                        Cell::Occupied(mark) => mark.to_string(),
                    }
                })
                .collect()
        })
        .collect()
}

/// Parses a 3x3 grid of `"X"`, `"O"` or `""` into a board.
///
/// # Errors
///
/// [`ApiError::Board`] for wrong dimensions or unknown symbols.
pub fn grid_to_board(grid: &[Vec<String>]) -> Result<Board, ApiError> {
    if grid.len() != 3 {
        return Err(ApiError::Board("board must have 3 rows".to_string()));
    }

    let mut board = Board::new();
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != 3 {
            return Err(ApiError::Board("each row must have 3 columns".to_string()));
        }
        for (col, symbol) in cells.iter().enumerate() {
            let cell = match symbol.as_str() {
                "X" => Cell::Occupied(Mark::X),
                "O" => Cell::Occupied(Mark::O),
                "" => Cell::Empty,
                other => {
                    return Err(ApiError::Board(format!(
                        "unknown symbol '{}' at ({}, {})",
                        other, row, col
                    )));
                }
            };
            board.set(Position::ALL[row * 3 + col], cell);
        }
    }
    Ok(board)
}
