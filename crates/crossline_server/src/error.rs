//! HTTP error mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crossline_engine::{IdError, RepositoryError, SessionError};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Failure of an API request.
#[derive(Debug, Display, From)]
pub enum ApiError {
    /// Engine rejected the operation.
    #[display("{}", _0)]
    Session(SessionError),

    /// Malformed identifier in the path or header.
    #[display("{}", _0)]
    Id(IdError),

    /// Player identity header absent or not text.
    #[display("Missing or unreadable x-player-id header")]
    #[from(ignore)]
    MissingPlayer,

    /// Submitted grid is not a 3x3 board.
    #[display("Invalid board: {}", _0)]
    #[from(ignore)]
    Board(String),

    /// Request body missing, not JSON, or not the expected shape.
    #[display("Invalid request body: {}", _0)]
    Body(JsonRejection),

    /// Path segment could not be extracted.
    #[display("Invalid path: {}", _0)]
    Path(PathRejection),
}

impl std::error::Error for ApiError {}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error kind.
    pub kind: String,
    /// Whether resending the same request may succeed.
    pub retryable: bool,
}

impl ApiError {
    /// Status code and error kind for this failure.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Session(SessionError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "validation")
            }
            ApiError::Session(SessionError::TurnOwnership(_)) => {
                (StatusCode::FORBIDDEN, "turn_ownership")
            }
            ApiError::Session(SessionError::TerminalState(_)) => {
                (StatusCode::CONFLICT, "terminal_state")
            }
            ApiError::Session(SessionError::Join(_)) => (StatusCode::CONFLICT, "join"),
            ApiError::Session(SessionError::Repository(RepositoryError::NotFound(_))) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            ApiError::Session(SessionError::Repository(RepositoryError::Conflict { .. })) => {
                (StatusCode::CONFLICT, "conflict")
            }
            ApiError::Session(SessionError::Repository(RepositoryError::Storage(_))) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage")
            }
            ApiError::Session(SessionError::InvariantViolation(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "invariant")
            }
            ApiError::Id(_) | ApiError::MissingPlayer | ApiError::Board(_) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            ApiError::Body(rejection) => (rejection.status(), "bad_request"),
            ApiError::Path(rejection) => (rejection.status(), "bad_request"),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, ApiError::Session(e) if e.is_retryable())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.classify();
        if status.is_server_error() {
            error!(error = %self, kind, "Request failed");
        } else {
            warn!(error = %self, kind, status = %status, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
            kind: kind.to_string(),
            retryable: self.retryable(),
        };
        (status, Json(body)).into_response()
    }
}
