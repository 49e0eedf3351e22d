//! REST routes over the session service.
//!
//! Authentication is handled upstream; callers identify themselves with
//! the `x-player-id` header.

use crate::dto::{CreateGameRequest, GameResponse, MoveRequest, StatsResponse, grid_to_board};
use crate::error::ApiError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request, State};
use axum::http::request::Parts;
use axum::routing::{get, post};
use axum::{Json, Router};
use crossline_engine::{GameMode, InMemorySessionRepository, PlayerId, SessionId, SessionService};
use derive_new::new;
use tracing::{debug, info, instrument};

/// Header carrying the caller's player id.
pub const PLAYER_HEADER: &str = "x-player-id";

/// Session service as wired by the composition root.
pub type Service = SessionService<InMemorySessionRepository>;

/// Shared handler state.
#[derive(Debug, Clone, new)]
pub struct AppState {
    service: Service,
}

/// Caller identity parsed from [`PLAYER_HEADER`].
#[derive(Debug, Clone, Copy)]
pub struct CurrentPlayer(pub PlayerId);

impl<S: Send + Sync> FromRequestParts<S> for CurrentPlayer {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(PLAYER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingPlayer)?;
        Ok(Self(raw.parse()?))
    }
}

/// JSON body whose rejections render as [`ApiError`].
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters whose rejections render as [`ApiError`].
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/games", post(create_game).get(list_games))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/join", post(join_game))
        .route("/games/{id}/move", post(make_move))
        .route("/stats/{player_id}", get(player_stats))
        .with_state(state)
}

#[instrument(skip_all, fields(player = %player))]
async fn create_game(
    State(state): State<AppState>,
    CurrentPlayer(player): CurrentPlayer,
    ApiJson(req): ApiJson<CreateGameRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let mode = req.mode.unwrap_or(GameMode::PlayerVsPlayer);
    let session = state.service.create_session(player, mode)?;
    info!(session_id = %session.id(), %mode, "Game created");
    Ok(Json(GameResponse::from(&session)))
}

#[instrument(skip_all, fields(player = %player))]
async fn list_games(
    State(state): State<AppState>,
    CurrentPlayer(player): CurrentPlayer,
) -> Result<Json<Vec<String>>, ApiError> {
    let ids = state.service.list_available_sessions(player)?;
    debug!(count = ids.len(), "Games listed");
    Ok(Json(ids.iter().map(ToString::to_string).collect()))
}

#[instrument(skip_all, fields(session_id = %id))]
async fn get_game(
    State(state): State<AppState>,
    _player: CurrentPlayer,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let id: SessionId = id.parse()?;
    let session = state.service.get_session(id)?;
    Ok(Json(GameResponse::from(&session)))
}

#[instrument(skip_all, fields(player = %player, session_id = %id))]
async fn join_game(
    State(state): State<AppState>,
    CurrentPlayer(player): CurrentPlayer,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let id: SessionId = id.parse()?;
    let session = state.service.join_session(id, player)?;
    Ok(Json(GameResponse::from(&session)))
}

#[instrument(skip_all, fields(player = %player, session_id = %id))]
async fn make_move(
    State(state): State<AppState>,
    CurrentPlayer(player): CurrentPlayer,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<MoveRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let id: SessionId = id.parse()?;
    let proposed = grid_to_board(&req.board)?;
    let session = state.service.submit_move(id, &proposed, player)?;
    Ok(Json(GameResponse::from(&session)))
}

#[instrument(skip_all, fields(player_id = %player_id))]
async fn player_stats(
    State(state): State<AppState>,
    _caller: CurrentPlayer,
    ApiPath(player_id): ApiPath<String>,
) -> Result<Json<StatsResponse>, ApiError> {
    let player: PlayerId = player_id.parse()?;
    let stats = state.service.player_stats(player)?;
    Ok(Json(StatsResponse::from(stats)))
}
