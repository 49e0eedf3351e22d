//! Crossline server - REST surface for tic-tac-toe sessions
//!
//! Wraps [`crossline_engine::SessionService`] in an axum router.
//!
//! # Example
//!
//! ```no_run
//! use crossline_engine::{InMemorySessionRepository, SessionService};
//! use crossline_server::{AppState, ServerConfig, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! let service = SessionService::new(InMemorySessionRepository::new());
//! let app = router(AppState::new(service));
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorBody};
pub use routes::{ApiJson, ApiPath, AppState, CurrentPlayer, PLAYER_HEADER, router};
