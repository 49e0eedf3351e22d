//! Crossline engine: the tic-tac-toe session core.
//!
//! # Architecture
//!
//! - **Rules**: win/draw detection and board-diff move validation
//! - **Decision**: exhaustive minimax for the computer opponent
//! - **Machine**: session lifecycle (Waiting → Turn → Draw | Win)
//! - **Service**: move cycles against a [`SessionRepository`]
//!
//! # Example
//!
//! ```
//! use crossline_engine::{
//!     Board, GameMode, InMemorySessionRepository, Mark, PlayerId, Position, SessionService,
//! };
//!
//! # fn example() -> Result<(), crossline_engine::SessionError> {
//! let service = SessionService::new(InMemorySessionRepository::new());
//! let human = PlayerId::generate();
//!
//! let session = service.create_session(human, GameMode::PlayerVsComputer)?;
//! let proposed = session.board().with(Position::Center, Mark::X.into());
//! let session = service.submit_move(*session.id(), &proposed, human)?;
//!
//! assert_eq!(session.board().get(Position::TopLeft), Mark::O.into());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod decision;
mod error;
mod ids;
mod machine;
mod memory;
mod position;
mod repository;
pub mod rules;
mod service;
mod session;
mod stats;
mod types;

pub use decision::{Decision, best_move};
pub use error::{JoinError, SessionError, TerminalStateError, TurnOwnershipError};
pub use ids::{IdError, PlayerId, SessionId};
pub use memory::InMemorySessionRepository;
pub use position::Position;
pub use repository::{RepositoryError, SessionRepository};
pub use rules::{ValidationError, Verdict, evaluate, validate_move};
pub use service::SessionService;
pub use session::{GameMode, Session, SessionState};
pub use stats::Stats;
pub use types::{Board, BoardCodecError, Cell, Mark};
