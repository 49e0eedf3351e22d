//! Game rules for tic-tac-toe.
//!
//! Pure functions over boards. Nothing in here touches sessions or
//! persistence.

pub mod validate;
pub mod win;

pub use validate::{ValidationError, validate_move};
pub use win::{Verdict, evaluate};
