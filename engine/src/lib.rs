//! Session state machine and payout engine for breakaway.
//!
//! The engine is deterministic: every random draw comes from a [GameRng]
//! keyed by the table seed, the session id and the move number, so a
//! session replayed against the same seed produces the same transcript.
//! All money amounts are integer minor currency units and all multipliers
//! are integer basis points.

pub mod breakaway;
pub mod game;
#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod rng;
pub mod table;

pub use game::{GameError, GameResult, SessionGame};
pub use rng::GameRng;
pub use table::{Table, TableError};
