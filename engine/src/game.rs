use breakaway_types::session::Session;

use crate::rng::GameRng;

/// Result of processing a session move.
#[derive(Debug)]
pub enum GameResult {
    /// Session is still in progress, state updated.
    Continue,
    /// Session completed with a win. Value is the total return in minor
    /// currency units (stake already deducted at start).
    Win(u64),
    /// Session completed with a loss.
    Loss,
}

/// Error during session execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Invalid payload format or content.
    InvalidPayload,
    /// Invalid move for current session phase.
    InvalidMove,
    /// Session has already completed.
    SessionAlreadyComplete,
    /// Corrupted state blob.
    InvalidState,
}

/// Trait for session game implementations.
pub trait SessionGame {
    /// Initialize session state after the stake has been taken, giving
    /// first possession to the backed runner.
    fn init(session: &mut Session, runner: u8, rng: &mut GameRng);

    /// Process a player move.
    /// Updates the session state and returns the result.
    fn process_move(
        session: &mut Session,
        payload: &[u8],
        rng: &mut GameRng,
    ) -> Result<GameResult, GameError>;
}
