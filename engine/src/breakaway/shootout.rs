use breakaway_types::session::{OutcomeKind, Session, BPS_SCALE, GOAL_CHANCE_BPS};

use super::run::cashout_payout;
use super::state::SessionState;
use crate::game::{GameError, GameResult};
use crate::rng::GameRng;

/// Resolve the goal draw for a shot taken from open play.
///
/// A goal scales the full cash-out value (stake times multiplier, plus
/// banked bonus winnings) by the shot multiplier drawn when the shot was
/// taken. A save loses everything, banked bonus included.
pub(super) fn resolve(
    session: &mut Session,
    state: &mut SessionState,
    rng: &mut GameRng,
) -> Result<GameResult, GameError> {
    let scored = session.force_goal || rng.chance_bps(GOAL_CHANCE_BPS);
    if !scored {
        session.is_complete = true;
        session.outcome = Some(OutcomeKind::LossMiss);
        session.state_blob = super::state::serialize_state(state);
        return Ok(GameResult::Loss);
    }

    // Settle the payout before completing the session so an arithmetic
    // failure leaves it open rather than complete with no outcome.
    let base = cashout_payout(session, state)?;
    let payout = base
        .checked_mul(state.shot_multiplier_bps as u64)
        .and_then(|v| v.checked_div(BPS_SCALE))
        .ok_or(GameError::InvalidState)?;
    session.is_complete = true;
    session.outcome = Some(OutcomeKind::WinGoal);
    session.state_blob = super::state::serialize_state(state);
    Ok(GameResult::Win(payout))
}
