use breakaway_types::session::{
    OutcomeKind, Phase, Session, BONUS_TRIGGER_BPS, BPS_SCALE, CHECKPOINTS_BPS,
    CRASH_CHANCE_BPS_PER_SEC, DODGE_SPLIT_BPS, MAX_MULTIPLIER_BPS, MAX_TICK_MS,
    MULTIPLIER_RATE_BPS_PER_SEC, RUNNER_COUNT, SHOT_MULTIPLIER_MAX_BPS, SHOT_MULTIPLIER_MIN_BPS,
    TACKLE_SPLIT_BPS,
};

use super::bonus;
use super::state::SessionState;
use crate::game::{GameError, GameResult};
use crate::rng::GameRng;

/// Final payout for leaving the pitch with the ball: stake scaled by the
/// running multiplier, plus any bonus winnings already banked.
pub(super) fn cashout_payout(session: &Session, state: &SessionState) -> Result<u64, GameError> {
    let base = session
        .stake
        .checked_mul(state.multiplier_bps)
        .and_then(|v| v.checked_div(BPS_SCALE))
        .ok_or(GameError::InvalidState)?;
    base.checked_add(state.bonus_won)
        .ok_or(GameError::InvalidState)
}

/// What an encounter draw did to a single runner.
enum Encounter {
    Tackled,
    Dodged,
    Skilled,
}

fn draw_encounter(rng: &mut GameRng) -> Encounter {
    let roll = rng.next_bounded_u16(BPS_SCALE as u16) as u64;
    if roll < TACKLE_SPLIT_BPS {
        Encounter::Tackled
    } else if roll < TACKLE_SPLIT_BPS + DODGE_SPLIT_BPS {
        Encounter::Dodged
    } else {
        Encounter::Skilled
    }
}

/// Advance the running phase by one frame.
///
/// The multiplier climbs first, clamped to the next unreached checkpoint.
/// Each surviving runner then faces an encounter draw scaled by the frame
/// delta. Losing the carrier with no survivors ends the session; losing the
/// carrier with survivors hands the ball to the lowest-index one. A carrier
/// tackle may instead open the bonus round.
pub(super) fn tick(
    session: &mut Session,
    state: &mut SessionState,
    delta_ms: u16,
    rng: &mut GameRng,
) -> Result<GameResult, GameError> {
    if delta_ms > MAX_TICK_MS {
        return Err(GameError::InvalidPayload);
    }

    // Climb the multiplier, pausing exactly on the next checkpoint.
    let growth = MULTIPLIER_RATE_BPS_PER_SEC
        .checked_mul(delta_ms as u64)
        .map(|v| v / 1_000)
        .ok_or(GameError::InvalidState)?;
    let mut target = state
        .multiplier_bps
        .checked_add(growth)
        .ok_or(GameError::InvalidState)?
        .min(MAX_MULTIPLIER_BPS);
    let mut reached_checkpoint = false;
    if (state.checkpoint_index as usize) < CHECKPOINTS_BPS.len() {
        let checkpoint = CHECKPOINTS_BPS[state.checkpoint_index as usize];
        if target >= checkpoint {
            target = checkpoint;
            reached_checkpoint = true;
        }
    }
    state.multiplier_bps = target;

    // Encounter draws, one per surviving runner in index order.
    let chance = CRASH_CHANCE_BPS_PER_SEC * delta_ms as u64 / 1_000;
    for runner in 0..RUNNER_COUNT as u8 {
        if !state.is_active(runner) || !rng.chance_bps(chance) {
            continue;
        }
        match draw_encounter(rng) {
            Encounter::Dodged => {}
            Encounter::Skilled => {
                // Only the carrier banks a skill bonus.
                if runner == state.possession {
                    state.bonus_won = state
                        .bonus_won
                        .checked_add(session.stake)
                        .ok_or(GameError::InvalidState)?;
                }
            }
            Encounter::Tackled => {
                if runner != state.possession {
                    state.remove_runner(runner);
                    continue;
                }
                // Carrier tackles sometimes earn a free kick instead.
                if session.force_bonus || rng.chance_bps(BONUS_TRIGGER_BPS) {
                    bonus::open(state, rng);
                    session.state_blob = super::state::serialize_state(state);
                    return Ok(GameResult::Continue);
                }
                state.remove_runner(runner);
                match state.lowest_active() {
                    Some(next) => state.possession = next,
                    None => {
                        session.is_complete = true;
                        session.outcome = Some(OutcomeKind::LossCrash);
                        session.state_blob = super::state::serialize_state(state);
                        return Ok(GameResult::Loss);
                    }
                }
            }
        }
    }

    if reached_checkpoint {
        state.phase = Phase::Decision;
    }
    session.state_blob = super::state::serialize_state(state);
    Ok(GameResult::Continue)
}

/// Resolve a choice made at a decision checkpoint.
pub(super) fn keep_running(
    session: &mut Session,
    state: &mut SessionState,
) -> Result<GameResult, GameError> {
    // The final checkpoint only offers shoot or cash out.
    if state.checkpoint_index as usize + 1 >= CHECKPOINTS_BPS.len() {
        return Err(GameError::InvalidMove);
    }
    state.checkpoint_index += 1;
    state.phase = Phase::Running;
    session.state_blob = super::state::serialize_state(state);
    Ok(GameResult::Continue)
}

/// Hand the ball to another runner and keep going. Passing leaves the
/// checkpoint behind just like continuing does.
pub(super) fn pass(
    session: &mut Session,
    state: &mut SessionState,
    target: u8,
) -> Result<GameResult, GameError> {
    if state.checkpoint_index as usize + 1 >= CHECKPOINTS_BPS.len() {
        return Err(GameError::InvalidMove);
    }
    if target == state.possession || !state.is_active(target) {
        return Err(GameError::InvalidMove);
    }
    state.possession = target;
    state.checkpoint_index += 1;
    state.phase = Phase::Running;
    session.state_blob = super::state::serialize_state(state);
    Ok(GameResult::Continue)
}

pub(super) fn cash_out(
    session: &mut Session,
    state: &mut SessionState,
) -> Result<GameResult, GameError> {
    let payout = cashout_payout(session, state)?;
    session.is_complete = true;
    session.outcome = Some(OutcomeKind::WinCashout);
    session.state_blob = super::state::serialize_state(state);
    Ok(GameResult::Win(payout))
}

/// Take a shot from open play: the shot multiplier is drawn up front and
/// held in the state until the goal draw resolves it.
pub(super) fn shoot(
    session: &mut Session,
    state: &mut SessionState,
    rng: &mut GameRng,
) -> Result<GameResult, GameError> {
    state.shot_multiplier_bps =
        rng.range_bps(SHOT_MULTIPLIER_MIN_BPS, SHOT_MULTIPLIER_MAX_BPS) as u32;
    state.phase = Phase::Shootout;
    session.state_blob = super::state::serialize_state(state);
    Ok(GameResult::Continue)
}
