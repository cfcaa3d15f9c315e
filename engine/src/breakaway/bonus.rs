use breakaway_types::session::{
    Phase, Session, BONUS_ZONE_COUNT, BONUS_ZONE_MULTIPLIERS, GOAL_CHANCE_BPS,
};

use super::state::SessionState;
use crate::game::{GameError, GameResult};
use crate::rng::GameRng;

/// Open the free-kick bonus round: shuffle the payout table across the
/// goal zones and wait for a pick. The triggering tackle is forgiven, so
/// the carrier stays on the pitch.
pub(super) fn open(state: &mut SessionState, rng: &mut GameRng) {
    let mut zones = BONUS_ZONE_MULTIPLIERS;
    rng.shuffle(&mut zones);
    state.zones = zones;
    state.phase = Phase::Bonus;
}

/// Resolve a zone pick. A goal banks stake times the hidden zone
/// multiplier; a save banks nothing. Either way the run resumes at the
/// multiplier it paused on.
pub(super) fn pick_zone(
    session: &mut Session,
    state: &mut SessionState,
    zone: u8,
    rng: &mut GameRng,
) -> Result<GameResult, GameError> {
    if zone as usize >= BONUS_ZONE_COUNT {
        return Err(GameError::InvalidPayload);
    }

    let scored = session.force_goal || rng.chance_bps(GOAL_CHANCE_BPS);
    if scored {
        let prize = session
            .stake
            .checked_mul(state.zones[zone as usize] as u64)
            .ok_or(GameError::InvalidState)?;
        state.bonus_won = state
            .bonus_won
            .checked_add(prize)
            .ok_or(GameError::InvalidState)?;
    }

    state.zones = [0; BONUS_ZONE_COUNT];
    state.phase = Phase::Running;
    session.state_blob = super::state::serialize_state(state);
    Ok(GameResult::Continue)
}
