//! Breakaway session implementation.
//!
//! State blob format (29 bytes):
//! [phase:u8] [multiplier_bps:u64 BE] [possession:u8] [active_mask:u8]
//! [checkpoint_index:u8] [bonus_won:u64 BE] [shot_multiplier_bps:u32 BE]
//! [zones:5 bytes]
//!
//! The multiplier is stored in basis points (10000 = 1x) and climbs while
//! the session is in the running phase, pausing on each decision
//! checkpoint. `bonus_won` holds banked winnings in minor currency units.
//! `zones` holds the shuffled free-kick payout table while the bonus round
//! is open and is zeroed otherwise.
//!
//! Payload format:
//! [0, delta_hi, delta_lo] = Tick - advance the run by delta_ms
//! [1] = Continue - leave a checkpoint and keep running
//! [2] = Cashout - settle at the current multiplier
//! [3] = Shoot - take a shot from open play
//! [4] = Resolve - resolve the pending shot
//! [5, zone] = PickZone - aim the free kick at a goal zone
//! [6, target] = Pass - hand the ball to another runner and keep going

mod bonus;
mod run;
mod shootout;
mod state;

pub use state::{parse_state, serialize_state, SessionState, STATE_SIZE};

use breakaway_types::session::{Phase, Session};

use crate::game::{GameError, GameResult, SessionGame};
use crate::rng::GameRng;

/// Breakaway move types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Tick { delta_ms: u16 },
    Continue,
    Cashout,
    Shoot,
    Resolve,
    PickZone { zone: u8 },
    Pass { target: u8 },
}

impl Move {
    /// Parse a move from a raw payload.
    pub fn parse(payload: &[u8]) -> Result<Self, GameError> {
        match payload {
            [0, hi, lo] => Ok(Move::Tick {
                delta_ms: u16::from_be_bytes([*hi, *lo]),
            }),
            [1] => Ok(Move::Continue),
            [2] => Ok(Move::Cashout),
            [3] => Ok(Move::Shoot),
            [4] => Ok(Move::Resolve),
            [5, zone] => Ok(Move::PickZone { zone: *zone }),
            [6, target] => Ok(Move::Pass { target: *target }),
            _ => Err(GameError::InvalidPayload),
        }
    }

    /// Encode a move to the raw payload form.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Move::Tick { delta_ms } => {
                let delta = delta_ms.to_be_bytes();
                vec![0, delta[0], delta[1]]
            }
            Move::Continue => vec![1],
            Move::Cashout => vec![2],
            Move::Shoot => vec![3],
            Move::Resolve => vec![4],
            Move::PickZone { zone } => vec![5, *zone],
            Move::Pass { target } => vec![6, *target],
        }
    }
}

pub struct Breakaway;

impl SessionGame for Breakaway {
    fn init(session: &mut Session, runner: u8, _rng: &mut GameRng) {
        let state = SessionState::new(runner);
        session.state_blob = serialize_state(&state);
    }

    fn process_move(
        session: &mut Session,
        payload: &[u8],
        rng: &mut GameRng,
    ) -> Result<GameResult, GameError> {
        if session.is_complete {
            return Err(GameError::SessionAlreadyComplete);
        }

        let mv = Move::parse(payload)?;
        let mut state = parse_state(&session.state_blob).ok_or(GameError::InvalidState)?;

        let result = match (state.phase, mv) {
            (Phase::Running, Move::Tick { delta_ms }) => {
                run::tick(session, &mut state, delta_ms, rng)
            }
            (Phase::Decision, Move::Continue) => run::keep_running(session, &mut state),
            (Phase::Decision, Move::Cashout) => run::cash_out(session, &mut state),
            (Phase::Decision, Move::Shoot) => run::shoot(session, &mut state, rng),
            (Phase::Decision, Move::Pass { target }) => run::pass(session, &mut state, target),
            (Phase::Shootout, Move::Resolve) => shootout::resolve(session, &mut state, rng),
            (Phase::Bonus, Move::PickZone { zone }) => {
                bonus::pick_zone(session, &mut state, zone, rng)
            }
            _ => Err(GameError::InvalidMove),
        };

        // A rejected move leaves the session untouched, so later draws are
        // keyed as if it never happened.
        if result.is_ok() {
            session.move_count += 1;
        }
        result
    }
}
