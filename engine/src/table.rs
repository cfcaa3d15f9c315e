use std::collections::BTreeMap;

use breakaway_types::session::{
    Event, Phase, Session, Wallet, ERROR_INSUFFICIENT_FUNDS, ERROR_INVALID_MOVE,
    ERROR_INVALID_RUNNER, ERROR_INVALID_STAKE, ERROR_SESSION_COMPLETE, ERROR_SESSION_NOT_FOUND,
    RUNNER_COUNT, STAKES, STARTING_BALANCE,
};
use breakaway_types::Seed;
use thiserror::Error;
use tracing::debug;

use crate::breakaway::{parse_state, Breakaway, SessionState};
use crate::game::{GameError, GameResult, SessionGame};
use crate::rng::GameRng;

/// Error surfaced by the table layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("stake not in the permitted table")]
    InvalidStake,
    #[error("wallet balance too low for stake")]
    InsufficientFunds,
    #[error("no such runner")]
    InvalidRunner,
    #[error("unknown session")]
    SessionNotFound,
    #[error("session already settled")]
    SessionComplete,
    #[error("move rejected")]
    InvalidMove,
}

impl TableError {
    /// Stable error code carried by [Event::Error].
    pub fn code(&self) -> u8 {
        match self {
            Self::InvalidStake => ERROR_INVALID_STAKE,
            Self::InsufficientFunds => ERROR_INSUFFICIENT_FUNDS,
            Self::InvalidRunner => ERROR_INVALID_RUNNER,
            Self::SessionNotFound => ERROR_SESSION_NOT_FOUND,
            Self::SessionComplete => ERROR_SESSION_COMPLETE,
            Self::InvalidMove => ERROR_INVALID_MOVE,
        }
    }

    /// Event form of the error, for hosts that render a single stream.
    pub fn to_event(&self, session_id: Option<u64>) -> Event {
        Event::Error {
            session_id,
            code: self.code(),
            message: self.to_string(),
        }
    }
}

impl From<GameError> for TableError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::SessionAlreadyComplete => Self::SessionComplete,
            GameError::InvalidPayload | GameError::InvalidMove | GameError::InvalidState => {
                Self::InvalidMove
            }
        }
    }
}

/// The table owns the wallet and every session started against it.
///
/// Stakes are debited up front when a session starts and winnings are
/// credited when it settles, so the wallet balance is always the player's
/// spendable money. Sessions are kept after settling so their transcripts
/// stay inspectable.
pub struct Table {
    seed: Seed,
    wallet: Wallet,
    sessions: BTreeMap<u64, Session>,
    next_session_id: u64,
}

impl Table {
    pub fn new(seed: Seed) -> Self {
        Self::with_balance(seed, STARTING_BALANCE)
    }

    pub fn with_balance(seed: Seed, balance: u64) -> Self {
        Self {
            seed,
            wallet: Wallet::new(balance),
            sessions: BTreeMap::new(),
            next_session_id: 1,
        }
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn session(&self, session_id: u64) -> Option<&Session> {
        self.sessions.get(&session_id)
    }

    /// Debug forcing knobs for a running session.
    pub fn set_forcing(
        &mut self,
        session_id: u64,
        force_bonus: bool,
        force_goal: bool,
    ) -> Result<(), TableError> {
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(TableError::SessionNotFound)?;
        session.force_bonus = force_bonus;
        session.force_goal = force_goal;
        Ok(())
    }

    /// Take a stake and put a fresh session on the pitch.
    pub fn start_session(
        &mut self,
        stake: u64,
        runner: u8,
    ) -> Result<(u64, Vec<Event>), TableError> {
        if !STAKES.contains(&stake) {
            return Err(TableError::InvalidStake);
        }
        if runner as usize >= RUNNER_COUNT {
            return Err(TableError::InvalidRunner);
        }
        if !self.wallet.debit(stake) {
            return Err(TableError::InsufficientFunds);
        }

        let session_id = self.next_session_id;
        self.next_session_id += 1;

        let mut session = Session::new(session_id, stake);
        let mut rng = GameRng::new(&self.seed, session_id, 0);
        Breakaway::init(&mut session, runner, &mut rng);
        self.sessions.insert(session_id, session);

        debug!(session_id, stake, runner, "session started");
        Ok((
            session_id,
            vec![Event::SessionStarted {
                session_id,
                stake,
                runner,
            }],
        ))
    }

    /// Apply one raw move payload to a session and settle it if the move
    /// completed it.
    pub fn apply_move(&mut self, session_id: u64, payload: &[u8]) -> Result<Vec<Event>, TableError> {
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(TableError::SessionNotFound)?;
        if session.is_complete {
            return Err(TableError::SessionComplete);
        }

        let before = parse_state(&session.state_blob).ok_or(TableError::InvalidMove)?;
        let mut rng = GameRng::new(&self.seed, session_id, session.move_count);
        let result = Breakaway::process_move(session, payload, &mut rng)?;
        let after = parse_state(&session.state_blob).ok_or(TableError::InvalidMove)?;

        let mut events = diff_events(session_id, &before, &after);
        match result {
            GameResult::Continue => {}
            GameResult::Win(payout) => {
                self.wallet.credit(payout);
                if let Some(outcome) = session.outcome {
                    debug!(session_id, ?outcome, payout, "session settled");
                    events.push(Event::SessionSettled {
                        session_id,
                        outcome,
                        payout,
                    });
                }
            }
            GameResult::Loss => {
                if let Some(outcome) = session.outcome {
                    debug!(session_id, ?outcome, "session settled");
                    events.push(Event::SessionSettled {
                        session_id,
                        outcome,
                        payout: 0,
                    });
                }
            }
        }
        Ok(events)
    }
}

/// Derive the per-move event stream from the state transition.
fn diff_events(session_id: u64, before: &SessionState, after: &SessionState) -> Vec<Event> {
    let mut events = Vec::new();

    let tackled = before.active_mask & !after.active_mask;
    for runner in 0..RUNNER_COUNT as u8 {
        if tackled & (1 << runner) != 0 {
            events.push(Event::RunnerTackled { session_id, runner });
        }
    }
    if before.possession != after.possession {
        events.push(Event::PossessionChanged {
            session_id,
            from: before.possession,
            to: after.possession,
        });
    }
    if after.bonus_won > before.bonus_won {
        let amount = after.bonus_won - before.bonus_won;
        if before.phase == Phase::Bonus {
            events.push(Event::BonusRoundResolved {
                session_id,
                won: amount,
            });
        } else {
            events.push(Event::SkillBonus { session_id, amount });
        }
    } else if before.phase == Phase::Bonus && after.phase == Phase::Running {
        // Saved free kick.
        events.push(Event::BonusRoundResolved { session_id, won: 0 });
    }
    match (before.phase, after.phase) {
        (Phase::Running, Phase::Decision) => events.push(Event::CheckpointReached {
            session_id,
            index: after.checkpoint_index,
            multiplier_bps: after.multiplier_bps,
        }),
        (Phase::Running, Phase::Bonus) => events.push(Event::BonusRoundOpened { session_id }),
        _ => {}
    }

    events
}
