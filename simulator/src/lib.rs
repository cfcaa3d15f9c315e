//! Local session runner.
//!
//! Plays whole sessions against an in-memory table under a fixed decision
//! policy and aggregates the results. Useful for eyeballing return-to-player
//! and exercising the engine end to end.

use anyhow::Context;
use breakaway_engine::breakaway::{parse_state, Move, SessionState};
use breakaway_engine::Table;
use breakaway_types::session::{
    Event, OutcomeKind, Phase, BONUS_ZONE_COUNT, BPS_SCALE, CHECKPOINTS_BPS, RUNNER_COUNT,
};
use breakaway_types::Seed;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

/// Milliseconds advanced per tick, roughly one 60fps frame.
const TICK_MS: u16 = 16;

/// Safety cap on moves per session.
const MAX_MOVES: usize = 1_000_000;

/// What to do at each decision checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Cash out at the given checkpoint index (clamped to the last).
    CashAt(usize),
    /// Keep running and shoot at the final checkpoint.
    Ride,
    /// Pick uniformly between cashing out, passing and pressing on; shoot
    /// when pressing on at the final checkpoint.
    Random,
}

/// Aggregated results over a batch of sessions.
#[derive(Debug, Default, Serialize)]
pub struct Stats {
    pub sessions: u64,
    pub staked: u64,
    pub returned: u64,
    pub cashouts: u64,
    pub goals: u64,
    pub crashes: u64,
    pub misses: u64,
    pub bonus_rounds: u64,
    pub max_payout: u64,
    /// Return to player in basis points.
    pub rtp_bps: u64,
}

impl Stats {
    fn record(&mut self, stake: u64, payout: u64, outcome: OutcomeKind) {
        self.sessions += 1;
        self.staked += stake;
        self.returned += payout;
        self.max_payout = self.max_payout.max(payout);
        match outcome {
            OutcomeKind::WinCashout => self.cashouts += 1,
            OutcomeKind::WinGoal => self.goals += 1,
            OutcomeKind::LossCrash => self.crashes += 1,
            OutcomeKind::LossMiss => self.misses += 1,
        }
    }

    fn finalize(&mut self) {
        if self.staked > 0 {
            self.rtp_bps = self.returned * BPS_SCALE / self.staked;
        }
    }
}

/// Plays sessions against a single table.
pub struct Simulator {
    table: Table,
    policy: Policy,
    choices: StdRng,
}

impl Simulator {
    pub fn new(seed: Seed, policy: Policy) -> Self {
        // The decision coin for the random policy is split off the table
        // seed so whole runs stay reproducible.
        let choices = StdRng::from_seed(*seed.as_bytes());
        Self {
            table: Table::new(seed),
            policy,
            choices,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Run a batch of sessions and aggregate the outcomes. The run stops
    /// with an error if the wallet can no longer cover the stake.
    pub fn run(&mut self, sessions: u64, stake: u64) -> anyhow::Result<Stats> {
        let mut stats = Stats::default();
        for i in 0..sessions {
            let runner = (i % RUNNER_COUNT as u64) as u8;
            let (payout, outcome, bonus_rounds) = self
                .play_one(stake, runner)
                .with_context(|| format!("session {} failed", i + 1))?;
            stats.record(stake, payout, outcome);
            stats.bonus_rounds += bonus_rounds;
        }
        stats.finalize();
        Ok(stats)
    }

    fn play_one(&mut self, stake: u64, runner: u8) -> anyhow::Result<(u64, OutcomeKind, u64)> {
        if self.table.wallet().balance < stake {
            anyhow::bail!("wallet exhausted");
        }
        let (session_id, _) = self.table.start_session(stake, runner)?;

        let mut payout = 0;
        let mut bonus_rounds = 0;
        for _ in 0..MAX_MOVES {
            let session = self
                .table
                .session(session_id)
                .context("session disappeared")?;
            if session.is_complete {
                break;
            }
            let state = parse_state(&session.state_blob).context("unreadable session state")?;
            let payload = match state.phase {
                Phase::Running => Move::Tick { delta_ms: TICK_MS }.encode(),
                Phase::Bonus => Move::PickZone {
                    zone: self.choices.gen_range(0..BONUS_ZONE_COUNT as u8),
                }
                .encode(),
                Phase::Shootout => Move::Resolve.encode(),
                Phase::Decision => self.decide(&state).encode(),
            };
            for event in self.table.apply_move(session_id, &payload)? {
                match event {
                    Event::BonusRoundOpened { .. } => bonus_rounds += 1,
                    Event::SessionSettled { payout: p, .. } => payout = p,
                    _ => {}
                }
            }
        }

        let session = self
            .table
            .session(session_id)
            .context("session disappeared")?;
        let outcome = session.outcome.context("session never settled")?;
        debug!(session_id, ?outcome, payout, "session finished");
        Ok((payout, outcome, bonus_rounds))
    }

    fn decide(&mut self, state: &SessionState) -> Move {
        let checkpoint = state.checkpoint_index as usize;
        let last = CHECKPOINTS_BPS.len() - 1;
        let press_on = |choices: &mut StdRng| {
            if checkpoint == last {
                Move::Shoot
            } else {
                // Sometimes hand the ball off before running on.
                let others: Vec<u8> = (0..RUNNER_COUNT as u8)
                    .filter(|r| *r != state.possession && state.is_active(*r))
                    .collect();
                if !others.is_empty() && choices.gen_bool(0.3) {
                    Move::Pass {
                        target: others[choices.gen_range(0..others.len())],
                    }
                } else {
                    Move::Continue
                }
            }
        };
        match self.policy {
            Policy::CashAt(target) => {
                if checkpoint >= target.min(last) {
                    Move::Cashout
                } else {
                    Move::Continue
                }
            }
            Policy::Ride => {
                if checkpoint == last {
                    Move::Shoot
                } else {
                    Move::Continue
                }
            }
            Policy::Random => {
                if self.choices.gen_bool(0.5) {
                    Move::Cashout
                } else {
                    press_on(&mut self.choices)
                }
            }
        }
    }
}
