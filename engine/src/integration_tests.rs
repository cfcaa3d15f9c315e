//! Integration tests for session execution.
//!
//! These tests drive whole sessions through the table, from stake to
//! settlement, across many seeds.

#[cfg(test)]
mod tests {
    use crate::breakaway::{parse_state, Move};
    use crate::mocks::create_seed;
    use crate::table::Table;
    use breakaway_types::session::{
        Event, OutcomeKind, Phase, BPS_SCALE, CHECKPOINTS_BPS, SHOT_MULTIPLIER_MAX_BPS,
        STARTING_BALANCE,
    };

    /// What to do at a decision checkpoint.
    #[derive(Clone, Copy)]
    enum Policy {
        /// Cash out at the first checkpoint.
        CashEarly,
        /// Keep running and shoot at the final checkpoint.
        Ride,
    }

    /// Drive a single session to completion under a policy. Returns the
    /// payout credited and all events.
    fn play_session(table: &mut Table, stake: u64, policy: Policy) -> (u64, Vec<Event>) {
        let (session_id, mut events) = table.start_session(stake, 0).expect("start failed");

        let final_checkpoint = CHECKPOINTS_BPS.len() - 1;
        for _ in 0..100_000 {
            let session = table.session(session_id).expect("session missing");
            if session.is_complete {
                break;
            }
            let state = parse_state(&session.state_blob).expect("bad state");
            let payload = match state.phase {
                Phase::Running => Move::Tick { delta_ms: 16 }.encode(),
                Phase::Bonus => Move::PickZone { zone: 2 }.encode(),
                Phase::Shootout => Move::Resolve.encode(),
                Phase::Decision => match policy {
                    Policy::CashEarly => Move::Cashout.encode(),
                    Policy::Ride => {
                        if state.checkpoint_index as usize == final_checkpoint {
                            Move::Shoot.encode()
                        } else {
                            Move::Continue.encode()
                        }
                    }
                },
            };
            events.extend(table.apply_move(session_id, &payload).expect("move failed"));
        }

        let session = table.session(session_id).expect("session missing");
        assert!(session.is_complete, "session did not terminate");

        let payout = events
            .iter()
            .find_map(|e| match e {
                Event::SessionSettled { payout, .. } => Some(*payout),
                _ => None,
            })
            .expect("no settlement event");
        (payout, events)
    }

    /// Every session reaches exactly one terminal outcome and emits
    /// exactly one settlement event.
    #[test]
    fn test_every_session_settles_once() {
        for tag in 0..50u64 {
            let mut table = Table::new(create_seed(tag));
            let policy = if tag % 2 == 0 {
                Policy::CashEarly
            } else {
                Policy::Ride
            };
            let (_, events) = play_session(&mut table, 25, policy);

            let settled = events
                .iter()
                .filter(|e| matches!(e, Event::SessionSettled { .. }))
                .count();
            assert_eq!(settled, 1, "seed {tag} settled {settled} times");
        }
    }

    /// The wallet is debited once at start and only ever credited after,
    /// so it can never go below balance - stake.
    #[test]
    fn test_wallet_accounting() {
        for tag in 0..50u64 {
            let mut table = Table::new(create_seed(tag));
            let (payout, _) = play_session(&mut table, 100, Policy::Ride);
            assert_eq!(table.wallet().balance, STARTING_BALANCE - 100 + payout);
        }
    }

    /// Cash-out payout equals stake times the paused multiplier plus
    /// banked bonus winnings.
    #[test]
    fn test_cashout_payout_formula() {
        for tag in 0..50u64 {
            let mut table = Table::new(create_seed(tag));
            let (session_id, _) = table.start_session(200, 0).expect("start failed");
            let (payout, _) = {
                // Re-drive manually so we can read the state at settlement.
                let mut events = Vec::new();
                loop {
                    let session = table.session(session_id).expect("session missing");
                    if session.is_complete {
                        break;
                    }
                    let state = parse_state(&session.state_blob).expect("bad state");
                    let payload = match state.phase {
                        Phase::Running => Move::Tick { delta_ms: 16 }.encode(),
                        Phase::Bonus => Move::PickZone { zone: 0 }.encode(),
                        Phase::Shootout => Move::Resolve.encode(),
                        Phase::Decision => Move::Cashout.encode(),
                    };
                    events.extend(table.apply_move(session_id, &payload).expect("move failed"));
                }
                let payout = events.iter().find_map(|e| match e {
                    Event::SessionSettled { payout, .. } => Some(*payout),
                    _ => None,
                });
                (payout.expect("no settlement"), events)
            };

            let session = table.session(session_id).expect("session missing");
            let state = parse_state(&session.state_blob).expect("bad state");
            match session.outcome.expect("no outcome") {
                OutcomeKind::WinCashout => {
                    assert_eq!(
                        payout,
                        200 * state.multiplier_bps / BPS_SCALE + state.bonus_won
                    );
                }
                OutcomeKind::LossCrash => assert_eq!(payout, 0),
                other => panic!("unexpected outcome {other:?} under cash-early policy"),
            }
        }
    }

    /// Possession is always held by an active runner until the session
    /// completes, and only changes to a survivor.
    #[test]
    fn test_possession_held_by_active_runner() {
        for tag in 0..50u64 {
            let mut table = Table::new(create_seed(tag));
            let (session_id, _) = table.start_session(10, 3).expect("start failed");

            loop {
                let session = table.session(session_id).expect("session missing");
                if session.is_complete {
                    break;
                }
                let state = parse_state(&session.state_blob).expect("bad state");
                if state.active_count() > 0 {
                    assert!(
                        state.is_active(state.possession),
                        "seed {tag}: carrier off the pitch"
                    );
                }
                let payload = match state.phase {
                    Phase::Running => Move::Tick { delta_ms: 50 }.encode(),
                    Phase::Bonus => Move::PickZone { zone: 4 }.encode(),
                    Phase::Shootout => Move::Resolve.encode(),
                    Phase::Decision => Move::Continue.encode(),
                };
                // The final checkpoint rejects Continue; cash out there.
                if table.apply_move(session_id, &payload).is_err() {
                    table
                        .apply_move(session_id, &Move::Cashout.encode())
                        .expect("cashout failed");
                }
            }
        }
    }

    /// Payouts are bounded by the theoretical maximum for the stake, so
    /// multiplier arithmetic cannot run away.
    #[test]
    fn test_payout_bounded() {
        // Max cash value is 20x stake plus banked bonus; a goal scales it
        // by at most 10x. Bonus banking is unbounded in theory but each
        // free kick adds at most 100x stake, and sessions here are short.
        for tag in 0..50u64 {
            let mut table = Table::new(create_seed(tag));
            let (payout, events) = play_session(&mut table, 5, Policy::Ride);

            let bonus_total: u64 = events
                .iter()
                .map(|e| match e {
                    Event::SkillBonus { amount, .. } => *amount,
                    Event::BonusRoundResolved { won, .. } => *won,
                    _ => 0,
                })
                .sum();
            let max_cash = 5 * CHECKPOINTS_BPS[CHECKPOINTS_BPS.len() - 1] / BPS_SCALE + bonus_total;
            let bound = max_cash * SHOT_MULTIPLIER_MAX_BPS / BPS_SCALE;
            assert!(payout <= bound, "seed {tag}: payout {payout} over {bound}");
        }
    }

    /// The same seed replays the same session transcript through the
    /// table, settlement included.
    #[test]
    fn test_table_replay_deterministic() {
        let run = |tag: u64| {
            let mut table = Table::new(create_seed(tag));
            play_session(&mut table, 50, Policy::Ride)
        };
        for tag in 0..10u64 {
            let (payout_a, events_a) = run(tag);
            let (payout_b, events_b) = run(tag);
            assert_eq!(payout_a, payout_b);
            assert_eq!(events_a, events_b);
        }
    }
}
