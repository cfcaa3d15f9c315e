/// Basis-point scale: a multiplier of 1.0x.
pub const BPS_SCALE: u64 = 10_000;

/// Permitted stakes in minor currency units (5p through £2.00).
pub const STAKES: [u64; 6] = [5, 10, 25, 50, 100, 200];

/// Initial wallet balance (£100.00).
pub const STARTING_BALANCE: u64 = 10_000;

/// Runners on the pitch per session.
pub const RUNNER_COUNT: usize = 4;

/// Multiplier growth during the running phase (1.5x per second).
pub const MULTIPLIER_RATE_BPS_PER_SEC: u64 = 15_000;

/// Hard clamp on the running multiplier (500x).
pub const MAX_MULTIPLIER_BPS: u64 = 5_000_000;

/// Decision checkpoints: multiplier pauses at 3x, 8x, 13x and 20x stake.
/// The final checkpoint restricts choices to shoot or cash out.
pub const CHECKPOINTS_BPS: [u64; 4] = [30_000, 80_000, 130_000, 200_000];

/// Per-second encounter chance for each active runner (15%/s), scaled
/// linearly by the tick delta.
pub const CRASH_CHANCE_BPS_PER_SEC: u64 = 1_500;

/// Encounter outcome split: tackle 50%, dodge 25%, skill 25% (remainder).
pub const TACKLE_SPLIT_BPS: u64 = 5_000;
pub const DODGE_SPLIT_BPS: u64 = 2_500;

/// Chance a carrier tackle opens the bonus round instead of ending the run.
pub const BONUS_TRIGGER_BPS: u64 = 2_000;

/// Goal-vs-save draw for the shootout and the bonus round.
pub const GOAL_CHANCE_BPS: u64 = 5_000;

/// Bonus round zone payout table; shuffled across zones when the round opens.
/// A goal pays stake * zone_multiplier into accumulated bonus winnings.
pub const BONUS_ZONE_COUNT: usize = 5;
pub const BONUS_ZONE_MULTIPLIERS: [u8; BONUS_ZONE_COUNT] = [5, 10, 20, 50, 100];

/// Shootout multiplier range: uniform in 5x..=10x.
pub const SHOT_MULTIPLIER_MIN_BPS: u64 = 50_000;
pub const SHOT_MULTIPLIER_MAX_BPS: u64 = 100_000;

/// Largest accepted tick delta. A frame-driven host ticks far more often;
/// anything above this is a malformed move.
pub const MAX_TICK_MS: u16 = 1_000;

/// Maximum serialized session state size.
pub const MAX_STATE_BLOB: usize = 64;

/// Maximum error message length in events.
pub const MAX_MESSAGE_LENGTH: usize = 256;

/// Error codes carried by `Event::Error`.
pub const ERROR_INVALID_STAKE: u8 = 1;
pub const ERROR_INSUFFICIENT_FUNDS: u8 = 2;
pub const ERROR_INVALID_RUNNER: u8 = 3;
pub const ERROR_SESSION_NOT_FOUND: u8 = 4;
pub const ERROR_SESSION_COMPLETE: u8 = 5;
pub const ERROR_INVALID_MOVE: u8 = 6;
