use breakaway_types::session::{Phase, BONUS_ZONE_COUNT, BPS_SCALE, RUNNER_COUNT};

/// Serialized state size in bytes.
pub const STATE_SIZE: usize = 29;

/// Parsed session state.
///
/// `checkpoint_index` is the index of the next decision checkpoint to arm.
/// While paused in Decision it still names the checkpoint just reached; it
/// only advances when the player elects to keep running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    /// Running multiplier in basis points (10000 = 1x).
    pub multiplier_bps: u64,
    /// Runner currently carrying the ball.
    pub possession: u8,
    /// Bit per runner, set while the runner is still on the pitch.
    pub active_mask: u8,
    pub checkpoint_index: u8,
    /// Accumulated bonus winnings in minor currency units.
    pub bonus_won: u64,
    /// Shot multiplier drawn when a shot was taken, basis points.
    pub shot_multiplier_bps: u32,
    /// Zone payout multipliers while the bonus round is open, zeroed
    /// otherwise.
    pub zones: [u8; BONUS_ZONE_COUNT],
}

impl SessionState {
    /// Fresh running state with possession given to the backed runner.
    pub fn new(runner: u8) -> Self {
        Self {
            phase: Phase::Running,
            multiplier_bps: BPS_SCALE,
            possession: runner,
            active_mask: (1u8 << RUNNER_COUNT) - 1,
            checkpoint_index: 0,
            bonus_won: 0,
            shot_multiplier_bps: 0,
            zones: [0; BONUS_ZONE_COUNT],
        }
    }

    pub fn is_active(&self, runner: u8) -> bool {
        runner < RUNNER_COUNT as u8 && self.active_mask & (1 << runner) != 0
    }

    pub fn remove_runner(&mut self, runner: u8) {
        self.active_mask &= !(1 << runner);
    }

    pub fn active_count(&self) -> u32 {
        self.active_mask.count_ones()
    }

    /// Lowest-index runner still on the pitch.
    pub fn lowest_active(&self) -> Option<u8> {
        if self.active_mask == 0 {
            return None;
        }
        Some(self.active_mask.trailing_zeros() as u8)
    }
}

/// Parse a state blob.
pub fn parse_state(state: &[u8]) -> Option<SessionState> {
    if state.len() < STATE_SIZE {
        return None;
    }

    let phase = Phase::try_from(state[0]).ok()?;
    let multiplier_bps = u64::from_be_bytes([
        state[1], state[2], state[3], state[4], state[5], state[6], state[7], state[8],
    ]);
    let possession = state[9];
    let active_mask = state[10];
    let checkpoint_index = state[11];
    let bonus_won = u64::from_be_bytes([
        state[12], state[13], state[14], state[15], state[16], state[17], state[18], state[19],
    ]);
    let shot_multiplier_bps = u32::from_be_bytes([state[20], state[21], state[22], state[23]]);
    let mut zones = [0u8; BONUS_ZONE_COUNT];
    zones.copy_from_slice(&state[24..24 + BONUS_ZONE_COUNT]);

    Some(SessionState {
        phase,
        multiplier_bps,
        possession,
        active_mask,
        checkpoint_index,
        bonus_won,
        shot_multiplier_bps,
        zones,
    })
}

/// Serialize state to blob.
pub fn serialize_state(state: &SessionState) -> Vec<u8> {
    let mut blob = Vec::with_capacity(STATE_SIZE);
    blob.push(state.phase as u8);
    blob.extend_from_slice(&state.multiplier_bps.to_be_bytes());
    blob.push(state.possession);
    blob.push(state.active_mask);
    blob.push(state.checkpoint_index);
    blob.extend_from_slice(&state.bonus_won.to_be_bytes());
    blob.extend_from_slice(&state.shot_multiplier_bps.to_be_bytes());
    blob.extend_from_slice(&state.zones);
    blob
}
