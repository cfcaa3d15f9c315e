use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, ReadRangeExt, Write};

use super::MAX_STATE_BLOB;

/// Session phase.
///
/// Selection and outcome handling live in the table layer (stake validation
/// and settlement); the phases here are the ones the state machine moves
/// through between stake and settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    /// Multiplier climbing, encounters being drawn.
    Running = 0,
    /// Paused at a checkpoint, waiting for a player choice.
    Decision = 1,
    /// Shot taken from open play, waiting for the goal draw.
    Shootout = 2,
    /// Free-kick bonus round, waiting for a zone pick.
    Bonus = 3,
}

impl Write for Phase {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for Phase {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        Phase::try_from(value).map_err(|_| Error::InvalidEnum(value))
    }
}

impl FixedSize for Phase {
    const SIZE: usize = 1;
}

impl TryFrom<u8> for Phase {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0 => Ok(Self::Running),
            1 => Ok(Self::Decision),
            2 => Ok(Self::Shootout),
            3 => Ok(Self::Bonus),
            _ => Err(()),
        }
    }
}

/// Terminal session outcome. Every completed session records exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum OutcomeKind {
    /// Player cashed out at a decision checkpoint.
    WinCashout = 0,
    /// Shot from open play scored.
    WinGoal = 1,
    /// Every runner was tackled before the ball reached the goal.
    LossCrash = 2,
    /// Shot was saved.
    LossMiss = 3,
}

impl OutcomeKind {
    pub fn is_win(&self) -> bool {
        matches!(self, Self::WinCashout | Self::WinGoal)
    }
}

impl Write for OutcomeKind {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for OutcomeKind {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        match value {
            0 => Ok(Self::WinCashout),
            1 => Ok(Self::WinGoal),
            2 => Ok(Self::LossCrash),
            3 => Ok(Self::LossMiss),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for OutcomeKind {
    const SIZE: usize = 1;
}

/// A single breakaway session.
///
/// The phase-specific state (multiplier, possession, active runners, bonus
/// zones) lives in `state_blob`, parsed and rewritten by the engine on every
/// move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: u64,
    /// Stake in minor currency units, already debited from the wallet.
    pub stake: u64,
    pub state_blob: Vec<u8>,
    pub move_count: u32,
    pub is_complete: bool,
    /// Debug forcing: a carrier tackle always opens the bonus round.
    pub force_bonus: bool,
    /// Debug forcing: every goal draw scores.
    pub force_goal: bool,
    pub outcome: Option<OutcomeKind>,
}

impl Session {
    pub fn new(id: u64, stake: u64) -> Self {
        Self {
            id,
            stake,
            state_blob: Vec::new(),
            move_count: 0,
            is_complete: false,
            force_bonus: false,
            force_goal: false,
            outcome: None,
        }
    }
}

impl Write for Session {
    fn write(&self, writer: &mut impl BufMut) {
        self.id.write(writer);
        self.stake.write(writer);
        self.state_blob.write(writer);
        self.move_count.write(writer);
        self.is_complete.write(writer);
        self.force_bonus.write(writer);
        self.force_goal.write(writer);
        self.outcome.write(writer);
    }
}

impl Read for Session {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            id: u64::read(reader)?,
            stake: u64::read(reader)?,
            state_blob: Vec::<u8>::read_range(reader, 0..=MAX_STATE_BLOB)?,
            move_count: u32::read(reader)?,
            is_complete: bool::read(reader)?,
            force_bonus: bool::read(reader)?,
            force_goal: bool::read(reader)?,
            outcome: Option::<OutcomeKind>::read(reader)?,
        })
    }
}

impl EncodeSize for Session {
    fn encode_size(&self) -> usize {
        self.id.encode_size()
            + self.stake.encode_size()
            + self.state_blob.encode_size()
            + self.move_count.encode_size()
            + self.is_complete.encode_size()
            + self.force_bonus.encode_size()
            + self.force_goal.encode_size()
            + self.outcome.encode_size()
    }
}

/// Player wallet in minor currency units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wallet {
    pub balance: u64,
}

impl Wallet {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    /// Deduct `amount`, failing if the balance would go negative.
    pub fn debit(&mut self, amount: u64) -> bool {
        match self.balance.checked_sub(amount) {
            Some(remaining) => {
                self.balance = remaining;
                true
            }
            None => false,
        }
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }
}

impl Write for Wallet {
    fn write(&self, writer: &mut impl BufMut) {
        self.balance.write(writer);
    }
}

impl Read for Wallet {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            balance: u64::read(reader)?,
        })
    }
}

impl FixedSize for Wallet {
    const SIZE: usize = 8;
}
