use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};

use super::{read_string, string_encode_size, write_string, OutcomeKind, MAX_MESSAGE_LENGTH};

/// Events emitted by the table while a session runs. Hosts render these;
/// the engine never depends on them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    SessionStarted {
        session_id: u64,
        stake: u64,
        runner: u8,
    },
    CheckpointReached {
        session_id: u64,
        index: u8,
        multiplier_bps: u64,
    },
    PossessionChanged {
        session_id: u64,
        from: u8,
        to: u8,
    },
    RunnerTackled {
        session_id: u64,
        runner: u8,
    },
    SkillBonus {
        session_id: u64,
        amount: u64,
    },
    BonusRoundOpened {
        session_id: u64,
    },
    BonusRoundResolved {
        session_id: u64,
        won: u64,
    },
    SessionSettled {
        session_id: u64,
        outcome: OutcomeKind,
        payout: u64,
    },
    Error {
        session_id: Option<u64>,
        code: u8,
        message: String,
    },
}

impl Write for Event {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::SessionStarted {
                session_id,
                stake,
                runner,
            } => {
                0u8.write(writer);
                session_id.write(writer);
                stake.write(writer);
                runner.write(writer);
            }
            Self::CheckpointReached {
                session_id,
                index,
                multiplier_bps,
            } => {
                1u8.write(writer);
                session_id.write(writer);
                index.write(writer);
                multiplier_bps.write(writer);
            }
            Self::PossessionChanged {
                session_id,
                from,
                to,
            } => {
                2u8.write(writer);
                session_id.write(writer);
                from.write(writer);
                to.write(writer);
            }
            Self::RunnerTackled { session_id, runner } => {
                3u8.write(writer);
                session_id.write(writer);
                runner.write(writer);
            }
            Self::SkillBonus { session_id, amount } => {
                4u8.write(writer);
                session_id.write(writer);
                amount.write(writer);
            }
            Self::BonusRoundOpened { session_id } => {
                5u8.write(writer);
                session_id.write(writer);
            }
            Self::BonusRoundResolved { session_id, won } => {
                6u8.write(writer);
                session_id.write(writer);
                won.write(writer);
            }
            Self::SessionSettled {
                session_id,
                outcome,
                payout,
            } => {
                7u8.write(writer);
                session_id.write(writer);
                outcome.write(writer);
                payout.write(writer);
            }
            Self::Error {
                session_id,
                code,
                message,
            } => {
                8u8.write(writer);
                session_id.write(writer);
                code.write(writer);
                write_string(message, writer);
            }
        }
    }
}

impl Read for Event {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let event = match u8::read(reader)? {
            0 => Self::SessionStarted {
                session_id: u64::read(reader)?,
                stake: u64::read(reader)?,
                runner: u8::read(reader)?,
            },
            1 => Self::CheckpointReached {
                session_id: u64::read(reader)?,
                index: u8::read(reader)?,
                multiplier_bps: u64::read(reader)?,
            },
            2 => Self::PossessionChanged {
                session_id: u64::read(reader)?,
                from: u8::read(reader)?,
                to: u8::read(reader)?,
            },
            3 => Self::RunnerTackled {
                session_id: u64::read(reader)?,
                runner: u8::read(reader)?,
            },
            4 => Self::SkillBonus {
                session_id: u64::read(reader)?,
                amount: u64::read(reader)?,
            },
            5 => Self::BonusRoundOpened {
                session_id: u64::read(reader)?,
            },
            6 => Self::BonusRoundResolved {
                session_id: u64::read(reader)?,
                won: u64::read(reader)?,
            },
            7 => Self::SessionSettled {
                session_id: u64::read(reader)?,
                outcome: OutcomeKind::read(reader)?,
                payout: u64::read(reader)?,
            },
            8 => Self::Error {
                session_id: Option::<u64>::read(reader)?,
                code: u8::read(reader)?,
                message: read_string(reader, MAX_MESSAGE_LENGTH)?,
            },
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(event)
    }
}

impl EncodeSize for Event {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::SessionStarted {
                    session_id,
                    stake,
                    runner,
                } => session_id.encode_size() + stake.encode_size() + runner.encode_size(),
                Self::CheckpointReached {
                    session_id,
                    index,
                    multiplier_bps,
                } => session_id.encode_size() + index.encode_size() + multiplier_bps.encode_size(),
                Self::PossessionChanged {
                    session_id,
                    from,
                    to,
                } => session_id.encode_size() + from.encode_size() + to.encode_size(),
                Self::RunnerTackled { session_id, runner } => {
                    session_id.encode_size() + runner.encode_size()
                }
                Self::SkillBonus { session_id, amount } => {
                    session_id.encode_size() + amount.encode_size()
                }
                Self::BonusRoundOpened { session_id } => session_id.encode_size(),
                Self::BonusRoundResolved { session_id, won } => {
                    session_id.encode_size() + won.encode_size()
                }
                Self::SessionSettled {
                    session_id,
                    outcome,
                    payout,
                } => session_id.encode_size() + outcome.encode_size() + payout.encode_size(),
                Self::Error {
                    session_id,
                    code,
                    message,
                } => session_id.encode_size() + code.encode_size() + string_encode_size(message),
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonware_codec::{DecodeExt, Encode};

    #[test]
    fn test_event_roundtrip() {
        let events = vec![
            Event::SessionStarted {
                session_id: 7,
                stake: 50,
                runner: 2,
            },
            Event::CheckpointReached {
                session_id: 7,
                index: 1,
                multiplier_bps: 80_000,
            },
            Event::SessionSettled {
                session_id: 7,
                outcome: OutcomeKind::WinCashout,
                payout: 400,
            },
            Event::Error {
                session_id: None,
                code: 1,
                message: "invalid stake".into(),
            },
        ];
        for event in events {
            let encoded = event.encode();
            assert_eq!(encoded.len(), event.encode_size());
            let decoded = Event::decode(encoded).unwrap();
            assert_eq!(event, decoded);
        }
    }

    #[test]
    fn test_event_rejects_unknown_tag() {
        let bytes = bytes::Bytes::from_static(&[99u8]);
        assert!(Event::decode(bytes).is_err());
    }
}
