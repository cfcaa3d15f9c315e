use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, Write};

/// Entropy driving a session's random draws.
///
/// The engine hashes the seed together with the session id and move number,
/// so a recorded seed replays a session exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seed(pub [u8; 32]);

impl Seed {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Write for Seed {
    fn write(&self, writer: &mut impl BufMut) {
        writer.put_slice(&self.0);
    }
}

impl Read for Seed {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        if reader.remaining() < 32 {
            return Err(Error::EndOfBuffer);
        }
        let mut bytes = [0u8; 32];
        reader.copy_to_slice(&mut bytes);
        Ok(Self(bytes))
    }
}

impl FixedSize for Seed {
    const SIZE: usize = 32;
}
