use breakaway_types::session::BPS_SCALE;
use breakaway_types::Seed;
use commonware_codec::Encode;
use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;

/// Deterministic random number generator for session draws.
///
/// Uses SHA256 hash chains keyed by the table seed, session id and move
/// number. Replaying a session against the same seed reproduces every
/// draw exactly.
#[derive(Clone)]
pub struct GameRng {
    state: [u8; 32],
    index: usize,
}

impl GameRng {
    /// Create a new RNG from a seed, session ID, and move number.
    pub fn new(seed: &Seed, session_id: u64, move_number: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed.encode().as_ref());
        hasher.update(&session_id.to_be_bytes());
        hasher.update(&move_number.to_be_bytes());
        Self {
            state: hasher.finalize().0,
            index: 0,
        }
    }

    /// Get the next random byte.
    fn next_byte(&mut self) -> u8 {
        if self.index >= 32 {
            // Rehash to get more bytes
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }

    /// Get a random u8 value.
    pub fn next_u8(&mut self) -> u8 {
        self.next_byte()
    }

    /// Get a random u16 value.
    pub fn next_u16(&mut self) -> u16 {
        let a = self.next_byte() as u16;
        let b = self.next_byte() as u16;
        (a << 8) | b
    }

    /// Get a random value in range [0, max).
    pub fn next_bounded(&mut self, max: u8) -> u8 {
        if max == 0 {
            return 0;
        }
        // Simple rejection sampling for unbiased distribution
        let limit = u8::MAX - (u8::MAX % max);
        loop {
            let value = self.next_u8();
            if value < limit {
                return value % max;
            }
        }
    }

    /// Get a random value in range [0, max).
    pub fn next_bounded_u16(&mut self, max: u16) -> u16 {
        if max == 0 {
            return 0;
        }
        let limit = u16::MAX - (u16::MAX % max);
        loop {
            let value = self.next_u16();
            if value < limit {
                return value % max;
            }
        }
    }

    /// Resolve a probability expressed in basis points. Returns true with
    /// probability `chance_bps / 10000`, clamping chances at certainty.
    pub fn chance_bps(&mut self, chance_bps: u64) -> bool {
        if chance_bps >= BPS_SCALE {
            return true;
        }
        (self.next_bounded_u16(BPS_SCALE as u16) as u64) < chance_bps
    }

    /// Get a random value in range [min, max], both in basis points.
    pub fn range_bps(&mut self, min_bps: u64, max_bps: u64) -> u64 {
        if max_bps <= min_bps {
            return min_bps;
        }
        let span = (max_bps - min_bps + 1) as u16;
        min_bps + self.next_bounded_u16(span) as u64
    }

    /// Shuffle a slice in place using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_bounded((i + 1) as u8) as usize;
            slice.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::create_seed;

    #[test]
    fn test_rng_deterministic() {
        let seed = create_seed(1);

        let mut rng1 = GameRng::new(&seed, 1, 0);
        let mut rng2 = GameRng::new(&seed, 1, 0);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u8(), rng2.next_u8());
        }
    }

    #[test]
    fn test_rng_different_sessions() {
        let seed = create_seed(1);

        let mut rng1 = GameRng::new(&seed, 1, 0);
        let mut rng2 = GameRng::new(&seed, 2, 0);

        // Different sessions should produce different sequences
        let seq1: Vec<u8> = (0..10).map(|_| rng1.next_u8()).collect();
        let seq2: Vec<u8> = (0..10).map(|_| rng2.next_u8()).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_rng_different_moves() {
        let seed = create_seed(1);

        let mut rng1 = GameRng::new(&seed, 1, 0);
        let mut rng2 = GameRng::new(&seed, 1, 1);

        let seq1: Vec<u8> = (0..10).map(|_| rng1.next_u8()).collect();
        let seq2: Vec<u8> = (0..10).map(|_| rng2.next_u8()).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_rng_bounded() {
        let seed = create_seed(1);
        let mut rng = GameRng::new(&seed, 1, 0);

        for _ in 0..1000 {
            let value = rng.next_bounded(5);
            assert!(value < 5);
        }
        for _ in 0..1000 {
            let value = rng.next_bounded_u16(10_000);
            assert!(value < 10_000);
        }
    }

    #[test]
    fn test_rng_chance_extremes() {
        let seed = create_seed(1);
        let mut rng = GameRng::new(&seed, 1, 0);

        for _ in 0..100 {
            assert!(rng.chance_bps(10_000));
            assert!(!rng.chance_bps(0));
        }
    }

    #[test]
    fn test_rng_range_bps() {
        let seed = create_seed(1);
        let mut rng = GameRng::new(&seed, 1, 0);

        for _ in 0..1000 {
            let value = rng.range_bps(50_000, 100_000);
            assert!((50_000..=100_000).contains(&value));
        }
        assert_eq!(rng.range_bps(30_000, 30_000), 30_000);
    }

    #[test]
    fn test_rng_shuffle_preserves_elements() {
        let seed = create_seed(1);
        let mut rng = GameRng::new(&seed, 1, 0);

        let mut zones = [5u8, 10, 20, 50, 100];
        rng.shuffle(&mut zones);

        let mut sorted = zones;
        sorted.sort_unstable();
        assert_eq!(sorted, [5, 10, 20, 50, 100]);
    }
}
