//! Deterministic fixtures for tests and simulation.

use breakaway_types::Seed;
use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;

/// Creates a deterministic table seed from a tag.
pub fn create_seed(tag: u64) -> Seed {
    let mut hasher = Sha256::new();
    hasher.update(b"breakaway-test-seed");
    hasher.update(&tag.to_be_bytes());
    Seed::new(hasher.finalize().0)
}
