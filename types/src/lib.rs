//! Shared types for the breakaway session engine.
//!
//! Everything here is codec-encodable so sessions can be snapshotted and
//! replayed byte-for-byte. Monetary values are integer minor currency units
//! (pence); multipliers are basis points (1.0x == 10_000).

pub mod session;

mod seed;

pub use seed::Seed;
