//! Keccak-f[1600] sponge
//!
//! A from-scratch implementation of the Keccak permutation together with a
//! sponge wrapper fixed at a 1024-bit capacity (576-bit rate). The sponge
//! uses the SHA-3 domain byte (`0x06`) with multi-rate padding, so a
//! 64-byte squeeze over a single rate block matches SHA3-512 bit for bit.
//!
//! The state is a flat array of 25 lanes addressed as `x + 5 * y`. All
//! tables are constants; nothing here allocates.

pub mod computations;
pub mod core;

/// Number of 64-bit lanes in the Keccak-f[1600] state.
pub const LANES: usize = 25;

/// Number of rounds of Keccak-f[1600].
pub const ROUNDS: usize = 24;

/// Capacity of the sponge in bits.
pub const CAPACITY_BITS: usize = 1024;

/// Rate of the sponge in bytes: (1600 - 1024) / 8.
pub const RATE: usize = (1600 - CAPACITY_BITS) / 8;

/// Domain separation byte appended after the message.
pub const DOMAIN_PAD: u8 = 0x06;

/// Round constants for the ι step.
pub const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rotation offsets for the ρ step, indexed by `x + 5 * y`.
pub const ROTATION_OFFSETS: [u32; LANES] = [
    0, 1, 62, 28, 27, //
    36, 44, 6, 55, 20, //
    3, 10, 43, 25, 39, //
    41, 45, 15, 21, 8, //
    18, 2, 61, 56, 14,
];

/// Re-export of the sponge entry points.
pub use self::core::{sponge_hash, sponge_hash_into};
