//! Hash algorithms used by the crate.
//!
//! - `keccak`: a pure-Rust Keccak-f[1600] sponge (capacity 1024).
//! - `wide`: the 512-bit hash capability consumed by the derivation
//!   pipeline, with a SHA-512 default.

pub mod keccak;
pub mod wide;

/// Re-export of the sponge convenience functions.
pub use keccak::{sponge_hash, sponge_hash_into};
pub use wide::{Sha512Hash, WIDE_HASH_LEN, WideHash};
