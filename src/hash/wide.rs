//! Wide-block hash capability
//!
//! The derivation pipeline needs a 512-bit hash but does not implement one.
//! It consumes any type implementing [`WideHash`]; the default backend is
//! SHA-512 from the `sha2` crate.

use sha2::{Digest, Sha512};
use zeroize::Zeroize;

/// Output size of a [`WideHash`] in bytes.
pub const WIDE_HASH_LEN: usize = 64;

/// A hash producing exactly 64 bytes from arbitrary input.
///
/// Implementations must be deterministic and free of side effects.
pub trait WideHash: Send + Sync {
    fn hash512(&self, input: &[u8]) -> [u8; WIDE_HASH_LEN];
}

/// SHA-512 (FIPS 180-4) backed by the `sha2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512Hash;

impl WideHash for Sha512Hash {
    fn hash512(&self, input: &[u8]) -> [u8; WIDE_HASH_LEN] {
        let mut digest = Sha512::digest(input);
        let mut out = [0u8; WIDE_HASH_LEN];
        out.copy_from_slice(&digest);
        digest.as_mut_slice().zeroize();
        out
    }
}
