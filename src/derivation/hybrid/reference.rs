//! Reference block selection.
//!
//! While mixing block `i`, the engine pairs the previous block with a
//! reference block `j` drawn from the blocks before `i`:
//!
//! - pass 0 derives `j` from the wide hash of the block position and salt,
//!   so the access pattern does not depend on any secret-derived data;
//! - later passes take `j` from the first 8 bytes of the previous block,
//!   making the access pattern depend on memory contents.
//!
//! In both modes `j < i` for `i > 0`, and `j == 0` for `i == 0`.

use super::encoding::{address_len, encode_address};
use super::memory::BLOCK_LEN;
use crate::hash::WideHash;
use crate::secure::{BufferKind, BufferPool, ResourceError, SecureBuffer};

/// Exclusive upper bound of the reference index for block `index`.
///
/// Block 0 has no predecessor in the current pass, so its bound is 0.
#[inline]
pub fn reference_bound(index: u32) -> u64 {
    index as u64
}

/// Reduces a 64-bit word into `0..bound`, mapping an empty range to 0.
#[inline]
fn reduce(word: u64, bound: u64) -> u32 {
    if bound == 0 {
        return 0;
    }

    (word % bound) as u32
}

/// Reads the first 8 bytes of a block or digest as a little-endian integer.
#[inline]
fn leading_word(bytes: &[u8; BLOCK_LEN]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(word)
}

/// Data-independent reference index used during pass 0.
///
/// `j = u64_le(hash512(index || pass || |salt| || salt)[..8]) mod index`
pub fn independent_index(
    pool: &dyn BufferPool,
    hash: &dyn WideHash,
    index: u32,
    pass: u32,
    salt: &[u8],
) -> Result<u32, ResourceError> {
    let bound = reference_bound(index);
    if bound == 0 {
        return Ok(0);
    }

    let len = address_len(salt.len())?;
    let mut encoding = SecureBuffer::acquire(pool, BufferKind::Encoding, len)?;
    encode_address(&mut encoding, index, pass, salt)?;

    let digest = hash.hash512(&encoding);
    Ok(reduce(leading_word(&digest), bound))
}

/// Data-dependent reference index used from pass 1 onward.
///
/// Only the first 8 bytes of the previous block are consulted.
pub fn dependent_index(prev: &[u8; BLOCK_LEN], index: u32) -> u32 {
    reduce(leading_word(prev), reference_bound(index))
}
