//! Keccak sponge: absorb, pad, squeeze
//!
//! The sponge is fixed at capacity 1024 and rate 72 bytes. The state is
//! created zeroed for every call and wiped before the call returns, so no
//! two invocations ever share state.

use zeroize::Zeroize;

use super::computations::keccak_f1600;
use super::{DOMAIN_PAD, LANES, RATE};

/// XORs one rate-sized block into the little-endian bytes of the state,
/// then permutes.
#[inline(always)]
fn absorb_block(state: &mut [u64; LANES], block: &[u8]) {
    debug_assert_eq!(block.len(), RATE);

    let mut word = [0u8; 8];
    for (lane, chunk) in state.iter_mut().zip(block.chunks_exact(8)) {
        word.copy_from_slice(chunk);
        *lane ^= u64::from_le_bytes(word);
    }
    word.zeroize();

    keccak_f1600(state);
}

/// Writes the first `out.len()` (at most [`RATE`]) bytes of the state in
/// little-endian lane order.
#[inline(always)]
fn squeeze_block(state: &[u64; LANES], out: &mut [u8]) {
    for (chunk, lane) in out.chunks_mut(8).zip(state.iter()) {
        let mut bytes = lane.to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
        bytes.zeroize();
    }
}

/// Hashes `input` and fills `out` entirely with sponge output.
///
/// # Notes
/// - The padded final block is always absorbed, even when `input` is a
///   multiple of the rate (including empty input).
/// - The state is permuted between squeezed blocks only; the last block may
///   be partial and is not followed by a permutation.
/// - An empty `out` is valid and leaves nothing to squeeze.
pub fn sponge_hash_into(input: &[u8], out: &mut [u8]) {
    let mut state = [0u64; LANES];

    let mut chunks = input.chunks_exact(RATE);
    for chunk in chunks.by_ref() {
        absorb_block(&mut state, chunk);
    }

    let rem = chunks.remainder();
    let mut last = [0u8; RATE];
    last[..rem.len()].copy_from_slice(rem);
    last[rem.len()] = DOMAIN_PAD;
    last[RATE - 1] |= 0x80;
    absorb_block(&mut state, &last);
    last.zeroize();

    let mut blocks = out.chunks_mut(RATE).peekable();
    while let Some(block) = blocks.next() {
        squeeze_block(&state, block);
        if blocks.peek().is_some() {
            keccak_f1600(&mut state);
        }
    }

    state.zeroize();
}

/// Hashes `input` into a freshly allocated `output_len`-byte vector.
pub fn sponge_hash(input: &[u8], output_len: usize) -> Vec<u8> {
    let mut out = vec![0u8; output_len];
    sponge_hash_into(input, &mut out);
    out
}
