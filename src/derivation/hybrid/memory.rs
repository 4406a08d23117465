//! Working memory and the memory-hard fill.
//!
//! Memory is a single contiguous buffer of `N` blocks of 64 bytes, owned by
//! one derivation. It is filled in two phases:
//!
//! 1. **Seeding**: block 0 from the prehash encoding, block 1 from the salt,
//!    then every following block from its two predecessors.
//! 2. **Mixing**: `time_cost` passes, each rewriting every block in order
//!    from its predecessor (wrapping to block `N - 1` for block 0) and a
//!    reference block chosen by [`super::reference`].
//!
//! Each new block is `hash512(tweak(sponge(a || b), salt, index, pass))`.
//! Both phases are strictly sequential: each block depends on the one
//! written just before it.

use tracing::trace;
use zeroize::Zeroize;

use super::encoding::{encode_prehash, encode_tweak, prehash_len, tweak_len};
use super::params::HybridParams;
use super::reference::{dependent_index, independent_index};
use crate::hash::{WideHash, sponge_hash_into};
use crate::secure::{BufferKind, BufferPool, ResourceError, SecureBuffer};

/// Size of one working-memory block in bytes.
pub const BLOCK_LEN: usize = 64;

/// Total working-memory size for `blocks` blocks, rejecting overflow.
pub fn memory_bytes(blocks: usize) -> Result<usize, ResourceError> {
    blocks
        .checked_mul(BLOCK_LEN)
        .ok_or(ResourceError::SizeOverflow {
            blocks,
            block_len: BLOCK_LEN,
        })
}

/// The block array of one derivation.
pub(crate) struct WorkingMemory<'p> {
    buf: SecureBuffer<'p>,
    blocks: usize,
}

impl<'p> WorkingMemory<'p> {
    pub(crate) fn allocate(pool: &'p dyn BufferPool, blocks: u32) -> Result<Self, ResourceError> {
        let blocks = blocks as usize;
        let bytes = memory_bytes(blocks)?;
        let buf = SecureBuffer::acquire(pool, BufferKind::Memory, bytes)?;

        Ok(Self { buf, blocks })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.blocks
    }

    #[inline]
    pub(crate) fn block(&self, index: usize) -> &[u8; BLOCK_LEN] {
        let (blocks, _) = self.buf.as_chunks::<BLOCK_LEN>();
        &blocks[index]
    }

    #[inline]
    fn block_mut(&mut self, index: usize) -> &mut [u8; BLOCK_LEN] {
        let (blocks, _) = self.buf.as_chunks_mut::<BLOCK_LEN>();
        &mut blocks[index]
    }

    pub(crate) fn last_block(&self) -> &[u8; BLOCK_LEN] {
        self.block(self.blocks - 1)
    }
}

/// Scratch buffers reused for every block of one fill.
struct Scratch<'p> {
    combine: SecureBuffer<'p>,
    digest: SecureBuffer<'p>,
    tweak: SecureBuffer<'p>,
}

/// Drives seeding and mixing over a [`WorkingMemory`].
pub(crate) struct FillEngine<'a> {
    pool: &'a dyn BufferPool,
    hash: &'a dyn WideHash,
    input: &'a [u8],
    salt: &'a [u8],
    prehash_len: usize,
    tweak_len: usize,
}

impl<'a> FillEngine<'a> {
    /// Sizes every encoding of the fill up front, so an oversized `input` or
    /// `salt` is rejected before the pool is asked for anything.
    pub(crate) fn new(
        pool: &'a dyn BufferPool,
        hash: &'a dyn WideHash,
        input: &'a [u8],
        salt: &'a [u8],
    ) -> Result<Self, ResourceError> {
        Ok(Self {
            pool,
            hash,
            input,
            salt,
            prehash_len: prehash_len(input.len(), salt.len())?,
            tweak_len: tweak_len(BLOCK_LEN, salt.len())?,
        })
    }

    /// Seeds and mixes `memory` according to `params`.
    pub(crate) fn fill(
        &self,
        memory: &mut WorkingMemory<'_>,
        params: &HybridParams,
    ) -> Result<(), ResourceError> {
        let mut scratch = Scratch {
            combine: SecureBuffer::acquire(self.pool, BufferKind::Combine, 2 * BLOCK_LEN)?,
            digest: SecureBuffer::acquire(self.pool, BufferKind::Digest, BLOCK_LEN)?,
            tweak: SecureBuffer::acquire(self.pool, BufferKind::Encoding, self.tweak_len)?,
        };

        self.seed(memory, &mut scratch, params)?;

        for pass in 0..params.time_cost {
            trace!(pass, "mixing pass");
            self.mix_pass(memory, &mut scratch, pass)?;
        }

        Ok(())
    }

    fn seed(
        &self,
        memory: &mut WorkingMemory<'_>,
        scratch: &mut Scratch<'_>,
        params: &HybridParams,
    ) -> Result<(), ResourceError> {
        {
            let mut prehash =
                SecureBuffer::acquire(self.pool, BufferKind::Encoding, self.prehash_len)?;
            encode_prehash(&mut prehash, self.input, self.salt, params)?;
            sponge_hash_into(&prehash, memory.block_mut(0));
        }

        let mut salt_digest = self.hash.hash512(self.salt);
        memory.block_mut(1).copy_from_slice(&salt_digest);
        salt_digest.zeroize();

        for i in 2..memory.len() {
            self.mix_block(memory, scratch, i, i - 1, i - 2, 0)?;
        }

        Ok(())
    }

    fn mix_pass(
        &self,
        memory: &mut WorkingMemory<'_>,
        scratch: &mut Scratch<'_>,
        pass: u32,
    ) -> Result<(), ResourceError> {
        let n = memory.len();

        for i in 0..n {
            let prev = if i == 0 { n - 1 } else { i - 1 };
            let index = i as u32;

            let reference = if pass == 0 {
                independent_index(self.pool, self.hash, index, pass, self.salt)?
            } else {
                dependent_index(memory.block(prev), index)
            };

            self.mix_block(memory, scratch, i, prev, reference as usize, pass + 1)?;
        }

        Ok(())
    }

    /// Overwrites block `dst` with the mix of blocks `a` and `b`.
    fn mix_block(
        &self,
        memory: &mut WorkingMemory<'_>,
        scratch: &mut Scratch<'_>,
        dst: usize,
        a: usize,
        b: usize,
        pass: u32,
    ) -> Result<(), ResourceError> {
        scratch.combine[..BLOCK_LEN].copy_from_slice(memory.block(a));
        scratch.combine[BLOCK_LEN..].copy_from_slice(memory.block(b));

        sponge_hash_into(&scratch.combine, &mut scratch.digest);
        encode_tweak(&mut scratch.tweak, &scratch.digest, self.salt, dst as u32, pass)?;

        let mut out = self.hash.hash512(&scratch.tweak);
        memory.block_mut(dst).copy_from_slice(&out);
        out.zeroize();

        Ok(())
    }
}
