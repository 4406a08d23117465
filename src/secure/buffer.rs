//! Scoped, self-wiping buffers.

use std::ops::{Deref, DerefMut};

use zeroize::Zeroize;

use super::pool::{BufferKind, BufferPool, ResourceError};

/// A pooled buffer that is zeroed and returned to its pool on drop.
///
/// The guard exposes exactly the requested length even when the pool hands
/// back a larger allocation; the whole allocation is wiped on release.
pub struct SecureBuffer<'p> {
    pool: &'p dyn BufferPool,
    kind: BufferKind,
    buf: Vec<u8>,
    len: usize,
}

impl<'p> SecureBuffer<'p> {
    /// Acquires a `len`-byte buffer of the given kind from `pool`.
    pub fn acquire(
        pool: &'p dyn BufferPool,
        kind: BufferKind,
        len: usize,
    ) -> Result<Self, ResourceError> {
        let mut buf = pool.acquire(kind, len)?;

        if buf.len() < len {
            buf.as_mut_slice().zeroize();
            pool.release(kind, buf);
            return Err(ResourceError::Allocation { bytes: len });
        }

        Ok(Self {
            pool,
            kind,
            buf,
            len,
        })
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }
}

impl Deref for SecureBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl DerefMut for SecureBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }
}

impl Drop for SecureBuffer<'_> {
    fn drop(&mut self) {
        let mut buf = std::mem::take(&mut self.buf);
        buf.as_mut_slice().zeroize();
        self.pool.release(self.kind, buf);
    }
}

impl core::fmt::Debug for SecureBuffer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecureBuffer")
            .field("kind", &self.kind)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
