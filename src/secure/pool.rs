//! Buffer pools.
//!
//! [`SharedPool`] is the default pool: a bounded free list behind a mutex,
//! shared by every derivation running on the same [`HybridKdf`]. Callers can
//! substitute their own [`BufferPool`], for instance to observe buffers as
//! they are released.
//!
//! [`HybridKdf`]: crate::derivation::HybridKdf

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::trace;

/// What a pooled buffer is used for.
///
/// Every kind holds secret-derived bytes while in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// The working memory array of the fill engine.
    Memory,
    /// Two concatenated blocks fed to the sponge.
    Combine,
    /// A 64-byte sponge digest.
    Digest,
    /// A domain-separation encoding.
    Encoding,
    /// Key material handed to the finalizer.
    Secret,
    /// The finalizer's raw output before it is copied out.
    Output,
}

/// Errors raised while sizing or allocating scratch memory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// Block count times block size does not fit in `usize`.
    #[error("working memory size overflows: {blocks} blocks of {block_len} bytes")]
    SizeOverflow { blocks: usize, block_len: usize },
    /// The allocator refused the request.
    #[error("failed to allocate {bytes} bytes of scratch memory")]
    Allocation { bytes: usize },
    /// A field is too long to be length-prefixed with 32 bits.
    #[error("field of {len} bytes exceeds the 32-bit length prefix")]
    FieldTooLong { len: usize },
}

/// A source of reusable scratch buffers.
///
/// # Contract
/// - `acquire` returns a buffer whose `len()` is at least `len`.
/// - `release` only ever receives buffers that were wiped to zero over
///   their full length.
/// - Implementations must be safe to call from several threads at once.
pub trait BufferPool: Send + Sync {
    fn acquire(&self, kind: BufferKind, len: usize) -> Result<Vec<u8>, ResourceError>;

    fn release(&self, kind: BufferKind, buf: Vec<u8>);

    /// Drops any buffers held for reuse and stops retaining buffers
    /// released afterwards. Pools that retain nothing can ignore this.
    fn drain(&self) {}
}

/// Allocates `len` zero bytes, reporting allocator failure instead of
/// aborting.
pub fn allocate_zeroed(len: usize) -> Result<Vec<u8>, ResourceError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| ResourceError::Allocation { bytes: len })?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Default retention limits for [`SharedPool`].
const DEFAULT_MAX_BUFFERS: usize = 32;
const DEFAULT_MAX_BYTES: usize = 64 * 1024 * 1024;

/// Thread-safe pool keeping a bounded number of zeroed buffers for reuse.
///
/// Once drained, the pool only hands out fresh allocations and drops every
/// buffer it is given back.
#[derive(Debug)]
pub struct SharedPool {
    free: Mutex<Vec<Vec<u8>>>,
    drained: AtomicBool,
    max_buffers: usize,
    max_bytes: usize,
}

impl SharedPool {
    /// Creates a pool retaining at most `max_buffers` buffers and
    /// `max_bytes` bytes in total.
    pub fn new(max_buffers: usize, max_bytes: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            drained: AtomicBool::new(false),
            max_buffers,
            max_bytes,
        }
    }

    /// Number of buffers currently held for reuse.
    pub fn retained(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        // Buffers in the list are always zeroed, so a poisoned lock is safe
        // to keep using.
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SharedPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BUFFERS, DEFAULT_MAX_BYTES)
    }
}

impl BufferPool for SharedPool {
    fn acquire(&self, kind: BufferKind, len: usize) -> Result<Vec<u8>, ResourceError> {
        {
            let mut free = self.lock();
            let best = free
                .iter()
                .enumerate()
                .filter(|(_, buf)| buf.len() >= len)
                .min_by_key(|(_, buf)| buf.len())
                .map(|(i, _)| i);

            if let Some(i) = best {
                trace!(?kind, len, "reusing pooled buffer");
                return Ok(free.swap_remove(i));
            }
        }

        allocate_zeroed(len)
    }

    fn release(&self, kind: BufferKind, buf: Vec<u8>) {
        let mut free = self.lock();

        // Checked under the lock, so nothing is pushed after `drain` cleared
        // the list.
        if self.drained.load(Ordering::Acquire) {
            trace!(?kind, len = buf.len(), "pool drained, dropping buffer");
            return;
        }

        let held: usize = free.iter().map(Vec::len).sum();

        if free.len() >= self.max_buffers || held.saturating_add(buf.len()) > self.max_bytes {
            trace!(?kind, len = buf.len(), "pool full, dropping buffer");
            return;
        }

        free.push(buf);
    }

    fn drain(&self) {
        let mut free = self.lock();
        self.drained.store(true, Ordering::Release);
        trace!(buffers = free.len(), "draining buffer pool");
        free.clear();
        free.shrink_to_fit();
    }
}
