use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use subtle::ConstantTimeEq;
use tracing::debug;

use super::boundary::{Argon2Finalizer, Finalizer, finalize};
use super::error::{ArgumentError, HybridError, MIN_SALT_LEN};
use super::memory::{FillEngine, WorkingMemory};
use super::params::{FinalizerCost, HybridParams};
use crate::hash::{Sha512Hash, WideHash};
use crate::secure::{BufferPool, SharedPool};

/// A configured hybrid KDF.
///
/// Construction validates the parameters once; afterwards every call to
/// [`compute_hash`](Self::compute_hash) is a deterministic function of its
/// input and salt. An instance may be shared between threads: calls are
/// independent and only the buffer pool is shared.
///
/// # Example
///
/// ```rust, ignore
/// use cryptal::derivation::{HybridKdf, HybridParams};
///
/// let kdf = HybridKdf::new(HybridParams::default().with_output_bits(256))?;
/// let key = kdf.compute_hash(b"correct horse", b"sixteen byte salt")?;
/// assert_eq!(key.len(), 32);
/// ```
pub struct HybridKdf {
    params: HybridParams,
    pool: Arc<dyn BufferPool>,
    hash: Arc<dyn WideHash>,
    finalizer: Arc<dyn Finalizer>,
    closed: AtomicBool,
}

impl HybridKdf {
    /// Builds a KDF with the default pool, SHA-512 and Argon2id.
    pub fn new(params: HybridParams) -> Result<Self, HybridError> {
        params.validate()?;

        Ok(Self {
            params,
            pool: Arc::new(SharedPool::default()),
            hash: Arc::new(Sha512Hash),
            finalizer: Arc::new(Argon2Finalizer),
            closed: AtomicBool::new(false),
        })
    }

    /// Replaces the buffer pool.
    pub fn with_pool<P: BufferPool + 'static>(mut self, pool: Arc<P>) -> Self {
        self.pool = pool;
        self
    }

    /// Replaces the wide hash.
    pub fn with_wide_hash<H: WideHash + 'static>(mut self, hash: Arc<H>) -> Self {
        self.hash = hash;
        self
    }

    /// Replaces the finalizer.
    pub fn with_finalizer<F: Finalizer + 'static>(mut self, finalizer: Arc<F>) -> Self {
        self.finalizer = finalizer;
        self
    }

    pub fn params(&self) -> &HybridParams {
        &self.params
    }

    /// Cost parameters the finalizer will receive, after auto-sizing.
    pub fn finalizer_cost(&self) -> FinalizerCost {
        self.params.finalizer_cost()
    }

    /// Derives `output_bits / 8` bytes from `input` and `salt`.
    ///
    /// # Errors
    ///
    /// - [`HybridError::Closed`] after [`close`](Self::close).
    /// - [`HybridError::Argument`] when `salt` is shorter than 16 bytes.
    /// - [`HybridError::Resource`] when `input` or `salt` is longer than
    ///   `u32::MAX` bytes (checked before any buffer is acquired), or when
    ///   working memory cannot be sized or allocated.
    /// - [`HybridError::Finalizer`] when the finalizer rejects its
    ///   parameters.
    ///
    /// Every scratch buffer acquired by the call has been wiped by the time
    /// it returns, on success and on error.
    pub fn compute_hash(&self, input: &[u8], salt: &[u8]) -> Result<Vec<u8>, HybridError> {
        self.ensure_open()?;

        if salt.len() < MIN_SALT_LEN {
            return Err(ArgumentError::SaltTooShort {
                len: salt.len(),
                min: MIN_SALT_LEN,
            }
            .into());
        }

        debug!(
            output_bits = self.params.output_bits,
            memory_blocks = self.params.memory_blocks,
            time_cost = self.params.time_cost,
            "starting hybrid derivation"
        );

        let pool = self.pool.as_ref();

        let engine = FillEngine::new(pool, self.hash.as_ref(), input, salt)?;
        let mut memory = WorkingMemory::allocate(pool, self.params.memory_blocks)?;
        engine.fill(&mut memory, &self.params)?;

        let output = finalize(
            pool,
            self.finalizer.as_ref(),
            memory.last_block(),
            salt,
            &self.params,
        )?;

        debug!(len = output.len(), "hybrid derivation complete");
        Ok(output)
    }

    /// Recomputes the hash and compares it with `expected` in constant time.
    pub fn verify(&self, input: &[u8], salt: &[u8], expected: &[u8]) -> Result<bool, HybridError> {
        let mut actual = self.compute_hash(input, salt)?;
        let equal = bool::from(actual.as_slice().ct_eq(expected));
        zeroize::Zeroize::zeroize(&mut actual);
        Ok(equal)
    }

    /// Closes the instance and drains the pool.
    ///
    /// Every later call fails with [`HybridError::Closed`]. Closing twice is
    /// harmless. Calls already past the open check run to completion; their
    /// buffers are still wiped on release, and a drained [`SharedPool`]
    /// drops them instead of keeping them for reuse.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!("closing hybrid kdf");
            self.pool.drain();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<(), HybridError> {
        if self.is_closed() {
            return Err(HybridError::Closed);
        }
        Ok(())
    }
}

impl core::fmt::Debug for HybridKdf {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HybridKdf")
            .field("params", &self.params)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
