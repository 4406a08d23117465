//! Finalization for the hybrid KDF.
//!
//! Once memory is filled, the last block is squeezed through the sponge to
//! the configured output width and handed, with the salt and the finalizer
//! cost parameters, to an external memory-hard [`Finalizer`]. Its output is
//! the value returned to the caller.

use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;

use super::error::HybridError;
use super::params::{FinalizerCost, HybridParams};
use crate::hash::sponge_hash_into;
use crate::secure::{BufferKind, BufferPool, SecureBuffer};

/// Error reported by a [`Finalizer`], carrying its message unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FinalizerError(pub String);

/// The external memory-hard stage.
///
/// `out` is pre-sized to the requested output length and must be filled
/// completely on success.
pub trait Finalizer: Send + Sync {
    fn finalize(
        &self,
        secret: &[u8],
        salt: &[u8],
        cost: &FinalizerCost,
        out: &mut [u8],
    ) -> Result<(), FinalizerError>;
}

/// Argon2id v1.3 from the `argon2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Finalizer;

impl Finalizer for Argon2Finalizer {
    fn finalize(
        &self,
        secret: &[u8],
        salt: &[u8],
        cost: &FinalizerCost,
        out: &mut [u8],
    ) -> Result<(), FinalizerError> {
        let params = Params::new(
            cost.memory_kib,
            cost.iterations,
            cost.parallelism,
            Some(out.len()),
        )
        .map_err(|e| FinalizerError(e.to_string()))?;

        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into(secret, salt, out)
            .map_err(|e| FinalizerError(e.to_string()))
    }
}

/// Reduces the last block and runs the finalizer over it.
///
/// Both the reduced key material and the finalizer's raw output live in
/// pooled buffers, so they are wiped whether or not the finalizer succeeds.
pub(crate) fn finalize(
    pool: &dyn BufferPool,
    finalizer: &dyn Finalizer,
    last_block: &[u8],
    salt: &[u8],
    params: &HybridParams,
) -> Result<Vec<u8>, HybridError> {
    let out_len = params.output_len();

    let mut secret = SecureBuffer::acquire(pool, BufferKind::Secret, out_len)?;
    sponge_hash_into(last_block, &mut secret);

    let mut raw = SecureBuffer::acquire(pool, BufferKind::Output, out_len)?;
    finalizer.finalize(&secret, salt, &params.finalizer_cost(), &mut raw)?;

    Ok(raw.to_vec())
}
