//! Errors surfaced by [`HybridKdf`](super::core::HybridKdf).

use thiserror::Error;

use super::boundary::FinalizerError;
use super::params::ConfigError;
use crate::secure::ResourceError;

/// Minimum accepted salt length in bytes.
pub const MIN_SALT_LEN: usize = 16;

/// A call argument was rejected before any work was done.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("salt is {len} bytes, at least {min} required")]
    SaltTooShort { len: usize, min: usize },
}

/// Any failure of the hybrid KDF.
///
/// No variant is ever raised after secret-bearing scratch memory has been
/// left unwiped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HybridError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid argument: {0}")]
    Argument(#[from] ArgumentError),
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),
    #[error("finalizer error: {0}")]
    Finalizer(#[from] FinalizerError),
    /// The instance was closed with [`HybridKdf::close`](super::core::HybridKdf::close).
    #[error("kdf instance has been closed")]
    Closed,
}
