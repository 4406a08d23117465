//! Key derivation functions.

pub mod hybrid;

pub use hybrid::{
    Argon2Finalizer, ArgumentError, ConfigError, Finalizer, FinalizerCost, FinalizerError,
    HybridError, HybridKdf, HybridParams, MIN_SALT_LEN,
};
