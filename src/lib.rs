//! Hybrid key derivation for Nebula
//!
//! This crate provides a password and key-stretching function that layers
//! several primitives on top of each other: a Keccak sponge, SHA-512, a
//! memory-hard block filling schedule and Argon2id as the final stage.
//!
//! The focus is on **clarity, predictability, and auditability**. The
//! sponge and the filling schedule are implemented here from scratch; the
//! wide hash and the finalizer are consumed through small capability traits
//! so that audited implementations can be plugged in.
//!
//! # Module overview
//!
//! - `hash`
//!   The Keccak-f[1600] permutation and sponge (capacity 1024), and the
//!   `WideHash` capability with its SHA-512 default.
//!
//! - `secure`
//!   Pooled scratch buffers. Every buffer holding secret-derived bytes is
//!   acquired through a scoped guard that wipes it before it goes back to
//!   the pool, on every exit path.
//!
//! - `derivation`
//!   The hybrid KDF itself: parameters, domain-separation encodings, the
//!   memory-hard fill engine, reference index selection and the Argon2id
//!   finalizer adapter.
//!
//! # Example
//!
//! ```rust, ignore
//! use cryptal::derivation::{HybridKdf, HybridParams};
//!
//! let kdf = HybridKdf::new(HybridParams::default())?;
//! let key = kdf.compute_hash(b"password", b"a 16+ byte salt!")?;
//! assert_eq!(key.len(), 64);
//! ```
//!
//! # Design goals
//!
//! - No heap allocations in the permutation
//! - Minimal and explicit APIs
//! - Deterministic output for a fixed configuration, input and salt
//! - No secret material left behind in scratch memory
//!
//! The construction has not been independently reviewed. It is not a
//! replacement for a standard password hash where one suffices.

pub mod derivation;
pub mod hash;
pub mod secure;
