//! Hybrid sponge / memory-hard key derivation.
//!
//! The pipeline chains four stages into one password-stretching function:
//!
//! 1. **Prehash**: a Keccak sponge (capacity 1024) over a length-prefixed
//!    encoding of the input, salt and public parameters seeds block 0;
//!    SHA-512 of the salt seeds block 1.
//! 2. **Seeding**: every further block is derived from its two
//!    predecessors.
//! 3. **Mixing**: `time_cost` passes rewrite every block from its
//!    predecessor and a reference block. Pass 0 picks references
//!    independently of memory contents; later passes pick them from the
//!    previous block.
//! 4. **Finalization**: the last block, squeezed to the output width, is
//!    the secret input of Argon2id together with the original salt.
//!
//! Every block write hashes `sponge(a || b)` wrapped in a tweak that binds
//! it to the salt, its index and the pass, so no block value is reusable
//! outside its slot.
//!
//! # Memory hygiene
//!
//! All scratch memory comes from a [`BufferPool`](crate::secure::BufferPool)
//! through [`SecureBuffer`](crate::secure::SecureBuffer) guards and is
//! wiped before it is released, including on error paths.
//!
//! # Caveats
//!
//! - Passes after the first use data-dependent addressing and are not
//!   constant-time with respect to memory access.
//! - Data-dependent reference indices read only the first 8 bytes of the
//!   previous block.
//! - The construction has no published test vectors or security analysis;
//!   the pinned vectors in the test suite are regression anchors only.

pub(crate) mod boundary;
pub mod core;
pub(crate) mod encoding;
pub(crate) mod error;
pub(crate) mod memory;
pub(crate) mod params;
pub(crate) mod reference;

pub use boundary::{Argon2Finalizer, Finalizer, FinalizerError};
pub use self::core::HybridKdf;
pub use error::{ArgumentError, HybridError, MIN_SALT_LEN};
pub use memory::BLOCK_LEN;
pub use params::{ConfigError, FINALIZER_MAX_KIB, FINALIZER_MIN_KIB, FinalizerCost, HybridParams};
pub use reference::{dependent_index, independent_index};
