//! Secure scratch memory
//!
//! Every sizable buffer the derivation touches is drawn from a
//! [`BufferPool`] through a [`SecureBuffer`] guard. The guard zeroes the
//! whole backing allocation when it goes out of scope, whether the scope is
//! left normally, through `?`, or by unwinding, and only then hands the
//! memory back to its pool.
//!
//! Pools never see live secret bytes: anything passed to
//! [`BufferPool::release`] has already been wiped.

pub mod buffer;
pub mod pool;

pub use buffer::SecureBuffer;
pub use pool::{BufferKind, BufferPool, ResourceError, SharedPool};
