//! Parameter definitions and validation for the hybrid KDF.
//!
//! Parameters are checked once, when a [`HybridKdf`] is built; a derivation
//! never fails because of its configuration.
//!
//! [`HybridKdf`]: super::core::HybridKdf

use thiserror::Error;

use super::memory::BLOCK_LEN;

/// Lower bound of the derived finalizer memory, in KiB (8 MiB).
pub const FINALIZER_MIN_KIB: u32 = 8 * 1024;

/// Upper bound of the derived finalizer memory, in KiB (256 MiB).
pub const FINALIZER_MAX_KIB: u32 = 256 * 1024;

/// Configuration of the hybrid KDF.
///
/// # Defaults
///
/// - `output_bits`: 512
/// - `memory_blocks`: 8192 (512 KiB of working memory)
/// - `time_cost`: 3 mixing passes
/// - `finalizer_memory_kib`: derived from `memory_blocks`
/// - `finalizer_iterations`: 3
/// - `finalizer_parallelism`: 1
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HybridParams {
    /// Length of the derived output in bits (non-zero multiple of 8).
    pub output_bits: u32,
    /// Number of 64-byte blocks of working memory (minimum 4).
    pub memory_blocks: u32,
    /// Number of mixing passes over working memory (minimum 1).
    pub time_cost: u32,
    /// Finalizer memory in KiB. `None` derives it from `memory_blocks`.
    pub finalizer_memory_kib: Option<u32>,
    /// Finalizer passes (minimum 1).
    pub finalizer_iterations: u32,
    /// Finalizer lanes (minimum 1).
    pub finalizer_parallelism: u32,
}

/// Errors raised when a [`HybridParams`] is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Output length must be a multiple of 8 bits.
    #[error("output length of {0} bits is not a multiple of 8")]
    OutputNotByteAligned(u32),
    /// Output length must be non-zero.
    #[error("output length must be non-zero")]
    OutputEmpty,
    /// Working memory must hold at least 4 blocks.
    #[error("memory block count {0} is below the minimum of 4")]
    TooFewBlocks(u32),
    /// At least one mixing pass is required.
    #[error("time cost must be at least 1")]
    TooFewPasses,
    /// The finalizer needs at least one iteration.
    #[error("finalizer iterations must be at least 1")]
    TooFewIterations,
    /// The finalizer needs at least one lane.
    #[error("finalizer parallelism must be at least 1")]
    TooFewLanes,
}

/// Cost parameters forwarded to the finalizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalizerCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HybridParams {
    pub fn with_output_bits(mut self, bits: u32) -> Self {
        self.output_bits = bits;
        self
    }

    pub fn with_memory_blocks(mut self, blocks: u32) -> Self {
        self.memory_blocks = blocks;
        self
    }

    pub fn with_time_cost(mut self, passes: u32) -> Self {
        self.time_cost = passes;
        self
    }

    pub fn with_finalizer_memory_kib(mut self, kib: u32) -> Self {
        self.finalizer_memory_kib = Some(kib);
        self
    }

    pub fn with_finalizer_iterations(mut self, iterations: u32) -> Self {
        self.finalizer_iterations = iterations;
        self
    }

    pub fn with_finalizer_parallelism(mut self, lanes: u32) -> Self {
        self.finalizer_parallelism = lanes;
        self
    }

    /// Output length in bytes.
    pub fn output_len(&self) -> usize {
        (self.output_bits / 8) as usize
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.output_bits % 8 != 0 {
            return Err(ConfigError::OutputNotByteAligned(self.output_bits));
        }

        if self.output_bits == 0 {
            return Err(ConfigError::OutputEmpty);
        }

        if self.memory_blocks < 4 {
            return Err(ConfigError::TooFewBlocks(self.memory_blocks));
        }

        if self.time_cost < 1 {
            return Err(ConfigError::TooFewPasses);
        }

        if self.finalizer_iterations < 1 {
            return Err(ConfigError::TooFewIterations);
        }

        if self.finalizer_parallelism < 1 {
            return Err(ConfigError::TooFewLanes);
        }

        Ok(())
    }

    /// Finalizer memory in KiB.
    ///
    /// An explicit override is returned as-is. Otherwise the size of the
    /// working memory, rounded up to whole KiB, is clamped into
    /// [`FINALIZER_MIN_KIB`]..=[`FINALIZER_MAX_KIB`].
    pub fn finalizer_memory_kib(&self) -> u32 {
        if let Some(kib) = self.finalizer_memory_kib {
            return kib;
        }

        let bytes = self.memory_blocks as u64 * BLOCK_LEN as u64;
        let kib = bytes.div_ceil(1024);
        kib.clamp(FINALIZER_MIN_KIB as u64, FINALIZER_MAX_KIB as u64) as u32
    }

    pub fn finalizer_cost(&self) -> FinalizerCost {
        FinalizerCost {
            memory_kib: self.finalizer_memory_kib(),
            iterations: self.finalizer_iterations,
            parallelism: self.finalizer_parallelism,
        }
    }
}

impl Default for HybridParams {
    fn default() -> Self {
        Self {
            output_bits: 512,
            memory_blocks: 8192,
            time_cost: 3,
            finalizer_memory_kib: None,
            finalizer_iterations: 3,
            finalizer_parallelism: 1,
        }
    }
}
