//! Domain-separation encodings.
//!
//! Every hash call in the pipeline is fed an unambiguous byte string that
//! binds its payload to the public parameters and to its position in the
//! fill schedule. Variable-length fields carry a 32-bit little-endian length
//! prefix; integers are fixed-width 32-bit little-endian.
//!
//! ```text
//! prehash = |P| || P || |S| || S || output_bits || blocks || time || capacity
//! tweak   = |D| || D || |S| || S || index || pass
//! address = index || pass || |S| || S
//! ```
//!
//! The encoders write into caller-provided buffers (normally pooled
//! [`SecureBuffer`]s) sized with the matching `*_len` function.
//!
//! [`SecureBuffer`]: crate::secure::SecureBuffer

use super::params::HybridParams;
use crate::hash::keccak::CAPACITY_BITS;
use crate::secure::ResourceError;

const WORD: usize = 4;

/// Converts a field length to its 32-bit prefix.
fn prefix(len: usize) -> Result<u32, ResourceError> {
    u32::try_from(len).map_err(|_| ResourceError::FieldTooLong { len })
}

/// Sequential little-endian writer over a pre-sized buffer.
struct Writer<'a> {
    out: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    fn new(out: &'a mut [u8]) -> Self {
        Self { out, pos: 0 }
    }

    fn word(&mut self, value: u32) {
        self.bytes(&value.to_le_bytes());
    }

    fn field(&mut self, data: &[u8]) -> Result<(), ResourceError> {
        self.word(prefix(data.len())?);
        self.bytes(data);
        Ok(())
    }

    fn bytes(&mut self, data: &[u8]) {
        self.out[self.pos..self.pos + data.len()].copy_from_slice(data);
        self.pos += data.len();
    }

    fn finish(self) {
        debug_assert_eq!(self.pos, self.out.len(), "encoding buffer mis-sized");
    }
}

/// Length of the prehash encoding.
///
/// Fails before anything is allocated when `input_len` or `salt_len` does
/// not fit its 32-bit prefix.
pub fn prehash_len(input_len: usize, salt_len: usize) -> Result<usize, ResourceError> {
    prefix(input_len)?;
    prefix(salt_len)?;
    Ok((6 * WORD).saturating_add(input_len).saturating_add(salt_len))
}

/// Encodes the input, salt and every public parameter that shapes the
/// derivation.
pub fn encode_prehash(
    out: &mut [u8],
    input: &[u8],
    salt: &[u8],
    params: &HybridParams,
) -> Result<(), ResourceError> {
    let mut w = Writer::new(out);
    w.field(input)?;
    w.field(salt)?;
    w.word(params.output_bits);
    w.word(params.memory_blocks);
    w.word(params.time_cost);
    w.word(CAPACITY_BITS as u32);
    w.finish();
    Ok(())
}

/// Length of the tweak encoding.
pub fn tweak_len(digest_len: usize, salt_len: usize) -> Result<usize, ResourceError> {
    prefix(digest_len)?;
    prefix(salt_len)?;
    Ok((4 * WORD).saturating_add(digest_len).saturating_add(salt_len))
}

/// Binds a freshly mixed digest to the salt and to its slot in the
/// schedule.
pub fn encode_tweak(
    out: &mut [u8],
    digest: &[u8],
    salt: &[u8],
    index: u32,
    pass: u32,
) -> Result<(), ResourceError> {
    let mut w = Writer::new(out);
    w.field(digest)?;
    w.field(salt)?;
    w.word(index);
    w.word(pass);
    w.finish();
    Ok(())
}

/// Length of the address encoding.
pub fn address_len(salt_len: usize) -> Result<usize, ResourceError> {
    prefix(salt_len)?;
    Ok((3 * WORD).saturating_add(salt_len))
}

/// Input of the data-independent reference index.
pub fn encode_address(
    out: &mut [u8],
    index: u32,
    pass: u32,
    salt: &[u8],
) -> Result<(), ResourceError> {
    let mut w = Writer::new(out);
    w.word(index);
    w.word(pass);
    w.field(salt)?;
    w.finish();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tweak(digest: &[u8], salt: &[u8], index: u32, pass: u32) -> Vec<u8> {
        let mut out = vec![0u8; tweak_len(digest.len(), salt.len()).unwrap()];
        encode_tweak(&mut out, digest, salt, index, pass).unwrap();
        out
    }

    fn prehash(input: &[u8], salt: &[u8], params: &HybridParams) -> Vec<u8> {
        let mut out = vec![0u8; prehash_len(input.len(), salt.len()).unwrap()];
        encode_prehash(&mut out, input, salt, params).unwrap();
        out
    }

    #[test]
    fn prehash_layout() {
        let params = HybridParams::default()
            .with_output_bits(256)
            .with_memory_blocks(8)
            .with_time_cost(1);
        let out = prehash(b"pw", b"salt", &params);

        let mut expected = Vec::new();
        expected.extend_from_slice(&2u32.to_le_bytes());
        expected.extend_from_slice(b"pw");
        expected.extend_from_slice(&4u32.to_le_bytes());
        expected.extend_from_slice(b"salt");
        expected.extend_from_slice(&256u32.to_le_bytes());
        expected.extend_from_slice(&8u32.to_le_bytes());
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&1024u32.to_le_bytes());

        assert_eq!(out, expected);
    }

    #[test]
    fn prehash_separates_input_from_salt() {
        let params = HybridParams::default();
        assert_ne!(
            prehash(b"ab", b"c", &params),
            prehash(b"a", b"bc", &params)
        );
    }

    #[test]
    fn prehash_binds_parameters() {
        let a = HybridParams::default();
        let b = HybridParams::default().with_time_cost(4);
        assert_ne!(prehash(b"pw", b"salt", &a), prehash(b"pw", b"salt", &b));
    }

    #[test]
    fn tweak_binds_position() {
        let digest = [7u8; 64];
        let base = tweak(&digest, b"salt", 3, 1);
        assert_ne!(base, tweak(&digest, b"salt", 4, 1));
        assert_ne!(base, tweak(&digest, b"salt", 3, 2));
        assert_eq!(base.len(), 4 + 64 + 4 + 4 + 8);
        assert_eq!(&base[base.len() - 8..base.len() - 4], &3u32.to_le_bytes());
    }

    #[test]
    fn address_layout() {
        let mut out = vec![0u8; address_len(3).unwrap()];
        encode_address(&mut out, 5, 0, b"xyz").unwrap();
        assert_eq!(out, [5, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, b'x', b'y', b'z']);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn prefix_rejects_lengths_over_u32() {
        assert_eq!(prefix(u32::MAX as usize), Ok(u32::MAX));

        let len = u32::MAX as usize + 1;
        assert_eq!(prefix(len), Err(ResourceError::FieldTooLong { len }));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_fields_are_rejected_by_length() {
        let len = u32::MAX as usize + 1;
        let err: Result<usize, ResourceError> = Err(ResourceError::FieldTooLong { len });

        assert_eq!(prehash_len(len, 16), err);
        assert_eq!(prehash_len(2, len), err);
        assert_eq!(tweak_len(64, len), err);
        assert_eq!(address_len(len), err);
        assert_eq!(prehash_len(2, 16), Ok(6 * 4 + 2 + 16));
    }
}
