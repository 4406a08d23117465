use cryptal::hash::keccak::RATE;
use cryptal::hash::{sponge_hash, sponge_hash_into};
use sha3::{Digest, Sha3_512};

fn expect_sponge_eq(input: &[u8], len: usize, expected: &str) {
    let got = sponge_hash(input, len);

    assert_eq!(
        hex::encode(&got),
        expected,
        "Digest mismatch for input {:?} at length {}",
        input,
        len,
    );
}

// -------------------------------------------------------
// 1. REGRESSION VECTORS
// -------------------------------------------------------

#[test]
fn sponge_empty_vector() {
    expect_sponge_eq(
        b"",
        64,
        "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
         15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26",
    );
}

#[test]
fn sponge_multi_block_squeeze_vector() {
    expect_sponge_eq(
        b"abc",
        100,
        "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e\
         10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0\
         4c3fd10674a4addf9c705aebfbcf0e5385fc03d7d90ab979950498d20294eadd\
         8390ddbf",
    );
}

#[test]
fn sponge_zero_length_output() {
    assert!(sponge_hash(b"anything", 0).is_empty());
}

// -------------------------------------------------------
// 2. AGREEMENT WITH SHA3-512 FOR SINGLE-BLOCK SQUEEZES
// -------------------------------------------------------

#[test]
fn sponge_matches_sha3_512_across_lengths() {
    let mut buf = Vec::with_capacity(3 * RATE + 1);
    for i in 0..=3 * RATE {
        let expected = Sha3_512::digest(&buf);
        let got = sponge_hash(&buf, 64);
        assert_eq!(got.as_slice(), expected.as_slice(), "length {i}");
        buf.push(i as u8);
    }
}

#[test]
fn sponge_short_output_is_sha3_prefix() {
    let expected = Sha3_512::digest(b"The quick brown fox jumps over the lazy dog");
    let mut out = [0u8; 32];
    sponge_hash_into(b"The quick brown fox jumps over the lazy dog", &mut out);
    assert_eq!(&out[..], &expected[..32]);
}

// -------------------------------------------------------
// 3. SQUEEZE CONSISTENCY
// -------------------------------------------------------

#[test]
fn sponge_output_lengths_share_prefix() {
    let full = sponge_hash(b"nebula", 4 * RATE);
    for len in [1, RATE - 1, RATE, RATE + 1, 2 * RATE, 3 * RATE + 5] {
        assert_eq!(sponge_hash(b"nebula", len), &full[..len]);
    }
}
