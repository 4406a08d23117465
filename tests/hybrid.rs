use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cryptal::derivation::{
    ArgumentError, ConfigError, HybridError, HybridKdf, HybridParams, MIN_SALT_LEN,
};
use cryptal::hash::{Sha512Hash, WIDE_HASH_LEN, WideHash};

/// Small working memory and a minimal finalizer so the suite stays fast.
fn quick(output_bits: u32) -> HybridParams {
    HybridParams::default()
        .with_output_bits(output_bits)
        .with_memory_blocks(8)
        .with_time_cost(1)
        .with_finalizer_memory_kib(8)
        .with_finalizer_iterations(1)
}

fn kdf(params: HybridParams) -> HybridKdf {
    HybridKdf::new(params).unwrap()
}

#[test]
fn hybrid_is_deterministic() {
    let kdf = kdf(quick(512));
    let a = kdf.compute_hash(b"password", &[7u8; 16]).unwrap();
    let b = kdf.compute_hash(b"password", &[7u8; 16]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn hybrid_changes_with_salt() {
    let kdf = kdf(quick(256));
    let a = kdf.compute_hash(b"password", b"saltAAAAsaltAAAA").unwrap();
    let b = kdf.compute_hash(b"password", b"saltBBBBsaltBBBB").unwrap();
    assert_ne!(a, b);
}

#[test]
fn hybrid_changes_with_parameters() {
    let salt = [0u8; 16];
    let a = kdf(quick(256)).compute_hash(b"pw", &salt).unwrap();
    let b = kdf(quick(256).with_time_cost(2))
        .compute_hash(b"pw", &salt)
        .unwrap();
    let c = kdf(quick(256).with_memory_blocks(9))
        .compute_hash(b"pw", &salt)
        .unwrap();

    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_ne!(b, c);
}

/// Every single-bit flip of input or salt yields a distinct output.
#[test]
fn hybrid_single_bit_flips_never_collide() {
    let kdf = kdf(quick(256));
    let input = *b"sixteen byte pw!";
    let salt = *b"sixteen bytesalt";

    let mut seen = HashSet::new();
    seen.insert(kdf.compute_hash(&input, &salt).unwrap());

    for bit in 0..input.len() * 8 {
        let mut flipped = input;
        flipped[bit / 8] ^= 1 << (bit % 8);
        assert!(seen.insert(kdf.compute_hash(&flipped, &salt).unwrap()));
    }

    for bit in 0..salt.len() * 8 {
        let mut flipped = salt;
        flipped[bit / 8] ^= 1 << (bit % 8);
        assert!(seen.insert(kdf.compute_hash(&input, &flipped).unwrap()));
    }

    assert_eq!(seen.len(), 1 + 2 * 128);
}

#[test]
fn hybrid_respects_output_length() {
    for bits in [256u32, 512, 1024] {
        let out = kdf(quick(bits)).compute_hash(b"pw", &[1u8; 16]).unwrap();
        assert_eq!(out.len(), (bits / 8) as usize);
    }
}

#[test]
fn hybrid_enforces_salt_floor() {
    let kdf = kdf(quick(256));

    for len in 0..MIN_SALT_LEN {
        assert_eq!(
            kdf.compute_hash(b"pw", &vec![0u8; len]),
            Err(HybridError::Argument(ArgumentError::SaltTooShort {
                len,
                min: MIN_SALT_LEN
            }))
        );
    }

    assert!(kdf.compute_hash(b"pw", &[0u8; MIN_SALT_LEN]).is_ok());
}

#[test]
fn hybrid_accepts_empty_input() {
    let out = kdf(quick(256)).compute_hash(b"", &[0u8; 16]).unwrap();
    assert_eq!(out.len(), 32);
}

#[test]
fn hybrid_validates_construction() {
    let base = HybridParams::default();

    assert_eq!(
        HybridKdf::new(base.clone().with_output_bits(511)).unwrap_err(),
        HybridError::Config(ConfigError::OutputNotByteAligned(511))
    );
    assert_eq!(
        HybridKdf::new(base.clone().with_memory_blocks(3)).unwrap_err(),
        HybridError::Config(ConfigError::TooFewBlocks(3))
    );
    assert_eq!(
        HybridKdf::new(base.clone().with_time_cost(0)).unwrap_err(),
        HybridError::Config(ConfigError::TooFewPasses)
    );
    assert_eq!(
        HybridKdf::new(base.clone().with_finalizer_iterations(0)).unwrap_err(),
        HybridError::Config(ConfigError::TooFewIterations)
    );
    assert_eq!(
        HybridKdf::new(base.clone().with_finalizer_parallelism(0)).unwrap_err(),
        HybridError::Config(ConfigError::TooFewLanes)
    );

    assert!(HybridKdf::new(base.with_memory_blocks(4).with_time_cost(1)).is_ok());
}

#[test]
fn hybrid_passes_finalizer_errors_through() {
    let kdf = kdf(quick(256).with_finalizer_memory_kib(1));
    let expected = argon2::Params::new(1, 1, 1, Some(32))
        .unwrap_err()
        .to_string();

    match kdf.compute_hash(b"pw", &[0u8; 16]) {
        Err(HybridError::Finalizer(err)) => assert_eq!(err.to_string(), expected),
        other => panic!("expected finalizer error, got {other:?}"),
    }
}

#[test]
fn hybrid_auto_sizes_finalizer_memory() {
    let kdf = kdf(HybridParams::default());
    assert_eq!(kdf.finalizer_cost().memory_kib, 8 * 1024);
    assert_eq!(kdf.finalizer_cost().iterations, 3);
    assert_eq!(kdf.finalizer_cost().parallelism, 1);
}

/// SHA-512 over a tagged input, counting its calls.
#[derive(Default)]
struct CountingHash {
    calls: AtomicUsize,
}

impl WideHash for CountingHash {
    fn hash512(&self, input: &[u8]) -> [u8; WIDE_HASH_LEN] {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tagged = b"counting".to_vec();
        tagged.extend_from_slice(input);
        Sha512Hash.hash512(&tagged)
    }
}

#[test]
fn hybrid_uses_injected_wide_hash() {
    let hash = Arc::new(CountingHash::default());
    let custom = kdf(quick(256)).with_wide_hash(Arc::clone(&hash));

    let out = custom.compute_hash(b"pw", &[0u8; 16]).unwrap();

    // Block 1, seeded blocks 2..8, eight mixed blocks and an address hash
    // for every pass-0 block except block 0.
    assert_eq!(hash.calls.load(Ordering::SeqCst), 1 + 6 + 8 + 7);
    assert_ne!(out, kdf(quick(256)).compute_hash(b"pw", &[0u8; 16]).unwrap());
}

#[test]
fn hybrid_concurrent_calls_agree() {
    let kdf = Arc::new(kdf(quick(256).with_memory_blocks(64)));
    let expected = kdf.compute_hash(b"shared", &[4u8; 16]).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let kdf = Arc::clone(&kdf);
            std::thread::spawn(move || kdf.compute_hash(b"shared", &[4u8; 16]).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

/// Regression anchor: 256-bit output, 8 blocks, one mixing pass, default
/// finalizer cost (8 MiB, 3 iterations, 1 lane).
#[test]
fn hybrid_golden_vector() {
    let kdf = kdf(HybridParams::default()
        .with_output_bits(256)
        .with_memory_blocks(8)
        .with_time_cost(1));

    let out = kdf.compute_hash(b"pw", &[0u8; 16]).unwrap();

    assert_eq!(
        hex::encode(out),
        "a4c0508519250686747c30a87f29ccd438937142d3c1bb99cfcb13809625e59d"
    );
}

/// Regression anchor exercising data-dependent passes and a 64-byte output.
#[test]
fn hybrid_golden_vector_two_passes() {
    let kdf = kdf(HybridParams::default()
        .with_output_bits(512)
        .with_memory_blocks(16)
        .with_time_cost(2)
        .with_finalizer_memory_kib(64)
        .with_finalizer_iterations(1));

    let out = kdf.compute_hash(b"password", b"0123456789abcdef").unwrap();

    assert_eq!(
        hex::encode(out),
        "36cb0131ee0db9c2d4950fccd437ec63346a68787076fafdac0ad7828edd4af0\
         7933c7ce0740bf994d984cf438801e6d2e61344a8777a11aa374ed5ef363ce19"
    );
}
