use cryptal::derivation::hybrid::{BLOCK_LEN, dependent_index, independent_index};
use cryptal::hash::Sha512Hash;
use cryptal::secure::SharedPool;
use proptest::prelude::*;

proptest! {
    #[test]
    fn independent_index_stays_below_position(
        index in 0u32..100_000,
        pass in 0u32..4,
        salt in proptest::collection::vec(any::<u8>(), 16..48),
    ) {
        let pool = SharedPool::default();
        let j = independent_index(&pool, &Sha512Hash, index, pass, &salt).unwrap();

        if index == 0 {
            prop_assert_eq!(j, 0);
        } else {
            prop_assert!(j < index);
        }
    }

    #[test]
    fn dependent_index_stays_below_position(
        index in 0u32..100_000,
        prev in proptest::collection::vec(any::<u8>(), BLOCK_LEN),
    ) {
        let prev: [u8; BLOCK_LEN] = prev.try_into().unwrap();
        let j = dependent_index(&prev, index);

        if index == 0 {
            prop_assert_eq!(j, 0);
        } else {
            prop_assert!(j < index);
        }
    }
}

#[test]
fn dependent_index_ignores_bytes_past_the_first_word() {
    let mut a = [0x11u8; BLOCK_LEN];
    let b = a;
    a[8..].fill(0xee);
    assert_eq!(dependent_index(&a, 1000), dependent_index(&b, 1000));
}

#[test]
fn independent_index_depends_on_salt() {
    let pool = SharedPool::default();
    let differs = (2..64u32).any(|i| {
        independent_index(&pool, &Sha512Hash, i, 0, &[0u8; 16]).unwrap()
            != independent_index(&pool, &Sha512Hash, i, 0, &[1u8; 16]).unwrap()
    });
    assert!(differs);
}
