//! Step mappings of Keccak-f[1600]
//!
//! Each step operates on the flat 25-lane state. The lane at column `x`,
//! row `y` lives at index [`lane`]`(x, y)`.

use zeroize::Zeroize;

use super::{LANES, ROTATION_OFFSETS, ROUND_CONSTANTS};

/// Flat index of the lane at column `x`, row `y`.
#[inline(always)]
pub const fn lane(x: usize, y: usize) -> usize {
    x + 5 * y
}

/// θ: XOR every lane with the parities of the two neighbouring columns.
#[inline(always)]
pub fn theta(a: &mut [u64; LANES]) {
    let mut c = [0u64; 5];
    for (x, parity) in c.iter_mut().enumerate() {
        *parity = a[lane(x, 0)] ^ a[lane(x, 1)] ^ a[lane(x, 2)] ^ a[lane(x, 3)] ^ a[lane(x, 4)];
    }

    for x in 0..5 {
        let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
        for y in 0..5 {
            a[lane(x, y)] ^= d;
        }
    }

    c.zeroize();
}

/// ρ and π combined: rotate each lane by its fixed offset and move it from
/// `(x, y)` to `(y, 2x + 3y mod 5)`.
#[inline(always)]
pub fn rho_pi(a: &[u64; LANES], b: &mut [u64; LANES]) {
    for y in 0..5 {
        for x in 0..5 {
            let src = lane(x, y);
            b[lane(y, (2 * x + 3 * y) % 5)] = a[src].rotate_left(ROTATION_OFFSETS[src]);
        }
    }
}

/// χ: the only non-linear step, `a ^ (!b & c)` along each row.
#[inline(always)]
pub fn chi(b: &[u64; LANES], a: &mut [u64; LANES]) {
    for y in 0..5 {
        for x in 0..5 {
            a[lane(x, y)] =
                b[lane(x, y)] ^ (!b[lane((x + 1) % 5, y)] & b[lane((x + 2) % 5, y)]);
        }
    }
}

/// ι: XOR the round constant into lane `(0, 0)`.
#[inline(always)]
pub fn iota(a: &mut [u64; LANES], round: usize) {
    a[lane(0, 0)] ^= ROUND_CONSTANTS[round];
}

/// Applies the full 24-round Keccak-f[1600] permutation in place.
///
/// The scratch arrays used by θ and between ρπ and χ live on the stack and
/// are cleared before returning.
pub fn keccak_f1600(a: &mut [u64; LANES]) {
    let mut b = [0u64; LANES];

    for round in 0..ROUND_CONSTANTS.len() {
        theta(a);
        rho_pi(a, &mut b);
        chi(&b, a);
        iota(a, round);
    }

    b.zeroize();
}
