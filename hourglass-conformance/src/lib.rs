#![forbid(unsafe_code)]

//! Shared helpers for the Hourglass conformance suite.
//!
//! Everything here is built on `num-bigint`, independent of the verifier's own
//! arithmetic, so the tests compare two implementations rather than one
//! implementation against itself.

use num_bigint::BigUint as RefUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use hourglass_vdf::{BigUint, Proof, VdfVerifier};

/// Convert into the reference big integer type.
#[must_use]
pub fn to_ref(v: &BigUint) -> RefUint {
    RefUint::from_bytes_be(&v.to_bytes_be())
}

/// Convert back from the reference type. Panics if the value is too wide.
#[must_use]
pub fn from_ref(v: &RefUint) -> BigUint {
    BigUint::from_bytes_be(&v.to_bytes_be()).expect("value fits the verifier width")
}

/// Honest Wesolowski prover: `t` sequential squarings, then
/// `pi = g^floor(2^t / l)` for the challenge the verifier would derive.
#[must_use]
pub fn prove(verifier: &VdfVerifier, g: &BigUint, t: u64) -> Proof {
    let n = to_ref(verifier.modulus());
    let g_ref = to_ref(g) % &n;
    let mut y = g_ref.clone();
    for _ in 0..t {
        y = (&y * &y) % &n;
    }

    let g = from_ref(&g_ref);
    let y = from_ref(&y);
    let l = verifier.derive_challenge(&g, &y).expect("challenge derivation");

    let q = (RefUint::one() << t) / to_ref(&l);
    let pi = from_ref(&g_ref.modpow(&q, &n));
    Proof { g, y, pi, t, l }
}

/// Independent Miller–Rabin over `num-bigint` with fixed bases.
#[must_use]
pub fn reference_is_prime(n: &RefUint) -> bool {
    let two = RefUint::from(2u8);
    if *n < two {
        return false;
    }
    for p in [2u32, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        let p = RefUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }
    let one = RefUint::one();
    let nm1 = n - &one;
    let mut d = nm1.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }
    'bases: for a in [2u32, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53] {
        let mut x = RefUint::from(a).modpow(&d, n);
        if x == one || x == nm1 {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == nm1 {
                continue 'bases;
            }
        }
        return false;
    }
    true
}

/// Decode a lowercase hex literal used in fixed vectors.
#[must_use]
pub fn unhex(s: &str) -> Vec<u8> {
    hourglass_core::decode_hex(s).expect("valid hex literal")
}
