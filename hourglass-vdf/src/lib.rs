#![forbid(unsafe_code)]

//! Hourglass Wesolowski VDF verifier.
//!
//! Layers, leaves first:
//! * [`bigint`]: fixed-capacity unsigned integers with checked add/sub.
//! * [`modular`]: reduction, modular multiplication and exponentiation.
//! * [`prime`]: hash-to-prime challenge derivation and primality testing.
//! * [`verifier`]: the proof check itself, plus [`batch`] fan-out.
//!
//! The free functions below are the byte-level interface. They use a
//! process-wide verifier built from [`VerifierConfig::default`]; construct a
//! [`VdfVerifier`] directly to use another modulus or challenge setup.

use lazy_static::lazy_static;

use hourglass_core::{VdfResult, VerifierConfig};

pub mod batch;
pub mod bigint;
pub mod modular;
pub mod prime;
pub mod proof;
pub mod verifier;

pub use batch::{verify_batch, verify_batch_detailed};
pub use bigint::BigUint;
pub use prime::HashToPrime;
pub use proof::{Proof, ProofFile};
pub use verifier::{VdfVerifier, Verdict};

lazy_static! {
    static ref DEFAULT_VERIFIER: VdfResult<VdfVerifier> =
        VdfVerifier::new(&VerifierConfig::default());
}

/// The verifier backing the free functions.
pub fn default_verifier() -> VdfResult<&'static VdfVerifier> {
    match &*DEFAULT_VERIFIER {
        Ok(v) => Ok(v),
        Err(e) => Err(hourglass_core::VdfError::InvalidConfig(e.to_string())),
    }
}

/// Big-endian `a + b`, minimally encoded.
pub fn big_add(a: &[u8], b: &[u8]) -> VdfResult<Vec<u8>> {
    let sum = BigUint::from_bytes_be(a)?.checked_add(&BigUint::from_bytes_be(b)?)?;
    Ok(sum.to_bytes_be())
}

/// Big-endian `a - b`, minimally encoded; `a < b` is an underflow.
pub fn big_sub(a: &[u8], b: &[u8]) -> VdfResult<Vec<u8>> {
    let diff = BigUint::from_bytes_be(a)?.checked_sub(&BigUint::from_bytes_be(b)?)?;
    Ok(diff.to_bytes_be())
}

/// Whether `l` is the challenge prime for `(g, y)` under the default
/// configuration. Malformed input is simply a mismatch.
#[must_use]
pub fn check_hash_to_prime(g: &[u8], y: &[u8], l: &[u8]) -> bool {
    let parsed = (BigUint::from_bytes_be(g), BigUint::from_bytes_be(y), BigUint::from_bytes_be(l));
    match (default_verifier(), parsed) {
        (Ok(v), (Ok(g), Ok(y), Ok(l))) => v.check_hash_to_prime(&g, &y, &l),
        _ => false,
    }
}

/// Verify a proof under the default configuration. Oversized fields are a
/// parsing error; every other problem is a `false`.
pub fn verify_vdf_proof(g: &[u8], y: &[u8], pi: &[u8], t: u64, l: &[u8]) -> VdfResult<bool> {
    default_verifier()?.verify_bytes(g, y, pi, t, l)
}
