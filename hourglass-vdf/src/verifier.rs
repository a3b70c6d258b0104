#![forbid(unsafe_code)]

//! Wesolowski proof verification.
//!
//! Given `(g, y, pi, t, l)` the verifier
//! 1. re-derives the challenge from `(g, y)` and requires it to equal `l`,
//! 2. computes `r = 2^t mod l`,
//! 3. accepts iff `pi^l * g^r == y (mod N)`.
//!
//! The cost is one exponentiation by `l` and one by `r < l`, independent of
//! `t`. An invalid proof is a [`Verdict`], never an error.

use tracing::debug;

use hourglass_core::{VdfError, VdfResult, VerifierConfig};

use crate::bigint::BigUint;
use crate::modular::{mod_reduce, modpow, mulmod};
use crate::prime::HashToPrime;
use crate::proof::Proof;

/// Outcome of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// `l` is not the prime derived from `(g, y)`.
    ChallengeMismatch,
    /// `g`, `y` or `pi` is not reduced modulo N.
    NonCanonicalElement,
    /// `pi^l * g^r != y (mod N)`.
    EquationMismatch,
}

impl Verdict {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Accepted => "accepted",
            Verdict::ChallengeMismatch => "challenge mismatch",
            Verdict::NonCanonicalElement => "non-canonical group element",
            Verdict::EquationMismatch => "verification equation mismatch",
        }
    }
}

/// Verifier bound to one modulus and one challenge configuration.
#[derive(Debug, Clone)]
pub struct VdfVerifier {
    modulus: BigUint,
    challenge: HashToPrime,
}

impl VdfVerifier {
    /// Build from a configuration.
    pub fn new(cfg: &VerifierConfig) -> VdfResult<Self> {
        let modulus = BigUint::from_bytes_be(&cfg.group.modulus_bytes()?)?;
        Self::with_parts(modulus, HashToPrime::new(&cfg.challenge)?)
    }

    /// Build from an already parsed modulus. N must be odd and greater than 1.
    pub fn with_parts(modulus: BigUint, challenge: HashToPrime) -> VdfResult<Self> {
        if modulus.is_zero() {
            return Err(VdfError::InvalidModulus("modulus is zero"));
        }
        if modulus.is_one() || !modulus.is_odd() {
            return Err(VdfError::InvalidModulus("modulus must be odd and greater than one"));
        }
        Ok(Self { modulus, challenge })
    }

    #[must_use]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    #[must_use]
    pub fn challenge(&self) -> &HashToPrime {
        &self.challenge
    }

    /// Derive the challenge prime for `(g, y)`.
    pub fn derive_challenge(&self, g: &BigUint, y: &BigUint) -> VdfResult<BigUint> {
        self.challenge.derive_prime(&[g, y])
    }

    /// Whether `l` is the challenge bound to `(g, y)`.
    #[must_use]
    pub fn check_hash_to_prime(&self, g: &BigUint, y: &BigUint, l: &BigUint) -> bool {
        self.challenge.check(g, y, l)
    }

    /// Accept/reject.
    #[must_use]
    pub fn verify(&self, proof: &Proof) -> bool {
        self.verify_detailed(proof).is_accepted()
    }

    /// Accept/reject with the reason for rejection.
    #[must_use]
    pub fn verify_detailed(&self, proof: &Proof) -> Verdict {
        let verdict = self.evaluate(proof);
        debug!(t = proof.t, l = %proof.l, verdict = verdict.as_str(), "vdf proof checked");
        verdict
    }

    /// Parse the byte form and verify. Only parsing can fail.
    pub fn verify_bytes(&self, g: &[u8], y: &[u8], pi: &[u8], t: u64, l: &[u8]) -> VdfResult<bool> {
        Ok(self.verify(&Proof::from_bytes(g, y, pi, t, l)?))
    }

    fn evaluate(&self, proof: &Proof) -> Verdict {
        let n = &self.modulus;
        if [&proof.g, &proof.y, &proof.pi].iter().any(|v| *v >= n) {
            return Verdict::NonCanonicalElement;
        }
        if !self.check_hash_to_prime(&proof.g, &proof.y, &proof.l) {
            return Verdict::ChallengeMismatch;
        }
        match self.expected_output(proof) {
            Ok(y) if y == proof.y => Verdict::Accepted,
            Ok(_) => Verdict::EquationMismatch,
            // Unreachable with a validated modulus and non-zero l.
            Err(_) => Verdict::EquationMismatch,
        }
    }

    /// `pi^l * g^(2^t mod l) mod N`.
    fn expected_output(&self, proof: &Proof) -> VdfResult<BigUint> {
        let n = &self.modulus;
        let r = mod_reduce(proof.t, &proof.l)?;
        let lhs = modpow(&proof.pi, &proof.l, n)?;
        let rhs = modpow(&proof.g, &r, n)?;
        mulmod(&lhs, &rhs, n)
    }
}
