#![forbid(unsafe_code)]

//! Hash-to-prime derivation of the Fiat-Shamir challenge `l`.
//!
//! The seeds are concatenated and hashed once:
//!
//! ```text
//! c = SHA256(seed_0 || seed_1 || ...) mod 2^bits,  with bit (bits - 1) and bit 0 set
//! ```
//!
//! The search then tests `c, c + 2, c + 4, ...` with trial division and
//! Miller–Rabin until one passes or the attempt budget runs out. A single
//! digest limits the challenge to 256 bits.
//!
//! Seeds are hashed in their minimal big-endian encoding, so leading zero
//! bytes in caller input do not change the challenge.

use sha2::{Digest, Sha256};
use tracing::{trace, warn};

use hourglass_core::config::{ChallengeConfig, MAX_ROUNDS};
use hourglass_core::{VdfError, VdfResult};

use crate::bigint::BigUint;
use crate::modular::{minus_one, modpow, mulmod};

/// The primes below 1000: trial divisors and Miller–Rabin bases.
pub const SMALL_PRIMES: [u64; MAX_ROUNDS] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293,
    307, 311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419,
    421, 431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541,
    547, 557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613, 617, 619, 631, 641, 643, 647, 653,
    659, 661, 673, 677, 683, 691, 701, 709, 719, 727, 733, 739, 743, 751, 757, 761, 769, 773, 787,
    797, 809, 811, 821, 823, 827, 829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919,
    929, 937, 941, 947, 953, 967, 971, 977, 983, 991, 997,
];

/// Deterministic challenge derivation bound to one configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashToPrime {
    bits: usize,
    rounds: usize,
    max_attempts: usize,
}

impl HashToPrime {
    /// Build from validated challenge parameters.
    pub fn new(cfg: &ChallengeConfig) -> VdfResult<Self> {
        cfg.validate()?;
        Ok(Self {
            bits: cfg.bits,
            rounds: cfg.rounds,
            max_attempts: cfg.max_attempts,
        })
    }

    /// Target bit length of derived primes.
    #[must_use]
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Derive the prime for `seeds`. The same seeds and configuration always
    /// yield the same prime.
    pub fn derive_prime(&self, seeds: &[&BigUint]) -> VdfResult<BigUint> {
        let mut candidate = self.initial_candidate(seeds)?;
        let mut tried = 0;
        while tried < self.max_attempts && candidate.bits() == self.bits {
            tried += 1;
            if is_probable_prime(&candidate, self.rounds)? {
                trace!(tried, prime = %candidate, "hash-to-prime settled");
                return Ok(candidate);
            }
            match candidate.checked_add_u64(2) {
                Ok(next) => candidate = next,
                Err(_) => break,
            }
        }
        warn!(bits = self.bits, tried, "hash-to-prime search exhausted");
        Err(VdfError::PrimeSearchExhausted { attempts: tried })
    }

    /// Whether `l` is the prime derived from `(g, y)`.
    ///
    /// Never errors: an exhausted search simply means no `l` matches.
    #[must_use]
    pub fn check(&self, g: &BigUint, y: &BigUint, l: &BigUint) -> bool {
        // Cheap width test before the search.
        if l.bits() != self.bits || !l.is_odd() {
            return false;
        }
        match self.derive_prime(&[g, y]) {
            Ok(expected) => expected == *l,
            Err(_) => false,
        }
    }

    fn initial_candidate(&self, seeds: &[&BigUint]) -> VdfResult<BigUint> {
        let mut hasher = Sha256::new();
        for seed in seeds {
            hasher.update(seed.to_bytes_be());
        }
        let digest = hasher.finalize();

        // Low `bits` bits of the digest.
        let width = (self.bits + 7) / 8;
        let mut low = digest[digest.len() - width..].to_vec();
        let excess = width * 8 - self.bits;
        low[0] &= 0xff >> excess;
        low[0] |= 0x80 >> excess;
        low[width - 1] |= 1;
        BigUint::from_bytes_be(&low)
    }
}

/// Probabilistic primality test: trial division by [`SMALL_PRIMES`], then
/// Miller–Rabin with the first `rounds` of them as bases.
pub fn is_probable_prime(n: &BigUint, rounds: usize) -> VdfResult<bool> {
    if n.bits() <= 1 {
        return Ok(false);
    }
    for p in SMALL_PRIMES {
        if n.rem_u64(p)? == 0 {
            return Ok(*n == BigUint::from_u64(p));
        }
    }
    // Every composite below 1000^2 has a factor in the table.
    if n.bits() < 20 {
        return Ok(true);
    }

    let n_minus_1 = minus_one(n);
    let s = n_minus_1.trailing_zeros();
    let d = n_minus_1.shr(s);
    let one = BigUint::one();

    'bases: for &a in SMALL_PRIMES.iter().take(rounds.min(MAX_ROUNDS)) {
        let mut x = modpow(&BigUint::from_u64(a), &d, n)?;
        if x == one || x == n_minus_1 {
            continue;
        }
        for _ in 1..s {
            x = mulmod(&x, &x, n)?;
            if x == n_minus_1 {
                continue 'bases;
            }
        }
        return Ok(false);
    }
    Ok(true)
}
