//! Challenge derivation checked against an independent primality test.

use hourglass_conformance::{reference_is_prime, to_ref};
use hourglass_core::{ChallengeConfig, VdfError};
use hourglass_vdf::prime::is_probable_prime;
use hourglass_vdf::{check_hash_to_prime, default_verifier, BigUint, HashToPrime};
use proptest::prelude::*;

fn seed(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn derived_challenge_is_a_full_width_prime(
        g in prop::collection::vec(any::<u8>(), 0..64),
        y in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let h = HashToPrime::new(&ChallengeConfig::default()).unwrap();
        let l = h.derive_prime(&[&seed(&g), &seed(&y)]).unwrap();
        prop_assert_eq!(l.bits(), 168);
        prop_assert!(reference_is_prime(&to_ref(&l)));
        prop_assert!(h.check(&seed(&g), &seed(&y), &l));
    }

    #[test]
    fn leading_zeros_do_not_change_the_challenge(
        g in prop::collection::vec(any::<u8>(), 1..32),
        pad in 1usize..8,
    ) {
        let verifier = default_verifier().unwrap();
        let y = seed(&[0x42, 0x17]);
        let l = verifier.derive_challenge(&seed(&g), &y).unwrap();

        let mut padded = vec![0u8; pad];
        padded.extend_from_slice(&g);
        prop_assert!(check_hash_to_prime(&padded, &y.to_bytes_be(), &l.to_bytes_be()));
    }
}

#[test]
fn derivation_is_deterministic_across_instances() {
    let a = HashToPrime::new(&ChallengeConfig::default()).unwrap();
    let b = HashToPrime::new(&ChallengeConfig::default()).unwrap();
    let (g, y) = (seed(&[2]), seed(&[0xde, 0xad, 0xbe, 0xef]));
    assert_eq!(a.derive_prime(&[&g, &y]).unwrap(), b.derive_prime(&[&g, &y]).unwrap());
}

#[test]
fn swapped_seeds_give_a_different_challenge() {
    let h = HashToPrime::new(&ChallengeConfig::default()).unwrap();
    let (g, y) = (seed(&[2]), seed(&[3]));
    let l = h.derive_prime(&[&g, &y]).unwrap();
    assert!(!h.check(&y, &g, &l));
}

#[test]
fn seeds_are_hashed_as_plain_concatenation() {
    // (0x0102, 0x03) and (0x01, 0x0203) hash the same three bytes.
    let h = HashToPrime::new(&ChallengeConfig::default()).unwrap();
    let a = h.derive_prime(&[&seed(&[1, 2]), &seed(&[3])]).unwrap();
    let b = h.derive_prime(&[&seed(&[1]), &seed(&[2, 3])]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn primality_agrees_with_reference_around_a_derived_prime() {
    let h = HashToPrime::new(&ChallengeConfig::default()).unwrap();
    let l = h.derive_prime(&[&seed(&[7]), &seed(&[9])]).unwrap();
    let mut n = l;
    for _ in 0..64 {
        assert_eq!(is_probable_prime(&n, 20).unwrap(), reference_is_prime(&to_ref(&n)), "{n}");
        n = n.checked_add_u64(1).unwrap();
    }
}

#[test]
fn tiny_attempt_budget_can_exhaust() {
    let cfg = ChallengeConfig { max_attempts: 1, ..ChallengeConfig::default() };
    let h = HashToPrime::new(&cfg).unwrap();
    let exhausted = (0u8..=255).any(|i| {
        matches!(
            h.derive_prime(&[&seed(&[i]), &seed(&[1])]),
            Err(VdfError::PrimeSearchExhausted { attempts: 1 })
        )
    });
    assert!(exhausted);
}
