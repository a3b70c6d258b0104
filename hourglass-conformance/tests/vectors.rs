//! Fixed vectors for the byte-level interface.

use hourglass_conformance::{reference_is_prime, to_ref, unhex};
use hourglass_core::VdfError;
use hourglass_vdf::prime::is_probable_prime;
use hourglass_vdf::{
    big_add, big_sub, check_hash_to_prime, default_verifier, verify_vdf_proof, BigUint, Proof,
    ProofFile, Verdict,
};

const ADD_OPERAND: &str = "0x00ffffff6c9b26d064d9364d9364d9364d9364d9364d9364d9364d9364d9364e";
const ADD_SUM: &str = "0x01fffffed9364da0c9b26c9b26c9b26c9b26c9b26c9b26c9b26c9b26c9b26c9c";

const SUB_A: &str = "0x9185cf46bc8ef7d6a2906b5db87c43611f40bc47bccd14d5606d89b5e35ca620";
const SUB_B: &str = "0x8e819e9b4fcaf230255c4273059121d96e45da765348d66fabbb3fa0304a68dd";
const SUB_DIFF: &str = "0x030430ab6cc405a67d3428eab2eb2187b0fae1d169843e65b4b24a15b3123d43";

/// Reference proof for a 1024-bit group whose modulus is not published.
const REFERENCE_G: &str = "0x8885ad4896cc9a32a4bdf1fac0a4b2d6e7e110714dbdcf04ec1bbd417c2a9d55";
const REFERENCE_Y: &str = "0x\
467f2197715ac2f535f20c5650a8c509537dfbdc689742757d42cd9bea4d11ee\
79c189e25b232959086eabe2c9c364de05f983098ed1f40e923c65a04d2f0872\
4fb7960b0b79f01998cf7b45afbb58dde39d252df31748e5f463bced9d485065\
af04611e74be206a347004542ede394c7aba8be2be434d41623aaeff8b9353dd";
const REFERENCE_PI: &str = "0x\
59a5c5c6f0cad5d82069519514fd71c9befeb92efcce7ae7764796f4d8087f62\
a5295f31022c9fb9fba00472f1b86f5cad99838dbb0c93d7cc6f044ac0797622\
b0afafabf33d58e8eadb9b33881338e062b377c5a25ea9accf555570e3665996\
17e8510b5d4db4c8b423784738727642ed0a322eb6a5c2a001c3222710fed4e9";
const REFERENCE_T: u64 = 433_932_696;
const REFERENCE_L: &str = "0xf5efe1505a43025e0520b7d0acc71b4448a7670303";

fn reference_proof() -> Proof {
    ProofFile {
        g: REFERENCE_G.into(),
        y: REFERENCE_Y.into(),
        pi: REFERENCE_PI.into(),
        t: REFERENCE_T,
        l: REFERENCE_L.into(),
    }
    .to_proof()
    .unwrap()
}

#[test]
fn add_vector() {
    let a = unhex(ADD_OPERAND);
    assert_eq!(a.len(), 33);
    assert_eq!(big_add(&a, &a).unwrap(), unhex(ADD_SUM));
}

#[test]
fn sub_vector() {
    assert_eq!(big_sub(&unhex(SUB_A), &unhex(SUB_B)).unwrap(), unhex(SUB_DIFF));
    assert!(matches!(big_sub(&unhex(SUB_B), &unhex(SUB_A)), Err(VdfError::Underflow)));
}

#[test]
fn leading_zero_operand_round_trips_at_its_width() {
    let raw = unhex(ADD_OPERAND);
    let v = BigUint::from_bytes_be(&raw).unwrap();
    assert_eq!(v.to_bytes_be().len(), 32);
    assert_eq!(v.to_bytes_be_padded(raw.len()).unwrap(), raw);
}

#[test]
fn hex_output_is_lowercase_canonical() {
    let sum = BigUint::from_bytes_be(&big_add(&unhex(ADD_OPERAND), &unhex(ADD_OPERAND)).unwrap())
        .unwrap();
    assert_eq!(sum.to_hex(), ADD_SUM);
    let diff = BigUint::from_bytes_be(&big_sub(&unhex(SUB_A), &unhex(SUB_B)).unwrap()).unwrap();
    assert_eq!(diff.to_hex(), SUB_DIFF);
}

#[test]
fn full_width_operands_keep_precision() {
    let a = vec![0x7f; 256];
    let b = vec![0x80; 256];
    let sum = big_add(&a, &b).unwrap();
    assert_eq!(sum, vec![0xff; 256]);
    assert_eq!(big_sub(&sum, &b).unwrap(), a);
    assert!(matches!(big_add(&sum, &[1]), Err(VdfError::Overflow { max_bits: 2048 })));
}

#[test]
fn reference_challenge_is_a_168_bit_prime() {
    let l = BigUint::from_hex(REFERENCE_L).unwrap();
    assert_eq!(l.bits(), 168);
    assert!(is_probable_prime(&l, 20).unwrap());
    assert!(reference_is_prime(&to_ref(&l)));

    let neighbour = l.checked_add_u64(2).unwrap();
    assert_eq!(
        is_probable_prime(&neighbour, 20).unwrap(),
        reference_is_prime(&to_ref(&neighbour))
    );
}

#[test]
fn reference_challenge_is_bound_to_reference_input() {
    let (g, y, l) = (unhex(REFERENCE_G), unhex(REFERENCE_Y), unhex(REFERENCE_L));
    assert_eq!(y.len(), 128);
    assert!(check_hash_to_prime(&g, &y, &l));
    assert!(check_hash_to_prime(&g, &y, &l));

    let (g, y) = (BigUint::from_bytes_be(&g).unwrap(), BigUint::from_bytes_be(&y).unwrap());
    let derived = default_verifier().unwrap().derive_challenge(&g, &y).unwrap();
    assert_eq!(derived.to_hex(), REFERENCE_L);
}

#[test]
fn reference_proof_passes_the_challenge_check() {
    // The 2048-bit default modulus exceeds every reference element, so the
    // proof reaches the equation; only the unpublished N could satisfy it.
    let verifier = default_verifier().unwrap();
    let proof = reference_proof();
    let verdict = verifier.verify_detailed(&proof);
    assert_ne!(verdict, Verdict::ChallengeMismatch);
    assert_ne!(verdict, Verdict::NonCanonicalElement);
}

#[test]
fn any_changed_byte_of_reference_output_breaks_the_challenge() {
    let verifier = default_verifier().unwrap();
    let proof = reference_proof();
    let y = unhex(REFERENCE_Y);
    for i in 0..y.len() {
        let mut bad = y.clone();
        bad[i] ^= 0x01;
        let tampered = Proof { y: BigUint::from_bytes_be(&bad).unwrap(), ..proof };
        assert_eq!(verifier.verify_detailed(&tampered), Verdict::ChallengeMismatch, "byte {i}");

        let accepted = verify_vdf_proof(
            &unhex(REFERENCE_G),
            &bad,
            &unhex(REFERENCE_PI),
            REFERENCE_T,
            &unhex(REFERENCE_L),
        )
        .unwrap();
        assert!(!accepted, "byte {i}");
    }
}
