#![no_main]
use libfuzzer_sys::fuzz_target;
use hourglass_core::ChallengeConfig;
use hourglass_vdf::{verify_vdf_proof, BigUint, HashToPrime, Proof, VdfVerifier};

fuzz_target!(|input: (Vec<u8>, Vec<u8>, Vec<u8>, u64, Vec<u8>)| {
    let (g, y, pi, t, l) = input;
    // Arbitrary bytes never panic: oversized fields are errors, the rest reject.
    let _ = verify_vdf_proof(&g, &y, &pi, t, &l);

    // Toy modulus 1009 * 1013 keeps the full equation path cheap.
    let h = HashToPrime::new(&ChallengeConfig { bits: 17, ..ChallengeConfig::default() }).unwrap();
    let verifier = VdfVerifier::with_parts(BigUint::from_u64(1_022_117), h).unwrap();
    if let Ok(proof) = Proof::from_bytes(&g, &y, &pi, t, &l) {
        let _ = verifier.verify_detailed(&proof);
    }
});
