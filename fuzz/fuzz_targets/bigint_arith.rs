#![no_main]
use libfuzzer_sys::fuzz_target;
use hourglass_vdf::modular::mulmod;
use hourglass_vdf::{big_add, big_sub, BigUint};
use num_bigint::BigUint as RefUint;

fuzz_target!(|input: (Vec<u8>, Vec<u8>, Vec<u8>)| {
    let (a, b, m) = input;
    let (ra, rb) = (RefUint::from_bytes_be(&a), RefUint::from_bytes_be(&b));

    match big_add(&a, &b) {
        Ok(sum) => assert_eq!(RefUint::from_bytes_be(&sum), &ra + &rb),
        Err(_) => assert!(a.len() > 256 || b.len() > 256 || (&ra + &rb).bits() > 2048),
    }
    match big_sub(&a, &b) {
        Ok(diff) => assert_eq!(RefUint::from_bytes_be(&diff), &ra - &rb),
        Err(_) => assert!(a.len() > 256 || b.len() > 256 || ra < rb),
    }

    // Modular multiplication only for inputs the verifier would accept.
    if let (Ok(x), Ok(y), Ok(n)) =
        (BigUint::from_bytes_be(&a), BigUint::from_bytes_be(&b), BigUint::from_bytes_be(&m))
    {
        if !n.is_zero() {
            let r = mulmod(&x, &y, &n).unwrap();
            let rm = RefUint::from_bytes_be(&m);
            assert_eq!(RefUint::from_bytes_be(&r.to_bytes_be()), (ra * rb) % rm);
        }
    }
});
