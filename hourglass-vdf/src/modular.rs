#![forbid(unsafe_code)]

//! Arithmetic modulo N and modulo the challenge prime `l`.
//!
//! Products are formed at full double width and then reduced with schoolbook
//! long division (Knuth, TAOCP vol. 2, Algorithm D). Exponentiation is
//! left-to-right square-and-multiply over any [`Exponent`].
//!
//! Every result lies in `[0, modulus)`. A zero modulus is
//! [`VdfError::InvalidModulus`].

use hourglass_core::{VdfError, VdfResult};

use crate::bigint::{cmp_limbs, significant_len, sub_assign_limbs, BigUint, MAX_LIMBS};

/// Anything that can drive square-and-multiply: a bit length and random
/// access to bits.
pub trait Exponent {
    /// Number of significant bits (zero for zero).
    fn bit_len(&self) -> usize;
    /// Bit `i`, least significant first.
    fn bit(&self, i: usize) -> bool;
}

impl Exponent for BigUint {
    fn bit_len(&self) -> usize {
        self.bits()
    }

    fn bit(&self, i: usize) -> bool {
        BigUint::bit(self, i)
    }
}

impl Exponent for u64 {
    fn bit_len(&self) -> usize {
        (u64::BITS - self.leading_zeros()) as usize
    }

    fn bit(&self, i: usize) -> bool {
        i < 64 && (self >> i) & 1 == 1
    }
}

fn ensure_modulus(m: &BigUint) -> VdfResult<()> {
    if m.is_zero() {
        Err(VdfError::InvalidModulus("modulus is zero"))
    } else {
        Ok(())
    }
}

/// `a mod m`.
pub fn reduce(a: &BigUint, m: &BigUint) -> VdfResult<BigUint> {
    ensure_modulus(m)?;
    if a < m {
        return Ok(*a);
    }
    BigUint::from_limbs(&rem_limbs(a.limbs(), m.limbs()))
}

/// `(a * b) mod m` via the full double-width product.
pub fn mulmod(a: &BigUint, b: &BigUint, m: &BigUint) -> VdfResult<BigUint> {
    ensure_modulus(m)?;
    let product = mul_limbs(a.limbs(), b.limbs());
    BigUint::from_limbs(&rem_limbs(&product, m.limbs()))
}

/// `base^exp mod m`, scanning the exponent from its most significant bit.
pub fn modpow<E: Exponent + ?Sized>(base: &BigUint, exp: &E, m: &BigUint) -> VdfResult<BigUint> {
    ensure_modulus(m)?;
    let base = reduce(base, m)?;
    let mut acc = reduce(&BigUint::one(), m)?;
    for i in (0..exp.bit_len()).rev() {
        acc = mulmod(&acc, &acc, m)?;
        if exp.bit(i) {
            acc = mulmod(&acc, &base, m)?;
        }
    }
    Ok(acc)
}

/// `2^t mod l`: the Wesolowski remainder `r` for `t` squarings.
pub fn mod_reduce(t: u64, l: &BigUint) -> VdfResult<BigUint> {
    modpow(&BigUint::from_u64(2), &t, l)
}

/// Schoolbook product of two little-endian limb slices.
fn mul_limbs(a: &[u64], b: &[u64]) -> Vec<u64> {
    let mut out = vec![0u64; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        let mut carry = 0u128;
        for (j, &y) in b.iter().enumerate() {
            let t = u128::from(x) * u128::from(y) + u128::from(out[i + j]) + carry;
            out[i + j] = t as u64;
            carry = t >> 64;
        }
        out[i + b.len()] = carry as u64;
    }
    out
}

/// Remainder of `u / v` over little-endian limbs. `v` must be non-zero.
fn rem_limbs(u: &[u64], v: &[u64]) -> Vec<u64> {
    let u = &u[..significant_len(u)];
    let v = &v[..significant_len(v)];
    let n = v.len();
    debug_assert!(n > 0 && n <= MAX_LIMBS);

    if cmp_limbs(u, v).is_lt() {
        return u.to_vec();
    }
    if n == 1 {
        let d = u128::from(v[0]);
        let r = u.iter().rev().fold(0u128, |r, limb| ((r << 64) | u128::from(*limb)) % d);
        return vec![r as u64];
    }

    // Normalize so the divisor's top limb has its high bit set.
    let shift = v[n - 1].leading_zeros();
    let vn = shl_limbs(v, shift, n);
    let mut un = shl_limbs(u, shift, u.len() + 1);
    let m = u.len() - n;
    let top = u128::from(vn[n - 1]);
    let next = u128::from(vn[n - 2]);
    let base = 1u128 << 64;

    for j in (0..=m).rev() {
        let num = (u128::from(un[j + n]) << 64) | u128::from(un[j + n - 1]);
        let mut qhat = num / top;
        let mut rhat = num % top;
        while qhat >= base || qhat * next > ((rhat << 64) | u128::from(un[j + n - 2])) {
            qhat -= 1;
            rhat += top;
            if rhat >= base {
                break;
            }
        }

        // un[j..=j+n] -= qhat * vn
        let mut borrow: i128 = 0;
        for i in 0..n {
            let p = qhat * u128::from(vn[i]);
            let t = i128::from(un[i + j]) - borrow - (p as u64) as i128;
            un[i + j] = t as u64;
            borrow = (p >> 64) as i128 - (t >> 64);
        }
        let t = i128::from(un[j + n]) - borrow;
        un[j + n] = t as u64;

        if t < 0 {
            // qhat was one too large: add the divisor back.
            let mut carry = 0u128;
            for i in 0..n {
                let s = u128::from(un[i + j]) + u128::from(vn[i]) + carry;
                un[i + j] = s as u64;
                carry = s >> 64;
            }
            un[j + n] = un[j + n].wrapping_add(carry as u64);
        }
    }

    shr_limbs(&un[..n], shift)
}

/// `src << shift` (shift < 64) into a buffer of `len` limbs.
fn shl_limbs(src: &[u64], shift: u32, len: usize) -> Vec<u64> {
    let mut out = vec![0u64; len];
    let mut carry = 0u64;
    for (i, &limb) in src.iter().enumerate() {
        out[i] = (limb << shift) | carry;
        carry = if shift == 0 { 0 } else { limb >> (64 - shift) };
    }
    if src.len() < len {
        out[src.len()] = carry;
    }
    out
}

/// `src >> shift` (shift < 64).
fn shr_limbs(src: &[u64], shift: u32) -> Vec<u64> {
    if shift == 0 {
        return src.to_vec();
    }
    (0..src.len())
        .map(|i| {
            let hi = src.get(i + 1).map_or(0, |next| next << (64 - shift));
            (src[i] >> shift) | hi
        })
        .collect()
}

/// `m - 1` for a non-zero modulus.
pub(crate) fn minus_one(m: &BigUint) -> BigUint {
    let mut limbs = m.limbs().to_vec();
    sub_assign_limbs(&mut limbs, &[1]);
    BigUint::from_limbs(&limbs).unwrap_or_default()
}
