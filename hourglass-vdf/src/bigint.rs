#![forbid(unsafe_code)]

//! Fixed-capacity unsigned integers.
//!
//! [`BigUint`] stores up to [`MAX_BITS`] bits as little-endian 64-bit limbs in
//! an inline array, together with the count of significant limbs. Operations
//! only touch the significant limbs, so a 168-bit challenge costs three limbs
//! of work, not thirty-two.
//!
//! Nothing here wraps: a sum wider than the capacity is
//! [`VdfError::Overflow`] and a negative difference is [`VdfError::Underflow`].

use std::cmp::Ordering;
use std::fmt;

use hourglass_core::{decode_hex, encode_hex};
use hourglass_core::{VdfError, VdfResult};

/// Bits per limb.
pub const LIMB_BITS: usize = 64;
/// Widest representable value, in bits.
pub const MAX_BITS: usize = 2048;
/// Widest accepted big-endian encoding, in bytes.
pub const MAX_BYTES: usize = MAX_BITS / 8;
/// Limb capacity.
pub const MAX_LIMBS: usize = MAX_BITS / LIMB_BITS;

/// Unsigned integer of at most [`MAX_BITS`] bits.
///
/// Invariant: `limbs[len..]` are zero and `limbs[len - 1]` is non-zero when
/// `len > 0`. Zero has `len == 0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BigUint {
    limbs: [u64; MAX_LIMBS],
    len: usize,
}

impl BigUint {
    #[must_use]
    pub const fn zero() -> Self {
        Self { limbs: [0; MAX_LIMBS], len: 0 }
    }

    #[must_use]
    pub const fn one() -> Self {
        Self::from_u64(1)
    }

    #[must_use]
    pub const fn from_u64(v: u64) -> Self {
        let mut limbs = [0; MAX_LIMBS];
        limbs[0] = v;
        Self { limbs, len: if v == 0 { 0 } else { 1 } }
    }

    /// Build from little-endian limbs. High zero limbs are ignored; anything
    /// significant beyond the capacity is an overflow.
    pub fn from_limbs(src: &[u64]) -> VdfResult<Self> {
        let len = significant_len(src);
        if len > MAX_LIMBS {
            return Err(VdfError::Overflow { max_bits: MAX_BITS });
        }
        let mut out = Self::zero();
        out.limbs[..len].copy_from_slice(&src[..len]);
        out.len = len;
        Ok(out)
    }

    /// Parse a big-endian byte string.
    ///
    /// Leading zero bytes are accepted but still count towards the width
    /// limit: anything longer than [`MAX_BYTES`] is [`VdfError::MalformedInput`].
    pub fn from_bytes_be(bytes: &[u8]) -> VdfResult<Self> {
        if bytes.len() > MAX_BYTES {
            return Err(VdfError::MalformedInput { len: bytes.len(), max: MAX_BYTES });
        }
        let mut out = Self::zero();
        for (i, chunk) in bytes.rchunks(8).enumerate() {
            let mut word = [0u8; 8];
            word[8 - chunk.len()..].copy_from_slice(chunk);
            out.limbs[i] = u64::from_be_bytes(word);
        }
        out.normalize();
        Ok(out)
    }

    /// Parse hex text (optional `0x`, odd digit counts allowed).
    pub fn from_hex(text: &str) -> VdfResult<Self> {
        Self::from_bytes_be(&decode_hex(text)?)
    }

    /// Minimal big-endian encoding. Zero encodes as a single `0x00` byte.
    #[must_use]
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.is_zero() {
            return vec![0];
        }
        let mut out = Vec::with_capacity(self.len * 8);
        for limb in self.limbs[..self.len].iter().rev() {
            out.extend_from_slice(&limb.to_be_bytes());
        }
        let skip = out.iter().take_while(|b| **b == 0).count();
        out.drain(..skip);
        out
    }

    /// Big-endian encoding left-padded to exactly `width` bytes.
    pub fn to_bytes_be_padded(&self, width: usize) -> VdfResult<Vec<u8>> {
        let needed = self.byte_len();
        if needed > width {
            return Err(VdfError::MalformedInput { len: needed, max: width });
        }
        let mut out = vec![0u8; width - needed];
        if needed > 0 {
            out.extend_from_slice(&self.to_bytes_be());
        }
        Ok(out)
    }

    /// Lowercase `0x`-prefixed hex of the minimal encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        encode_hex(&self.to_bytes_be())
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_one(&self) -> bool {
        self.len == 1 && self.limbs[0] == 1
    }

    #[must_use]
    pub fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    /// Significant limbs, least significant first.
    #[must_use]
    pub fn limbs(&self) -> &[u64] {
        &self.limbs[..self.len]
    }

    /// Number of significant bits.
    #[must_use]
    pub fn bits(&self) -> usize {
        match self.len {
            0 => 0,
            n => n * LIMB_BITS - self.limbs[n - 1].leading_zeros() as usize,
        }
    }

    /// Number of bytes in the minimal encoding (zero for zero).
    #[must_use]
    pub fn byte_len(&self) -> usize {
        (self.bits() + 7) / 8
    }

    /// Bit `i`, counting from the least significant.
    #[must_use]
    pub fn bit(&self, i: usize) -> bool {
        let limb = i / LIMB_BITS;
        limb < self.len && (self.limbs[limb] >> (i % LIMB_BITS)) & 1 == 1
    }

    /// Count of trailing zero bits; zero has none.
    #[must_use]
    pub fn trailing_zeros(&self) -> usize {
        self.limbs()
            .iter()
            .position(|l| *l != 0)
            .map_or(0, |i| i * LIMB_BITS + self.limbs[i].trailing_zeros() as usize)
    }

    /// Ripple-carry addition.
    pub fn checked_add(&self, other: &Self) -> VdfResult<Self> {
        let width = self.len.max(other.len);
        let mut out = Self::zero();
        let mut carry = false;
        for i in 0..width {
            let (s, c1) = self.limbs[i].overflowing_add(other.limbs[i]);
            let (s, c2) = s.overflowing_add(u64::from(carry));
            out.limbs[i] = s;
            carry = c1 || c2;
        }
        if carry {
            if width == MAX_LIMBS {
                return Err(VdfError::Overflow { max_bits: MAX_BITS });
            }
            out.limbs[width] = 1;
        }
        out.normalize();
        Ok(out)
    }

    /// Ripple-borrow subtraction; `self < other` is an underflow.
    pub fn checked_sub(&self, other: &Self) -> VdfResult<Self> {
        if *self < *other {
            return Err(VdfError::Underflow);
        }
        let mut out = *self;
        sub_assign_limbs(&mut out.limbs[..self.len], other.limbs());
        out.normalize();
        Ok(out)
    }

    /// `self + v` for a small addend.
    pub fn checked_add_u64(&self, v: u64) -> VdfResult<Self> {
        self.checked_add(&Self::from_u64(v))
    }

    /// Shift right by `n` bits.
    #[must_use]
    pub fn shr(&self, n: usize) -> Self {
        let limb_shift = n / LIMB_BITS;
        let bit_shift = n % LIMB_BITS;
        let mut out = Self::zero();
        if limb_shift >= self.len {
            return out;
        }
        let src = &self.limbs[limb_shift..self.len];
        for (i, limb) in src.iter().enumerate() {
            out.limbs[i] = limb >> bit_shift;
            if bit_shift > 0 {
                if let Some(next) = src.get(i + 1) {
                    out.limbs[i] |= next << (LIMB_BITS - bit_shift);
                }
            }
        }
        out.normalize();
        out
    }

    /// Remainder modulo a single limb.
    pub fn rem_u64(&self, d: u64) -> VdfResult<u64> {
        if d == 0 {
            return Err(VdfError::InvalidModulus("division by zero"));
        }
        let d = u128::from(d);
        let rem = self
            .limbs()
            .iter()
            .rev()
            .fold(0u128, |r, limb| ((r << 64) | u128::from(*limb)) % d);
        Ok(rem as u64)
    }

    fn normalize(&mut self) {
        self.len = significant_len(&self.limbs);
    }
}

/// Length of `limbs` once high zero limbs are dropped.
pub(crate) fn significant_len(limbs: &[u64]) -> usize {
    limbs.iter().rposition(|l| *l != 0).map_or(0, |i| i + 1)
}

/// `a -= b` over little-endian limbs. Requires `a >= b` as integers and
/// `a.len() >= b.len()`; returns the final borrow (zero when the precondition
/// holds).
pub(crate) fn sub_assign_limbs(a: &mut [u64], b: &[u64]) -> bool {
    let mut borrow = false;
    for (i, limb) in a.iter_mut().enumerate() {
        if i >= b.len() && !borrow {
            break;
        }
        let rhs = b.get(i).copied().unwrap_or(0);
        let (d, b1) = limb.overflowing_sub(rhs);
        let (d, b2) = d.overflowing_sub(u64::from(borrow));
        *limb = d;
        borrow = b1 || b2;
    }
    borrow
}

/// Compare two normalized limb slices.
pub(crate) fn cmp_limbs(a: &[u64], b: &[u64]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_limbs(self.limbs(), other.limbs())
    }
}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for BigUint {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<u64> for BigUint {
    fn from(v: u64) -> Self {
        Self::from_u64(v)
    }
}

impl fmt::Debug for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigUint({})", self.to_hex())
    }
}

impl fmt::LowerHex for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(self.to_bytes_be()))
    }
}

impl fmt::Display for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
