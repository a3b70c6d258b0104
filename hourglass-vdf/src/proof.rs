#![forbid(unsafe_code)]

//! Proof tuples and their hex file form.

use serde::{Deserialize, Serialize};

use hourglass_core::VdfResult;

use crate::bigint::BigUint;

/// A Wesolowski proof tuple `(g, y, pi, t, l)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proof {
    /// VDF input.
    pub g: BigUint,
    /// Claimed output `g^(2^t) mod N`.
    pub y: BigUint,
    /// Proof element `g^floor(2^t / l) mod N`.
    pub pi: BigUint,
    /// Number of sequential squarings.
    pub t: u64,
    /// Fiat-Shamir challenge prime.
    pub l: BigUint,
}

impl Proof {
    /// Parse the big-endian byte form. Any field wider than the supported
    /// width is [`hourglass_core::VdfError::MalformedInput`].
    pub fn from_bytes(g: &[u8], y: &[u8], pi: &[u8], t: u64, l: &[u8]) -> VdfResult<Self> {
        Ok(Self {
            g: BigUint::from_bytes_be(g)?,
            y: BigUint::from_bytes_be(y)?,
            pi: BigUint::from_bytes_be(pi)?,
            t,
            l: BigUint::from_bytes_be(l)?,
        })
    }
}

/// Serialized proof with hex-encoded group elements, as stored in JSON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofFile {
    pub g: String,
    pub y: String,
    pub pi: String,
    pub t: u64,
    pub l: String,
}

impl ProofFile {
    pub fn to_proof(&self) -> VdfResult<Proof> {
        Ok(Proof {
            g: BigUint::from_hex(&self.g)?,
            y: BigUint::from_hex(&self.y)?,
            pi: BigUint::from_hex(&self.pi)?,
            t: self.t,
            l: BigUint::from_hex(&self.l)?,
        })
    }
}

impl From<&Proof> for ProofFile {
    fn from(p: &Proof) -> Self {
        Self {
            g: p.g.to_hex(),
            y: p.y.to_hex(),
            pi: p.pi.to_hex(),
            t: p.t,
            l: p.l.to_hex(),
        }
    }
}
