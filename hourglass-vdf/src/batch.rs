#![forbid(unsafe_code)]

//! Parallel verification of independent proofs.
//!
//! Verifications share nothing but the immutable verifier, so they fan out
//! over the rayon pool without synchronization.

use rayon::prelude::*;
use tracing::debug;

use crate::proof::Proof;
use crate::verifier::{VdfVerifier, Verdict};

/// Verify every proof, preserving input order.
#[must_use]
pub fn verify_batch(verifier: &VdfVerifier, proofs: &[Proof]) -> Vec<bool> {
    verify_batch_detailed(verifier, proofs)
        .into_iter()
        .map(Verdict::is_accepted)
        .collect()
}

/// Like [`verify_batch`] but keeps the rejection reasons.
#[must_use]
pub fn verify_batch_detailed(verifier: &VdfVerifier, proofs: &[Proof]) -> Vec<Verdict> {
    let verdicts: Vec<Verdict> = proofs.par_iter().map(|p| verifier.verify_detailed(p)).collect();
    let accepted = verdicts.iter().filter(|v| v.is_accepted()).count();
    debug!(total = proofs.len(), accepted, "batch verified");
    verdicts
}
